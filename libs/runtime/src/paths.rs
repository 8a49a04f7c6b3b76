use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the application home directory.
///
/// - `Some(path)`: used as-is; relative paths are resolved against the
///   current working directory.
/// - `None`: `$HOME/<default_subdir>` (platform home via `dirs`).
///
/// The directory is created when `create` is set.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match configured {
        Some(p) => {
            let p = PathBuf::from(p);
            if p.is_absolute() {
                p
            } else {
                std::env::current_dir()
                    .context("Failed to read current working directory")?
                    .join(p)
            }
        }
        None => dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine the user home directory"))?
            .join(default_subdir),
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("Failed to create home directory {}", resolved.display()))?;
    }

    Ok(resolved)
}
