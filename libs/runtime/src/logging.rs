use crate::config::{LoggingConfig, Section};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------

fn parse_level_filter(s: &str) -> LevelFilter {
    match s.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

// -------- path resolution helpers --------

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Create a rotating writer for log files, ensuring the parent directory exists.
fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- public init --------

/// Initialize logging from a configuration.
///
/// The "default" section drives the catch-all console level and the file
/// sink; any other section keys are crate targets with their own console
/// level. `base_dir` (usually server.home_dir) anchors relative log paths.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let default_section = cfg.get("default");

    let console_default = default_section
        .map(|s| parse_level_filter(&s.console_level))
        .unwrap_or(LevelFilter::INFO);
    let mut console_targets = Targets::new().with_default(console_default);
    for (name, section) in cfg.iter().filter(|(k, _)| k.as_str() != "default") {
        console_targets =
            console_targets.with_target(name.clone(), parse_level_filter(&section.console_level));
    }

    let console_layer = fmt::layer().with_target(true).with_filter(console_targets);

    let file_layer = default_section.and_then(|section| build_file_layer(section, base_dir));

    // Keep an existing subscriber if one is already installed (tests)
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn build_file_layer<S>(section: &Section, base_dir: &Path) -> Option<impl Layer<S>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if section.file.is_empty() {
        return None;
    }

    let file_level = if section.file_level.is_empty() {
        LevelFilter::DEBUG
    } else {
        parse_level_filter(&section.file_level)
    };
    if file_level == LevelFilter::OFF {
        return None;
    }

    let log_path = resolve_log_path(&section.file, base_dir);
    let max_bytes = section.max_size_mb.unwrap_or(100) as usize * 1024 * 1024;

    let writer = match create_rotating_writer_at_path(&log_path, max_bytes) {
        Ok(w) => w,
        Err(e) => {
            eprintln!(
                "Failed to open log file {}: {} (file logging disabled)",
                log_path.display(),
                e
            );
            return None;
        }
    };

    Some(
        fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(Targets::new().with_default(file_level)),
    )
}

/// Console-only fallback used when no logging configuration exists.
pub fn init_default_logging() {
    let _ = tracing_log::LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_filter(Targets::new().with_default(LevelFilter::INFO)),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_accepts_known_names() {
        assert_eq!(parse_level_filter("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level_filter("warn"), LevelFilter::WARN);
        assert_eq!(parse_level_filter("off"), LevelFilter::OFF);
        // Unknown names fall back to info
        assert_eq!(parse_level_filter("loud"), LevelFilter::INFO);
    }

    #[test]
    fn relative_log_paths_resolve_against_base_dir() {
        let base = Path::new("/var/lib/user-service");
        assert_eq!(
            resolve_log_path("logs/api.log", base),
            PathBuf::from("/var/lib/user-service/logs/api.log")
        );
        assert_eq!(
            resolve_log_path("/tmp/api.log", base),
            PathBuf::from("/tmp/api.log")
        );
    }
}
