use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::registry::UserRegistry;

/// Register the users REST routes on the given router.
pub fn register_routes(router: Router, registry: Arc<UserRegistry>) -> Router {
    router
        .route("/users", post(handlers::create_user))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(registry))
}
