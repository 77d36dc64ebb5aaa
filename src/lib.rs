//! Vitrine - browse a directory of photos and videos over HTTP
//!
//! Directories render as plain listings or image galleries; files are
//! streamed back as-is, resized on request (images) or served in byte
//! ranges (video). The filesystem is read fresh on every request.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

use axum::{Router, routing::get};

// Re-export commonly used items
pub use config::{Args, Config};
pub use errors::BrowserError;
pub use types::{AppState, ByteRange, DeliveryRequest, Entry, MediaKind, RenderContext, RenderMode};
pub use services::{DeliveryService, FileService, ListingService};
pub use components::{ListingComponent, NavigationComponent, TemplateComponent};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/favicon.ico", get(handlers::handle_favicon))
        .route("/assets/*path", get(handlers::handle_asset))
        .route("/*path", get(handlers::handle_path))
        .with_state(state)
}
