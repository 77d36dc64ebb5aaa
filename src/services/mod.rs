pub mod classifier;
pub mod delivery_service;
pub mod file_service;
pub mod image_service;
pub mod listing_service;

pub use delivery_service::DeliveryService;
pub use file_service::{FileService, PathKind, ResolvedPath};
pub use listing_service::ListingService;
