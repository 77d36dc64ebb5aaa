pub mod listing;
pub mod navigation;
pub mod templates;

pub use listing::ListingComponent;
pub use navigation::NavigationComponent;
pub use templates::TemplateComponent;
