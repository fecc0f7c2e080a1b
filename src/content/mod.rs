//! Content configuration and the loader that binds it into the page.

pub mod binders;
pub mod binding;
pub mod fetcher;
pub mod loader;
pub mod model;
pub mod templates;

pub use binders::Section;
pub use binding::BindingTable;
pub use fetcher::{ConfigFetcher, ConfigSource};
pub use loader::{BindSchedule, ContentLoader, LoadState, PendingLoad};
pub use model::{ContentConfig, Text};
