//! Listing module - screen context, row projection and the load orchestrator.

mod list_loader;
mod listing_context;
mod listing_traits;
mod view_model;


pub use list_loader::{ItemSources, ListLoader, LoadOutcome, LoadState};
pub use listing_context::{ListContext, ListKind, ParseListKindError, PrimaryAction};
pub use listing_traits::{ItemNavigator, ListPresenter};
pub use view_model::{project, ItemViewModel, SelectAction};
