//! Screen-side contracts: rendering and navigation.

use super::listing_context::PrimaryAction;
use super::view_model::ItemViewModel;
use crate::errors::Error;
use crate::items::ListItem;

/// Renders the outcome of a load.
///
/// Calls are made from the loader's session and must not block.
pub trait ListPresenter: Send + Sync {
    /// Replaces the displayed rows.
    fn present(&self, items: &[ItemViewModel]);

    /// Shows a user-visible error.
    fn present_error(&self, error: &Error);

    /// Toggles the pull-to-refresh indicator.
    fn set_refreshing(&self, refreshing: bool) {
        let _ = refreshing;
    }
}

/// Routes the user to other screens.
pub trait ItemNavigator: Send + Sync {
    /// Opens the detail screen for a selected entity.
    fn show_details(&self, item: &ListItem);

    /// Starts the flow behind a screen's primary bar action.
    fn open(&self, action: PrimaryAction);
}
