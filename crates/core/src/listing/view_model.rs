//! Uniform display model and the projection from list entities into it.

use std::fmt;
use std::sync::{Arc, Weak};

use super::listing_context::ListContext;
use super::listing_traits::ItemNavigator;
use crate::errors::{Error, Result};
use crate::formatting::{format_currency, format_date, DateStyle};
use crate::items::{Card, Friend, ListItem, Transfer};

/// Zero-argument callback run when the user selects a row.
#[derive(Clone)]
pub struct SelectAction(Arc<dyn Fn() + Send + Sync>);

impl SelectAction {
    pub fn new(action: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(action))
    }

    /// An action that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Opens the detail screen for `item`.
    ///
    /// The navigator is held weakly; once the screen is gone the action is a
    /// no-op.
    pub fn show_details(item: ListItem, navigator: Weak<dyn ItemNavigator>) -> Self {
        Self::new(move || {
            if let Some(navigator) = navigator.upgrade() {
                navigator.show_details(&item);
            }
        })
    }

    pub fn invoke(&self) {
        (self.0)()
    }
}

impl fmt::Debug for SelectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectAction")
    }
}

/// One row of a list screen.
#[derive(Debug, Clone)]
pub struct ItemViewModel {
    title: String,
    subtitle: String,
    select: SelectAction,
}

impl ItemViewModel {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        select: SelectAction,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            select,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Runs the bound selection action.
    pub fn select(&self) {
        self.select.invoke();
    }
}

/// Projects `item` into a row for the list described by `context`.
///
/// `on_select` is stored as-is and only runs when the row is selected.
/// Fails with [`Error::UnsupportedEntityKind`] when the entity variant does
/// not belong in this list.
pub fn project(
    item: &ListItem,
    context: &ListContext,
    on_select: SelectAction,
) -> Result<ItemViewModel> {
    let expected = context.kind().entity_kind();
    if item.kind() != expected {
        return Err(Error::UnsupportedEntityKind {
            context: context.kind(),
            entity: item.kind(),
        });
    }

    let (title, subtitle) = match item {
        ListItem::Card(card) => card_rows(card),
        ListItem::Friend(friend) => friend_rows(friend),
        ListItem::Transfer(transfer) => transfer_rows(transfer, context.date_style()),
    };

    Ok(ItemViewModel::new(title, subtitle, on_select))
}

fn card_rows(card: &Card) -> (String, String) {
    (card.number.clone(), card.holder.clone())
}

fn friend_rows(friend: &Friend) -> (String, String) {
    (friend.name.clone(), friend.phone.clone())
}

// Long style always names the recipient and short style the sender.
fn transfer_rows(transfer: &Transfer, style: DateStyle) -> (String, String) {
    let amount = format_currency(transfer.amount, &transfer.currency_code);
    let title = format!("{} • {}", amount, transfer.description);
    let date = format_date(&transfer.date, style);

    let subtitle = match style {
        DateStyle::Long => format!("Sent to: {} on {}", transfer.recipient, date),
        DateStyle::Short => format!("Received from: {} on {}", transfer.sender, date),
    };
    (title, subtitle)
}
