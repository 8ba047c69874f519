//! Per-screen context configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formatting::DateStyle;
use crate::items::{EntityKind, ListItem};

/// Which list a screen shows. Chosen once when the screen is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListKind {
    Friends,
    Cards,
    SentTransfers,
    ReceivedTransfers,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::Friends,
        ListKind::Cards,
        ListKind::SentTransfers,
        ListKind::ReceivedTransfers,
    ];

    /// Screen title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Friends => "Friends",
            Self::Cards => "Cards",
            Self::SentTransfers => "Sent",
            Self::ReceivedTransfers => "Received",
        }
    }

    /// The screen's primary bar action.
    pub fn primary_action(self) -> PrimaryAction {
        match self {
            Self::Friends => PrimaryAction::AddFriend,
            Self::Cards => PrimaryAction::AddCard,
            Self::SentTransfers => PrimaryAction::SendMoney,
            Self::ReceivedTransfers => PrimaryAction::RequestMoney,
        }
    }

    /// The only entity variant this list can display.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Friends => EntityKind::Friend,
            Self::Cards => EntityKind::Card,
            Self::SentTransfers | Self::ReceivedTransfers => EntityKind::Transfer,
        }
    }

    pub fn is_transfers(self) -> bool {
        matches!(self, Self::SentTransfers | Self::ReceivedTransfers)
    }

    /// Post-fetch filter applied before projection.
    ///
    /// Transfer lists share one source, so sent and received transfers are
    /// separated by the user's role. Every other list keeps all entities;
    /// mismatched variants are rejected later by the projector.
    pub fn retains(self, item: &ListItem) -> bool {
        match (self, item.as_transfer()) {
            (Self::SentTransfers, Some(transfer)) => transfer.is_sender,
            (Self::ReceivedTransfers, Some(transfer)) => !transfer.is_sender,
            _ => true,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when parsing an unknown list name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown list '{0}', expected one of: friends, cards, sent, received")]
pub struct ParseListKindError(pub String);

impl FromStr for ListKind {
    type Err = ParseListKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "friends" => Ok(Self::Friends),
            "cards" => Ok(Self::Cards),
            "sent" | "sent_transfers" => Ok(Self::SentTransfers),
            "received" | "received_transfers" => Ok(Self::ReceivedTransfers),
            _ => Err(ParseListKindError(s.to_string())),
        }
    }
}

/// Bar-button action offered by each list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAction {
    AddFriend,
    AddCard,
    SendMoney,
    RequestMoney,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddFriend | Self::AddCard => "Add",
            Self::SendMoney => "Send",
            Self::RequestMoney => "Request",
        }
    }
}

/// Immutable settings for one list screen: data source, retry policy and
/// formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    kind: ListKind,
    should_retry: bool,
    max_retry_count: u32,
    long_date_style: bool,
}

impl ListContext {
    /// Builds a custom context. `max_retry_count` is forced to 0 when
    /// retries are disabled.
    pub fn new(
        kind: ListKind,
        should_retry: bool,
        max_retry_count: u32,
        long_date_style: bool,
    ) -> Self {
        Self {
            kind,
            should_retry,
            max_retry_count: if should_retry { max_retry_count } else { 0 },
            long_date_style,
        }
    }

    /// The preconfigured context for `kind`.
    pub fn for_kind(kind: ListKind) -> Self {
        match kind {
            ListKind::Friends => Self::new(kind, true, 2, false),
            ListKind::Cards => Self::new(kind, false, 0, false),
            ListKind::SentTransfers => Self::new(kind, true, 1, true),
            ListKind::ReceivedTransfers => Self::new(kind, true, 1, false),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn should_retry(&self) -> bool {
        self.should_retry
    }

    pub fn max_retry_count(&self) -> u32 {
        self.max_retry_count
    }

    pub fn long_date_style(&self) -> bool {
        self.long_date_style
    }

    pub fn date_style(&self) -> DateStyle {
        if self.long_date_style {
            DateStyle::Long
        } else {
            DateStyle::Short
        }
    }

    /// Whether a failed fetch may be re-issued after `retry_count` retries.
    pub fn allows_retry(&self, retry_count: u32) -> bool {
        self.should_retry && retry_count < self.max_retry_count
    }
}

impl From<ListKind> for ListContext {
    fn from(kind: ListKind) -> Self {
        Self::for_kind(kind)
    }
}
