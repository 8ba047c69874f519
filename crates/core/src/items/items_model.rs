//! Domain entities shown by the list screen.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment card owned by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub number: String,
    pub holder: String,
}

/// A contact the user can send money to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub name: String,
    pub phone: String,
}

/// A money transfer, either sent or received by the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub amount: Decimal,
    pub currency_code: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub sender: String,
    pub recipient: String,
    /// True when the current user is the sender of this transfer.
    pub is_sender: bool,
}

/// Discriminant of [`ListItem`], used in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Card,
    Friend,
    Transfer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "Card"),
            Self::Friend => write!(f, "Friend"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// Any entity a list screen can display.
///
/// Data sources return this closed set; the projector matches on it
/// exhaustively, so a new entity kind is a compile-time change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListItem {
    Card(Card),
    Friend(Friend),
    Transfer(Transfer),
}

impl ListItem {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Card(_) => EntityKind::Card,
            Self::Friend(_) => EntityKind::Friend,
            Self::Transfer(_) => EntityKind::Transfer,
        }
    }

    pub fn as_friend(&self) -> Option<&Friend> {
        match self {
            Self::Friend(friend) => Some(friend),
            _ => None,
        }
    }

    pub fn as_transfer(&self) -> Option<&Transfer> {
        match self {
            Self::Transfer(transfer) => Some(transfer),
            _ => None,
        }
    }
}

impl From<Card> for ListItem {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

impl From<Friend> for ListItem {
    fn from(friend: Friend) -> Self {
        Self::Friend(friend)
    }
}

impl From<Transfer> for ListItem {
    fn from(transfer: Transfer) -> Self {
        Self::Transfer(transfer)
    }
}
