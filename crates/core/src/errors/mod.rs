//! Error types and retry classification for list loading.
//!
//! This module provides:
//! - [`Error`]: The error enum for every list-screen operation
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

use crate::items::EntityKind;
use crate::listing::ListKind;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or projecting list items.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A data source failed to deliver its entities.
    /// Transient - retried according to the screen's retry policy.
    #[error("Failed to load {kind}: {message}")]
    Fetch {
        /// The list the fetch was issued for
        kind: ListKind,
        /// The failure reported by the source
        message: String,
    },

    /// An entity reached a list that cannot display it.
    /// This is a contract violation between a source and the screen.
    #[error("Unsupported entity kind: {entity} cannot be shown in {context}")]
    UnsupportedEntityKind {
        /// The list that received the entity
        context: ListKind,
        /// The entity variant that was received
        entity: EntityKind,
    },

    /// The local friends cache had nothing to offer.
    /// Never surfaced on its own; the upstream fetch error wins.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),
}

impl Error {
    /// Convenience constructor for source implementations.
    pub fn fetch(kind: ListKind, message: impl Into<String>) -> Self {
        Self::Fetch {
            kind,
            message: message.into(),
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use iacc_core::errors::{Error, RetryClass};
    /// use iacc_core::listing::ListKind;
    ///
    /// let error = Error::fetch(ListKind::Friends, "connection reset");
    /// assert_eq!(error.retry_class(), RetryClass::Retry);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Fetch { .. } => RetryClass::Retry,
            Self::UnsupportedEntityKind { .. } | Self::CacheUnavailable(_) => RetryClass::Never,
        }
    }

    /// True for errors that indicate a programming mistake rather than a
    /// runtime condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::UnsupportedEntityKind { .. })
    }
}
