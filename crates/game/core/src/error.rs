//! Common error infrastructure for possession-core.
//!
//! The concrete error enum for holder-graph operations is
//! [`HoldingError`](crate::state::HoldingError); this module only carries the
//! classification shared by every error the crate returns.
//!
//! Every rejected operation leaves the holder graph exactly as it was, so no
//! variant ever calls for a rollback by the caller. Severity only tells the
//! caller whether trying something else could succeed.

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The request was well-formed but the world cannot satisfy it right now.
    ///
    /// Examples: anchor occupied, not enough carrying capacity left.
    Recoverable,

    /// The request itself is invalid and will never succeed unchanged.
    ///
    /// Examples: unknown item handle, anchor index out of range, bad name.
    Validation,

    /// The holder graph disagrees with itself. Indicates a bug in this crate.
    Internal,
}

impl ErrorSeverity {
    /// Returns true if a different request against the same world may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all possession-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Keep `error_code` stable: tests and logs match on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
