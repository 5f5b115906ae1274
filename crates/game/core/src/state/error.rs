//! Holder-graph errors.
//!
//! Every variant describes a rejected request. A rejected request never changes
//! the world; the one destructive-but-accepted outcome (a purse tearing) is a
//! [`DukatOutcome`](crate::state::DukatOutcome), not an error.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Holder, ItemHandle};

/// Why a holder refused an item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// The item handle does not resolve to an item in this world.
    NullItem,
    /// The holder does not exist or is not a container.
    UnknownHolder,
    /// The item already has a different holder.
    AlreadyHeld,
    /// The holder's own remaining capacity is smaller than the item's weight.
    OverCapacity,
    /// A holder further up the chain could not bear the extra weight.
    AncestorOverCapacity,
    /// Accepting the item would make a container hold itself.
    WouldCreateCycle,
    /// The monster has no empty anchor left.
    NoFreeAnchor,
    /// The monster has no equipped container to store the item in.
    NoContainer,
}

/// Errors returned by holder-graph operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HoldingError {
    /// A scalar input was out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    /// The item refused the prospective holder.
    #[error("{holder} is not a valid holder for {item}: {reason}")]
    InvalidHolder {
        item: ItemHandle,
        holder: Holder,
        reason: RejectReason,
    },

    /// The holder refused the item.
    #[error("cannot obtain {item}: {reason}")]
    CannotObtain {
        item: ItemHandle,
        reason: RejectReason,
    },

    /// The item handle does not resolve to an item in this world.
    #[error("{item} does not exist")]
    NullItem { item: ItemHandle },

    /// The monster id does not resolve to a monster in this world.
    #[error("{monster} does not exist")]
    UnknownMonster { monster: EntityId },

    /// The container does not hold the item.
    #[error("{item} is not inside {container}")]
    NotFound {
        item: ItemHandle,
        container: ItemHandle,
    },

    /// The monster does not carry the item in any anchor.
    #[error("{item} is not equipped by {monster}")]
    NotEquipped { item: ItemHandle, monster: EntityId },

    /// Anchor index outside `[0, anchors)`.
    #[error("anchor {anchor} out of range (monster has {anchors} anchors)")]
    IndexOutOfRange { anchor: usize, anchors: usize },

    /// The target anchor already holds an item.
    #[error("anchor {anchor} is occupied by {occupant}")]
    SlotOccupied {
        anchor: usize,
        occupant: ItemHandle,
    },

    /// A purse was asked for more dukats than it holds.
    #[error("purse holds {available} dukats, {requested} requested")]
    InsufficientDukats { available: u32, requested: u32 },

    /// A best-effort batch stopped at `index`. Earlier items stay placed.
    #[error("batch stopped at position {index}: {source}")]
    BatchFailed {
        index: usize,
        #[source]
        source: Box<HoldingError>,
    },

    /// The world already holds as many items or monsters as ids can address.
    #[error("no {arena} id left to allocate")]
    ArenaFull { arena: &'static str },

    /// The item graph disagrees with itself.
    #[error("invariant violated at {item}: {detail}")]
    InvariantViolated {
        item: ItemHandle,
        detail: &'static str,
    },
}

impl HoldingError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { field, reason }
    }

    /// The rejection reason for holder-side and item-side refusals.
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::InvalidHolder { reason, .. } | Self::CannotObtain { reason, .. } => {
                Some(*reason)
            }
            Self::BatchFailed { source, .. } => source.reject_reason(),
            _ => None,
        }
    }
}

impl GameError for HoldingError {
    fn severity(&self) -> ErrorSeverity {
        use HoldingError::*;
        match self {
            InvalidArgument { .. }
            | NullItem { .. }
            | UnknownMonster { .. }
            | NotFound { .. }
            | NotEquipped { .. }
            | IndexOutOfRange { .. } => ErrorSeverity::Validation,

            InvalidHolder { .. }
            | CannotObtain { .. }
            | SlotOccupied { .. }
            | InsufficientDukats { .. } => ErrorSeverity::Recoverable,

            BatchFailed { source, .. } => source.severity(),

            ArenaFull { .. } | InvariantViolated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use HoldingError::*;
        match self {
            InvalidArgument { .. } => "HOLDING_INVALID_ARGUMENT",
            InvalidHolder { .. } => "HOLDING_INVALID_HOLDER",
            CannotObtain { .. } => "HOLDING_CANNOT_OBTAIN",
            NullItem { .. } => "HOLDING_NULL_ITEM",
            UnknownMonster { .. } => "HOLDING_UNKNOWN_MONSTER",
            NotFound { .. } => "HOLDING_NOT_FOUND",
            NotEquipped { .. } => "HOLDING_NOT_EQUIPPED",
            IndexOutOfRange { .. } => "HOLDING_INDEX_OUT_OF_RANGE",
            SlotOccupied { .. } => "HOLDING_SLOT_OCCUPIED",
            InsufficientDukats { .. } => "HOLDING_INSUFFICIENT_DUKATS",
            BatchFailed { .. } => "HOLDING_BATCH_FAILED",
            ArenaFull { .. } => "HOLDING_ARENA_FULL",
            InvariantViolated { .. } => "HOLDING_INVARIANT_VIOLATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_failure_inherits_inner_classification() {
        let inner = HoldingError::CannotObtain {
            item: ItemHandle(4),
            reason: RejectReason::OverCapacity,
        };
        let batch = HoldingError::BatchFailed {
            index: 2,
            source: Box::new(inner),
        };

        assert_eq!(batch.severity(), ErrorSeverity::Recoverable);
        assert_eq!(batch.reject_reason(), Some(RejectReason::OverCapacity));
        assert_eq!(batch.error_code(), "HOLDING_BATCH_FAILED");
    }

    #[test]
    fn messages_name_the_reason() {
        let err = HoldingError::CannotObtain {
            item: ItemHandle(1),
            reason: RejectReason::AlreadyHeld,
        };
        assert_eq!(err.to_string(), "cannot obtain item#1: already_held");
    }
}
