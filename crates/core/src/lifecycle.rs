//! Status transitions for orders and reservations.
//!
//! Orders move forward one step at a time, `new → preparing → ready →
//! delivered`, and can be cancelled from any non-terminal state.
//! Reservations start `pending`, may be confirmed or cancelled, and a
//! cancelled reservation may be restored to `pending`.
//!
//! Only admin actions drive these transitions. The ordering flow sets the
//! initial `new` status and never touches it again.

use crate::types::{OrderStatus, ReservationStatus};

/// A requested status change that the lifecycle does not allow.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The order is already terminal and cannot be cancelled.
    #[error("order cannot be cancelled from {0}")]
    OrderNotCancellable(OrderStatus),
    /// The order has no next forward state.
    #[error("order cannot advance from {0}")]
    OrderNotAdvanceable(OrderStatus),
    /// Reservation move that is not in the transition table.
    #[error("reservation cannot move from {from} to {to}")]
    Reservation {
        from: ReservationStatus,
        to: ReservationStatus,
    },
}

impl OrderStatus {
    /// The next state in the forward sequence, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Move exactly one step forward; terminal states stay where they are.
    #[must_use]
    pub fn advance(self) -> Self {
        self.next().unwrap_or(self)
    }

    /// Like [`advance`](Self::advance) but reports the no-op as an error,
    /// for callers that must tell the admin nothing happened.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::OrderNotAdvanceable` from `delivered` or
    /// `cancelled`.
    pub fn try_advance(self) -> Result<Self, TransitionError> {
        self.next()
            .ok_or(TransitionError::OrderNotAdvanceable(self))
    }

    /// `delivered` and `cancelled` have no way out.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    #[must_use]
    pub const fn can_cancel(self) -> bool {
        !self.is_terminal()
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::OrderNotCancellable` if the order is already
    /// delivered or cancelled.
    pub const fn cancel(self) -> Result<Self, TransitionError> {
        if self.can_cancel() {
            Ok(Self::Cancelled)
        } else {
            Err(TransitionError::OrderNotCancellable(self))
        }
    }
}

impl ReservationStatus {
    /// Whether `self → to` is one of the four permitted moves.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Cancelled, Self::Pending)
        )
    }

    /// Move to `to` if the transition table allows it.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::Reservation` for any move outside
    /// pending→confirmed, pending→cancelled, confirmed→cancelled and
    /// cancelled→pending.
    pub const fn transition(self, to: Self) -> Result<Self, TransitionError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(TransitionError::Reservation { from: self, to })
        }
    }

    /// # Errors
    ///
    /// Fails unless the reservation is pending.
    pub const fn confirm(self) -> Result<Self, TransitionError> {
        self.transition(Self::Confirmed)
    }

    /// # Errors
    ///
    /// Fails if the reservation is already cancelled.
    pub const fn cancel(self) -> Result<Self, TransitionError> {
        self.transition(Self::Cancelled)
    }

    /// Put a cancelled reservation back to pending.
    ///
    /// # Errors
    ///
    /// Fails unless the reservation is cancelled.
    pub const fn restore(self) -> Result<Self, TransitionError> {
        self.transition(Self::Pending)
    }
}
