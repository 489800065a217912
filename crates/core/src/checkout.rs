//! Checkout validation and order placement.
//!
//! [`validate`] is a pure function of the guest's details: it returns every
//! missing field at once so the caller can mark all of them. [`Checkout`]
//! ties a cart to those details and drives placement against a
//! [`RecordStore`]: nothing is cleared unless the store accepted the order.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::order::{NewOrder, Order, OrderType};
use crate::store::{RecordStore, StoreError};
use crate::types::{Money, OrderId};

/// How long the "order placed" confirmation stays up before the drawer
/// returns to idle.
pub const SUCCESS_DISPLAY: TimeDelta = TimeDelta::seconds(3);

/// A submission still marked as processing after this long was abandoned
/// and no longer blocks a new one.
pub const PROCESSING_TIMEOUT: TimeDelta = TimeDelta::seconds(30);

/// The guest's details collected next to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl CustomerInfo {
    /// Blank the per-order fields after a successful order; the order type
    /// is kept for the next order.
    pub fn reset_contact_fields(&mut self) {
        self.name.clear();
        self.table.clear();
        self.phone.clear();
        self.address.clear();
    }
}

/// A field the guest still has to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutField {
    Name,
    Table,
    Phone,
    Address,
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Table => "table",
            Self::Phone => "phone",
            Self::Address => "address",
        })
    }
}

/// Fields that must be filled for `order_type`, beyond the name.
#[must_use]
pub const fn required_fields(order_type: OrderType) -> &'static [CheckoutField] {
    match order_type {
        OrderType::DineIn => &[CheckoutField::Table],
        OrderType::Takeaway => &[CheckoutField::Phone],
        OrderType::Delivery => &[CheckoutField::Address, CheckoutField::Phone],
    }
}

/// Every missing required field. Empty means the details are complete.
///
/// Whitespace-only values count as missing. Cart emptiness is not checked
/// here: an empty cart disables checkout instead of flagging a field.
#[must_use]
pub fn validate(info: &CustomerInfo) -> BTreeSet<CheckoutField> {
    let missing = |value: &str| value.trim().is_empty();

    let mut violations = BTreeSet::new();
    if missing(&info.name) {
        violations.insert(CheckoutField::Name);
    }
    for field in required_fields(info.order_type) {
        let value = match field {
            CheckoutField::Name => &info.name,
            CheckoutField::Table => &info.table,
            CheckoutField::Phone => &info.phone,
            CheckoutField::Address => &info.address,
        };
        if missing(value) {
            violations.insert(*field);
        }
    }
    violations
}

/// Why an order was not placed.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,
    /// Required fields are missing.
    #[error("missing required fields: {}", join_fields(.0))]
    Invalid(BTreeSet<CheckoutField>),
    /// An order is already being submitted.
    #[error("an order is already being placed")]
    InProgress,
    /// The store rejected or failed the insert. Cart and details are intact.
    #[error("could not place order: {0}")]
    Store(#[from] StoreError),
}

fn join_fields(fields: &BTreeSet<CheckoutField>) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where the checkout drawer is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    /// An order was handed to the store at `since` and has not come back.
    Processing { since: DateTime<Utc> },
    /// Confirmation is shown until `until`.
    Succeeded {
        order_id: OrderId,
        until: DateTime<Utc>,
    },
}

/// A visitor's cart, their details and the placement state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    pub cart: Cart,
    pub customer: CustomerInfo,
    #[serde(default)]
    phase: CheckoutPhase,
}

/// Receipt for a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub total: Money,
}

impl Checkout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The phase as seen at `now`: an expired confirmation or an abandoned
    /// submission reads as idle.
    #[must_use]
    pub fn phase_at(&self, now: DateTime<Utc>) -> CheckoutPhase {
        match self.phase {
            CheckoutPhase::Succeeded { until, .. } if now >= until => CheckoutPhase::Idle,
            CheckoutPhase::Processing { since } if now >= since + PROCESSING_TIMEOUT => {
                CheckoutPhase::Idle
            }
            phase => phase,
        }
    }

    /// Whether the checkout button should be enabled.
    #[must_use]
    pub fn can_submit(&self, now: DateTime<Utc>) -> bool {
        !self.cart.is_empty() && !self.is_processing(now)
    }

    fn is_processing(&self, now: DateTime<Utc>) -> bool {
        matches!(self.phase_at(now), CheckoutPhase::Processing { .. })
    }

    /// Check the cart and details, mark the checkout as processing and
    /// return the order to persist.
    ///
    /// Callers that share the checkout between requests should store it
    /// between this call and [`finish_placement`](Self::finish_placement)
    /// so a second submission sees the processing phase.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` if there is nothing to order
    /// - `CheckoutError::InProgress` if a placement is already running
    /// - `CheckoutError::Invalid` with every missing field
    pub fn begin_placement(&mut self, now: DateTime<Utc>) -> Result<NewOrder, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.is_processing(now) {
            return Err(CheckoutError::InProgress);
        }

        let violations = validate(&self.customer);
        if !violations.is_empty() {
            return Err(CheckoutError::Invalid(violations));
        }

        self.phase = CheckoutPhase::Processing { since: now };
        Ok(NewOrder::from_checkout(&self.cart, &self.customer))
    }

    /// Drop a placement begun with [`begin_placement`](Self::begin_placement)
    /// before the order reached the store.
    pub fn cancel_placement(&mut self) {
        if matches!(self.phase, CheckoutPhase::Processing { .. }) {
            self.phase = CheckoutPhase::Idle;
        }
    }

    /// Apply the store's answer to a placement started with
    /// [`begin_placement`](Self::begin_placement).
    ///
    /// On success the cart and contact fields are cleared and the
    /// confirmation is shown until `now + SUCCESS_DISPLAY`. On failure only
    /// the phase goes back to idle.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Store` with the store's error.
    pub fn finish_placement(
        &mut self,
        outcome: Result<Order, StoreError>,
        now: DateTime<Utc>,
    ) -> Result<PlacedOrder, CheckoutError> {
        let order = match outcome {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(error = %err, "order placement failed; cart kept for retry");
                self.phase = CheckoutPhase::Idle;
                return Err(err.into());
            }
        };

        tracing::info!(order_id = %order.id, total = %order.total, "order placed");

        self.cart.clear();
        self.customer.reset_contact_fields();
        self.phase = CheckoutPhase::Succeeded {
            order_id: order.id,
            until: now + SUCCESS_DISPLAY,
        };

        Ok(PlacedOrder {
            order_id: order.id,
            total: order.total,
        })
    }

    /// Validate, persist the order, and on success clear the cart and the
    /// guest's contact fields.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::EmptyCart` if there is nothing to order
    /// - `CheckoutError::Invalid` with every missing field
    /// - `CheckoutError::InProgress` if a placement is already running
    /// - `CheckoutError::Store` if persistence failed; the cart and details
    ///   are unchanged and the guest may retry
    pub async fn place_order<S>(
        &mut self,
        store: &S,
        now: DateTime<Utc>,
    ) -> Result<PlacedOrder, CheckoutError>
    where
        S: RecordStore,
    {
        let order = self.begin_placement(now)?;
        let outcome = store.create_order(order).await;
        self.finish_placement(outcome, now)
    }
}
