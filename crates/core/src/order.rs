//! Placed orders.
//!
//! A [`NewOrder`] can only be built from a cart and the customer's details,
//! so its totals are always derived from its lines and its status always
//! starts at `new`.

use chrono::{DateTime, Utc};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::checkout::CustomerInfo;
use crate::types::{MenuItemId, Money, OrderId, OrderStatus, TAX_RATE};

/// How the guest receives the order, as chosen in the cart drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderType {
    #[default]
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Takeaway")]
    Takeaway,
    #[serde(rename = "Delivery")]
    Delivery,
}

impl OrderType {
    /// Label shown in the ordering UI.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine In",
            Self::Takeaway => "Takeaway",
            Self::Delivery => "Delivery",
        }
    }

    /// The spelling stored on orders. Only takeaway differs from the UI label.
    #[must_use]
    pub const fn persisted(self) -> PersistedOrderType {
        match self {
            Self::DineIn => PersistedOrderType::DineIn,
            Self::Takeaway => PersistedOrderType::TakeAway,
            Self::Delivery => PersistedOrderType::Delivery,
        }
    }
}

/// Order type as stored on an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersistedOrderType {
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Away")]
    TakeAway,
    #[serde(rename = "Delivery")]
    Delivery,
}

impl PersistedOrderType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine In",
            Self::TakeAway => "Take Away",
            Self::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for PersistedOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistedOrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dine In" => Ok(Self::DineIn),
            "Take Away" => Ok(Self::TakeAway),
            "Delivery" => Ok(Self::Delivery),
            _ => Err(format!("invalid order type: {s}")),
        }
    }
}

/// A line on a placed order, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub order_type: PersistedOrderType,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an order.
///
/// Fields are private: the only way to get one is
/// [`NewOrder::from_checkout`], which derives every amount from the cart and
/// pins the status to `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrder {
    customer_name: String,
    customer_phone: String,
    customer_address: Option<String>,
    order_type: PersistedOrderType,
    items: Vec<OrderItem>,
    subtotal: Money,
    tax: Money,
    total: Money,
}

impl NewOrder {
    /// Snapshot the cart and the guest's details into an order payload.
    ///
    /// Values are trimmed; a blank phone is stored as the empty string and a
    /// blank address as `None`.
    #[must_use]
    pub fn from_checkout(cart: &Cart, info: &CustomerInfo) -> Self {
        let items: Vec<OrderItem> = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                id: line.item.id,
                name: line.item.name.clone(),
                price: line.item.price,
                quantity: line.quantity,
                image: line.item.image.clone(),
            })
            .collect();

        let subtotal: Money = items.iter().map(OrderItem::line_total).sum();
        let tax = subtotal.scaled(TAX_RATE);

        let address = info.address.trim();
        Self {
            customer_name: info.name.trim().to_owned(),
            customer_phone: info.phone.trim().to_owned(),
            customer_address: (!address.is_empty()).then(|| address.to_owned()),
            order_type: info.order_type.persisted(),
            items,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Always `new`.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        OrderStatus::New
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    #[must_use]
    pub fn customer_address(&self) -> Option<&str> {
        self.customer_address.as_deref()
    }

    #[must_use]
    pub const fn order_type(&self) -> PersistedOrderType {
        self.order_type
    }

    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.subtotal
    }

    #[must_use]
    pub const fn tax(&self) -> Money {
        self.tax
    }

    #[must_use]
    pub const fn total(&self) -> Money {
        self.total
    }

    /// Materialise the stored record once the store has assigned an id.
    #[must_use]
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_address: self.customer_address,
            order_type: self.order_type,
            items: self.items,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            status: OrderStatus::New,
            created_at,
        }
    }
}
