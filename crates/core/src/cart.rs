//! The cart engine.
//!
//! A [`Cart`] is an ordered list of lines, at most one per menu item, each
//! with a quantity of at least one. Money totals are always derived from the
//! current lines and never stored.
//!
//! Decrementing a line never removes it: the quantity floors at 1 and only
//! [`Cart::remove_item`] drops a line.

use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;
use crate::types::{MenuItemId, Money, TAX_RATE};

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.item.price.times(self.quantity)
    }
}

/// A visitor's selection of menu items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `item`, merging with an existing line for the same id.
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Drop the line for `id`, if any.
    pub fn remove_item(&mut self, id: MenuItemId) {
        self.lines.retain(|line| line.item.id != id);
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity_delta(&mut self, id: MenuItemId, delta: i32) {
        if let Some(line) = self.line_mut(id) {
            let wanted = i64::from(line.quantity) + i64::from(delta);
            line.quantity = u32::try_from(wanted.max(1)).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// `subtotal * 0.10`, unrounded.
    #[must_use]
    pub fn tax(&self) -> Money {
        self.subtotal().scaled(TAX_RATE)
    }

    #[must_use]
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }
}
