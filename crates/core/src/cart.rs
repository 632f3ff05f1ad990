//! Cart line items.
//!
//! A cart is a flat list of [`CartLine`]s keyed by [`CartKey`], the pair of
//! menu item and option label. The cart invariant is that at most one line
//! exists per key and every line's quantity is at least 1; enforcement lives
//! in the client's cart aggregator, which is the only writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{MenuId, Won};

/// Identity key of a cart line: the same menu item with a different option
/// is a different line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub menu_id: MenuId,
    /// Option label as shown to the customer (e.g. "기본", "Large").
    pub option_label: String,
}

impl CartKey {
    /// Create a key from a menu item and option label.
    #[must_use]
    pub fn new(menu_id: MenuId, option_label: impl Into<String>) -> Self {
        Self {
            menu_id,
            option_label: option_label.into(),
        }
    }
}

/// One line of the locally persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Client-generated line identifier, stable across quantity updates.
    pub line_id: Uuid,
    pub menu_id: MenuId,
    pub menu_name: String,
    pub option_label: String,
    /// Base price of the menu item.
    pub unit_price: Won,
    /// Surcharge for the selected option.
    pub additional_price: Won,
    /// Always >= 1; a decrement to 0 removes the line instead.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> CartKey {
        CartKey::new(self.menu_id, self.option_label.clone())
    }

    /// Per-unit price including the option surcharge.
    #[must_use]
    pub fn effective_unit_price(&self) -> Won {
        self.unit_price + self.additional_price
    }

    /// Line total: `(unit_price + additional_price) * quantity`.
    ///
    /// Always derived, never stored, so it cannot drift.
    #[must_use]
    pub fn line_total(&self) -> Won {
        self.effective_unit_price() * self.quantity
    }
}
