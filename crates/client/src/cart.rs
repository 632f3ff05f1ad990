//! Cart aggregator.
//!
//! The cart is local-only: no mutation here touches the network. Lines are
//! keyed by (menu, option); adding the same key again merges quantities
//! instead of appending a duplicate. Every mutation persists the full line
//! list before returning, so a reload never loses more than the in-flight
//! call.

use std::sync::Arc;

use chrono::Utc;
use maejang_core::cart::{CartKey, CartLine};
use maejang_core::types::{MenuId, Won};
use tracing::debug;
use uuid::Uuid;

use crate::storage::{KvStore, StorageError, StorageKey};

/// Input for [`CartBook::add_line`].
#[derive(Debug, Clone)]
pub struct NewLine {
    pub menu_id: MenuId,
    pub menu_name: String,
    pub option_label: String,
    pub unit_price: Won,
    pub additional_price: Won,
    pub quantity: u32,
}

/// The locally persisted cart.
pub struct CartBook<S: KvStore> {
    store: Arc<S>,
}

impl<S: KvStore> Clone for CartBook<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KvStore> CartBook<S> {
    /// Open the cart over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current lines, oldest first. Empty if nothing was ever persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart cannot be read.
    pub fn lines(&self) -> Result<Vec<CartLine>, StorageError> {
        Ok(self
            .store
            .get::<Vec<CartLine>>(StorageKey::Cart)?
            .unwrap_or_default())
    }

    /// Add an item, merging with an existing line of the same
    /// (menu, option) key.
    ///
    /// A `quantity` of 0 is lifted to 1: the UI's add button always means
    /// "at least one".
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn add_line(&self, item: NewLine) -> Result<CartLine, StorageError> {
        let mut lines = self.lines()?;
        let quantity = item.quantity.max(1);
        let key = CartKey::new(item.menu_id, item.option_label.clone());

        let line = if let Some(existing) = lines.iter_mut().find(|l| l.key() == key) {
            existing.quantity += quantity;
            debug!(menu_id = %item.menu_id, quantity = existing.quantity, "merged cart line");
            existing.clone()
        } else {
            let line = CartLine {
                line_id: Uuid::new_v4(),
                menu_id: item.menu_id,
                menu_name: item.menu_name,
                option_label: item.option_label,
                unit_price: item.unit_price,
                additional_price: item.additional_price,
                quantity,
                added_at: Utc::now(),
            };
            lines.push(line.clone());
            debug!(menu_id = %line.menu_id, "appended cart line");
            line
        };

        self.persist(&lines)?;
        Ok(line)
    }

    /// Set a line's quantity. A quantity below 1 removes the line; a
    /// quantity of 0 is never stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn set_quantity(&self, line_id: Uuid, quantity: u32) -> Result<(), StorageError> {
        if quantity < 1 {
            return self.remove_line(line_id);
        }

        let mut lines = self.lines()?;
        if let Some(line) = lines.iter_mut().find(|l| l.line_id == line_id) {
            line.quantity = quantity;
            self.persist(&lines)?;
        }
        Ok(())
    }

    /// Delete a line. No-op if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be read or persisted.
    pub fn remove_line(&self, line_id: Uuid) -> Result<(), StorageError> {
        let mut lines = self.lines()?;
        let before = lines.len();
        lines.retain(|l| l.line_id != line_id);
        if lines.len() != before {
            self.persist(&lines)?;
        }
        Ok(())
    }

    /// Empty the cart. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(StorageKey::Cart)
    }

    /// Sum of line totals. Always recomputed from current lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart cannot be read.
    pub fn total(&self) -> Result<Won, StorageError> {
        Ok(self.lines()?.iter().map(CartLine::line_total).sum())
    }

    /// Total item count (sum of quantities), for the cart badge.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart cannot be read.
    pub fn count(&self) -> Result<u32, StorageError> {
        Ok(self.lines()?.iter().map(|l| l.quantity).sum())
    }

    /// Whether the cart holds no lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted cart cannot be read.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.lines()?.is_empty())
    }

    fn persist(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        self.store.set(StorageKey::Cart, &lines)
    }
}
