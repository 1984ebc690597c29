use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;

use crate::entities::product;

/// The denormalized product fields a cart entry keeps. Saved alongside the
/// quantity so the cart survives a restart even if the catalog row changes
/// or disappears in the meantime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: i32,
    pub title: String,
    pub price: f32,
    pub brand: String,
    pub images: Vec<String>,
}

impl From<product::Model> for ProductSnapshot {
    fn from(model: product::Model) -> Self {
        let images = model.image_list();
        ProductSnapshot {
            id: model.id,
            title: model.title,
            price: model.price,
            brand: model.brand.to_string(),
            images,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

/// Snapshot of the derived cart totals, broadcast to subscribers after
/// every mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartSummary {
    pub revision: u64,
    pub total_items: u32,
    pub total_price: f32,
}

#[derive(Error, Debug)]
pub enum CartStateError {
    #[error("Failed to read cart state: {0}")]
    Read(std::io::Error),
    #[error("Failed to parse cart state: {0}")]
    Parse(serde_json::Error),
}

/// The single cart of the storefront session. Items keep insertion order,
/// at most one entry per product id. Totals are recomputed from the item
/// list on every read, they are never stored.
pub struct CartStore {
    items: Vec<CartItem>,
    persist_path: Option<PathBuf>,
    revision: u64,
    notifier: watch::Sender<CartSummary>,
}

pub type SharedCart = Arc<tokio::sync::Mutex<CartStore>>;

impl CartStore {
    pub fn new() -> Self {
        let (notifier, _) = watch::channel(CartSummary::default());
        CartStore {
            items: Vec::new(),
            persist_path: None,
            revision: 0,
            notifier,
        }
    }

    /// Restores the cart from the persistence blob at `path`; a missing
    /// file is an empty cart, a corrupt one is an error the caller decides
    /// what to do with.
    pub fn load(path: PathBuf) -> Result<Self, CartStateError> {
        let mut store = CartStore::new();
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                store.items = serde_json::from_str(&raw).map_err(CartStateError::Parse)?;
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(CartStateError::Read(err)),
        }
        store.persist_path = Some(path);
        Ok(store)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_price(&self) -> f32 {
        self.items
            .iter()
            .map(|item| item.product.price * item.quantity as f32)
            .sum()
    }

    /// Repeated adds of the same product bump its quantity, a new product
    /// goes to the end of the list with quantity 1.
    pub fn add_to_cart(&mut self, product: ProductSnapshot) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(entry) => entry.quantity += 1,
            None => self.items.push(CartItem {
                product,
                quantity: 1,
            }),
        }
        self.after_mutation();
    }

    /// Sets the quantity of a line item directly. A quantity of 0 deletes
    /// the entry, zero-quantity items are never retained. Returns false when
    /// no entry for `product_id` exists (setting to 0 then counts as a
    /// successful no-op, like `remove_from_cart`).
    pub fn update_quantity(&mut self, product_id: i32, quantity: u32) -> bool {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return true;
        }
        match self.items.iter_mut().find(|item| item.product.id == product_id) {
            Some(entry) => {
                entry.quantity = quantity;
                self.after_mutation();
                true
            }
            None => false,
        }
    }

    /// Deletes the matching entry; absent ids are a no-op, not an error.
    pub fn remove_from_cart(&mut self, product_id: i32) {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != product_id);
        if self.items.len() != before {
            self.after_mutation();
        }
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.after_mutation();
        }
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            revision: self.revision,
            total_items: self.total_items(),
            total_price: self.total_price(),
        }
    }

    /// Watch channel over the derived totals; receivers wake after every
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSummary> {
        self.notifier.subscribe()
    }

    fn after_mutation(&mut self) {
        self.revision += 1;
        let _ = self.notifier.send(self.summary());
        self.persist();
    }

    //best effort: cart mutations are total functions, a persistence
    //failure is logged and swallowed.
    fn persist(&self) {
        let Some(path) = &self.persist_path else {
            return;
        };
        let encoded = match serde_json::to_string_pretty(&self.items) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "Failed to encode cart state");
                return;
            }
        };
        if let Err(err) = std::fs::write(path, encoded) {
            warn!(error = %err, path = %path.display(), "Failed to persist cart state");
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: i32, title: &str, price: f32) -> ProductSnapshot {
        ProductSnapshot {
            id,
            title: title.to_string(),
            price,
            brand: "Nishat".to_string(),
            images: vec!["cover.jpg".to_string()],
        }
    }

    #[test]
    fn repeated_adds_merge_into_one_entry() {
        let mut cart = CartStore::new();
        for _ in 0..5 {
            cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut cart = CartStore::new();
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        cart.add_to_cart(snapshot(2, "Dress B", 800.0));
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 3800.0);

        assert!(cart.update_quantity(2, 4));
        assert_eq!(cart.total_items(), 6);
        assert_eq!(cart.total_price(), 6200.0);

        cart.remove_from_cart(1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 3200.0);
    }

    #[test]
    fn quantity_zero_deletes_the_entry() {
        let mut cart = CartStore::new();
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        assert!(cart.update_quantity(1, 0));
        assert!(cart.is_empty());
        //no zero-quantity entry retained
        assert_eq!(cart.items().len(), 0);
    }

    #[test]
    fn update_on_unknown_id_changes_nothing() {
        let mut cart = CartStore::new();
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        assert!(!cart.update_quantity(42, 3));
        assert!(cart.update_quantity(42, 0));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_on_unknown_id_is_a_noop() {
        let mut cart = CartStore::new();
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        let before = cart.items().to_vec();
        cart.remove_from_cart(99);
        assert_eq!(cart.items(), &before[..]);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cart = CartStore::new();
        cart.add_to_cart(snapshot(3, "C", 10.0));
        cart.add_to_cart(snapshot(1, "A", 10.0));
        cart.add_to_cart(snapshot(2, "B", 10.0));
        cart.add_to_cart(snapshot(1, "A", 10.0));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn subscribers_see_fresh_totals() {
        let mut cart = CartStore::new();
        let rx = cart.subscribe();
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        let summary = *rx.borrow();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_price, 3000.0);
        assert_eq!(summary.revision, 2);
    }

    #[test]
    fn state_survives_a_reload() {
        let path = std::env::temp_dir().join(format!(
            "libaas-cart-test-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut cart = CartStore::load(path.clone()).expect("Failed to load empty cart");
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));
        cart.add_to_cart(snapshot(2, "Dress B", 800.0));
        cart.add_to_cart(snapshot(1, "Dress A", 1500.0));

        let reloaded = CartStore::load(path.clone()).expect("Failed to reload cart");
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.total_items(), 3);
        assert_eq!(reloaded.total_price(), 3800.0);

        let _ = std::fs::remove_file(&path);
    }
}
