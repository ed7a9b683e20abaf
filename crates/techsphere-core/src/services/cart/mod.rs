//! Cart manager - the session cart with change notification and persistence.
//!
//! The current [`Cart`] lives in a `watch` channel: mutations are applied
//! synchronously and never await I/O, subscribers are notified when the cart
//! actually changed, and every mutation mirrors the full cart to the session
//! store through the [`SessionWriteQueue`].

mod write_queue;

use std::convert::Infallible;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{Cart, CartError, CheckoutPolicy, OrderSummary, Product, ProductId};
use crate::ports::SessionStorePort;

pub use write_queue::SessionWriteQueue;

/// Owns the session cart.
pub struct CartManager {
    state: watch::Sender<Cart>,
    writer: SessionWriteQueue,
    key: String,
}

impl CartManager {
    /// Read the persisted cart once and start managing it.
    ///
    /// A missing key, a read failure or an unparseable payload all start
    /// from an empty cart.
    pub async fn load(store: Arc<dyn SessionStorePort>, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match store.read(&key).await {
            Ok(Some(raw)) => serde_json::from_str::<Cart>(&raw).unwrap_or_else(|e| {
                warn!(target: "techsphere.cart", key = %key, error = %e, "Discarding corrupt cart payload");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(target: "techsphere.cart", key = %key, error = %e, "Failed to read cart; starting empty");
                Cart::new()
            }
        };

        debug!(target: "techsphere.cart", key = %key, items = cart.len(), "Cart loaded");
        Self::with_cart(store, key, cart)
    }

    /// Manage an existing cart without reading the store.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_cart(store: Arc<dyn SessionStorePort>, key: impl Into<String>, cart: Cart) -> Self {
        let (state, _) = watch::channel(cart);
        Self {
            state,
            writer: SessionWriteQueue::spawn(store),
            key: key.into(),
        }
    }

    /// Session key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Receive the current cart and every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Clone of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    pub fn add(&self, product: Product, quantity: u32) -> Result<Cart, CartError> {
        self.try_apply(|cart| cart.add(product, quantity).map(|()| true))
    }

    /// Remove a product; absent ids are a no-op.
    pub fn remove(&self, id: &ProductId) -> Cart {
        self.apply(|cart| cart.remove(id))
    }

    /// Replace a product's quantity; `quantity <= 0` removes it.
    pub fn set_quantity(&self, id: &ProductId, quantity: i64) -> Cart {
        self.apply(|cart| cart.set_quantity(id, quantity))
    }

    /// Remove every item.
    pub fn clear(&self) -> Cart {
        self.apply(|cart| {
            let changed = !cart.is_empty();
            cart.clear();
            changed
        })
    }

    /// `Σ price × quantity` of the current cart.
    pub fn total(&self) -> Decimal {
        self.state.borrow().total()
    }

    /// `Σ quantity` of the current cart.
    pub fn item_count(&self) -> u64 {
        self.state.borrow().item_count()
    }

    /// Checkout totals for the current cart.
    pub fn order_summary(&self, policy: &CheckoutPolicy) -> OrderSummary {
        OrderSummary::from_cart(&self.state.borrow(), policy)
    }

    /// Wait until every change made so far has been handed to the store.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    // The snapshot is enqueued while the watch lock is held, so queue order
    // always matches mutation order.
    fn apply(&self, op: impl FnOnce(&mut Cart) -> bool) -> Cart {
        self.try_apply(|cart| Ok::<_, Infallible>(op(cart)))
            .unwrap_or_else(|never| match never {})
    }

    // A rejected mutation neither notifies subscribers nor writes.
    fn try_apply<E>(&self, op: impl FnOnce(&mut Cart) -> Result<bool, E>) -> Result<Cart, E> {
        let mut outcome = Ok(Cart::new());
        self.state.send_if_modified(|cart| match op(cart) {
            Ok(changed) => {
                self.writer.enqueue(&self.key, cart);
                outcome = Ok(cart.clone());
                changed
            }
            Err(e) => {
                outcome = Err(e);
                false
            }
        });
        outcome
    }
}
