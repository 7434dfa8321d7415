use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::order::Order;

/// In-memory read model keyed by `order_uid`.
///
/// Readers share the lock; every mutation takes it exclusively, so a reader
/// sees either the state before a `clear` or the empty map, never a mix.
#[derive(Debug, Default)]
pub struct OrderCache {
    orders: RwLock<HashMap<String, Order>>,
}

impl OrderCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Insert or replace the order under its id.
    pub fn put(&self, order: Order) {
        self.orders.write().insert(order.order_uid.clone(), order);
    }

    /// Insert a batch under a single write lock.
    pub fn put_all(&self, orders: impl IntoIterator<Item = Order>) {
        let mut map = self.orders.write();
        for order in orders {
            map.insert(order.order_uid.clone(), order);
        }
    }

    pub fn get(&self, order_uid: &str) -> Option<Order> {
        self.orders.read().get(order_uid).cloned()
    }

    pub fn exists(&self, order_uid: &str) -> bool {
        self.orders.read().contains_key(order_uid)
    }

    /// Returns whether an entry was removed. Absent keys are not an error.
    pub fn remove(&self, order_uid: &str) -> bool {
        self.orders.write().remove(order_uid).is_some()
    }

    pub fn clear(&self) {
        self.orders.write().clear();
    }

    /// Snapshot of every cached order, in no particular order.
    pub fn list_all(&self) -> Vec<Order> {
        self.orders.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }
}
