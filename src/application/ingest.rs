use std::sync::Arc;

use crate::cache::OrderCache;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::OrderRepository;

/// What happened to a single stream message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Payload was missing or zero-length.
    Empty,
    /// Payload did not decode into an order.
    Malformed,
    /// The order id is already cached; nothing was written.
    Duplicate,
    /// The store refused the order; the cache was left untouched.
    Rejected,
    /// Committed to the store and published to the cache.
    Stored,
}

/// Applies stream messages to the store and the cache.
///
/// The cache is only written after the store transaction commits, so it never
/// advertises an order a restart could not reload.
pub struct OrderIngestor<R> {
    repo: Arc<R>,
    cache: Arc<OrderCache>,
}

impl<R: OrderRepository> OrderIngestor<R> {
    pub fn new(repo: Arc<R>, cache: Arc<OrderCache>) -> Self {
        Self { repo, cache }
    }

    pub fn cache(&self) -> &Arc<OrderCache> {
        &self.cache
    }

    /// Populate the cache from every persisted order. Must finish before the
    /// consumer or the HTTP server start taking traffic.
    pub async fn warm_cache(&self) -> Result<usize, DomainError> {
        let repo = Arc::clone(&self.repo);
        let orders = tokio::task::spawn_blocking(move || repo.get_all_orders())
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))??;

        let loaded = orders.len();
        self.cache.put_all(orders);
        log::info!("Cache warmed with {} orders", loaded);
        Ok(loaded)
    }

    /// Run one message through decode → dedup → persist → cache.
    pub async fn handle_payload(&self, payload: Option<&[u8]>) -> Outcome {
        let payload = match payload {
            Some(p) if !p.is_empty() => p,
            _ => {
                log::warn!("Received empty message, skipping");
                return Outcome::Empty;
            }
        };

        let order = match Order::from_payload(payload) {
            Ok(order) => order,
            Err(e) => {
                log::error!(
                    "Failed to decode order message: {} (payload: {})",
                    e,
                    String::from_utf8_lossy(payload)
                );
                return Outcome::Malformed;
            }
        };

        if self.cache.exists(&order.order_uid) {
            log::info!("Order {} already cached, skipping", order.order_uid);
            return Outcome::Duplicate;
        }

        let order_uid = order.order_uid.clone();
        let repo = Arc::clone(&self.repo);
        let persisted = tokio::task::spawn_blocking(move || repo.add_order(&order).map(|()| order))
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))
            .and_then(|r| r);

        match persisted {
            Ok(order) => {
                self.cache.put(order);
                log::info!("Consumed order {}", order_uid);
                Outcome::Stored
            }
            Err(DomainError::AlreadyExists(_)) => {
                log::info!("Order {} already stored, skipping", order_uid);
                Outcome::Rejected
            }
            Err(e) => {
                log::error!("Failed to save order {}: {}", order_uid, e);
                Outcome::Rejected
            }
        }
    }
}
