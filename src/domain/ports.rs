use super::errors::DomainError;
use super::order::Order;

/// Durable store for order aggregates.
///
/// `add_order` must be atomic across all sub-entities: either every row is
/// committed or none is.
pub trait OrderRepository: Send + Sync + 'static {
    fn order_exists(&self, order_uid: &str) -> Result<bool, DomainError>;
    fn add_order(&self, order: &Order) -> Result<(), DomainError>;
    fn get_order(&self, order_uid: &str) -> Result<Option<Order>, DomainError>;
    fn get_all_orders(&self) -> Result<Vec<Order>, DomainError>;
}
