use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recipient details. Exactly one per order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Delivery {
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

/// Payment event attached to an order. `transaction` is globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: f64,
    /// Unix timestamp (seconds).
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: f64,
    pub goods_total: f64,
    pub custom_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub chrt_id: i32,
    pub track_number: String,
    pub price: f64,
    pub rid: String,
    pub name: String,
    pub sale: f64,
    pub size: String,
    pub total_price: f64,
    pub nm_id: i32,
    pub brand: String,
    pub status: i32,
}

/// The order aggregate as it travels on the topic, lives in the cache and is
/// served over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub order_uid: String,
    pub track_number: String,
    pub entry: String,
    pub delivery: Delivery,
    pub payment: Payment,
    pub items: Vec<Item>,
    pub locale: String,
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i32,
    pub date_created: String,
    pub oof_shard: String,
}

impl Order {
    /// Decode a raw message payload. An empty `order_uid` cannot key the cache
    /// or the store, and an order without items could not be read back.
    pub fn from_payload(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let order: Order = serde_json::from_slice(payload)?;
        if order.order_uid.is_empty() {
            return Err(serde::de::Error::custom("order_uid must not be empty"));
        }
        if order.items.is_empty() {
            return Err(serde::de::Error::custom("order must contain at least one item"));
        }
        Ok(order)
    }
}
