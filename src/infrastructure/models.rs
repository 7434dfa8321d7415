use diesel::prelude::*;

use crate::domain::order::{Delivery, Item, Order, Payment};
use crate::schema::{deliveries, items, orders, payments};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_uid))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_uid: String,
    pub track_number: String,
    pub entry: String,
    pub locale: String,
    pub internal_signature: String,
    pub customer_id: String,
    pub delivery_service: String,
    pub shardkey: String,
    pub sm_id: i32,
    pub date_created: String,
    pub oof_shard: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = deliveries)]
#[diesel(primary_key(order_uid))]
#[diesel(belongs_to(OrderRow, foreign_key = order_uid))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub order_uid: String,
    pub name: String,
    pub phone: String,
    pub zip: String,
    pub city: String,
    pub address: String,
    pub region: String,
    pub email: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = payments)]
#[diesel(primary_key(order_uid))]
#[diesel(belongs_to(OrderRow, foreign_key = order_uid))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub order_uid: String,
    pub transaction: String,
    pub request_id: String,
    pub currency: String,
    pub provider: String,
    pub amount: f64,
    pub payment_dt: i64,
    pub bank: String,
    pub delivery_cost: f64,
    pub goods_total: f64,
    pub custom_fee: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = items)]
#[diesel(primary_key(order_uid, chrt_id))]
#[diesel(belongs_to(OrderRow, foreign_key = order_uid))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub order_uid: String,
    pub chrt_id: i32,
    pub position: i32,
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

// ── Aggregate → rows ─────────────────────────────────────────────────────────

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            order_uid: o.order_uid.clone(),
            track_number: o.track_number.clone(),
            entry: o.entry.clone(),
            locale: o.locale.clone(),
            internal_signature: o.internal_signature.clone(),
            customer_id: o.customer_id.clone(),
            delivery_service: o.delivery_service.clone(),
            shardkey: o.shardkey.clone(),
            sm_id: o.sm_id,
            date_created: o.date_created.clone(),
            oof_shard: o.oof_shard.clone(),
        }
    }
}

impl DeliveryRow {
    pub fn new(order_uid: &str, d: &Delivery) -> Self {
        Self {
            order_uid: order_uid.to_string(),
            name: d.name.clone(),
            phone: d.phone.clone(),
            zip: d.zip.clone(),
            city: d.city.clone(),
            address: d.address.clone(),
            region: d.region.clone(),
            email: d.email.clone(),
        }
    }
}

impl PaymentRow {
    pub fn new(order_uid: &str, p: &Payment) -> Self {
        Self {
            order_uid: order_uid.to_string(),
            transaction: p.transaction.clone(),
            request_id: p.request_id.clone(),
            currency: p.currency.clone(),
            provider: p.provider.clone(),
            amount: p.amount,
            payment_dt: p.payment_dt,
            bank: p.bank.clone(),
            delivery_cost: p.delivery_cost,
            goods_total: p.goods_total,
            custom_fee: p.custom_fee,
        }
    }
}

impl ItemRow {
    pub fn new(order_uid: &str, position: i32, i: &Item) -> Self {
        Self {
            order_uid: order_uid.to_string(),
            chrt_id: i.chrt_id,
            position,
            track_number: i.track_number.clone(),
            price: i.price,
            rid: i.rid.clone(),
            name: i.name.clone(),
            sale: i.sale,
            size: i.size.clone(),
            total_price: i.total_price,
            nm_id: i.nm_id,
            brand: i.brand.clone(),
            status: i.status,
        }
    }
}

// ── Rows → aggregate ─────────────────────────────────────────────────────────

impl From<DeliveryRow> for Delivery {
    fn from(r: DeliveryRow) -> Self {
        Self {
            name: r.name,
            phone: r.phone,
            zip: r.zip,
            city: r.city,
            address: r.address,
            region: r.region,
            email: r.email,
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(r: PaymentRow) -> Self {
        Self {
            transaction: r.transaction,
            request_id: r.request_id,
            currency: r.currency,
            provider: r.provider,
            amount: r.amount,
            payment_dt: r.payment_dt,
            bank: r.bank,
            delivery_cost: r.delivery_cost,
            goods_total: r.goods_total,
            custom_fee: r.custom_fee,
        }
    }
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Self {
            chrt_id: r.chrt_id,
            track_number: r.track_number,
            price: r.price,
            rid: r.rid,
            name: r.name,
            sale: r.sale,
            size: r.size,
            total_price: r.total_price,
            nm_id: r.nm_id,
            brand: r.brand,
            status: r.status,
        }
    }
}

impl OrderRow {
    /// Reassemble the aggregate from its four parts.
    pub fn into_order(self, delivery: DeliveryRow, payment: PaymentRow, items: Vec<ItemRow>) -> Order {
        Order {
            order_uid: self.order_uid,
            track_number: self.track_number,
            entry: self.entry,
            delivery: delivery.into(),
            payment: payment.into(),
            items: items.into_iter().map(Item::from).collect(),
            locale: self.locale,
            internal_signature: self.internal_signature,
            customer_id: self.customer_id,
            delivery_service: self.delivery_service,
            shardkey: self.shardkey,
            sm_id: self.sm_id,
            date_created: self.date_created,
            oof_shard: self.oof_shard,
        }
    }
}
