use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cache::OrderCache;
use crate::domain::order::Order;
use crate::errors::AppError;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────
//
// Every handler works on the cache only. Deleting here does not touch the
// database, so a restart brings deleted orders back.

/// GET /order/{order_uid}
#[utoipa::path(
    get,
    path = "/order/{order_uid}",
    params(
        ("order_uid" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not in cache", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn get_order(
    cache: web::Data<OrderCache>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_uid = path.into_inner();

    match cache.get(&order_uid) {
        Some(order) => Ok(HttpResponse::Ok().json(order)),
        None => Err(AppError::NotFound(order_uid)),
    }
}

/// DELETE /order/{order_uid}
///
/// Evicts one order from the cache.
#[utoipa::path(
    delete,
    path = "/order/{order_uid}",
    params(
        ("order_uid" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Order evicted", body = MessageResponse),
        (status = 404, description = "Order not in cache", body = ErrorResponse),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    cache: web::Data<OrderCache>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_uid = path.into_inner();

    if !cache.remove(&order_uid) {
        return Err(AppError::NotFound(order_uid));
    }
    log::info!("Order {} evicted from cache", order_uid);
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: format!("OrderUID: <{}> successfully deleted", order_uid),
    }))
}

/// DELETE /orders
///
/// Empties the cache.
#[utoipa::path(
    delete,
    path = "/orders",
    responses(
        (status = 200, description = "Cache cleared", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn clear_orders(cache: web::Data<OrderCache>) -> HttpResponse {
    cache.clear();
    log::info!("Order cache cleared");
    HttpResponse::Ok().json(MessageResponse {
        message: "All orders successfully cleared".to_string(),
    })
}

/// GET /orders
///
/// Returns every cached order, in no particular order.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All cached orders", body = Vec<Order>),
    ),
    tag = "orders"
)]
pub async fn list_orders(cache: web::Data<OrderCache>) -> HttpResponse {
    HttpResponse::Ok().json(cache.list_all())
}
