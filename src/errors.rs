use actix_web::HttpResponse;
use diesel::r2d2::PoolError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::consumer::ConsumerError;
use crate::domain::errors::DomainError;

/// Anything that stops the service from starting. All of these are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Database unavailable: {0}")]
    Database(#[from] PoolError),
    #[error("Failed to run database migrations: {0}")]
    Migrations(String),
    #[error("Failed to load orders into cache: {0}")]
    Load(#[from] DomainError),
    #[error(transparent)]
    Consumer(#[from] ConsumerError),
    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the HTTP layer. Only cache lookups happen there, so the
/// sole failure is an unknown order id.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OrderUID: <{0}> not found")]
    NotFound(String),
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}
