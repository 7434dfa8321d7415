pub mod application;
pub mod cache;
pub mod config;
pub mod consumer;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod middleware;
pub mod schema;

use std::sync::Arc;

use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use cache::OrderCache;
pub use db::{create_pool, DbPool};
pub use errors::StartupError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migrations(e.to_string()))?;
    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::get_order,
        handlers::orders::delete_order,
        handlers::orders::clear_orders,
        handlers::orders::list_orders,
    ),
    components(schemas(
        domain::order::Order,
        domain::order::Delivery,
        domain::order::Payment,
        domain::order::Item,
        handlers::orders::MessageResponse,
        handlers::orders::ErrorResponse,
    )),
    tags((name = "orders", description = "Lookups against the in-memory order cache"))
)]
pub struct ApiDoc;

/// Register the order routes. Shared by the server and the handler tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::orders;

    cfg.service(
        web::resource("/order/{order_uid}")
            .route(web::get().to(orders::get_order))
            .route(web::delete().to(orders::delete_order)),
    )
    .service(
        web::resource("/orders")
            .route(web::get().to(orders::list_orders))
            .route(web::delete().to(orders::clear_orders)),
    )
    .service(web::resource("/delorders").route(web::delete().to(orders::clear_orders)));
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server and for stopping it through its handle; OS signals are
/// not intercepted here.
pub fn build_server(
    cache: Arc<OrderCache>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let cache = web::Data::from(cache);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(cache.clone())
            .wrap(crate::middleware::cors())
            .wrap(from_fn(crate::middleware::preflight_no_content))
            .wrap(Logger::default())
            .configure(configure_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .disable_signals()
    .bind((host.to_string(), port))?
    .run())
}
