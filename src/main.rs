use std::sync::Arc;

use dotenvy::dotenv;
use order_cache_service::application::ingest::OrderIngestor;
use order_cache_service::config::Config;
use order_cache_service::consumer::KafkaOrderConsumer;
use order_cache_service::infrastructure::order_repo::DieselOrderRepository;
use order_cache_service::{build_server, create_pool, run_migrations, OrderCache, StartupError};
use tokio_util::sync::CancellationToken;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;
    log::info!("Database ready");

    let repo = Arc::new(DieselOrderRepository::new(pool));
    let cache = Arc::new(OrderCache::with_capacity(config.cache_capacity));
    let ingestor = OrderIngestor::new(repo, Arc::clone(&cache));

    // The cache must hold every stored order before traffic arrives, or a
    // redelivered order could slip past the dedup check.
    ingestor.warm_cache().await?;

    let consumer = KafkaOrderConsumer::connect(config.kafka.clone(), ingestor).await?;

    let shutdown = CancellationToken::new();
    let consumer_task = tokio::spawn(consumer.run(shutdown.clone()));

    let server = build_server(cache, &config.host, config.port)?;
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    tokio::signal::ctrl_c().await?;
    log::info!("Received shutdown signal");

    shutdown.cancel();
    if let Err(e) = consumer_task.await {
        log::error!("Consumer task failed: {}", e);
    }

    server_handle.stop(true).await;
    match server_task.await {
        Ok(result) => result?,
        Err(e) => log::error!("Server task failed: {}", e),
    }

    log::info!("Application shut down");
    Ok(())
}
