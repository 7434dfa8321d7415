//! Publishes orders to the order topic for manual testing.
//!
//!   order-producer [--generate N]   publish N freshly generated orders (default 1)
//!   order-producer --resend         republish every stored order (needs DATABASE_URL)

use std::time::Duration;

use chrono::Utc;
use dotenvy::dotenv;
use order_cache_service::config::{ConfigError, KafkaSettings};
use order_cache_service::domain::order::{Delivery, Item, Order, Payment};
use order_cache_service::domain::ports::OrderRepository;
use order_cache_service::infrastructure::order_repo::DieselOrderRepository;
use order_cache_service::{create_pool, StartupError};
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::producer::{FutureProducer, FutureRecord};
use thiserror::Error;
use uuid::Uuid;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
enum ProducerError {
    #[error("usage: order-producer [--generate N | --resend]")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),
    #[error("Failed to encode order: {0}")]
    Encode(#[from] serde_json::Error),
}

enum Mode {
    Generate(usize),
    Resend,
}

fn parse_args(args: &[String]) -> Result<Mode, ProducerError> {
    match args {
        [] => Ok(Mode::Generate(1)),
        [flag] if flag == "--resend" => Ok(Mode::Resend),
        [flag, n] if flag == "--generate" => n
            .parse()
            .map(Mode::Generate)
            .map_err(|_| ProducerError::Usage),
        _ => Err(ProducerError::Usage),
    }
}

/// Pseudo-random value below `bound`, drawn from a v4 UUID.
fn roll(bound: u32) -> u32 {
    (Uuid::new_v4().as_u128() % u128::from(bound)) as u32
}

fn token(len: usize) -> String {
    Uuid::new_v4().simple().to_string()[..len].to_string()
}

fn generate_order() -> Order {
    let price = f64::from(roll(1000));
    let sale = f64::from(roll(100));
    let total_price = (price * (100.0 - sale) / 100.0).round();
    let delivery_cost = f64::from(roll(500));

    Order {
        order_uid: Uuid::new_v4().simple().to_string(),
        track_number: token(10).to_uppercase(),
        entry: token(4).to_uppercase(),
        delivery: Delivery {
            name: format!("Customer {}", token(6)),
            phone: format!("+7{:010}", Uuid::new_v4().as_u128() % 10_000_000_000),
            zip: format!("{:05}", roll(100_000)),
            city: format!("City {}", token(4)),
            address: format!("Street {} {}", token(5), roll(200)),
            region: format!("Region {}", token(4)),
            email: format!("{}@example.com", token(8)),
        },
        payment: Payment {
            transaction: Uuid::new_v4().to_string(),
            request_id: Uuid::new_v4().to_string(),
            currency: ["USD", "RUB", "EUR"][roll(3) as usize].to_string(),
            provider: "wbpay".to_string(),
            amount: total_price + delivery_cost,
            payment_dt: Utc::now().timestamp(),
            bank: ["alpha", "sber", "tinkoff"][roll(3) as usize].to_string(),
            delivery_cost,
            goods_total: total_price,
            custom_fee: 0.0,
        },
        items: vec![Item {
            chrt_id: roll(10_000_000) as i32,
            track_number: token(10).to_uppercase(),
            price,
            rid: token(20),
            name: format!("Item {}", token(6)),
            sale,
            size: ["XS", "S", "M", "L", "XL"][roll(5) as usize].to_string(),
            total_price,
            nm_id: roll(10_000_000) as i32,
            brand: format!("Brand {}", token(4)),
            status: 202,
        }],
        locale: ["en", "ru"][roll(2) as usize].to_string(),
        internal_signature: String::new(),
        customer_id: token(8),
        delivery_service: "meest".to_string(),
        shardkey: roll(10).to_string(),
        sm_id: roll(100) as i32,
        date_created: Utc::now().to_rfc3339(),
        oof_shard: roll(3).to_string(),
    }
}

async fn publish(
    producer: &FutureProducer,
    settings: &KafkaSettings,
    order: &Order,
) -> Result<(), ProducerError> {
    let payload = serde_json::to_vec(order)?;
    let record = FutureRecord::to(&settings.topic)
        .partition(settings.partition)
        .key(order.order_uid.as_str())
        .payload(payload.as_slice());

    let (partition, offset) = producer
        .send(record, SEND_TIMEOUT)
        .await
        .map_err(|(e, _)| ProducerError::Kafka(e))?;
    log::info!(
        "Order {} is stored in topic({})/partition({})/offset({})",
        order.order_uid,
        settings.topic,
        partition,
        offset
    );
    Ok(())
}

async fn run() -> Result<(), ProducerError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_args(&args)?;
    let settings = KafkaSettings::from_env()?;

    let producer: FutureProducer = ClientConfig::new()
        .set("bootstrap.servers", &settings.brokers)
        .set("acks", "all")
        .create()?;

    let orders = match mode {
        Mode::Generate(n) => (0..n).map(|_| generate_order()).collect(),
        Mode::Resend => {
            let url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
            let pool = create_pool(&url).map_err(StartupError::from)?;
            let repo = DieselOrderRepository::new(pool);
            let stored = tokio::task::spawn_blocking(move || repo.get_all_orders())
                .await
                .map_err(|e| StartupError::Io(std::io::Error::other(e)))?
                .map_err(StartupError::from)?;
            log::info!("Loaded {} orders from the database", stored.len());
            stored
        }
    };

    for order in &orders {
        publish(&producer, &settings, order).await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
