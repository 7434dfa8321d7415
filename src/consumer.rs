use std::fmt;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use rdkafka::{Offset, TopicPartitionList};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::application::ingest::OrderIngestor;
use crate::config::KafkaSettings;
use crate::domain::ports::OrderRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Connecting,
    Subscribed,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for ConsumerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsumerState::Connecting => "connecting",
            ConsumerState::Subscribed => "subscribed",
            ConsumerState::Running => "running",
            ConsumerState::Draining => "draining",
            ConsumerState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("Failed to create Kafka consumer: {0}")]
    Create(#[source] KafkaError),
    #[error("Kafka broker {brokers} unreachable: {source}")]
    Unreachable {
        brokers: String,
        #[source]
        source: KafkaError,
    },
    #[error("Broker probe task failed: {0}")]
    Probe(#[source] tokio::task::JoinError),
    #[error("Failed to assign {topic}/{partition}: {source}")]
    Assign {
        topic: String,
        partition: i32,
        #[source]
        source: KafkaError,
    },
}

/// Reads order messages from one topic partition and feeds them to the
/// ingestor, one at a time.
pub struct KafkaOrderConsumer<R> {
    consumer: StreamConsumer,
    settings: KafkaSettings,
    ingestor: OrderIngestor<R>,
    state: watch::Sender<ConsumerState>,
}

impl<R: OrderRepository> KafkaOrderConsumer<R> {
    /// Build the client without contacting the broker.
    pub fn new(settings: KafkaSettings, ingestor: OrderIngestor<R>) -> Result<Self, ConsumerError> {
        let (state, _) = watch::channel(ConsumerState::Connecting);
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &settings.brokers)
            .set("group.id", &settings.group_id)
            .set("enable.auto.commit", "false")
            .set("enable.partition.eof", "false")
            .create()
            .map_err(ConsumerError::Create)?;

        Ok(Self {
            consumer,
            settings,
            ingestor,
            state,
        })
    }

    /// Connect to the broker and attach to the newest offset of the order
    /// partition. Any failure here is fatal for startup.
    pub async fn connect(
        settings: KafkaSettings,
        ingestor: OrderIngestor<R>,
    ) -> Result<Self, ConsumerError> {
        let consumer = Self::new(settings, ingestor)?;
        // The metadata request blocks the calling thread.
        let consumer = tokio::task::spawn_blocking(move || consumer.probe().map(|()| consumer))
            .await
            .map_err(ConsumerError::Probe)??;
        consumer.subscribe()?;
        Ok(consumer)
    }

    /// Blocks for up to `connect_timeout` waiting for broker metadata. Call it
    /// from a blocking context.
    pub fn probe(&self) -> Result<(), ConsumerError> {
        self.consumer
            .fetch_metadata(Some(self.settings.topic.as_str()), self.settings.connect_timeout)
            .map_err(|source| ConsumerError::Unreachable {
                brokers: self.settings.brokers.clone(),
                source,
            })?;
        Ok(())
    }

    /// Assign the configured partition at `Offset::End`: only messages
    /// produced from now on are read. The cache warm-up covers the backlog.
    pub fn subscribe(&self) -> Result<(), ConsumerError> {
        let assign_err = |source| ConsumerError::Assign {
            topic: self.settings.topic.clone(),
            partition: self.settings.partition,
            source,
        };

        let mut tpl = TopicPartitionList::new();
        tpl.add_partition_offset(&self.settings.topic, self.settings.partition, Offset::End)
            .map_err(assign_err)?;
        self.consumer.assign(&tpl).map_err(assign_err)?;

        self.set_state(ConsumerState::Subscribed);
        log::info!(
            "Consumer subscribed to {}/{}",
            self.settings.topic,
            self.settings.partition
        );
        Ok(())
    }

    pub fn state(&self) -> ConsumerState {
        *self.state.borrow()
    }

    /// Observe state transitions from another task.
    pub fn watch_state(&self) -> watch::Receiver<ConsumerState> {
        self.state.subscribe()
    }

    fn set_state(&self, next: ConsumerState) {
        self.state.send_replace(next);
        log::debug!("Consumer state -> {}", next);
    }

    /// Consume until `shutdown` fires. A message already being handled is
    /// finished before the loop exits; cancellation is only observed while
    /// waiting for the next message.
    pub async fn run(self, shutdown: CancellationToken) {
        self.set_state(ConsumerState::Running);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                received = self.consumer.recv() => match received {
                    Ok(msg) => {
                        let msg = msg.detach();
                        self.ingestor.handle_payload(msg.payload()).await;
                    }
                    Err(e) => log::error!("Consuming error: {}", e),
                },
            }
        }

        self.set_state(ConsumerState::Draining);
        log::info!("Shutting down consumer");
        if let Err(e) = self.consumer.unassign() {
            log::error!("Failed to release partition assignment: {}", e);
        }
        let state = self.state;
        drop(self.consumer);
        state.send_replace(ConsumerState::Stopped);
        log::info!("Consumer stopped");
    }
}
