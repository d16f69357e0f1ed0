use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use tracing::{error, info, warn};

use innkeep_core::repository::EventPublisher;
use innkeep_core::EventError;

use crate::supervisor::connect_with_retry;

/// Queue producer with a supervised topic declaration. Publishes are
/// refused until the declared topics exist, mirroring a producer that
/// only sends once its channel is open.
#[derive(Clone)]
pub struct EventProducer {
    producer: FutureProducer,
    ready: Arc<AtomicBool>,
}

impl EventProducer {
    /// Creates the producer and spawns a declare supervisor for the
    /// given topics.
    pub fn new(brokers: &str, topics: &[&str]) -> Result<Self, KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        let ready = Arc::new(AtomicBool::new(false));

        let brokers = brokers.to_string();
        let topics: Vec<String> = topics.iter().map(|t| t.to_string()).collect();
        let flag = ready.clone();
        tokio::spawn(async move {
            connect_with_retry("queue", || ensure_topics(&brokers, &topics)).await;
            flag.store(true, Ordering::Release);
        });

        Ok(Self { producer, ready })
    }
}

#[async_trait]
impl EventPublisher for EventProducer {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), EventError> {
        if !self.ready.load(Ordering::Acquire) {
            warn!("Producer not ready, dropping message for {}", topic);
            return Err(EventError::NotReady);
        }

        let record = FutureRecord::to(topic).key(key).payload(payload);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(0)))
            .await
        {
            Ok(delivery) => {
                info!(
                    "Sent message to {}/{}: partition {} offset {}",
                    topic, key, delivery.partition, delivery.offset
                );
                Ok(())
            }
            Err((e, _msg)) => {
                error!("Failed to send message to {}: {}", topic, e);
                Err(EventError::Publish(e.to_string()))
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Declares topics with a single partition each, which keeps delivery
/// order per queue. Idempotent: an already-existing topic counts as
/// declared.
pub async fn ensure_topics(brokers: &str, topics: &[String]) -> Result<(), KafkaError> {
    let admin: AdminClient<DefaultClientContext> = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .create()?;

    let new_topics: Vec<NewTopic> = topics
        .iter()
        .map(|name| NewTopic::new(name, 1, TopicReplication::Fixed(1)))
        .collect();

    let results = admin
        .create_topics(new_topics.iter(), &AdminOptions::new())
        .await?;

    for result in results {
        if let Err((name, code)) = result {
            if code != RDKafkaErrorCode::TopicAlreadyExists {
                error!("Declaring topic {} failed: {}", name, code);
                return Err(KafkaError::AdminOp(code));
            }
        }
    }

    Ok(())
}
