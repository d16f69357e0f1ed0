use std::sync::Arc;

use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use tracing::{error, info, warn};

use innkeep_core::finance::BOOKING_AMOUNT;
use innkeep_core::repository::FinanceStore;
use innkeep_shared::messages::BookingEvent;
use innkeep_shared::topics::FINANCE_QUEUE;
use innkeep_store::app_config::{AckPolicy, Config};
use innkeep_store::events::ensure_topics;
use innkeep_store::supervisor::{connect_with_retry, RETRY_DELAY};

/// Consumes the finance queue forever. Queue declaration and
/// subscription are supervised; receive errors back off on the fixed
/// cadence instead of hot-looping. Each message is driven to
/// completion before the next receive.
pub async fn run(config: &Config, store: Arc<dyn FinanceStore>) {
    let topics = vec![FINANCE_QUEUE.to_string()];
    connect_with_retry("queue", || ensure_topics(&config.queue.brokers, &topics)).await;

    let consumer = connect_with_retry("queue consumer", || build_consumer(config)).await;

    info!("Finance consumer subscribed to {}", FINANCE_QUEUE);

    loop {
        match consumer.recv().await {
            Err(e) => {
                error!("Queue receive failed: {}", e);
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Ok(m) => {
                let payload = m.payload().unwrap_or_default();
                process_until_acked(payload, store.as_ref(), config.consumer.ack_policy).await;
                if let Err(e) = consumer.commit_message(&m, CommitMode::Async) {
                    error!("Offset commit failed: {}", e);
                }
            }
        }
    }
}

/// Offsets are committed manually, one message at a time, so the ack
/// policy decides what a broker redelivers after a crash.
async fn build_consumer(config: &Config) -> Result<StreamConsumer, KafkaError> {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", &config.queue.brokers)
        .set("group.id", &config.consumer.group_id)
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "earliest")
        .create()?;

    consumer.subscribe(&[FINANCE_QUEUE])?;

    Ok(consumer)
}

/// Drives one payload to the point where its offset may be committed.
/// Offset commits are cumulative per partition, so a message must not
/// be passed over while its record is unwritten; under `after_write`
/// a failed store write is retried in place on the fixed cadence.
pub async fn process_until_acked(payload: &[u8], store: &dyn FinanceStore, policy: AckPolicy) {
    while !process_payload(payload, store, policy).await {
        tokio::time::sleep(RETRY_DELAY).await;
    }
}

/// Processes one delivered payload and returns whether the message
/// should be acknowledged.
pub async fn process_payload(payload: &[u8], store: &dyn FinanceStore, policy: AckPolicy) -> bool {
    let event: BookingEvent = match serde_json::from_slice(payload) {
        Ok(event) => event,
        Err(e) => {
            // Poison payloads are dropped: redelivery cannot fix them.
            warn!("Discarding unparseable message: {}", e);
            return true;
        }
    };

    info!("Processing booking {}", event.booking_id);

    match policy {
        AckPolicy::Always => {
            match store.insert_charge(event.booking_id, BOOKING_AMOUNT).await {
                Ok(record) => info!(
                    "Recorded charge {} for booking {}",
                    record.id, record.booking_id
                ),
                Err(e) => error!(
                    "Failed to record charge for booking {}: {}",
                    event.booking_id, e
                ),
            }
            true
        }
        AckPolicy::AfterWrite => {
            match store
                .insert_charge_once(event.booking_id, BOOKING_AMOUNT)
                .await
            {
                Ok(Some(record)) => {
                    info!(
                        "Recorded charge {} for booking {}",
                        record.id, record.booking_id
                    );
                    true
                }
                Ok(None) => {
                    info!("Charge for booking {} already recorded", event.booking_id);
                    true
                }
                Err(e) => {
                    error!(
                        "Failed to record charge for booking {}: {}, holding offset",
                        event.booking_id, e
                    );
                    false
                }
            }
        }
    }
}
