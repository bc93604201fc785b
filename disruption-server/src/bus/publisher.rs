//! MQTT delay publisher.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{DelayEvent, StationId};

use super::DelaySink;
use super::error::PublishError;

/// How long to wait before polling the connection again after an error.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Configuration for the broker connection.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Broker hostname
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Client identifier announced to the broker
    pub client_id: String,
    /// Optional username/password credentials
    pub credentials: Option<(String, String)>,
    /// Topic exercised at connection time
    pub presence_topic: String,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,
}

impl BusConfig {
    /// Create a new config for the given broker address.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: "disruption-server".to_string(),
            credentials: None,
            presence_topic: "presence".to_string(),
            keep_alive_secs: 30,
        }
    }

    /// Set username/password credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set the client identifier.
    pub fn with_client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }
}

/// Publisher for delay events.
///
/// Cheap to clone; all clones share the underlying broker connection and
/// the set of feedback subscriptions.
#[derive(Clone)]
pub struct DelayPublisher {
    client: AsyncClient,
    presence_topic: String,
    subscribed: Arc<Mutex<HashSet<String>>>,
}

impl DelayPublisher {
    /// Open a broker connection.
    ///
    /// Returns the publisher together with the event loop that must be
    /// driven (see [`drive`](Self::drive)) for any traffic to flow.
    pub fn connect(config: &BusConfig) -> (Self, EventLoop) {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        if let Some((username, password)) = &config.credentials {
            options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(options, 64);

        (
            Self {
                client,
                presence_topic: config.presence_topic.clone(),
                subscribed: Arc::new(Mutex::new(HashSet::new())),
            },
            event_loop,
        )
    }

    /// Publish one delay event.
    ///
    /// The topic is `{stationId}/{line}` and the body carries the new and
    /// planned times. Before publishing, the publisher makes sure it is
    /// subscribed to the station's `{stationId}/#` subtree; re-subscribing
    /// is a no-op for an already-subscribed station.
    pub async fn publish(&self, event: &DelayEvent) -> Result<(), PublishError> {
        let feedback = feedback_topic(&event.station);

        let newly_subscribed = self.subscribed.lock().await.insert(feedback.clone());
        if newly_subscribed {
            if let Err(e) = self.client.subscribe(&feedback, QoS::AtMostOnce).await {
                self.subscribed.lock().await.remove(&feedback);
                return Err(e.into());
            }
        }

        let payload = serde_json::to_vec(event)?;
        self.client
            .publish(event_topic(event), QoS::AtLeastOnce, false, payload)
            .await?;

        Ok(())
    }

    /// Drive the broker connection.
    ///
    /// Services the event loop forever: announces presence once the broker
    /// acknowledges the connection, logs inbound messages, and keeps
    /// retrying after connection errors.
    pub async fn drive(&self, mut event_loop: EventLoop) {
        loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("connected to broker");
                    if let Err(e) = self
                        .client
                        .subscribe(&self.presence_topic, QoS::AtMostOnce)
                        .await
                    {
                        warn!(error = %e, "presence subscribe failed");
                    }
                    if let Err(e) = self
                        .client
                        .publish(&self.presence_topic, QoS::AtMostOnce, false, "hello")
                        .await
                    {
                        warn!(error = %e, "presence publish failed");
                    }
                }
                Ok(Event::Incoming(Packet::Publish(message))) => {
                    debug!(
                        topic = %message.topic,
                        payload = %String::from_utf8_lossy(&message.payload),
                        "bus message"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "broker connection error");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }
}

impl DelaySink for DelayPublisher {
    async fn publish(&self, event: &DelayEvent) -> Result<(), PublishError> {
        DelayPublisher::publish(self, event).await
    }
}

/// Topic a delay event is published under.
fn event_topic(event: &DelayEvent) -> String {
    format!("{}/{}", event.station, event.line)
}

/// Wildcard topic covering a station's subtree.
fn feedback_topic(station: &StationId) -> String {
    format!("{}/#", station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedTime;

    fn event() -> DelayEvent {
        DelayEvent {
            station: StationId::parse("8000207").unwrap(),
            stop_id: "stop-1".to_string(),
            line: "11".to_string(),
            planned_time: FeedTime::parse("2306241410").unwrap(),
            new_time: FeedTime::parse("2306241415").unwrap(),
        }
    }

    #[test]
    fn config_defaults() {
        let config = BusConfig::new("localhost", 1883);
        assert_eq!(config.client_id, "disruption-server");
        assert_eq!(config.presence_topic, "presence");
        assert_eq!(config.credentials, None);
    }

    #[test]
    fn config_builder() {
        let config = BusConfig::new("broker", 8883)
            .with_credentials("user", "pass")
            .with_client_id("test-client");

        assert_eq!(config.host, "broker");
        assert_eq!(config.port, 8883);
        assert_eq!(config.client_id, "test-client");
        assert_eq!(
            config.credentials,
            Some(("user".to_string(), "pass".to_string()))
        );
    }

    #[test]
    fn topics_are_station_slash_line() {
        assert_eq!(event_topic(&event()), "8000207/11");
        assert_eq!(
            feedback_topic(&StationId::parse("8000207").unwrap()),
            "8000207/#"
        );
    }

    #[test]
    fn payload_carries_both_times() {
        let body = serde_json::to_value(event()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "plannedTime": "2023-06-24T14:10:00",
                "newTime": "2023-06-24T14:15:00",
            })
        );
    }
}
