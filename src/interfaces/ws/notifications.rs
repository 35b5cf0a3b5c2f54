//! Live event streaming to dashboards and driver apps
//!
//! Frames are JSON text: `{id, timestamp, type, data}`. The first frame is
//! a `connected` welcome echoing the active filter.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, info, warn};

use crate::application::events::{EventMessage, SharedEventBus};

const TRAFFIC_TOPIC: &str = "traffic_data_recorded";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    /// Comma-separated event types, e.g. `ticket_issued,incident_reported`
    pub topics: Option<String>,
    /// Only events addressed to this staff member
    pub recipient_id: Option<i64>,
}

impl EventFilter {
    fn topic_list(&self) -> Vec<&str> {
        self.topics
            .as_deref()
            .map(|t| t.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn matches(&self, message: &EventMessage) -> bool {
        let topics = self.topic_list();
        if !topics.is_empty() && !topics.contains(&message.event.event_type()) {
            return false;
        }
        match self.recipient_id {
            Some(wanted) => message.event.recipient_id() == Some(wanted),
            None => true,
        }
    }
}

#[derive(Clone)]
pub struct StreamState {
    pub event_bus: SharedEventBus,
}

/// `GET /ws/notifications?topics=a,b&recipient_id=7`
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<StreamState>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    info!(topics = ?filter.topics, recipient_id = ?filter.recipient_id, "Notification stream requested");
    ws.on_upgrade(move |socket| stream_events(socket, state, filter))
}

/// `GET /ws/traffic-data`
pub async fn ws_traffic_handler(
    ws: WebSocketUpgrade,
    State(state): State<StreamState>,
) -> impl IntoResponse {
    let filter = EventFilter {
        topics: Some(TRAFFIC_TOPIC.to_string()),
        recipient_id: None,
    };
    ws.on_upgrade(move |socket| stream_events(socket, state, filter))
}

async fn stream_events(socket: WebSocket, state: StreamState, filter: EventFilter) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to event stream",
        "filter": {
            "topics": filter.topic_list(),
            "recipient_id": filter.recipient_id,
        }
    });
    if let Err(e) = sender.send(Message::Text(welcome.to_string().into())).await {
        warn!(error = %e, "Could not send welcome frame");
        return;
    }

    loop {
        select! {
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Ping(data))) => {
                    if sender.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    debug!(error = %e, "Stream client error");
                    break;
                }
                Some(Ok(_)) => {}
            },
            event = subscriber.recv() => {
                let Some(message) = event else {
                    warn!("Event bus closed");
                    break;
                };
                if !filter.matches(&message) {
                    continue;
                }
                match serde_json::to_string(&message) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!(error = %e, "Could not serialize event"),
                }
            }
        }
    }

    info!("Event stream client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::{Event, NotificationCreatedEvent, TrafficDataRecordedEvent};

    fn traffic() -> EventMessage {
        EventMessage::new(Event::TrafficDataRecorded(TrafficDataRecordedEvent {
            id: 1,
            latitude: -4.32,
            longitude: 15.31,
            traffic_level: 4,
            average_speed: Some(12.5),
            timestamp: chrono::Utc::now(),
        }))
    }

    fn notification(recipient: i64) -> EventMessage {
        EventMessage::new(Event::NotificationCreated(NotificationCreatedEvent {
            notification_id: 9,
            message: "Bus 12 delayed".into(),
            notification_type: "info".into(),
            recipient_id: Some(recipient),
            recipient_type: Some("DRIVER".into()),
            priority: "MEDIUM".into(),
        }))
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = EventFilter::default();
        assert!(filter.matches(&traffic()));
        assert!(filter.matches(&notification(3)));
    }

    #[test]
    fn topics_and_recipient_narrow_the_stream() {
        let traffic_only = EventFilter {
            topics: Some(" traffic_data_recorded ,".into()),
            recipient_id: None,
        };
        assert!(traffic_only.matches(&traffic()));
        assert!(!traffic_only.matches(&notification(3)));

        let mine = EventFilter {
            topics: None,
            recipient_id: Some(3),
        };
        assert!(mine.matches(&notification(3)));
        assert!(!mine.matches(&notification(4)));
        assert!(!mine.matches(&traffic()));
    }
}
