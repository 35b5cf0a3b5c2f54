//! Notification DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::notification::Notification;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub recipient_id: Option<i64>,
    pub recipient_type: Option<String>,
    pub is_read: bool,
    pub priority: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            message: n.message,
            notification_type: n.notification_type,
            recipient_id: n.recipient_id,
            recipient_type: n.recipient_type,
            is_read: n.is_read,
            priority: n.priority,
            timestamp: n.timestamp,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NotificationRequest {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountDto {
    pub count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkedReadDto {
    pub updated: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_is_renamed() {
        let n = Notification::new("Bus 12 delayed", "info").to_recipient(4, "DRIVER");
        let json = serde_json::to_value(NotificationDto::from(n)).unwrap();
        assert_eq!(json["type"], "info");
        assert_eq!(json["recipientId"], 4);
        assert_eq!(json["isRead"], false);

        let req: NotificationRequest =
            serde_json::from_str(r#"{"message": "hello", "type": "alert"}"#).unwrap();
        assert_eq!(req.notification_type.as_deref(), Some("alert"));
    }
}
