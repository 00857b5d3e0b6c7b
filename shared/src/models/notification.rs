//! Notification Model

use serde::{Deserialize, Serialize};

/// In-app notification entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    #[serde(rename = "notificationId")]
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: i64,
}
