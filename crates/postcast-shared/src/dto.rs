//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Form submission for creating or editing a post.
///
/// `scheduledDate` is `YYYY-MM-DD`, `scheduledTime` is `HH:MM` (seconds optional),
/// both read as UTC. `image` is a `data:image/...;base64,` URI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

/// Drag-and-drop move in the list view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

/// Query string of the list view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub platform: Option<String>,
    pub order: Option<String>,
}

/// Query string of the delete endpoint; the confirmation gate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirmed: bool,
}

/// A stored post as the views render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub platforms: Vec<String>,
    pub scheduled_for: String,
    pub created: String,
    pub content_length: usize,
    pub over_limit: bool,
}

/// Form fields pre-populated for edit mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub editing: Option<String>,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub platforms: Vec<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
}

/// Current edit-selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    /// `idle`, `editing` or `confirming_delete`.
    pub state: String,
    pub post_id: Option<String>,
    pub form: Option<FormResponse>,
}

/// Toast state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub sequence: u64,
    pub message: String,
    /// `success` or `error`.
    pub severity: String,
    pub visible: bool,
}

/// Encoded upload, ready to put in `PostRequest::image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub data_uri: String,
    pub mime_type: String,
    pub bytes: usize,
}

/// Outcome of a reorder; `moved` is false for out-of-range or equal indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderResponse {
    pub moved: bool,
}

/// Health probe payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub posts: usize,
}
