//! Mapping between domain types and wire DTOs.

use chrono::{NaiveDate, NaiveTime, SecondsFormat};
use postcast_core::domain::{ImageData, Notification, Platform, Post, PostId, Selection};
use postcast_core::form::PostForm;
use postcast_core::listing::{ListOrder, ListQuery};
use postcast_shared::dto::{
    FormResponse, ListPostsQuery, NotificationResponse, PostRequest, PostResponse,
    SelectionResponse,
};

use crate::middleware::error::{AppError, AppResult};

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        image: post.image.as_ref().map(|i| i.as_str().to_string()),
        platforms: post.platforms.iter().map(|p| p.as_str().to_string()).collect(),
        scheduled_for: post.scheduled_for.to_rfc3339_opts(SecondsFormat::Secs, true),
        created: post.created.to_rfc3339_opts(SecondsFormat::Millis, true),
        content_length: post.content_len(),
        over_limit: post.exceeds_soft_limit(),
    }
}

pub fn form_response(form: &PostForm) -> FormResponse {
    FormResponse {
        editing: form.edit_target().map(PostId::to_string),
        title: form.title.clone(),
        content: form.content.clone(),
        image: form.visible_image().map(|i| i.as_str().to_string()),
        platforms: form.platforms.iter().map(|p| p.as_str().to_string()).collect(),
        scheduled_date: form.schedule_date.map(|d| d.format("%Y-%m-%d").to_string()),
        scheduled_time: form.schedule_time.map(|t| t.format("%H:%M").to_string()),
    }
}

pub fn selection_response(selection: &Selection) -> SelectionResponse {
    SelectionResponse {
        state: selection.kind().to_string(),
        post_id: selection.post_id().map(PostId::to_string),
        form: selection.editing().map(|post| form_response(&PostForm::from_post(post))),
    }
}

pub fn notification_response(notification: &Notification) -> NotificationResponse {
    NotificationResponse {
        sequence: notification.sequence,
        message: notification.message.clone(),
        severity: notification.severity.as_str().to_string(),
        visible: notification.visible,
    }
}

pub fn list_query(query: &ListPostsQuery) -> AppResult<ListQuery> {
    let platform = query
        .platform
        .as_deref()
        .filter(|p| !p.trim().is_empty() && *p != "all")
        .map(str::parse::<Platform>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let order = query
        .order
        .as_deref()
        .map(str::parse::<ListOrder>)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();

    Ok(ListQuery { platform, order })
}

/// Copy a form submission into `form`, collecting every field that fails to parse.
pub fn apply_request(form: &mut PostForm, request: PostRequest) -> AppResult<()> {
    let mut errors = Vec::new();

    form.title = request.title;
    form.content = request.content;

    form.platforms.clear();
    for tag in &request.platforms {
        match tag.parse::<Platform>() {
            Ok(platform) => {
                form.platforms.insert(platform);
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    form.schedule_date = match request.scheduled_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| errors.push(format!("Invalid schedule date: {raw}")))
            .ok(),
    };
    form.schedule_time = match request.scheduled_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(|_| errors.push(format!("Invalid schedule time: {raw}")))
            .ok(),
    };

    match request.image.filter(|uri| !uri.is_empty()) {
        None => form.set_image(None),
        Some(uri) => match ImageData::from_data_uri(uri) {
            Ok(image) => form.set_image(Some(image)),
            Err(e) => errors.push(e.to_string()),
        },
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
