//! Toast handlers.

use actix_web::{HttpResponse, web};
use postcast_shared::ApiResponse;

use super::views;
use crate::state::AppState;

/// GET /api/notification
pub async fn current(state: web::Data<AppState>) -> HttpResponse {
    let notification = state.store.notifier().current();
    HttpResponse::Ok().json(ApiResponse::ok(views::notification_response(&notification)))
}

/// DELETE /api/notification
pub async fn dismiss(state: web::Data<AppState>) -> HttpResponse {
    let notifier = state.store.notifier();
    notifier.dismiss();
    HttpResponse::Ok().json(ApiResponse::ok(views::notification_response(&notifier.current())))
}
