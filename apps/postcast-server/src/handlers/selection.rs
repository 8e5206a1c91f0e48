//! Edit-selection and delete-confirmation handlers.

use actix_web::{HttpResponse, web};
use postcast_core::DomainError;
use postcast_core::domain::PostId;
use postcast_core::store::POST_DELETED;
use postcast_shared::ApiResponse;

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/selection
pub async fn current(state: web::Data<AppState>) -> HttpResponse {
    let selection = state.store.selection().await;
    HttpResponse::Ok().json(ApiResponse::ok(views::selection_response(&selection)))
}

/// POST /api/posts/{id}/edit - load the post into the form.
pub async fn edit(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    state
        .store
        .select_for_edit(&id)
        .await
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    let selection = state.store.selection().await;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::selection_response(&selection))))
}

/// POST /api/posts/{id}/delete-request - open the confirmation modal.
pub async fn request_delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let post = state
        .store
        .request_delete(&id)
        .await
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    let selection = state.store.selection().await;
    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(views::selection_response(&selection))
            .with_message(format!("Delete \"{}\"?", post.title)),
    ))
}

/// POST /api/selection/confirm-delete
pub async fn confirm_delete(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let removed = state
        .store
        .confirm_delete()
        .await?
        .ok_or_else(|| AppError::BadRequest("No post is awaiting deletion".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_response(&removed)).with_message(POST_DELETED)))
}

/// DELETE /api/selection - cancel editing or close the modal.
pub async fn cancel(state: web::Data<AppState>) -> HttpResponse {
    state.store.clear_selection().await;
    let selection = state.store.selection().await;
    HttpResponse::Ok().json(ApiResponse::ok(views::selection_response(&selection)))
}
