//! List and form handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use postcast_core::DomainError;
use postcast_core::domain::PostId;
use postcast_core::form::PostForm;
use postcast_core::store::{POST_DELETED, POST_SCHEDULED, POST_UPDATED};
use postcast_shared::ApiResponse;
use postcast_shared::dto::{DeleteQuery, ListPostsQuery, PostRequest, ReorderRequest, ReorderResponse};

use super::views;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?platform=twitter&order=chronological
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = views::list_query(&query)?;
    let posts = query.apply(state.store.posts().await);

    let body: Vec<_> = posts.iter().map(views::post_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let mut form = PostForm::new();
    views::apply_request(&mut form, body.into_inner())?;

    let submission = form.submit(Utc::now())?;
    let warnings = submission.warnings.iter().map(ToString::to_string).collect();

    let post = state.store.add(submission.post).await?;

    Ok(HttpResponse::Created().json(
        ApiResponse::ok(views::post_response(&post))
            .with_message(POST_SCHEDULED)
            .with_warnings(warnings),
    ))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = PostId::from(path.into_inner());
    let existing = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    let mut form = PostForm::from_post(&existing);
    views::apply_request(&mut form, body.into_inner())?;

    let submission = form.submit(Utc::now())?;
    let warnings = submission.warnings.iter().map(ToString::to_string).collect();

    let post = state
        .store
        .update(submission.post.into_post())
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(views::post_response(&post))
            .with_message(POST_UPDATED)
            .with_warnings(warnings),
    ))
}

/// DELETE /api/posts/{id}?confirmed=true
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> AppResult<HttpResponse> {
    if !query.confirmed {
        return Err(AppError::ConfirmationRequired(
            "Delete this post? Repeat the request with confirmed=true".to_string(),
        ));
    }

    let id = PostId::from(path.into_inner());
    let removed = state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| DomainError::post_not_found(&id))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_response(&removed)).with_message(POST_DELETED)))
}

/// POST /api/posts/reorder
pub async fn reorder(
    state: web::Data<AppState>,
    body: web::Json<ReorderRequest>,
) -> AppResult<HttpResponse> {
    let ReorderRequest { from, to } = body.into_inner();
    let moved = state.store.reorder(from, to).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ReorderResponse { moved })))
}
