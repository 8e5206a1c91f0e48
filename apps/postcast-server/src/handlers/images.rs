//! Image upload handler.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use postcast_core::image::decode_image;
use postcast_shared::ApiResponse;
use postcast_shared::dto::ImageResponse;

use crate::middleware::error::AppResult;

/// POST /api/images - raw file body, `Content-Type` as picked by the browser.
///
/// Returns the embedded `data:` URI the form attaches to the post.
pub async fn upload(req: HttpRequest, body: web::Bytes) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = body.len();

    let image = decode_image(body.to_vec(), content_type).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ImageResponse {
        data_uri: image.as_str().to_string(),
        mime_type: image.mime_type().to_string(),
        bytes,
    })))
}
