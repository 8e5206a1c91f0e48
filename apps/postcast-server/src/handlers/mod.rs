//! HTTP handlers and route configuration.

mod health;
mod images;
mod notification;
mod posts;
mod selection;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // List and form views
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/reorder", web::post().to(posts::reorder))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/edit", web::post().to(selection::edit))
                    .route("/{id}/delete-request", web::post().to(selection::request_delete)),
            )
            // Edit-selection and the delete modal
            .service(
                web::scope("/selection")
                    .route("", web::get().to(selection::current))
                    .route("", web::delete().to(selection::cancel))
                    .route("/confirm-delete", web::post().to(selection::confirm_delete)),
            )
            // Toast
            .service(
                web::scope("/notification")
                    .route("", web::get().to(notification::current))
                    .route("", web::delete().to(notification::dismiss)),
            )
            .route("/images", web::post().to(images::upload)),
    );
}
