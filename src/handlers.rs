use actix_web::{web, Error, HttpResponse, Result};

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::scorer::Scorer;

/// Wire the scoring routes into an actix `App` with the default body limit.
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_with_limit(DEFAULT_MAX_BODY_BYTES)(cfg)
}

/// Same routes, with `/score` accepting bodies up to `max_body_bytes`.
pub fn configure_with_limit(max_body_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(web::resource("/").route(web::get().to(health)))
            .service(
                web::resource("/score")
                    .app_data(web::PayloadConfig::new(max_body_bytes))
                    .route(web::post().to(score)),
            );
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Healthy")
}

/// Score the raw request body. Failures inside the pipeline come back as
/// `{"error": ...}` with a 200, only a broken blocking pool is a real error.
pub async fn score(scorer: web::Data<Scorer>, body: web::Bytes) -> Result<HttpResponse, Error> {
    let response = web::block(move || scorer.run(&body)).await.map_err(|e| {
        tracing::error!("scoring task failed: {}", e);
        actix_web::error::ErrorInternalServerError("Scoring task failed")
    })?;

    Ok(HttpResponse::Ok().json(response))
}
