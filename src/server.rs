use actix_web::{HttpResponse, Responder, web};
use reqwest::Client;

use crate::config::Settings;
use crate::pipeline::handle;
use crate::storage::Bucket;

/// Shared by every trigger request.
pub struct AppState {
    pub settings: Settings,
    pub client: Client,
    pub bucket: Bucket,
}

/// Each request runs the pipeline once. The request body is ignored.
async fn trigger(state: web::Data<AppState>) -> impl Responder {
    let outcome = handle(&state.settings, &state.client, &state.bucket).await;
    HttpResponse::build(outcome.status)
        .content_type("text/plain; charset=utf-8")
        .body(outcome.message)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(trigger))
        .route("/", web::post().to(trigger));
}
