//! HTTP surface: `GET /api/health` and `POST /api/generate`.

use actix_web::{error, web, App, HttpResponse, HttpServer};
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::Config,
    error::ImagineError,
    generator::Generator,
    models::{ErrorBody, GenerateBody, GenerationRequest},
};

pub const JSON_LIMIT: usize = 2 * 1024 * 1024;
pub const INTERNAL_ERROR: &str = "Internal server error.";

pub struct AppState {
    pub generator: Generator,
}

impl AppState {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

pub async fn generate(state: web::Data<AppState>, body: web::Json<GenerateBody>) -> HttpResponse {
    let request_id = Uuid::new_v4().to_string();

    let request = match GenerationRequest::try_from(&*body) {
        Ok(request) => request,
        Err(e) => {
            log::debug!("Rejected generate request [req:{}]: {}", request_id, e);
            return error_response(&e);
        }
    };

    log::info!(
        "🎨 Generate request [req:{}] size={} n={}",
        request_id,
        request.size(),
        request.count()
    );

    match state.generator.generate(&request).await {
        Ok(result) => {
            log::info!(
                "✅ Returning {} image(s) from {} [req:{}]",
                result.images.len(),
                result.provider,
                request_id
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            if !e.is_validation() {
                log::error!("❌ Unhandled error in /api/generate [req:{}]: {}", request_id, e);
            }
            error_response(&e)
        }
    }
}

fn error_response(err: &ImagineError) -> HttpResponse {
    match err {
        ImagineError::ValidationError(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message.as_str()))
        }
        _ => HttpResponse::InternalServerError().json(ErrorBody::new(INTERNAL_ERROR)),
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            log::debug!("Malformed JSON body: {}", err);
            let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
            error::InternalError::from_response(err, response).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/api/health", web::get().to(health))
        .route("/api/generate", web::post().to(generate));
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(Generator::from_config(&config)));

    match state.generator.provider_name() {
        Some(name) => log::info!("🖼️  Image provider: {}", name),
        None => log::warn!("⚠️  No image provider configured, serving fallback images only"),
    }

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host().to_string(), config.port()))?
        .run()
        .await
}
