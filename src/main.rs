use actix_web::{App, HttpResponse, HttpServer, Responder, Result, post, web};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use rainmaker_ai::{AiService, ChatRequest, FileStore, error::AiError};

#[derive(Deserialize)]
struct VerifyKeyRequest {
    key: String,
}

#[derive(Deserialize)]
struct ConfigureRequest {
    api_key: Option<String>,
    use_real_ai: Option<bool>,
}

#[post("/chat")]
async fn chat(
    service: web::Data<AiService>,
    req: web::Json<ChatRequest>,
) -> Result<impl Responder, AiError> {
    let response = service.send_message(&req.messages).await?;
    Ok(web::Json(response))
}

#[post("/verify_key")]
async fn verify_key(
    service: web::Data<AiService>,
    req: web::Json<VerifyKeyRequest>,
) -> impl Responder {
    web::Json(service.verify_api_key(&req.key).await)
}

#[post("/config")]
async fn configure(
    service: web::Data<AiService>,
    req: web::Json<ConfigureRequest>,
) -> impl Responder {
    service.configure(req.api_key.as_deref(), req.use_real_ai);
    HttpResponse::NoContent().finish()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "rainmaker-ai.json".to_string());
    let bind_address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let service = web::Data::new(AiService::new(Box::new(FileStore::new(&config_path))));

    if service.is_using_real_ai() {
        tracing::info!("real AI backend enabled (key loaded from {config_path})");
    } else {
        tracing::info!("mock responder active; POST /config to enable the real backend");
    }

    tracing::info!("Starting server at http://{bind_address}");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .service(chat)
            .service(verify_key)
            .service(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
