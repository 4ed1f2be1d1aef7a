use actix_web::{HttpRequest, Responder, get, web};

use crate::inertia::Inertia;
use crate::models::config::ServerConfig;
use crate::services::pages as pages_service;

#[get("/settings")]
pub async fn show_settings(
    req: HttpRequest,
    inertia: web::Data<Inertia>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let data = pages_service::load_settings_page(&server_config);
    inertia.render(&req, "Settings", &data).await
}
