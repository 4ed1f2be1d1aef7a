use actix_identity::Identity;
use actix_web::{HttpRequest, Responder, get, post, web};

use crate::inertia::Inertia;
use crate::models::config::ServerConfig;
use crate::routes::redirect;
use crate::services::pages as pages_service;

#[get("/")]
pub async fn show_home(
    req: HttpRequest,
    inertia: web::Data<Inertia>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let data = pages_service::load_home_page(&server_config);
    inertia.render(&req, "Home", &data).await
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/")
}
