use actix_identity::Identity;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use crate::dto::users::{CreateUserProps, UsersIndexProps, UsersQuery};
use crate::forms::users::CreateUserForm;
use crate::inertia::Inertia;
use crate::repository::DieselRepository;
use crate::routes::{alerts, redirect};
use crate::services::policy::UserPolicy;
use crate::services::{ServiceError, users as users_service};

#[get("/users")]
pub async fn show_users(
    req: HttpRequest,
    params: web::Query<UsersQuery>,
    user: Option<Identity>,
    repo: web::Data<DieselRepository>,
    policy: web::Data<UserPolicy>,
    inertia: web::Data<Inertia>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    let data = match users_service::list_users(repo.get_ref(), &params) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load users page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let actor_id = user.and_then(|user| user.id().ok());
    let actor = match users_service::load_actor(repo.get_ref(), actor_id.as_deref()) {
        Ok(actor) => actor,
        Err(err) => {
            log::error!("Failed to load the current user: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let props = UsersIndexProps {
        users: data.users,
        filters: data.filters,
        can: policy.abilities(actor.as_ref()),
        alerts: alerts(&flash_messages),
    };

    inertia.render(&req, "Users/Index", &props).await
}

#[get("/users/create")]
pub async fn show_create_user(req: HttpRequest, inertia: web::Data<Inertia>) -> impl Responder {
    inertia
        .render(&req, "Users/Create", &CreateUserProps::default())
        .await
}

#[post("/users")]
pub async fn create_user(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    inertia: web::Data<Inertia>,
    web::Form(form): web::Form<CreateUserForm>,
) -> impl Responder {
    let old = form.old_input();

    match users_service::create_user(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("User created.").send();
            redirect("/users")
        }
        Err(ServiceError::Validation(errors)) => {
            let props = CreateUserProps { errors, old };
            inertia
                .render_with_status(&req, StatusCode::UNPROCESSABLE_ENTITY, "Users/Create", &props)
                .await
        }
        Err(err) => {
            log::error!("Failed to create user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
