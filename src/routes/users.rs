use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, route, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use serde_json::json;
use tera::Tera;

use crate::dto::users::{DeleteOutcome, ListOutcome, UsersPage};
use crate::events::{EventBus, UserEvent};
use crate::forms::FieldErrors;
use crate::forms::users::{DeleteUserForm, EditUserForm, NewUserForm, SearchUserForm};
use crate::messages::translate;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, found, redirect, render_template};
use crate::services::ServiceError;
use crate::services::users as users_service;

fn page_from_path(req: &HttpRequest) -> usize {
    req.match_info()
        .get("page")
        .and_then(|page| page.parse().ok())
        .unwrap_or(1)
}

fn render_list(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    data: &UsersPage,
) -> HttpResponse {
    let mut context = base_context(flash_messages);
    context.insert("users", &data.users);
    context.insert("search_term", &data.search_term);
    context.insert("current_page", "users");
    render_template(tera, "users/index.html", &context)
}

/// Paginated listing of all users. Registered for `/list` and
/// `/list/{page}`; a missing page segment means page 1.
pub async fn show_users(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = page_from_path(&req);

    match users_service::list_users(repo.get_ref(), page) {
        Ok(ListOutcome::Page(data)) => render_list(&tera, &flash_messages, &data),
        Ok(ListOutcome::OutOfRange { last_page }) => found(&format!("/list/{last_page}")),
        Err(err) => {
            log::error!("Failed to list users: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[route("/new", method = "GET", method = "POST")]
pub async fn new_user(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    event_bus: web::Data<EventBus>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    form: Option<web::Form<NewUserForm>>,
) -> impl Responder {
    let mut errors = FieldErrors::new();
    let mut submitted: Option<NewUserForm> = None;

    if req.method() == Method::POST {
        if let Some(form) = form {
            let form = form.into_inner();
            match users_service::create_user(repo.get_ref(), &form) {
                Ok(user) => {
                    event_bus.publish(UserEvent::Created {
                        user_id: user.id,
                        username: user.username.clone(),
                    });
                    FlashMessage::success(translate(
                        "flashes.user.notice.added",
                        &[("username", &user.username)],
                    ))
                    .send();
                    return redirect(&format!("/{}/edit", user.id));
                }
                Err(ServiceError::Validation(form_errors)) => {
                    errors = form_errors;
                    submitted = Some(form);
                }
                Err(err) => {
                    log::error!("Failed to create user: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            }
        }
    }

    let mut context = base_context(&flash_messages);
    context.insert("errors", &errors);
    if let Some(form) = &submitted {
        context.insert(
            "form",
            &json!({
                "username": form.username,
                "email": form.email,
                "name": form.name,
            }),
        );
    }
    render_template(&tera, "users/new.html", &context)
}

#[route("/{id}/edit", method = "GET", method = "POST")]
pub async fn edit_user(
    user_id: web::Path<i32>,
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    form: Option<web::Form<EditUserForm>>,
) -> impl Responder {
    let user_id = user_id.into_inner();
    let mut errors = FieldErrors::new();

    if req.method() == Method::POST {
        if let Some(form) = form {
            match users_service::update_user(repo.get_ref(), user_id, &form.into_inner()) {
                Ok(user) => {
                    FlashMessage::success(translate(
                        "flashes.user.notice.updated",
                        &[("username", &user.username)],
                    ))
                    .send();
                    return redirect(&format!("/{}/edit", user.id));
                }
                Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
                Err(ServiceError::Validation(form_errors)) => errors = form_errors,
                Err(err) => {
                    log::error!("Failed to update user {user_id}: {err}");
                    return HttpResponse::InternalServerError().finish();
                }
            }
        }
    }

    // The edit page also carries the delete-confirmation form and the
    // system-wide two-factor toggle.
    match users_service::load_user(repo.get_ref(), user_id) {
        Ok(user) => {
            let mut context = base_context(&flash_messages);
            context.insert("user", &user);
            context.insert("errors", &errors);
            context.insert("twofactor_auth", &server_config.twofactor_auth);
            render_template(&tera, "users/edit.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load user {user_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/{id}")]
pub async fn delete_user(
    user_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: Option<web::Form<DeleteUserForm>>,
) -> impl Responder {
    let form = form
        .map(web::Form::into_inner)
        .unwrap_or(DeleteUserForm { confirm: false });

    match users_service::delete_user(repo.get_ref(), user_id.into_inner(), &form) {
        Ok(DeleteOutcome::Deleted { username }) => {
            FlashMessage::success(translate(
                "flashes.user.notice.deleted",
                &[("username", &username)],
            ))
            .send();
            redirect("/list/1")
        }
        Ok(DeleteOutcome::Skipped) => redirect("/list/1"),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to delete user: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
pub struct SearchQueryParams {
    #[serde(rename = "currentRoute")]
    current_route: Option<String>,
}

/// Search form and results. Registered for `/search` and `/search/{page}`.
///
/// A submitted form runs the search and renders the shared list view with
/// the listing's pagination rules; otherwise the standalone form is shown,
/// echoing the `currentRoute` hint so the layout can highlight the calling
/// navigation context.
pub async fn search_users(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    params: web::Query<SearchQueryParams>,
    form: Option<web::Form<SearchUserForm>>,
) -> impl Responder {
    let page = page_from_path(&req);

    if req.method() == Method::POST {
        if let Some(form) = form {
            return match users_service::search_users(repo.get_ref(), &form, page) {
                Ok(ListOutcome::Page(data)) => render_list(&tera, &flash_messages, &data),
                Ok(ListOutcome::OutOfRange { last_page }) => found(&format!("/list/{last_page}")),
                Err(err) => {
                    log::error!("Failed to search users: {err}");
                    HttpResponse::InternalServerError().finish()
                }
            };
        }
    }

    let mut context = base_context(&flash_messages);
    context.insert("current_route", &params.current_route);
    render_template(&tera, "users/search_form.html", &context)
}
