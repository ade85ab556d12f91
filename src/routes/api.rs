use actix_web::{HttpResponse, Responder, get, web};
use serde::Deserialize;
use serde_json::json;

use crate::dto::api::UsersQuery;
use crate::repository::DieselRepository;
use crate::services::api as api_service;

#[derive(Deserialize)]
struct ApiV1UsersQueryParams {
    q: Option<String>,
    page: Option<usize>,
}

#[get("/v1/users")]
pub async fn api_v1_users(
    params: web::Query<ApiV1UsersQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = UsersQuery {
        search: params.q,
        page: params.page,
    };

    match api_service::list_users(repo.get_ref(), query) {
        Ok(response) => HttpResponse::Ok().json(json!({
            "total": response.total,
            "users": response.users,
        })),
        Err(e) => {
            log::error!("Failed to list users: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
