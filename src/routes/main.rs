use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::main::MessageResponse;
use crate::repository::DieselRepository;
use crate::services::ServiceError;

#[get("/")]
pub async fn show_index() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::new("Contacts REST API v1"))
}

#[get("/healthchecker")]
pub async fn healthchecker(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    repo.ping()
        .map_err(|e| ServiceError::Internal(format!("Database healthcheck failed: {e}")))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Database connection is healthy")))
}
