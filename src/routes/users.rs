use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, get, patch, web};

use crate::domain::user::Role;
use crate::dto::user::UserResponse;
use crate::forms::users::AvatarUploadForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::auth as auth_service;
use crate::services::cache::UserCache;
use crate::services::upload::AvatarStore;
use crate::services::users as users_service;
use crate::services::{ServiceError, ServiceResult};

#[get("/me")]
pub async fn me(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(current)))
}

#[patch("/avatar")]
pub async fn update_avatar(
    MultipartForm(form): MultipartForm<AvatarUploadForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
    store: web::Data<AvatarStore>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;
    if current.role != Role::Admin {
        return Err(ServiceError::Forbidden);
    }

    let avatar_url = store.store_avatar(current.id, &form.file)?;
    let updated = users_service::update_avatar(repo.get_ref(), cache.get_ref(), &current, &avatar_url)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
