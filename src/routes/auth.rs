use actix_web::{HttpRequest, HttpResponse, get, post, web};
use validator::Validate;

use crate::dto::auth::TokenResponse;
use crate::dto::main::MessageResponse;
use crate::dto::user::UserResponse;
use crate::forms::auth::{
    LoginForm, RegisterForm, RequestEmailForm, ResetPasswordForm, ResetPasswordRequestForm,
};
use crate::models::auth::{TokenScope, bearer_token};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::send_in_background;
use crate::services::auth::{
    self as auth_service, CONFIRM_TOKEN_TTL_SECS, EmailConfirmation, RESET_TOKEN_TTL_SECS,
};
use crate::services::cache::UserCache;
use crate::services::email::Mailer;
use crate::services::users as users_service;
use crate::services::{ServiceError, ServiceResult};

#[post("/signup")]
pub async fn signup(
    web::Json(form): web::Json<RegisterForm>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<Mailer>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let user = auth_service::register(repo.get_ref(), form)?;

    let token = auth_service::issue_token(
        &user.email,
        TokenScope::Confirm,
        CONFIRM_TOKEN_TTL_SECS,
        &server_config.secret,
    )?;

    let mailer = mailer.get_ref().clone();
    let (email, full_name) = (user.email.clone(), user.full_name.clone());
    send_in_background(move || mailer.send_confirmation(&email, &full_name, &token));

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[post("/login")]
pub async fn login(
    web::Form(form): web::Form<LoginForm>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let pair = auth_service::login(repo.get_ref(), form, &server_config.secret)?;
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

#[get("/refresh_token")]
pub async fn refresh_token(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let token = bearer_token(&req)
        .ok_or_else(|| ServiceError::Unauthorized("Not authenticated".to_string()))?;

    let pair = auth_service::refresh(repo.get_ref(), token, &server_config.secret)?;
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}

#[get("/confirmed_email/{token}")]
pub async fn confirmed_email(
    token: web::Path<String>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let message =
        match auth_service::confirm_email(repo.get_ref(), &token, &server_config.secret)? {
            EmailConfirmation::AlreadyConfirmed => "Your email is already confirmed",
            EmailConfirmation::Confirmed => "Email confirmed",
        };

    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

#[post("/request_email")]
pub async fn request_email(
    web::Json(form): web::Json<RequestEmailForm>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<Mailer>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    form.validate().map_err(ServiceError::from)?;

    let email = form.email.trim().to_lowercase();
    if let Some(user) = users_service::get_user_by_email(repo.get_ref(), &email)? {
        if user.confirmed {
            return Ok(HttpResponse::Ok().json(MessageResponse::new(
                "Your email is already confirmed",
            )));
        }

        let token = auth_service::issue_token(
            &user.email,
            TokenScope::Confirm,
            CONFIRM_TOKEN_TTL_SECS,
            &server_config.secret,
        )?;

        let mailer = mailer.get_ref().clone();
        let (email, full_name) = (user.email.clone(), user.full_name.clone());
        send_in_background(move || mailer.send_confirmation(&email, &full_name, &token));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("Check your email for confirmation.")))
}

#[post("/reset_password_request")]
pub async fn reset_password_request(
    web::Json(form): web::Json<ResetPasswordRequestForm>,
    repo: web::Data<DieselRepository>,
    mailer: web::Data<Mailer>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    form.validate().map_err(ServiceError::from)?;

    let email = form.email.trim().to_lowercase();
    let user = users_service::get_user_by_email(repo.get_ref(), &email)?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

    let token = auth_service::issue_token(
        &user.email,
        TokenScope::Reset,
        RESET_TOKEN_TTL_SECS,
        &server_config.secret,
    )?;

    let mailer = mailer.get_ref().clone();
    let (email, full_name) = (user.email.clone(), user.full_name.clone());
    send_in_background(move || mailer.send_password_reset(&email, &full_name, &token));

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset email sent")))
}

#[post("/reset_password")]
pub async fn reset_password(
    web::Json(form): web::Json<ResetPasswordForm>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
    server_config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    auth_service::reset_password(
        repo.get_ref(),
        cache.get_ref(),
        form,
        &server_config.secret,
    )?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}
