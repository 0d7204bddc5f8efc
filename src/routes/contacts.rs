use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::contact::{ContactResponse, contact_list};
use crate::forms::contact::{ContactForm, ContactListParams, ContactSearchParams};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::auth as auth_service;
use crate::services::cache::UserCache;
use crate::services::contacts as contacts_service;
use crate::services::ServiceResult;

#[get("")]
pub async fn list_contacts(
    params: web::Query<ContactListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contacts =
        contacts_service::list_contacts(repo.get_ref(), current.id, params.limit, params.offset)?;

    Ok(HttpResponse::Ok().json(contact_list(contacts)))
}

#[get("/search")]
pub async fn search_contacts(
    params: web::Query<ContactSearchParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contacts = contacts_service::search_contacts(repo.get_ref(), current.id, &params.query)?;
    Ok(HttpResponse::Ok().json(contact_list(contacts)))
}

#[get("/birthdays")]
pub async fn upcoming_birthdays(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contacts = contacts_service::upcoming_birthdays(repo.get_ref(), current.id)?;
    Ok(HttpResponse::Ok().json(contact_list(contacts)))
}

#[get("/{contact_id}")]
pub async fn get_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contact =
        contacts_service::get_contact(repo.get_ref(), contact_id.into_inner(), current.id)?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

#[post("")]
pub async fn create_contact(
    web::Json(form): web::Json<ContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contact = contacts_service::create_contact(repo.get_ref(), current.id, form)?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

#[put("/{contact_id}")]
pub async fn update_contact(
    contact_id: web::Path<i32>,
    web::Json(form): web::Json<ContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    let contact = contacts_service::update_contact(
        repo.get_ref(),
        contact_id.into_inner(),
        current.id,
        form,
    )?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

#[delete("/{contact_id}")]
pub async fn delete_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    cache: web::Data<UserCache>,
) -> ServiceResult<HttpResponse> {
    let current = auth_service::current_user(repo.get_ref(), cache.get_ref(), &user.email)?;

    contacts_service::delete_contact(repo.get_ref(), contact_id.into_inner(), current.id)?;
    Ok(HttpResponse::NoContent().finish())
}
