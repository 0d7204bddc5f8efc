use actix_web::web;

use crate::services::email::MailerError;

pub mod auth;
pub mod contacts;
pub mod main;
pub mod users;

/// Registers the full HTTP surface. Shared between the server binary and the
/// integration tests so both exercise identical routing.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::show_index).service(
        web::scope("/api")
            .service(main::healthchecker)
            .service(
                web::scope("/auth")
                    .service(auth::signup)
                    .service(auth::login)
                    .service(auth::refresh_token)
                    .service(auth::confirmed_email)
                    .service(auth::request_email)
                    .service(auth::reset_password_request)
                    .service(auth::reset_password),
            )
            .service(
                web::scope("/contacts")
                    .service(contacts::search_contacts)
                    .service(contacts::upcoming_birthdays)
                    .service(contacts::list_contacts)
                    .service(contacts::create_contact)
                    .service(contacts::get_contact)
                    .service(contacts::update_contact)
                    .service(contacts::delete_contact),
            )
            .service(
                web::scope("/users")
                    .service(users::me)
                    .service(users::update_avatar),
            ),
    );
}

/// Runs a blocking email delivery off the request path, logging failures.
pub(crate) fn send_in_background<F>(task: F)
where
    F: FnOnce() -> Result<(), MailerError> + Send + 'static,
{
    actix_web::rt::spawn(async move {
        match web::block(task).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => log::error!("Failed to send email: {err}"),
            Err(err) => log::error!("Email delivery task failed: {err}"),
        }
    });
}
