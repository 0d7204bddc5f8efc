use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
/// Registration payload.
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
/// Login payload, posted as a urlencoded form with OAuth2-style field names.
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Payload requesting a new confirmation email.
pub struct RequestEmailForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Payload requesting a password-reset email.
pub struct ResetPasswordRequestForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Payload completing a password reset.
pub struct ResetPasswordForm {
    pub token: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}
