use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
/// Payload for creating or fully replacing a contact. Phone and notes get
/// their final normalization in the domain constructors.
pub struct ContactForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    pub birthday: NaiveDate,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Query parameters for the paginated contact listing.
pub struct ContactListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
/// Query parameters for contact search.
pub struct ContactSearchParams {
    pub query: String,
}
