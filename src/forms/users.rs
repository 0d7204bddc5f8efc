use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;

#[derive(MultipartForm)]
/// Multipart payload carrying a replacement avatar image.
pub struct AvatarUploadForm {
    #[multipart(limit = "5MiB")]
    pub file: TempFile,
}
