//! Avatar file storage.
//!
//! Uploaded images land under `<media_dir>/avatars` and are served back by
//! the static file handler mounted at `/media`.

use std::path::PathBuf;

use actix_multipart::form::tempfile::TempFile;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unsupported avatar content type")]
    UnsupportedType,

    #[error("failed to store file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct AvatarStore {
    media_dir: PathBuf,
}

impl AvatarStore {
    pub fn new(media_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let media_dir = media_dir.into();
        std::fs::create_dir_all(media_dir.join("avatars"))?;
        Ok(Self { media_dir })
    }

    /// Persists an uploaded image and returns its public URL path.
    pub fn store_avatar(&self, user_id: i32, file: &TempFile) -> Result<String, UploadError> {
        let extension = file
            .content_type
            .as_ref()
            .and_then(image_extension)
            .ok_or(UploadError::UnsupportedType)?;

        let filename = format!("{user_id}-{}.{extension}", Uuid::new_v4());
        let destination = self.media_dir.join("avatars").join(&filename);

        std::fs::copy(file.file.path(), &destination)?;

        Ok(format!("/media/avatars/{filename}"))
    }
}

fn image_extension(content_type: &mime::Mime) -> Option<&'static str> {
    if content_type.type_() != mime::IMAGE {
        return None;
    }
    match content_type.subtype().as_str() {
        "png" => Some("png"),
        "jpeg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_upload(content_type: Option<mime::Mime>) -> TempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"fake image bytes").unwrap();
        TempFile {
            file,
            content_type,
            file_name: Some("avatar.png".to_string()),
            size: 16,
        }
    }

    #[test]
    fn stores_png_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path()).unwrap();

        let upload = temp_upload(Some(mime::IMAGE_PNG));
        let url = store.store_avatar(7, &upload).unwrap();

        assert!(url.starts_with("/media/avatars/7-"));
        assert!(url.ends_with(".png"));

        let stored = dir.path().join("avatars").join(url.rsplit('/').next().unwrap());
        assert!(stored.exists());
    }

    #[test]
    fn rejects_non_image_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path()).unwrap();

        let upload = temp_upload(Some(mime::TEXT_PLAIN));
        assert!(matches!(
            store.store_avatar(7, &upload),
            Err(UploadError::UnsupportedType)
        ));
    }

    #[test]
    fn rejects_missing_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path()).unwrap();

        let upload = temp_upload(None);
        assert!(matches!(
            store.store_avatar(7, &upload),
            Err(UploadError::UnsupportedType)
        ));
    }
}
