use axum::extract::Multipart;
use serde::Deserialize;

use crate::error::AppError;

/// Public lookup form: the roll number and email must match together.
#[derive(Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub email: String,
}

/// Admin login form.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Admin add/edit form, assembled from a multipart body because it carries
/// the scanned result image alongside the text fields.
#[derive(Default)]
pub struct ScanForm {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    /// Original filename and bytes of the uploaded scan; `None` when the
    /// file field was absent or empty.
    pub file: Option<(String, Vec<u8>)>,
}

impl ScanForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("multipart error: {e}")))?
        {
            match field.name() {
                Some("name") => form.name = read_text(field).await?,
                Some("roll_no") => form.roll_no = read_text(field).await?,
                Some("email") => form.email = read_text(field).await?,
                Some("image") => {
                    let file_name = field.file_name().map(|s| s.to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
                    if let Some(file_name) = file_name
                        && !data.is_empty()
                    {
                        form.file = Some((file_name, data.to_vec()));
                    }
                }
                _ => {} // Ignore unknown fields.
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))
}
