//! Listing create/update bodies
//!
//! Listings arrive either as `multipart/form-data` (text fields plus image files in
//! `propertyimage`) or as a JSON object. Both become a flat field map; nested JSON values
//! are kept as JSON text, the same shape multipart clients send them in.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value as JsonValue;

use crate::services::UploadStore;
use crate::state::AppState;
use crate::{Error, Result};

/// Multipart field carrying listing images.
pub const IMAGE_FIELD: &str = "propertyimage";

#[derive(Debug, Default)]
pub struct ListingForm {
    pub fields: HashMap<String, String>,
    /// Public paths of the images stored for this request.
    pub images: Vec<String>,
}

/// Read a listing body. Images stored before a failure are removed again.
pub async fn read_listing_form(state: &AppState, req: Request) -> Result<ListingForm> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(format!("Failed to read request body: {}", e.body_text())))?;
        return Ok(ListingForm {
            fields: json_fields(&bytes)?,
            images: Vec::new(),
        });
    }

    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|e| Error::Validation(e.body_text()))?;

    let mut form = ListingForm::default();
    if let Err(e) = collect_multipart(&state.uploads, &mut multipart, &mut form).await {
        state.uploads.discard(&form.images).await;
        return Err(e);
    }
    Ok(form)
}

async fn collect_multipart(
    uploads: &UploadStore,
    multipart: &mut Multipart,
    form: &mut ListingForm,
) -> Result<()> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            // Browsers send an empty file part when no file was chosen
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                if name != IMAGE_FIELD {
                    return Err(Error::UnsupportedUpload(format!(
                        "Unexpected file field: {name}"
                    )));
                }
                uploads.check_count(form.images.len() + 1)?;
                uploads.check_extension(&file_name)?;
                let bytes = read_capped(uploads, field).await?;
                form.images.push(uploads.save(&file_name, &bytes).await?);
            }
            None => {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, text);
            }
        }
    }
    Ok(())
}

async fn read_capped(uploads: &UploadStore, mut field: Field<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        uploads.check_size(buf.len() + chunk.len())?;
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> Error {
    Error::Validation(format!("Invalid multipart body: {}", e.body_text()))
}

/// Flatten a JSON object body into form fields. `null` values count as not supplied.
fn json_fields(bytes: &[u8]) -> Result<HashMap<String, String>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }

    let value: JsonValue = serde_json::from_slice(bytes)
        .map_err(|e| Error::Validation(format!("Invalid JSON in request body: {}", e)))?;
    let JsonValue::Object(object) = value else {
        return Err(Error::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                JsonValue::Null => return None,
                JsonValue::String(s) => s,
                JsonValue::Bool(b) => b.to_string(),
                JsonValue::Number(n) => n.to_string(),
                nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => nested.to_string(),
            };
            Some((key, text))
        })
        .collect())
}
