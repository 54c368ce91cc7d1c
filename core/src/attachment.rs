//! Transaction attachment checks and multipart encoding.
//!
//! The API accepts a small set of document and image formats up to 8 MiB.
//! Both limits are checked before a request is built so that a rejected file
//! never reaches the network.

use std::path::Path;

use http_body_util::BodyExt as _;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;

/// Largest accepted attachment, in bytes.
pub const MAX_ATTACHMENT_SIZE: u64 = 8 * 1024 * 1024;

/// Accepted file extensions, compared exactly: `SCAN.PDF` is rejected.
pub const ALLOWED_EXTENSIONS: [&str; 11] = [
    ".txt", ".pdf", ".doc", ".docx", ".jpg", ".jpeg", ".png", ".bmp", ".rtf", ".xls", ".xlsx",
];

/// Checks the name, the extension and the `size` of an attachment.
pub fn validate(file_name: &str, size: u64) -> Result<(), ApiError> {
    if file_name.chars().any(char::is_control) {
        return Err(ApiError::InvalidArgument(format!(
            "attachment name {file_name:?} contains control characters"
        )));
    }
    let extension = extension(file_name);
    if !ALLOWED_EXTENSIONS.contains(&extension) {
        return Err(ApiError::UnsupportedAttachment(extension.to_string()));
    }
    if size > MAX_ATTACHMENT_SIZE {
        return Err(ApiError::AttachmentTooLarge { size });
    }
    Ok(())
}

/// Suffix of the base name from its last dot, dot included; empty when there
/// is no dot. A leading dot counts, so `.pdf` has the extension `.pdf`.
fn extension(file_name: &str) -> &str {
    let name = base_name(file_name);
    name.rfind('.').map_or("", |i| &name[i..])
}

/// Final path component of `file_name`, which is what the API gets to see.
pub fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name)
}

/// Encodes the upload form: a `type` field and one file part whose field
/// name and filename are both `file_name`. Returns the content type, boundary
/// included, and the body.
///
/// The form is built with reqwest and drained in memory so the request stays
/// plain data. Names are percent-encoded by reqwest inside the part headers.
pub(crate) fn encode_form(
    attachment_type: &str,
    file_name: &str,
    contents: &[u8],
) -> Result<(String, Vec<u8>), ApiError> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    let part = Part::bytes(contents.to_vec())
        .file_name(file_name.to_string())
        .mime_str(mime.as_ref())
        .map_err(encoding_error)?;
    let form = Form::new()
        .text("type", attachment_type.to_string())
        .part(file_name.to_string(), part);

    // Never sent: the builder is only used to render the form.
    let mut request = reqwest::Client::builder()
        .build()
        .map_err(encoding_error)?
        .post("http://localhost/")
        .multipart(form)
        .build()
        .map_err(encoding_error)?;
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| ApiError::SerializationError("multipart form has no content type".into()))?;
    let body = request
        .body_mut()
        .take()
        .ok_or_else(|| ApiError::SerializationError("multipart form has no body".into()))?;
    let body = futures::executor::block_on(body.collect())
        .map_err(encoding_error)?
        .to_bytes()
        .to_vec();
    Ok((content_type, body))
}

fn encoding_error(err: reqwest::Error) -> ApiError {
    ApiError::SerializationError(err.to_string())
}
