//! Multipart bodies for claims submitted with receipts.

use crate::models::Claim;
use reqwest::multipart::{Form, Part};

/// A file received from the browser, forwarded as-is to the backend.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Builds the backend form for `claim`: one text field per claim property
/// plus an `attachments` part per file.
pub fn claim_form(claim: &Claim, files: Vec<FileUpload>) -> Form {
    let mut form = Form::new()
        .text("name", claim.name.clone())
        .text("amount", claim.amount.to_string())
        .text("user", claim.user.clone())
        .text("building", claim.building.clone())
        .text("date", claim.date.format("%Y-%m-%d").to_string())
        .text("category", claim.category.clone())
        .text("status", claim.status.to_string());

    if let Some(charged_to) = &claim.charged_to {
        form = form.text("chargedTo", charged_to.clone());
    }

    for FileUpload {
        file_name,
        content_type,
        data,
    } in files
    {
        let part = match Part::bytes(data.clone())
            .file_name(file_name.clone())
            .mime_str(&content_type)
        {
            Ok(part) => part,
            Err(e) => {
                tracing::warn!(
                    file_name = %file_name,
                    content_type = %content_type,
                    error = %e,
                    "Unrecognised content type, sending without one"
                );
                Part::bytes(data).file_name(file_name)
            }
        };
        form = form.part("attachments", part);
    }

    form
}
