//! Reading claim forms posted as `multipart/form-data`.

use crate::models::{date_format, NewClaimRequest};
use crate::services::FileUpload;
use axum::extract::Multipart;
use rust_decimal::Decimal;
use std::collections::HashMap;
use track_core::error::AppError;

const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

fn bad_form(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Invalid form data: {}", e))
}

/// Splits the form into the claim fields and any attached files.
///
/// File inputs left empty by the browser arrive as a part with no name and
/// no content; those are skipped.
pub async fn read_claim_form(
    mut multipart: Multipart,
) -> Result<(NewClaimRequest, Vec<FileUpload>), AppError> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(bad_form)?;

                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                tracing::debug!(file_name = %file_name, size = data.len(), "Received attachment");
                files.push(FileUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            None => {
                let value = field.text().await.map_err(bad_form)?;
                fields.insert(name, value);
            }
        }
    }

    Ok((claim_request(&fields)?, files))
}

fn required<'a>(fields: &'a HashMap<String, String>, key: &str) -> Result<&'a str, AppError> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(REQUIRED_FIELDS_MESSAGE)))
}

pub(crate) fn claim_request(fields: &HashMap<String, String>) -> Result<NewClaimRequest, AppError> {
    let amount = required(fields, "amount")?
        .parse::<Decimal>()
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Amount must be a number")))?;

    let date = date_format::parse(required(fields, "date")?)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

    Ok(NewClaimRequest {
        name: required(fields, "name")?.to_string(),
        amount,
        building: required(fields, "building")?.to_string(),
        date,
        category: required(fields, "category")?.to_string(),
    })
}
