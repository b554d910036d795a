use super::date_format;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reply in a complaint or asset response thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub responder: String,
    pub message: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}
