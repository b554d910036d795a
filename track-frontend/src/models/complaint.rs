//! Complaints and suggestions raised by employees.

use super::{date_format, flexible_id, non_blank, CurrentUser, ResponseEntry, WireEnum};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status given to newly submitted complaints and suggestions.
pub const INITIAL_STATUS: &str = "open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FeedbackKind {
    Complaint,
    Suggestion,
}

impl WireEnum for FeedbackKind {
    const VARIANTS: &'static [Self] = &[Self::Complaint, Self::Suggestion];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Complaint => "complaint",
            Self::Suggestion => "suggestion",
        }
    }
}

impl_wire_enum!(FeedbackKind, "feedback type");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl WireEnum for Priority {
    const VARIANTS: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl_wire_enum!(Priority, "priority");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSuggestion {
    #[serde(deserialize_with = "flexible_id", skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub category: String,
    pub priority: Priority,
    /// Free-form; the backend decides the vocabulary.
    pub status: String,
    pub submitted_by: String,
    pub building: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(default)]
    pub responses: Vec<ResponseEntry>,
}

impl ComplaintSuggestion {
    pub fn draft(request: &NewComplaintRequest, user: &CurrentUser, building: &str) -> Self {
        Self {
            id: String::new(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            kind: request.kind,
            category: request.category.trim().to_string(),
            priority: request.priority,
            status: INITIAL_STATUS.to_string(),
            submitted_by: user.name.clone(),
            building: building.to_string(),
            date: request.date,
            responses: Vec::new(),
        }
    }

    /// Appends a reply and/or moves the item to a new status.
    pub fn apply_response(&mut self, request: &RespondRequest, responder: &CurrentUser, today: NaiveDate) {
        if let Some(message) = request.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            self.responses.push(ResponseEntry {
                responder: responder.name.clone(),
                message: message.to_string(),
                date: today,
            });
        }
        if let Some(status) = request.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            self.status = status.to_string();
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComplaintRequest {
    #[validate(custom(function = "non_blank"))]
    pub title: String,

    #[validate(custom(function = "non_blank"))]
    pub description: String,

    #[serde(rename = "type")]
    pub kind: FeedbackKind,

    #[validate(custom(function = "non_blank"))]
    pub category: String,

    pub priority: Priority,

    #[validate(custom(function = "non_blank"))]
    pub building: String,

    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

/// HR/Admin reply to a complaint or suggestion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RespondRequest {
    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.status) && blank(&self.message)
    }
}
