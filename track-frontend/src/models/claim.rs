//! Expense and reimbursement claims.

use super::{date_format, flexible_id, non_blank, CurrentUser, WireEnum};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Prefix of the placeholder id given to a claim before the backend assigns one.
pub const DRAFT_PREFIX: &str = "draft-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl WireEnum for ClaimStatus {
    const VARIANTS: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl_wire_enum!(ClaimStatus, "claim status");

/// Which backend collection a claim lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    Expense,
    Reimbursement,
}

impl ClaimKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Reimbursement => "reimbursement",
        }
    }
}

impl std::fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An expense or reimbursement awaiting (or past) a status decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Drafts are posted without an id; the backend assigns the real one.
    #[serde(deserialize_with = "flexible_id", skip_serializing_if = "is_draft_id")]
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub user: String,
    pub building: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    pub category: String,
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charged_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

fn is_draft_id(id: &str) -> bool {
    id.starts_with(DRAFT_PREFIX)
}

impl Claim {
    /// Builds a pending draft for `user` with a placeholder id.
    pub fn draft(request: &NewClaimRequest, user: &CurrentUser, building: &str) -> Self {
        Self {
            id: format!("{}{}", DRAFT_PREFIX, Uuid::new_v4()),
            name: request.name.trim().to_string(),
            amount: request.amount,
            user: user.name.clone(),
            building: building.to_string(),
            date: request.date,
            category: request.category.trim().to_string(),
            status: ClaimStatus::Pending,
            charged_to: None,
            attachments: Vec::new(),
        }
    }

    pub fn is_draft(&self) -> bool {
        is_draft_id(&self.id)
    }

    /// Copy with the new status applied. A charged-to target is only kept
    /// for approved claims.
    pub fn with_status(&self, status: ClaimStatus, charged_to: Option<&str>) -> Self {
        let mut patched = self.clone();
        patched.status = status;
        patched.charged_to = match status {
            ClaimStatus::Approved => charged_to
                .map(str::to_string)
                .or_else(|| self.charged_to.clone()),
            _ => None,
        };
        patched
    }

    /// The expense recorded when this reimbursement is approved.
    pub fn mirrored_expense(&self, charged_to: &str) -> Self {
        Self {
            id: format!("{}{}", DRAFT_PREFIX, Uuid::new_v4()),
            name: self.name.clone(),
            amount: self.amount,
            user: self.user.clone(),
            building: self.building.clone(),
            date: self.date,
            category: self.category.clone(),
            status: ClaimStatus::Approved,
            charged_to: Some(charged_to.to_string()),
            attachments: self.attachments.clone(),
        }
    }

    pub fn belongs_to(&self, user: &CurrentUser) -> bool {
        self.user.eq_ignore_ascii_case(&user.name) || self.user == user.user_id
    }
}

/// Form submitted by an employee for a new expense or reimbursement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewClaimRequest {
    #[validate(custom(function = "non_blank"))]
    pub name: String,

    #[validate(custom(function = "positive_amount"))]
    pub amount: Decimal,

    #[validate(custom(function = "non_blank"))]
    pub building: String,

    #[serde(with = "date_format")]
    pub date: NaiveDate,

    #[validate(custom(function = "non_blank"))]
    pub category: String,
}

pub(crate) fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive_amount");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Status decision on an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ClaimStatus,
    #[serde(default, alias = "chargedTo")]
    pub charged_to: Option<String>,
}
