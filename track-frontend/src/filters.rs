//! Predicates narrowing claim, complaint and asset lists.
//!
//! Every filter is a linear scan over an in-memory slice. Query strings are
//! converted to typed filters first; `all` or an empty value switches a
//! dimension off.

use crate::models::{
    date_format, Asset, AssetCondition, AssetStatus, Claim, ClaimStatus, ComplaintSuggestion,
    FeedbackKind, Priority,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use track_core::error::AppError;

/// Filter value meaning "no restriction".
pub const ALL: &str = "all";

/// Trimmed query value, or `None` when it is blank or `all`.
fn active(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
}

fn parse_active<T>(value: Option<String>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = String>,
{
    active(value)
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))
}

fn search_term(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

fn equals(filter: &Option<String>, value: &str) -> bool {
    filter
        .as_deref()
        .map_or(true, |f| f.eq_ignore_ascii_case(value.trim()))
}

/// Query string accepted by the claim list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ClaimQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub building: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimFilter {
    /// Lowercased; matched against name and submitting user.
    pub search: Option<String>,
    pub status: Option<ClaimStatus>,
    pub building: Option<String>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TryFrom<ClaimQuery> for ClaimFilter {
    type Error = AppError;

    fn try_from(query: ClaimQuery) -> Result<Self, Self::Error> {
        let date = active(query.date)
            .map(|d| date_format::parse(&d))
            .transpose()
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e)))?;

        Ok(Self {
            search: search_term(query.search),
            status: parse_active(query.status)?,
            building: active(query.building),
            category: active(query.category),
            date,
        })
    }
}

impl ClaimFilter {
    pub fn matches(&self, claim: &Claim) -> bool {
        let text = self.search.as_deref().map_or(true, |term| {
            contains_term(&claim.name, term) || contains_term(&claim.user, term)
        });

        text && self.status.map_or(true, |s| claim.status == s)
            && equals(&self.building, &claim.building)
            && equals(&self.category, &claim.category)
            && self.date.map_or(true, |d| claim.date == d)
    }

    pub fn apply(&self, claims: Vec<Claim>) -> Vec<Claim> {
        claims.into_iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub building: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintFilter {
    /// Lowercased; matched against title, description and submitter.
    pub search: Option<String>,
    pub kind: Option<FeedbackKind>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub building: Option<String>,
}

impl TryFrom<ComplaintQuery> for ComplaintFilter {
    type Error = AppError;

    fn try_from(query: ComplaintQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: search_term(query.search),
            kind: parse_active(query.kind)?,
            priority: parse_active(query.priority)?,
            status: active(query.status),
            category: active(query.category),
            building: active(query.building),
        })
    }
}

impl ComplaintFilter {
    pub fn matches(&self, item: &ComplaintSuggestion) -> bool {
        let text = self.search.as_deref().map_or(true, |term| {
            contains_term(&item.title, term)
                || contains_term(&item.description, term)
                || contains_term(&item.submitted_by, term)
        });

        text && self.kind.map_or(true, |k| item.kind == k)
            && self.priority.map_or(true, |p| item.priority == p)
            && equals(&self.status, &item.status)
            && equals(&self.category, &item.category)
            && equals(&self.building, &item.building)
    }

    pub fn apply(&self, items: Vec<ComplaintSuggestion>) -> Vec<ComplaintSuggestion> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub building: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetFilter {
    /// Lowercased; matched against name, category and assignee.
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
    pub building: Option<String>,
    pub category: Option<String>,
    pub condition: Option<AssetCondition>,
}

impl TryFrom<AssetQuery> for AssetFilter {
    type Error = AppError;

    fn try_from(query: AssetQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            search: search_term(query.search),
            status: parse_active(query.status)?,
            building: active(query.building),
            category: active(query.category),
            condition: parse_active(query.condition)?,
        })
    }
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        let text = self.search.as_deref().map_or(true, |term| {
            contains_term(&asset.name, term)
                || contains_term(&asset.category, term)
                || asset
                    .assigned_to
                    .as_deref()
                    .is_some_and(|a| contains_term(a, term))
        });

        text && self.status.map_or(true, |s| asset.status == s)
            && equals(&self.building, &asset.building)
            && equals(&self.category, &asset.category)
            && self.condition.map_or(true, |c| asset.condition == c)
    }

    pub fn apply(&self, assets: Vec<Asset>) -> Vec<Asset> {
        assets.into_iter().filter(|a| self.matches(a)).collect()
    }
}
