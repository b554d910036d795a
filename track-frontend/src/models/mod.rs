/// Implements `Display`, `FromStr` and `TryFrom<String>` for a [`WireEnum`].
///
/// Deserialization goes through `TryFrom<String>`, so backend casing
/// (`"Approved"`, `"approved"`) is accepted while unknown values are errors.
macro_rules! impl_wire_enum {
    ($ty:ty, $label:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::models::WireEnum::as_str(self))
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as $crate::models::WireEnum>::parse(s)
                    .ok_or_else(|| format!("Invalid {}: {}", $label, s))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub mod asset;
pub mod claim;
pub mod complaint;
pub mod notification;
pub mod thread;
pub mod user;

pub use asset::{Asset, AssetCondition, AssetHistoryEntry, AssetStatus, NewAssetRequest};
pub use claim::{
    Attachment, Claim, ClaimKind, ClaimStatus, NewClaimRequest, StatusChangeRequest, DRAFT_PREFIX,
};
pub use complaint::{
    ComplaintSuggestion, FeedbackKind, NewComplaintRequest, Priority, RespondRequest,
};
pub use notification::{ActionResponse, Notification};
pub use thread::ResponseEntry;
pub use user::{CurrentUser, Role};

/// Serde helpers for the backend's date fields.
///
/// Dates are written as `YYYY-MM-DD`. On read, a trailing time component
/// (`2024-03-01T00:00:00`) is ignored.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        let day = raw.trim().split('T').next().unwrap_or_default();
        NaiveDate::parse_from_str(day, FORMAT).map_err(|e| format!("invalid date '{}': {}", raw, e))
    }
}

/// Accepts numeric or string identifiers from the backend.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match <RawId as serde::Deserialize>::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Presence check for free-text form fields; whitespace alone does not count.
pub(crate) fn non_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("non_blank");
        err.message = Some("This field is required".into());
        return Err(err);
    }
    Ok(())
}

/// Lowercase string form shared by the closed status/priority enums.
pub trait WireEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}
