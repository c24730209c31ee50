use std::fmt;
use std::ops::RangeInclusive;

use serde_json::Value;

/// Opaque listing key. Numeric and textual ids from the API share one form,
/// so `42` and `"42"` name the same listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Reads an id from a JSON value; blank strings and non-scalars yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(number) => Some(Self(number.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One job posting as it appeared in a page response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub id: Option<ListingId>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub collaborations: Option<String>,
    pub locations: Option<String>,
    pub shifts: Option<String>,
}

impl Listing {
    /// Tolerant parse: anything missing or of an unexpected type is absent.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(ListingId::from_value),
            name: value.get("name").and_then(scalar_text),
            company: value.get("company").and_then(scalar_text),
            image_url: value.get("imageUrl").and_then(scalar_text),
            url: value.get("url").and_then(scalar_text),
            collaborations: value.get("collaborations").and_then(joined_text),
            locations: value.get("locations").and_then(joined_text),
            shifts: value.get("shifts").and_then(joined_text),
        }
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }
}

/// Pagination cursor reported by a page response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub current: u64,
    pub max: u64,
}

impl Paginator {
    /// Pages still to fetch after `current`, in ascending order.
    pub fn remaining_pages(&self) -> RangeInclusive<u64> {
        self.current.saturating_add(1)..=self.max
    }
}

/// Decoded page: listings plus the cursor when the response carried a usable one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingPage {
    pub listings: Vec<Listing>,
    pub paginator: Option<Paginator>,
}

impl ListingPage {
    pub fn from_value(value: &Value) -> Self {
        let listings = value
            .get("resultSet")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Listing::from_value).collect())
            .unwrap_or_default();

        let paginator = value.get("paginator").and_then(|paginator| {
            let current = paginator.get("current").and_then(Value::as_u64)?;
            let max = paginator.get("max").and_then(Value::as_u64)?;
            Some(Paginator { current, max })
        });

        Self {
            listings,
            paginator,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn joined_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => scalar_text(other),
    }
}
