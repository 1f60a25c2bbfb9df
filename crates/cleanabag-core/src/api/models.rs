use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Timestamp format used by the wallabag API, e.g. "2019-04-01T08:30:00+0200".
const WALLABAG_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A saved article as returned by the entries endpoints.
///
/// Only the metadata fields this tool acts on are modeled; the API returns
/// many more, which serde skips.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(deserialize_with = "int_bool")]
    pub is_archived: bool,
    #[serde(deserialize_with = "int_bool")]
    pub is_starred: bool,
    #[serde(deserialize_with = "wallabag_time")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "wallabag_time")]
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Whether the entry has not been read (archived) yet.
    pub fn is_unread(&self) -> bool {
        !self.is_archived
    }

    /// Title for display, falling back when the entry has none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(no title)")
    }
}

/// One page of the paginated entries listing.
#[derive(Debug, Deserialize)]
pub struct EntriesPage {
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
    pub total: u64,
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedEntries,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddedEntries {
    pub items: Vec<Entry>,
}

// Older wallabag servers emit 0/1 integers for the status flags, newer ones
// real booleans. Accept both.
fn int_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Unexpected, Visitor};
    use std::fmt;

    struct IntBoolVisitor;

    impl<'de> Visitor<'de> for IntBoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or a 0/1 integer")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<bool, E>
        where
            E: de::Error,
        {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E>(self, value: i64) -> Result<bool, E>
        where
            E: de::Error,
        {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(IntBoolVisitor)
}

fn wallabag_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_str(&raw, WALLABAG_TIME_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
