use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshnessError {
    #[error("Malformed commit listing: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed commit date {0:?}: {1}")]
    Date(String, chrono::ParseError),
}

/// When the upstream dataset was last touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FreshnessStamp {
    Updated(NaiveDate),
    #[default]
    Unknown,
}

impl fmt::Display for FreshnessStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // en-US long form, e.g. "January 5, 2024"
            Self::Updated(date) => write!(f, "{}", date.format("%B %-d, %Y")),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

// Only the fields we read out of the commits API payload.
#[derive(Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
}

#[derive(Deserialize)]
struct CommitAuthor {
    date: String,
}

/// Body of a commit-listing response.
pub struct Commits<'a>(pub &'a str);

impl<'a> TryFrom<Commits<'a>> for FreshnessStamp {
    type Error = FreshnessError;

    fn try_from(value: Commits<'a>) -> Result<Self, Self::Error> {
        let entries: Vec<CommitEntry> = serde_json::from_str(value.0)?;
        let Some(latest) = entries.first() else {
            return Ok(Self::Unknown);
        };

        let raw = &latest.commit.author.date;
        let when = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| FreshnessError::Date(raw.clone(), e))?
            .with_timezone(&Utc);
        Ok(Self::Updated(when.date_naive()))
    }
}
