use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EpisodeId;

/// A single episode as served by the API and cached by the client.
///
/// Everything except `watched` is server-authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: EpisodeId,
    pub series_id: String,
    pub series_title: String,
    pub season: u32,
    pub episode: u32,
    pub title: String,
    pub description: String,
    pub duration_seconds: u64,
    #[serde(with = "air_date")]
    pub air_date: DateTime<Utc>,
    pub watched: bool,
}

impl Episode {
    /// Returns a copy with the watched flag replaced.
    #[must_use]
    pub fn with_watched(&self, watched: bool) -> Self {
        Self {
            watched,
            ..self.clone()
        }
    }

    /// Duration rounded to the nearest whole minute.
    #[must_use]
    pub const fn duration_minutes(&self) -> u64 {
        (self.duration_seconds + 30) / 60
    }

    /// `Series Title S1E2` style label.
    #[must_use]
    pub fn code(&self) -> String {
        format!("{} S{}E{}", self.series_title, self.season, self.episode)
    }

    #[must_use]
    pub fn display_line(&self) -> String {
        format!(
            "{} · {} · {} min · {} · {}",
            self.code(),
            self.title,
            self.duration_minutes(),
            self.air_date.format("%Y-%m-%d"),
            if self.watched { "Watched" } else { "Unwatched" }
        )
    }
}

/// One page of a filtered, sorted episode list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub data: Vec<Episode>,
    pub page: u32,
    pub page_size: u32,
    /// Filtered count before pagination.
    pub total: usize,
    pub has_more: bool,
}

/// Air dates are written as RFC 3339 and read as either RFC 3339 or a bare
/// `YYYY-MM-DD` calendar date (midnight UTC).
pub mod air_date {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("invalid air date '{raw}'"))
    }
}
