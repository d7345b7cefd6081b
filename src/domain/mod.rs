//! Domain types for episode tracking with strong typing.
//!
//! This module provides the identifier newtype and the small enums that make up
//! a list query. Each enum parses from, and prints as, the literal wire value
//! used in query strings (`airDate`, `desc`, `false`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an episode.
///
/// Wraps the opaque string id so it cannot be mixed up with series ids or
/// titles in function signatures.
///
/// # Examples
///
/// ```rust
/// use episodic::domain::EpisodeId;
///
/// let id = EpisodeId::new("bb-s01e01");
/// assert_eq!(id.as_str(), "bb-s01e01");
/// assert_eq!(id.to_string(), "bb-s01e01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EpisodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EpisodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Error returned when a query value is not one of the accepted literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value '{}', expected one of: {}",
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

/// Sort order enumeration to replace boolean blindness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub const VARIANTS: &'static [&'static str] = &["asc", "desc"];

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(UnknownVariant {
                value: other.to_string(),
                expected: Self::VARIANTS,
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field an episode list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    AirDate,
    Title,
    SeriesTitle,
    /// Season first, episode number as tie-break.
    Season,
    /// Episode number first, season as tie-break.
    Episode,
}

impl SortField {
    pub const VARIANTS: &'static [&'static str] =
        &["airDate", "title", "seriesTitle", "season", "episode"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AirDate => "airDate",
            Self::Title => "title",
            Self::SeriesTitle => "seriesTitle",
            Self::Season => "season",
            Self::Episode => "episode",
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airDate" => Ok(Self::AirDate),
            "title" => Ok(Self::Title),
            "seriesTitle" => Ok(Self::SeriesTitle),
            "season" => Ok(Self::Season),
            "episode" => Ok(Self::Episode),
            other => Err(UnknownVariant {
                value: other.to_string(),
                expected: Self::VARIANTS,
            }),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Watched-state filter. Travels as the strings `all`, `true`, `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl WatchedFilter {
    pub const VARIANTS: &'static [&'static str] = &["all", "true", "false"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Watched => "true",
            Self::Unwatched => "false",
        }
    }

    #[must_use]
    pub const fn matches(&self, watched: bool) -> bool {
        match self {
            Self::All => true,
            Self::Watched => watched,
            Self::Unwatched => !watched,
        }
    }
}

impl FromStr for WatchedFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "true" => Ok(Self::Watched),
            "false" => Ok(Self::Unwatched),
            other => Err(UnknownVariant {
                value: other.to_string(),
                expected: Self::VARIANTS,
            }),
        }
    }
}

impl fmt::Display for WatchedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_id_conversions() {
        let id = EpisodeId::from("ep-1");
        assert_eq!(id.as_str(), "ep-1");
        assert_eq!(id.to_string(), "ep-1");
        assert_eq!(EpisodeId::from("ep-1".to_string()), id);
    }

    #[test]
    fn episode_id_serializes_as_plain_string() {
        let id = EpisodeId::new("ep-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ep-1\"");
        let back: EpisodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("DESC".parse::<SortOrder>().is_err());
        assert!(SortOrder::default().is_ascending());
    }

    #[test]
    fn sort_field_round_trips_wire_names() {
        for name in SortField::VARIANTS {
            let field: SortField = name.parse().unwrap();
            assert_eq!(field.as_str(), *name);
        }
        assert_eq!(SortField::default(), SortField::AirDate);
        assert!("duration".parse::<SortField>().is_err());
    }

    #[test]
    fn watched_filter_matches() {
        assert!(WatchedFilter::All.matches(true));
        assert!(WatchedFilter::All.matches(false));
        assert!(WatchedFilter::Watched.matches(true));
        assert!(!WatchedFilter::Watched.matches(false));
        assert!(WatchedFilter::Unwatched.matches(false));
        assert!(!WatchedFilter::Unwatched.matches(true));
    }

    #[test]
    fn unknown_variant_lists_expected_values() {
        let err = "yes".parse::<WatchedFilter>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value 'yes', expected one of: all, true, false"
        );
    }
}
