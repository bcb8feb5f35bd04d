//! Domain tag value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A topical domain a query can be routed to (Value Object)
///
/// The set is closed at compile time. Adding a variant means registering a
/// handler for it; the dispatcher reports a failed outcome for any tag that
/// has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    /// Courses, majors, degrees, departments, professors
    Curriculum,
    /// Buildings, libraries, dining, dorms, directions
    Locations,
    /// Events, schedules, games, concerts, meetings
    Events,
    /// Catch-all for anything the specialised domains do not cover
    General,
}

impl DomainTag {
    /// Every tag, in canonical order.
    pub const ALL: [DomainTag; 4] = [
        DomainTag::Curriculum,
        DomainTag::Locations,
        DomainTag::Events,
        DomainTag::General,
    ];

    /// Tags the router model is allowed to choose (everything but `General`).
    pub fn routable() -> &'static [DomainTag] {
        &Self::ALL[..3]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTag::Curriculum => "curriculum",
            DomainTag::Locations => "locations",
            DomainTag::Events => "events",
            DomainTag::General => "general",
        }
    }

    /// One-line description used in the classification prompt.
    pub fn description(&self) -> &'static str {
        match self {
            DomainTag::Curriculum => {
                "courses, classes, majors, curriculum, academic programs, degrees, professors, or any academic information"
            }
            DomainTag::Locations => {
                "campus buildings, libraries, dining halls, dorms, directions, maps, facilities, or any physical locations"
            }
            DomainTag::Events => {
                "events, schedules, concerts, games, performances, club meetings, conferences, or any time-based activities"
            }
            DomainTag::General => "general questions about the university that fit no other domain",
        }
    }
}

impl std::fmt::Display for DomainTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DomainTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        DomainTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownDomain(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Curriculum".parse::<DomainTag>(), Ok(DomainTag::Curriculum));
        assert_eq!(" LOCATIONS ".parse::<DomainTag>(), Ok(DomainTag::Locations));
        assert_eq!("events".parse::<DomainTag>(), Ok(DomainTag::Events));
        assert_eq!("general".parse::<DomainTag>(), Ok(DomainTag::General));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = "athletics".parse::<DomainTag>().unwrap_err();
        assert_eq!(err, DomainError::UnknownDomain("athletics".to_string()));
    }

    #[test]
    fn test_routable_excludes_general() {
        assert_eq!(
            DomainTag::routable(),
            &[DomainTag::Curriculum, DomainTag::Locations, DomainTag::Events]
        );
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&DomainTag::Locations).unwrap();
        assert_eq!(json, "\"locations\"");
    }
}
