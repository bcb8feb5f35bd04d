//! Keyword fallback routing.
//!
//! Used when the router model is unreachable or its reply holds no valid
//! decision. Matching is on whole tokens of the lowercased query, so
//! "hallway" does not match `hall` but "halls" does.

use super::tag::DomainTag;

const CURRICULUM_KEYWORDS: &[&str] = &[
    "class",
    "course",
    "major",
    "minor",
    "degree",
    "professor",
    "program",
    "department",
];

const LOCATION_KEYWORDS: &[&str] = &[
    "where", "building", "location", "dorm", "hall", "library", "dining", "map",
];

const EVENT_KEYWORDS: &[&str] = &[
    "when",
    "event",
    "schedule",
    "game",
    "concert",
    "performance",
    "meeting",
];

/// Keywords that pull a query into `tag`. `General` has none.
pub fn keywords_for(tag: DomainTag) -> &'static [&'static str] {
    match tag {
        DomainTag::Curriculum => CURRICULUM_KEYWORDS,
        DomainTag::Locations => LOCATION_KEYWORDS,
        DomainTag::Events => EVENT_KEYWORDS,
        DomainTag::General => &[],
    }
}

/// Every routable domain with at least one keyword present in `query`,
/// in canonical domain order. May be empty.
pub fn match_keywords(query: &str) -> Vec<DomainTag> {
    let lowered = query.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    DomainTag::routable()
        .iter()
        .copied()
        .filter(|tag| {
            keywords_for(*tag)
                .iter()
                .any(|kw| tokens.iter().any(|token| token_matches(token, kw)))
        })
        .collect()
}

/// Exact match, or the keyword with a plural suffix.
fn token_matches(token: &str, keyword: &str) -> bool {
    match token.strip_prefix(keyword) {
        Some("") | Some("s") | Some("es") => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_is_library_routes_to_locations() {
        assert_eq!(match_keywords("Where is the library?"), vec![DomainTag::Locations]);
    }

    #[test]
    fn test_courses_routes_to_curriculum() {
        let tags = match_keywords("What courses does COMPSCI offer?");
        assert!(tags.contains(&DomainTag::Curriculum));
    }

    #[test]
    fn test_plural_suffixes_match() {
        assert_eq!(match_keywords("Any classes on Friday?"), vec![DomainTag::Curriculum]);
        assert_eq!(match_keywords("list the concerts"), vec![DomainTag::Events]);
    }

    #[test]
    fn test_substring_does_not_match() {
        // "hallway" contains "hall", "wherever" contains "where"
        assert!(match_keywords("the hallway wherever").is_empty());
    }

    #[test]
    fn test_multiple_domains_in_canonical_order() {
        let tags = match_keywords("When is the game and where is the building?");
        assert_eq!(tags, vec![DomainTag::Locations, DomainTag::Events]);
    }

    #[test]
    fn test_no_keywords() {
        assert!(match_keywords("Tell me something interesting").is_empty());
        assert!(match_keywords("").is_empty());
    }

    #[test]
    fn test_general_has_no_keywords() {
        assert!(keywords_for(DomainTag::General).is_empty());
    }
}
