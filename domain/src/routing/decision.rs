//! Routing decision value object

use super::tag::DomainTag;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// How a [`RoutingDecision`] was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// The router model returned at least one valid domain
    Classifier,
    /// The router model failed; query keywords decided
    KeywordFallback,
    /// Neither the model nor the keywords produced a domain
    DefaultFallback,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Classifier => "classifier",
            DecisionSource::KeywordFallback => "keyword-fallback",
            DecisionSource::DefaultFallback => "default-fallback",
        }
    }
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The domains chosen for one query (Value Object)
///
/// Invariant: `domains` is never empty and holds no duplicates. Order is the
/// order in which the domains were first named, and the dispatcher reports
/// outcomes in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    domains: Vec<DomainTag>,
    source: DecisionSource,
}

impl RoutingDecision {
    /// Build a decision, dropping repeated tags.
    pub fn new(
        domains: impl IntoIterator<Item = DomainTag>,
        source: DecisionSource,
    ) -> Result<Self, DomainError> {
        let mut unique = Vec::new();
        for tag in domains {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        if unique.is_empty() {
            return Err(DomainError::EmptyDecision);
        }
        Ok(Self {
            domains: unique,
            source,
        })
    }

    /// A decision naming exactly one domain.
    pub fn single(domain: DomainTag, source: DecisionSource) -> Self {
        Self {
            domains: vec![domain],
            source,
        }
    }

    pub fn domains(&self) -> &[DomainTag] {
        &self.domains
    }

    pub fn source(&self) -> DecisionSource {
        self.source
    }

    pub fn contains(&self, domain: DomainTag) -> bool {
        self.domains.contains(&domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn is_multi_domain(&self) -> bool {
        self.domains.len() > 1
    }

    /// Comma-separated domain names, e.g. `curriculum,locations`.
    pub fn domain_list(&self) -> String {
        self.domains
            .iter()
            .map(DomainTag::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_decision_rejected() {
        let result = RoutingDecision::new(Vec::new(), DecisionSource::Classifier);
        assert_eq!(result, Err(DomainError::EmptyDecision));
    }

    #[test]
    fn test_duplicates_removed_order_kept() {
        let decision = RoutingDecision::new(
            [
                DomainTag::Locations,
                DomainTag::Curriculum,
                DomainTag::Locations,
            ],
            DecisionSource::Classifier,
        )
        .unwrap();

        assert_eq!(
            decision.domains(),
            &[DomainTag::Locations, DomainTag::Curriculum]
        );
        assert!(decision.is_multi_domain());
        assert_eq!(decision.domain_list(), "locations,curriculum");
    }

    #[test]
    fn test_single_decision() {
        let decision = RoutingDecision::single(DomainTag::General, DecisionSource::DefaultFallback);
        assert_eq!(decision.len(), 1);
        assert!(!decision.is_empty());
        assert!(decision.contains(DomainTag::General));
        assert_eq!(decision.source().to_string(), "default-fallback");
    }
}
