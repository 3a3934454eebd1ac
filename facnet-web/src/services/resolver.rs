//! Center resolution from page slugs
//!
//! A slug is the company name with spaces turned into hyphens, so the original
//! name cannot be recovered exactly. Resolution tries a fixed list of name
//! variations against the store, then the built-in reference list, and finally
//! builds a "coming soon" placeholder. It never fails.

use facnet_common::models::Center;
use facnet_common::time;
use serde::Serialize;
use tracing::{debug, info};

use crate::services::reference::{find_reference, special_case_override};
use crate::store::{CenterStore, Lookup};

/// Name variation strategies, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Hyphens replaced by spaces
    Spaced,
    /// Spaced, whitespace runs collapsed and trimmed
    Collapsed,
    Lowercase,
    Uppercase,
    /// Hyphens removed
    Joined,
    /// Same value as `Collapsed`; kept so the list matches the page's
    /// historical lookup order
    CollapsedRepeat,
    /// Canonical name of a known special case
    SpecialCase,
}

/// One name to try against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub strategy: Strategy,
    pub name: String,
}

/// Where a resolved center came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    Remote { strategy: Strategy, name: String },
    Reference,
    Placeholder,
}

/// Resolved center plus its origin
#[derive(Debug, Clone)]
pub struct Resolution {
    pub center: Center,
    pub source: Source,
}

/// Display name derived from a slug
pub fn display_name(slug: &str) -> String {
    slug.replace('-', " ")
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name variations for `slug`, in lookup order, empty values dropped
pub fn name_candidates(slug: &str) -> Vec<Candidate> {
    let spaced = display_name(slug);
    let collapsed = collapse_whitespace(&spaced);

    let mut candidates = vec![
        Candidate { strategy: Strategy::Spaced, name: spaced.clone() },
        Candidate { strategy: Strategy::Collapsed, name: collapsed.clone() },
        Candidate { strategy: Strategy::Lowercase, name: spaced.to_lowercase() },
        Candidate { strategy: Strategy::Uppercase, name: spaced.to_uppercase() },
        Candidate { strategy: Strategy::Joined, name: slug.replace('-', "") },
        Candidate { strategy: Strategy::CollapsedRepeat, name: collapsed },
    ];
    if let Some(canonical) = special_case_override(&spaced) {
        candidates.push(Candidate {
            strategy: Strategy::SpecialCase,
            name: canonical.to_string(),
        });
    }

    candidates.retain(|c| !c.name.is_empty());
    candidates
}

/// Placeholder shown while a center has not registered yet
///
/// The id is time-derived and differs between calls.
pub fn placeholder_center(company_name: &str) -> Center {
    Center {
        id: time::epoch_millis(),
        company_name: company_name.to_string(),
        location: "Location to be updated".to_string(),
        domain: "Domain to be updated".to_string(),
        incubation_center_type: "Incubation center".to_string(),
        services: "Services to be updated".to_string(),
        startups_incubated: "To be updated".to_string(),
        support_remuneration: "To be updated".to_string(),
        incubation_description: "Description will be uploaded soon.".to_string(),
        unique_selling_point: "USP will be uploaded soon.".to_string(),
        company_email: "contact@example.com".to_string(),
        company_website: "#".to_string(),
        youtube_link: String::new(),
        logo_url: None,
        is_approved: false,
        created_at: None,
    }
}

/// Resolve a (percent-decoded) slug to a center
pub async fn resolve_center(store: &dyn CenterStore, slug: &str) -> Resolution {
    let candidates = name_candidates(slug);
    let mut tried: Vec<&str> = Vec::with_capacity(candidates.len());

    for candidate in &candidates {
        // A repeated value would repeat an identical query
        if tried.contains(&candidate.name.as_str()) {
            debug!(strategy = ?candidate.strategy, name = %candidate.name, "Skipping repeated name variation");
            continue;
        }
        tried.push(&candidate.name);

        match Lookup::from(store.find_approved_center_by_name(&candidate.name).await) {
            Lookup::Found(center) => {
                info!(
                    slug = %slug,
                    strategy = ?candidate.strategy,
                    center_id = center.id,
                    "Resolved center from backend"
                );
                return Resolution {
                    center,
                    source: Source::Remote {
                        strategy: candidate.strategy,
                        name: candidate.name.clone(),
                    },
                };
            }
            Lookup::NotFound => {
                debug!(strategy = ?candidate.strategy, name = %candidate.name, "No center for name variation");
            }
            Lookup::Unavailable(e) => {
                debug!(
                    strategy = ?candidate.strategy,
                    name = %candidate.name,
                    backend = store.backend_id(),
                    error = %e,
                    "Name lookup failed, trying next variation"
                );
            }
        }
    }

    let name = display_name(slug);
    if let Some(center) = find_reference(&name) {
        info!(slug = %slug, center_id = center.id, "Resolved center from reference list");
        return Resolution {
            center: center.clone(),
            source: Source::Reference,
        };
    }

    info!(slug = %slug, "No center found, using placeholder");
    Resolution {
        center: placeholder_center(&name),
        source: Source::Placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(slug: &str) -> Vec<(Strategy, String)> {
        name_candidates(slug)
            .into_iter()
            .map(|c| (c.strategy, c.name))
            .collect()
    }

    #[test]
    fn test_candidates_in_order() {
        assert_eq!(
            names("Build-Up--Labs"),
            vec![
                (Strategy::Spaced, "Build Up  Labs".to_string()),
                (Strategy::Collapsed, "Build Up Labs".to_string()),
                (Strategy::Lowercase, "build up  labs".to_string()),
                (Strategy::Uppercase, "BUILD UP  LABS".to_string()),
                (Strategy::Joined, "BuildUpLabs".to_string()),
                (Strategy::CollapsedRepeat, "Build Up Labs".to_string()),
            ]
        );
    }

    #[test]
    fn test_candidates_include_special_case() {
        let candidates = name_candidates("AIC-RNTU-Foundation");
        let last = candidates.last().unwrap();
        assert_eq!(last.strategy, Strategy::SpecialCase);
        assert_eq!(last.name, "AIC-RNTU Foundation");
    }

    #[test]
    fn test_empty_slug_has_no_candidates() {
        assert!(name_candidates("").is_empty());
        // Only separators: the collapsed and joined forms are empty and dropped
        let strategies: Vec<Strategy> = name_candidates("--").into_iter().map(|c| c.strategy).collect();
        assert_eq!(
            strategies,
            vec![Strategy::Spaced, Strategy::Lowercase, Strategy::Uppercase]
        );
    }

    #[test]
    fn test_placeholder_fields() {
        let center = placeholder_center("New Hub");
        assert_eq!(center.company_name, "New Hub");
        assert_eq!(center.location, "Location to be updated");
        assert_eq!(center.incubation_description, "Description will be uploaded soon.");
        assert_eq!(center.unique_selling_point, "USP will be uploaded soon.");
        assert!(!center.is_approved);
        assert!(center.logo_url.is_none());
    }
}
