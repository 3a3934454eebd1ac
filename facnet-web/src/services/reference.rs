//! Built-in reference centers and name overrides
//!
//! Used when the backend has no match for a page, so well-known centers still
//! show their profile text.

use facnet_common::models::Center;
use std::sync::OnceLock;

/// Known spellings of a center name that the page slug cannot reproduce
pub struct SpecialCase {
    /// Lower-case substrings that identify the center
    pub needles: &'static [&'static str],
    pub canonical: &'static str,
}

pub const SPECIAL_CASES: &[SpecialCase] = &[SpecialCase {
    needles: &["aic-rntu", "aic rntu"],
    canonical: "AIC-RNTU Foundation",
}];

/// Canonical name for `name` if it contains a special-case substring
/// (case-insensitive)
pub fn special_case_override(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    SPECIAL_CASES
        .iter()
        .find(|case| case.needles.iter().any(|needle| lower.contains(needle)))
        .map(|case| case.canonical)
}

/// Reference list, built once
pub fn reference_centers() -> &'static [Center] {
    static CENTERS: OnceLock<Vec<Center>> = OnceLock::new();
    CENTERS.get_or_init(build_reference_centers)
}

/// Local search over the reference list
///
/// Exact case-insensitive match first, then the special-case override, then a
/// case-insensitive substring match in either direction.
pub fn find_reference(name: &str) -> Option<&'static Center> {
    let centers = reference_centers();
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(center) = centers
        .iter()
        .find(|c| c.company_name.to_lowercase() == needle)
    {
        return Some(center);
    }

    if let Some(canonical) = special_case_override(&needle) {
        let canonical = canonical.to_lowercase();
        return centers
            .iter()
            .find(|c| c.company_name.to_lowercase().contains(&canonical));
    }

    centers.iter().find(|c| {
        let candidate = c.company_name.to_lowercase();
        candidate.contains(&needle) || needle.contains(&candidate)
    })
}

#[allow(clippy::too_many_arguments)]
fn reference(
    id: i64,
    company_name: &str,
    location: &str,
    domain: &str,
    center_type: &str,
    services: &str,
    startups: &str,
    remuneration: &str,
    description: &str,
    usp: &str,
    email: &str,
    website: &str,
    logo: &str,
) -> Center {
    Center {
        id,
        company_name: company_name.to_string(),
        location: location.to_string(),
        domain: domain.to_string(),
        incubation_center_type: center_type.to_string(),
        services: services.to_string(),
        startups_incubated: startups.to_string(),
        support_remuneration: remuneration.to_string(),
        incubation_description: description.to_string(),
        unique_selling_point: usp.to_string(),
        company_email: email.to_string(),
        company_website: website.to_string(),
        youtube_link: "https://www.youtube.com/watch?v=jNQXAC9IVRw".to_string(),
        logo_url: Some(logo.to_string()),
        is_approved: false,
        created_at: None,
    }
}

fn build_reference_centers() -> Vec<Center> {
    vec![
        reference(
            1,
            "Technology Transfer Office (UBL Cell) University of Sri Jayewardenepura",
            "Sri Lanka",
            "Agnostic",
            "Incubation center",
            "Hybrid",
            "50+",
            "Equity based",
            "Our UBL Cell stands out as a unique incubation center by seamlessly integrating \
             academic research with real-world industry applications. Its USP lies in its strong \
             university–industry linkage, enabling early-stage innovators, especially students \
             and researchers, to transform their scientific ideas into market-ready solutions.",
            "Strong university-industry linkage with academic research integration.",
            "contact@usjp.ac.lk",
            "https://usjp.ac.lk",
            "https://static.wixstatic.com/media/0556b8_e0fff23992724c7087785a7908a6998b~mv2.png",
        ),
        reference(
            2,
            "Skolkovo Innovation Center",
            "Russian Federation",
            "Agnostic",
            "Accelerator",
            "Onsite",
            "5000+",
            "Fee based",
            "Skolkovo Innovation Center is the largest innovation ecosystem in Russia, home to \
             over 5,000 high-tech startups across key sectors such as IT, biomedicine, energy, \
             advanced manufacturing, and space.",
            "Largest innovation ecosystem in Russia with government backing.",
            "contact@skolkovo.ru",
            "https://skolkovo.ru",
            "https://static.wixstatic.com/media/8d3771_dfaae21a034146c4987059be4b93105d~mv2.png",
        ),
        reference(
            3,
            "BUILD UP LABS",
            "Portugal",
            "Artificial Intelligence / SAAS",
            "Incubation center",
            "Remote",
            "25+",
            "Hybrid (equity + fee)",
            "BUILD UP LABS provides remote-first incubation support, leveraging the experience \
             of serial entrepreneurs to guide new entrepreneurs through their startup journey.",
            "Remote-first incubation support, by Serial-Entrepreneurs for New Entrepreneurs",
            "contact@builduplabs.com",
            "https://builduplabs.com",
            "/imageslogo/builduplabs.png",
        ),
        reference(
            142,
            "AIC-RNTU Foundation",
            "India",
            "Agnostic",
            "Incubation center",
            "Hybrid",
            "50+",
            "Equity based",
            "AIC-RNTU Foundation is central India's leading sector-agnostic incubation center \
             focused on early-stage startups. We provide comprehensive support through multiple \
             government schemes, holistic development programs, extensive networks, expert \
             mentoring, and curated programs designed to accelerate startup growth and success.",
            "We are central India's Leading Sector Agnostic Incubation center focused on Early \
             stage startups with Multiple Govt. schemes support for startups to holistic \
             development with networks, mentoring and curated programs",
            "contact@aic-rntu.org",
            "https://aic-rntu.org",
            "https://static.wixstatic.com/media/c5dc99_3f2a792fabe24746b2635a1287e2f075~mv2.png",
        ),
    ]
}
