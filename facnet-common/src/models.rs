//! Center and comment models
//!
//! Field names follow the hosted tables (`incubation_centers`,
//! `comments_incubation`) so records serialize straight into REST payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::ClientToken;

pub type CenterId = i64;
pub type CommentId = i64;

/// Incubation center types offered by the registration form
pub const CENTER_TYPES: &[&str] = &[
    "Incubation center",
    "Accelerator",
    "Venture capital",
    "Entrepreneurship cell",
    "Startup clubs",
    "School/college startup facilitation body",
];

/// Domains offered by the registration form
pub const DOMAINS: &[&str] = &[
    "Agriculture",
    "Artificial Intelligence / SAAS",
    "Climate Tech",
    "Consumer Goods or FMCG",
    "Education",
    "Finance",
    "Healthcare",
    "Agnostic",
    "Social Impact",
    "Defense and Space",
];

/// Service modes offered by the registration form
pub const SERVICE_MODES: &[&str] = &["Remote", "Onsite", "Hybrid"];

/// Support remuneration types offered by the registration form
pub const REMUNERATION_TYPES: &[&str] = &["Equity based", "Fee based", "Hybrid (equity + fee)"];

/// Incubation center profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub id: CenterId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub incubation_center_type: String,
    /// Service mode (Remote / Onsite / Hybrid)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub services: String,
    /// Free text, e.g. "50+"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub startups_incubated: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub support_remuneration: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub incubation_description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unique_selling_point: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_website: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub youtube_link: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Center {
    /// Visible to end users only once an administrator approved it
    pub fn is_visible(&self) -> bool {
        self.is_approved
    }

    pub fn summary(&self) -> CenterSummary {
        CenterSummary {
            id: self.id,
            company_name: self.company_name.clone(),
            location: self.location.clone(),
            domain: self.domain.clone(),
            incubation_center_type: self.incubation_center_type.clone(),
            logo_url: self.logo_url.clone(),
        }
    }
}

/// Directory listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterSummary {
    pub id: CenterId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub incubation_center_type: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Center row as inserted by registration
///
/// `is_approved` is set by [`NewCenter::pending`] and cannot be chosen by the
/// submitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCenter {
    pub company_name: String,
    pub company_email: String,
    pub company_website: String,
    pub unique_selling_point: String,
    pub incubation_center_type: String,
    pub location: String,
    pub domain: String,
    pub services: String,
    pub startups_incubated: String,
    pub support_remuneration: String,
    pub youtube_link: String,
    pub incubation_description: String,
    pub logo_url: Option<String>,
    is_approved: bool,
}

impl NewCenter {
    /// Build an unapproved center row
    #[allow(clippy::too_many_arguments)]
    pub fn pending(
        company_name: String,
        company_email: String,
        company_website: String,
        unique_selling_point: String,
        incubation_center_type: String,
        location: String,
        domain: String,
        services: String,
        startups_incubated: String,
        support_remuneration: String,
        youtube_link: String,
        incubation_description: String,
        logo_url: Option<String>,
    ) -> Self {
        Self {
            company_name,
            company_email,
            company_website,
            unique_selling_point,
            incubation_center_type,
            location,
            domain,
            services,
            startups_incubated,
            support_remuneration,
            youtube_link,
            incubation_description,
            logo_url,
            is_approved: false,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.is_approved
    }

    /// Materialize the stored record once the backend assigned an id
    pub fn into_center(self, id: CenterId, created_at: DateTime<Utc>) -> Center {
        Center {
            id,
            company_name: self.company_name,
            location: self.location,
            domain: self.domain,
            incubation_center_type: self.incubation_center_type,
            services: self.services,
            startups_incubated: self.startups_incubated,
            support_remuneration: self.support_remuneration,
            incubation_description: self.incubation_description,
            unique_selling_point: self.unique_selling_point,
            company_email: self.company_email,
            company_website: self.company_website,
            youtube_link: self.youtube_link,
            logo_url: self.logo_url,
            is_approved: self.is_approved,
            created_at: Some(created_at),
        }
    }
}

/// Comment on a center page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub center_id: CenterId,
    #[serde(default)]
    pub author_name: Option<String>,
    pub comment_text: String,
    /// Token of the client that posted the comment
    #[serde(default)]
    pub browser_session_id: Option<ClientToken>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Whether `caller` may delete this comment
    pub fn can_delete(&self, caller: &ClientToken) -> bool {
        crate::identity::is_owner(self.browser_session_id.as_ref(), caller)
    }
}

/// Comment row as inserted by the comment thread
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub center_id: CenterId,
    pub author_name: Option<String>,
    pub comment_text: String,
    pub browser_session_id: ClientToken,
}

impl NewComment {
    pub fn into_comment(self, id: CommentId, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            center_id: self.center_id,
            author_name: self.author_name,
            comment_text: self.comment_text,
            browser_session_id: Some(self.browser_session_id),
            created_at,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
