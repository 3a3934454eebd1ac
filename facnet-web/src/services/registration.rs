//! Registration intake
//!
//! Validates a center's registration form, uploads its logo and stores the
//! center as pending. Approval is always false on insert; only an
//! administrator can approve a center later.

use base64::Engine;
use facnet_common::models::{
    Center, NewCenter, CENTER_TYPES, DOMAINS, REMUNERATION_TYPES, SERVICE_MODES,
};
use facnet_common::time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{Asset, CenterStore, StoreError};

/// Largest decoded logo accepted
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Generic message shown when upload or insert fails
pub const SUBMISSION_FAILED_MESSAGE: &str = "Error submitting incubation center. Please try again.";

/// Registration form as submitted by the page
///
/// Every field defaults to empty so missing fields surface as validation
/// errors rather than parse errors. A submitted approval flag is accepted and
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationForm {
    /// `data:<mime>;base64,<payload>`
    pub logo: String,
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
    #[serde(alias = "is_approved")]
    pub is_approved: Option<bool>,
}

/// Form fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Logo,
    CompanyName,
    CompanyEmail,
    CompanyWebsite,
    UniqueSellingPoint,
    IncubationCenterType,
    Location,
    Domain,
    Services,
    StartupsIncubated,
    SupportRemuneration,
    YoutubeLink,
    IncubationDescription,
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Submission errors
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Registration has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    #[error("Logo upload failed: {0}")]
    Upload(StoreError),

    #[error("Center insert failed: {0}")]
    Persist(StoreError),
}

/// Decoded logo image
#[derive(Debug, Clone, PartialEq)]
pub struct LogoImage {
    pub content_type: String,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Option lists offered by the form
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOptions {
    pub center_types: &'static [&'static str],
    pub domains: &'static [&'static str],
    pub services: &'static [&'static str],
    pub support_remuneration: &'static [&'static str],
}

pub fn registration_options() -> RegistrationOptions {
    RegistrationOptions {
        center_types: CENTER_TYPES,
        domains: DOMAINS,
        services: SERVICE_MODES,
        support_remuneration: REMUNERATION_TYPES,
    }
}

/// Approximate sentence count: non-empty period-delimited segments
pub fn count_sentences(text: &str) -> usize {
    text.split('.').filter(|segment| !segment.trim().is_empty()).count()
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// Decode a `data:` URL holding a base64 image
pub fn decode_logo(data_url: &str) -> Result<LogoImage, &'static str> {
    const INVALID: &str = "Company logo must be a PNG, JPEG, GIF, WebP or SVG image";

    let rest = data_url.trim().strip_prefix("data:").ok_or(INVALID)?;
    let (header, payload) = rest.split_once(',').ok_or(INVALID)?;
    let content_type = header.strip_suffix(";base64").ok_or(INVALID)?.to_ascii_lowercase();
    let extension = extension_for(&content_type).ok_or(INVALID)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| INVALID)?;
    if bytes.is_empty() {
        return Err(INVALID);
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err("Company logo must be smaller than 2 MB");
    }

    Ok(LogoImage {
        content_type,
        extension,
        bytes,
    })
}

/// A form that passed validation
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    form: RegistrationForm,
    logo: LogoImage,
}

impl ValidRegistration {
    pub fn logo(&self) -> &LogoImage {
        &self.logo
    }

    /// Pending center row; any submitted approval flag is dropped here
    pub fn into_new_center(self, logo_url: Option<String>) -> NewCenter {
        let f = self.form;
        NewCenter::pending(
            f.company_name.trim().to_string(),
            f.company_email.trim().to_string(),
            f.company_website.trim().to_string(),
            f.unique_selling_point.trim().to_string(),
            f.incubation_center_type.trim().to_string(),
            f.location.trim().to_string(),
            f.domain.trim().to_string(),
            f.services.trim().to_string(),
            f.startups_incubated.trim().to_string(),
            f.support_remuneration.trim().to_string(),
            f.youtube_link.trim().to_string(),
            f.incubation_description.trim().to_string(),
            logo_url,
        )
    }
}

/// Check every field; all problems are reported at once
pub fn validate(form: RegistrationForm) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let required = [
        (Field::CompanyName, &form.company_name, "Company name is required"),
        (Field::CompanyEmail, &form.company_email, "Company email is required"),
        (Field::CompanyWebsite, &form.company_website, "Company website is required"),
        (Field::UniqueSellingPoint, &form.unique_selling_point, "Unique selling point is required"),
        (Field::IncubationCenterType, &form.incubation_center_type, "Incubation center type is required"),
        (Field::Location, &form.location, "Location is required"),
        (Field::Domain, &form.domain, "Domain is required"),
        (Field::Services, &form.services, "Services are required"),
        (Field::StartupsIncubated, &form.startups_incubated, "Number of startups incubated is required"),
        (Field::SupportRemuneration, &form.support_remuneration, "Support remuneration is required"),
        (Field::YoutubeLink, &form.youtube_link, "YouTube link is required"),
        (Field::IncubationDescription, &form.incubation_description, "Incubation description is required"),
        (Field::Logo, &form.logo, "Company logo is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.add(field, message);
        }
    }

    if count_sentences(&form.unique_selling_point) > 2 {
        errors.add(
            Field::UniqueSellingPoint,
            "Unique selling point should not be more than 2 sentences",
        );
    }

    let choices = [
        (Field::IncubationCenterType, &form.incubation_center_type, CENTER_TYPES, "Select a valid incubation center type"),
        (Field::Domain, &form.domain, DOMAINS, "Select a valid domain"),
        (Field::Services, &form.services, SERVICE_MODES, "Select a valid service mode"),
        (Field::SupportRemuneration, &form.support_remuneration, REMUNERATION_TYPES, "Select a valid support remuneration"),
    ];
    for (field, value, options, message) in choices {
        let value = value.trim();
        if !value.is_empty() && !options.contains(&value) {
            errors.add(field, message);
        }
    }

    let logo = if form.logo.trim().is_empty() {
        None
    } else {
        match decode_logo(&form.logo) {
            Ok(logo) => Some(logo),
            Err(message) => {
                errors.add(Field::Logo, message);
                None
            }
        }
    };

    match logo {
        Some(logo) if errors.is_empty() => Ok(ValidRegistration { form, logo }),
        _ => Err(errors),
    }
}

/// Validate, upload the logo, then insert the center as pending
///
/// A logo uploaded before a failed insert stays in storage.
pub async fn submit_registration(
    store: &dyn CenterStore,
    form: RegistrationForm,
) -> Result<Center, RegistrationError> {
    if form.is_approved == Some(true) {
        warn!("Registration asked for approval, ignoring");
    }

    let registration = validate(form).map_err(RegistrationError::Invalid)?;

    let logo = registration.logo();
    let asset = Asset {
        path: format!("logos/{}.{}", time::epoch_millis(), logo.extension),
        content_type: logo.content_type.clone(),
        bytes: logo.bytes.clone(),
    };
    let asset_path = asset.path.clone();
    let logo_url = store
        .upload_asset(asset)
        .await
        .map_err(RegistrationError::Upload)?;
    info!(path = %asset_path, "Logo uploaded");

    let center = store
        .insert_center(registration.into_new_center(Some(logo_url)))
        .await
        .map_err(|e| {
            warn!(path = %asset_path, "Center insert failed after logo upload, logo left in storage");
            RegistrationError::Persist(e)
        })?;

    info!(center_id = center.id, name = %center.company_name, "Center registered, awaiting approval");
    Ok(center)
}
