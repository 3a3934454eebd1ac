//! Shared fixtures for facnet-web integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request};
use chrono::{TimeZone, Utc};
use facnet_common::models::Center;
use facnet_web::services::RegistrationForm;
use serde_json::Value;

/// 1x1-ish PNG header, enough for the logo decoder
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Center with every field filled in
pub fn center(id: i64, company_name: &str, is_approved: bool) -> Center {
    Center {
        id,
        company_name: company_name.to_string(),
        location: "Lisbon".to_string(),
        domain: "Education".to_string(),
        incubation_center_type: "Accelerator".to_string(),
        services: "Remote".to_string(),
        startups_incubated: "10+".to_string(),
        support_remuneration: "Fee based".to_string(),
        incubation_description: "Helps founders ship.".to_string(),
        unique_selling_point: "Hands-on mentoring.".to_string(),
        company_email: "hello@example.org".to_string(),
        company_website: "https://example.org".to_string(),
        youtube_link: "https://youtu.be/jNQXAC9IVRw".to_string(),
        logo_url: None,
        is_approved,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, id as u32 % 28 + 1, 0, 0, 0).unwrap()),
    }
}

/// Registration form that passes validation
pub fn valid_form() -> RegistrationForm {
    RegistrationForm {
        logo: PNG_DATA_URL.to_string(),
        company_name: "Harbor Labs".to_string(),
        company_email: "team@harborlabs.io".to_string(),
        company_website: "https://harborlabs.io".to_string(),
        unique_selling_point: "Founder-first support. Deep industry network.".to_string(),
        incubation_center_type: "Incubation center".to_string(),
        location: "Porto".to_string(),
        domain: "Climate Tech".to_string(),
        services: "Hybrid".to_string(),
        startups_incubated: "40+".to_string(),
        support_remuneration: "Equity based".to_string(),
        youtube_link: "https://www.youtube.com/watch?v=jNQXAC9IVRw".to_string(),
        incubation_description: "A climate-focused program for early teams.".to_string(),
        is_approved: None,
    }
}

/// Same form as JSON, the way the page submits it
pub fn valid_form_json() -> Value {
    serde_json::json!({
        "logo": PNG_DATA_URL,
        "companyName": "Harbor Labs",
        "companyEmail": "team@harborlabs.io",
        "companyWebsite": "https://harborlabs.io",
        "uniqueSellingPoint": "Founder-first support. Deep industry network.",
        "incubationCenterType": "Incubation center",
        "location": "Porto",
        "domain": "Climate Tech",
        "services": "Hybrid",
        "startupsIncubated": "40+",
        "supportRemuneration": "Equity based",
        "youtubeLink": "https://www.youtube.com/watch?v=jNQXAC9IVRw",
        "incubationDescription": "A climate-focused program for early teams."
    })
}

/// Request carrying an optional client cookie
pub fn request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("browser_session_id={}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// JSON request carrying an optional client cookie
pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("browser_session_id={}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
