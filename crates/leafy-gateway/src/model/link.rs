use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: Option<String>,
    pub shortcode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub shortcode: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
