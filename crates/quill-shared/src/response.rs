//! Standardized response payloads (RFC 7807 compliant for errors).

use serde::{Deserialize, Serialize};

/// One page of a listing plus the metadata needed to fetch the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// 1-based page number that was served.
    pub page: u64,
    pub size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }
}

/// RFC 7807 Problem Details.
///
/// See: https://datatracker.ietf.org/doc/html/rfc7807
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub error_type: String,

    /// A short, human-readable summary of the problem type.
    pub title: String,

    /// The HTTP status code a transport should answer with.
    pub status: u16,

    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Bad Request").with_detail(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, "Not Found").with_detail(detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflict").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_omits_missing_detail() {
        let json = serde_json::to_value(ErrorResponse::internal_error()).unwrap();
        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 500);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn last_page_detection() {
        let page = PageResponse::<u8> {
            items: vec![1, 2],
            page: 3,
            size: 10,
            total_count: 22,
            total_pages: 3,
        };
        assert!(page.is_last_page());
    }
}
