//! The uniform JSON response envelope.
//!
//! Every endpoint returns `{ success, data?, error?, pagination? }`; no
//! handler returns a bare array or object.

use serde::{Deserialize, Serialize};

/// Successful response body. Errors are produced by `AppError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, pagination: None }
    }

    pub fn ok_paged(data: T, pagination: PageMeta) -> Self {
        Self { success: true, data: Some(data), error: None, pagination: Some(pagination) }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, error: Some(message), pagination: None }
    }
}

/// Pagination metadata returned alongside paged listings.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PageMeta {
    pub fn new(page: &PageParams, total: i64) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            total,
            has_more: page.offset + page.limit < total,
        }
    }
}

/// `limit`/`offset` query parameters, clamped to sane bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl Default for PageParams {
    fn default() -> Self {
        Self { limit: default_limit(), offset: 0 }
    }
}

impl PageParams {
    /// Applies the configured page-size ceiling and floors negatives.
    pub fn clamp(mut self, max_page_size: i64) -> Self {
        self.limit = self.limit.clamp(1, max_page_size);
        self.offset = self.offset.max(0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamp_bounds_limit_and_offset() {
        let page = PageParams { limit: 500, offset: -3 }.clamp(100);
        assert_eq!(page.limit, 100);
        assert_eq!(page.offset, 0);

        let page = PageParams { limit: 0, offset: 10 }.clamp(100);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn has_more_is_exact_at_the_boundary() {
        let page = PageParams { limit: 20, offset: 0 };
        assert!(PageMeta::new(&page, 21).has_more);
        assert!(!PageMeta::new(&page, 20).has_more);

        let page = PageParams { limit: 20, offset: 20 };
        assert!(!PageMeta::new(&page, 40).has_more);
    }

    #[test]
    fn plain_string_data_is_enveloped() {
        // The health endpoint returns a bare string; it still gets wrapped.
        let body = serde_json::to_value(ApiResponse::ok("OK")).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], "OK");
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2, 3])).unwrap();
        assert_eq!(body["success"], true);
        assert!(body.get("error").is_none());
        assert!(body.get("pagination").is_none());

        let err = serde_json::to_value(ApiResponse::error("nope".to_string())).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "nope");
        assert!(err.get("data").is_none());
    }
}
