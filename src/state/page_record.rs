use serde::Serialize;

/// Status recorded for a page whose fetch never produced an HTTP response
pub const CONNECTION_FAILED: u16 = 0;

/// Everything the crawler learned about one visited URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// The visited URL
    pub url: String,

    /// HTTP status code, or `CONNECTION_FAILED`
    pub status: u16,

    /// Transport error text, if the fetch failed
    pub error: Option<String>,

    /// Page title (only for parsed HTML pages)
    pub title: Option<String>,

    /// Content-Type header value
    pub content_type: Option<String>,

    /// Unique normalized destinations linked from this page, in document order
    pub links: Vec<String>,
}

impl PageRecord {
    /// Builds the record for a page whose fetch failed
    pub fn failed(url: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            error: Some(error.into()),
            title: None,
            content_type: None,
            links: Vec::new(),
        }
    }

    /// Returns true if the fetch produced no usable response
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if the page was HTML and was parsed for links
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("text/html"))
    }
}
