// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Sentinel reported when the page has no usable `<title>`.
pub const NO_TITLE: &str = "No title found";

/// Sentinel reported when the page has no description meta tag.
pub const NO_DESCRIPTION: &str = "No description found";

/// Wire marker standing in for a status code when no response was obtained.
const ERROR_MARKER: &str = "error";

/// Request body shared by the analysis endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzePageRequest {
    /// Page URL to analyze. Defaults to empty when absent so the handler,
    /// not the JSON extractor, produces the 400 response body.
    #[serde(default)]
    pub url: String,
}

/// Terminal outcome of one link probe: the HTTP status code obtained after
/// redirect-following, or the `"error"` marker on transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Code(u16),
    Failed,
}

// The wire value is an untagged number-or-marker, so serde derives don't fit.
impl Serialize for ProbeStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ProbeStatus::Code(code) => serializer.serialize_u16(*code),
            ProbeStatus::Failed => serializer.serialize_str(ERROR_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for ProbeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Code(u16),
            Marker(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Code(code) => Ok(ProbeStatus::Code(code)),
            Wire::Marker(marker) if marker == ERROR_MARKER => Ok(ProbeStatus::Failed),
            Wire::Marker(marker) => {
                Err(de::Error::custom(format!("unknown status marker: {marker}")))
            }
        }
    }
}

/// Result of probing one resolved link. Produced exactly once per link and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkProbeResult {
    /// The absolute URL that was probed
    pub link: String,
    /// Terminal status after redirect-following, or the error marker
    pub status: ProbeStatus,
    /// Whether the resolved URL itself uses https, regardless of where
    /// redirects lead
    pub is_https: bool,
    /// Whether a redirect target repeated within this probe
    pub redirect_loop: bool,
}

/// A `<meta>` tag captured from the document, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Everything the extractor pulls out of a page in one pass
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    /// href attribute of every anchor, document order, duplicates kept
    pub raw_links: Vec<String>,
    /// `<title>` text; absent when missing or empty
    pub title: Option<String>,
    /// Meta tags carrying both name and content, document order
    pub meta_tags: Vec<MetaTag>,
    /// Whitespace-normalized text of the readable elements
    pub visible_text: String,
}

impl PageExtract {
    /// Content of the meta tag whose name is exactly "description".
    pub fn description(&self) -> Option<&str> {
        self.meta_tags
            .iter()
            .find(|tag| tag.name == "description")
            .map(|tag| tag.content.as_str())
    }
}

/// Head metadata as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl PageMetadata {
    /// Snapshot head data, substituting the "not found" sentinels for
    /// absent values.
    pub fn from_extract(extract: &PageExtract) -> Self {
        Self {
            title: extract
                .title
                .clone()
                .unwrap_or_else(|| NO_TITLE.to_string()),
            description: extract
                .description()
                .map(str::to_string)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// Response of `POST /check-links`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub link_statuses: Vec<LinkProbeResult>,
    pub metadata: PageMetadata,
    pub spelling_errors: Vec<String>,
}

impl AnalysisResponse {
    /// Pure composition of the finished sub-analyses. Empty collections stay
    /// present as empty arrays, never absent fields.
    pub fn assemble(
        link_statuses: Vec<LinkProbeResult>,
        metadata: PageMetadata,
        spelling_errors: Vec<String>,
    ) -> Self {
        Self {
            link_statuses,
            metadata,
            spelling_errors,
        }
    }
}

/// Response of `POST /check-spelling`
#[derive(Debug, Serialize, Deserialize)]
pub struct SpellingResponse {
    pub url: String,
    pub errors: Vec<String>,
}

/// Body of every 4xx/5xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_status_serializes_as_number_or_marker() {
        assert_eq!(
            serde_json::to_value(ProbeStatus::Code(404)).unwrap(),
            json!(404)
        );
        assert_eq!(
            serde_json::to_value(ProbeStatus::Failed).unwrap(),
            json!("error")
        );
    }

    #[test]
    fn test_probe_status_round_trip() {
        let code: ProbeStatus = serde_json::from_value(json!(301)).unwrap();
        assert_eq!(code, ProbeStatus::Code(301));

        let failed: ProbeStatus = serde_json::from_value(json!("error")).unwrap();
        assert_eq!(failed, ProbeStatus::Failed);

        assert!(serde_json::from_value::<ProbeStatus>(json!("bogus")).is_err());
    }

    #[test]
    fn test_link_probe_result_uses_camel_case_keys() {
        let result = LinkProbeResult {
            link: "https://example.com/about".to_string(),
            status: ProbeStatus::Code(200),
            is_https: true,
            redirect_loop: false,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "link": "https://example.com/about",
                "status": 200,
                "isHttps": true,
                "redirectLoop": false,
            })
        );
    }

    #[test]
    fn test_request_url_defaults_to_empty() {
        let request: AnalyzePageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.url, "");
    }

    #[test]
    fn test_description_lookup_is_case_sensitive() {
        let extract = PageExtract {
            meta_tags: vec![
                MetaTag {
                    name: "Description".to_string(),
                    content: "wrong case".to_string(),
                },
                MetaTag {
                    name: "description".to_string(),
                    content: "the real one".to_string(),
                },
            ],
            ..Default::default()
        };

        assert_eq!(extract.description(), Some("the real one"));
    }

    #[test]
    fn test_metadata_sentinels_for_absent_head_data() {
        let metadata = PageMetadata::from_extract(&PageExtract::default());
        assert_eq!(metadata.title, NO_TITLE);
        assert_eq!(metadata.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_assemble_keeps_empty_collections_present() {
        let response = AnalysisResponse::assemble(
            Vec::new(),
            PageMetadata::from_extract(&PageExtract::default()),
            Vec::new(),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["linkStatuses"], json!([]));
        assert_eq!(value["spellingErrors"], json!([]));
        assert!(value["metadata"].is_object());
    }
}
