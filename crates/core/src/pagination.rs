//! Pagination links from GitHub's `Link` response header.
//!
//! GitHub paginates list endpoints with headers like:
//! `<https://api.github.com/user/repos?page=2>; rel="next", <https://api.github.com/user/repos?page=5>; rel="last"`

use serde::{Deserialize, Serialize};
use url::Url;

/// Page numbers for the standard pagination relations.
///
/// Absent relations are omitted when serialized, so a response on the only
/// page of results carries `{}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
}

impl PageLinks {
    /// Parse a `Link` header value.
    ///
    /// Segments without a URL, without a `rel`, with an unrecognized `rel`, or
    /// whose URL has no numeric `page` parameter are skipped. When a relation
    /// appears more than once the last occurrence wins.
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for part in header.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(inner) = segment
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                {
                    url = Some(inner);
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"'));
                }
            }

            let (Some(url), Some(rel)) = (url, rel) else {
                continue;
            };
            let Some(page) = page_from_url(url) else {
                continue;
            };

            match rel {
                "first" => links.first = Some(page),
                "prev" => links.prev = Some(page),
                "next" => links.next = Some(page),
                "last" => links.last = Some(page),
                _ => {}
            }
        }

        links
    }

    /// Parse an optional header, treating a missing header as no links.
    pub fn from_header(header: Option<&str>) -> Self {
        header.map(Self::parse).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Extract the `page` query parameter from a URL.
fn page_from_url(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
