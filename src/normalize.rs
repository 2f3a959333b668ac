//! Field normalizers: route resolution, link URLs, and rich text flattening.

use crate::schema::{DocumentType, LinkField, LinkType, TextBlock};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Unreserved characters stay readable in route segments.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'~')
    .remove(b'.');

/// Route templates per routable document type. `:uid` is substituted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub project: String,
    pub case_study: String,
    pub post: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            project: "/work/:uid".to_string(),
            case_study: "/case-study/:uid".to_string(),
            post: "/blog/:uid".to_string(),
        }
    }
}

impl RouteTable {
    pub fn template(&self, doc_type: DocumentType) -> Option<&str> {
        match doc_type {
            DocumentType::Project => Some(&self.project),
            DocumentType::CaseStudy => Some(&self.case_study),
            DocumentType::Post => Some(&self.post),
            _ => None,
        }
    }

    /// Resolves the site-relative route for a document, percent-encoding the
    /// uid segment. Singletons and taxonomies have no route.
    pub fn resolve(&self, doc_type: DocumentType, uid: &str) -> Option<String> {
        let template = self.template(doc_type)?;
        let encoded = utf8_percent_encode(uid, SEGMENT).to_string();
        Some(template.replacen(":uid", &encoded, 1))
    }
}

/// Resolves a link field to a concrete href.
///
/// Web and media links pass their URL through verbatim, relative URLs
/// included. Document links resolve through the route table, falling back to
/// the URL the API materialized, if any. Empty links resolve to nothing.
pub fn resolve_link_url(link: &LinkField, routes: &RouteTable) -> Option<String> {
    match link.link_type {
        LinkType::Web | LinkType::Media => link.url.clone(),
        LinkType::Document => {
            let routed = link
                .doc_type
                .as_deref()
                .and_then(|t| t.parse::<DocumentType>().ok())
                .zip(link.uid.as_deref())
                .and_then(|(doc_type, uid)| routes.resolve(doc_type, uid));
            routed.or_else(|| link.url.clone())
        }
        LinkType::None => None,
    }
}

/// The identifier used in routes and lookups: uid when present, id otherwise.
pub fn resolve_uid<'a>(uid: Option<&'a str>, id: &'a str) -> &'a str {
    match uid {
        Some(u) if !u.is_empty() => u,
        _ => id,
    }
}

/// Flattens rich text into plain prose. Blocks are joined with a single
/// space; a limit truncates on characters and appends an ellipsis.
pub fn as_plain_text(blocks: &[TextBlock], limit: Option<usize>) -> String {
    let mut out = String::new();
    for block in blocks {
        let Some(text) = block.text.as_deref() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(text);
    }
    if let Some(limit) = limit {
        if out.chars().count() > limit {
            let mut truncated: String = out.chars().take(limit).collect();
            truncated.truncate(truncated.trim_end().len());
            truncated.push('…');
            return truncated;
        }
    }
    out
}

/// Display label with a typed fallback for unlabeled taxonomy entries.
pub fn pick_label(label: Option<&str>, fallback: &str) -> String {
    match label {
        Some(l) if !l.trim().is_empty() => l.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn block(text: &str) -> TextBlock {
        TextBlock {
            block_type: "paragraph".to_string(),
            text: Some(text.to_string()),
            spans: Vec::new(),
            data: None,
        }
    }

    fn doc_link(doc_type: &str, uid: &str) -> LinkField {
        LinkField {
            link_type: LinkType::Document,
            url: None,
            target: None,
            id: Some("doc_1".to_string()),
            uid: Some(uid.to_string()),
            doc_type: Some(doc_type.to_string()),
            lang: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_route_resolution_encodes_uid() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.resolve(DocumentType::Project, "guilded-platform-refresh"),
            Some("/work/guilded-platform-refresh".to_string())
        );
        assert_eq!(
            routes.resolve(DocumentType::Post, "a b/c"),
            Some("/blog/a%20b%2Fc".to_string())
        );
        assert_eq!(routes.resolve(DocumentType::Settings, "x"), None);
    }

    #[test]
    fn test_document_link_resolves_through_routes() {
        let routes = RouteTable::default();
        let link = doc_link("case_study", "guilded");
        assert_eq!(
            resolve_link_url(&link, &routes),
            Some("/case-study/guilded".to_string())
        );
    }

    #[test]
    fn test_document_link_without_route_falls_back_to_api_url() {
        let routes = RouteTable::default();
        let mut link = doc_link("tag", "platforms");
        link.url = Some("https://example.com/tags/platforms".to_string());
        assert_eq!(
            resolve_link_url(&link, &routes),
            Some("https://example.com/tags/platforms".to_string())
        );
    }

    #[test]
    fn test_web_link_passes_relative_url_verbatim() {
        let routes = RouteTable::default();
        let link = LinkField {
            link_type: LinkType::Web,
            url: Some("/work".to_string()),
            target: None,
            id: None,
            uid: None,
            doc_type: None,
            lang: None,
            extra: Map::new(),
        };
        assert_eq!(resolve_link_url(&link, &routes), Some("/work".to_string()));
    }

    #[test]
    fn test_empty_link_resolves_to_none() {
        let routes = RouteTable::default();
        let link = LinkField {
            link_type: LinkType::None,
            url: Some("https://stale.example.com".to_string()),
            target: None,
            id: None,
            uid: None,
            doc_type: None,
            lang: None,
            extra: Map::new(),
        };
        assert_eq!(resolve_link_url(&link, &routes), None);
    }

    #[test]
    fn test_plain_text_joins_blocks() {
        let blocks = [block("Hello"), block("world")];
        assert_eq!(as_plain_text(&blocks, None), "Hello world");
    }

    #[test]
    fn test_plain_text_truncation_trims_before_ellipsis() {
        let blocks = [block("Hello world")];
        assert_eq!(as_plain_text(&blocks, Some(5)), "Hello…");
        assert_eq!(as_plain_text(&blocks, Some(6)), "Hello…");
        assert_eq!(as_plain_text(&blocks, Some(11)), "Hello world");
    }

    #[test]
    fn test_resolve_uid_prefers_uid() {
        assert_eq!(resolve_uid(Some("vesto-wealth"), "prj_2"), "vesto-wealth");
        assert_eq!(resolve_uid(None, "prj_2"), "prj_2");
        assert_eq!(resolve_uid(Some(""), "prj_2"), "prj_2");
    }

    #[test]
    fn test_pick_label_fallback() {
        assert_eq!(pick_label(Some("Motion design"), "Tag"), "Motion design");
        assert_eq!(pick_label(Some("  "), "Tag"), "Tag");
        assert_eq!(pick_label(None, "Skill"), "Skill");
    }
}
