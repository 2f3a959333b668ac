//! Shared field types: rich text, link fields, images, and repeatable groups.
//!
//! These mirror the CMS field primitives. Optional values normalize to
//! `None`; re-validating a serialized field yields a deep-equal value.

use super::check::{Checker, kind_of};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Accepts #rgb, #rrggbb and #rrggbbaa.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Loose ISO-8601 shape: date, optionally followed by a time part.
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}([T ].+)?$").unwrap_or_else(|_| unreachable!("static pattern"))
});

// ============================================================================
// Rich text
// ============================================================================

/// Ordered sequence of typed text blocks. Empty is valid ("no content").
pub type RichText = Vec<TextBlock>;

/// One block of rich text (paragraph, heading, list item, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    /// Block kind as reported by the CMS (e.g. "paragraph", "heading1").
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    /// Inline formatting spans, kept in source order as raw values.
    pub spans: Vec<Value>,
    pub data: Option<Value>,
}

pub(crate) fn check_rich_text(c: &mut Checker, value: &Value) -> RichText {
    let Some(items) = value.as_array() else {
        c.error_here(format!(
            "expected an array of text blocks, found {}",
            kind_of(value)
        ));
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for (i, block) in items.iter().enumerate() {
        if let Some(b) = c.indexed(i, |c| check_text_block(c, block)) {
            out.push(b);
        }
    }
    out
}

/// Optional rich text field on an object: missing/null means empty.
pub(crate) fn opt_rich_text(c: &mut Checker, obj: &Map<String, Value>, key: &str) -> RichText {
    match c.opt_field(obj, key) {
        Some(v) => c.scoped(key, |c| check_rich_text(c, v)),
        None => Vec::new(),
    }
}

fn check_text_block(c: &mut Checker, value: &Value) -> Option<TextBlock> {
    let obj = c.object(value)?;
    let block_type = c.req_str(obj, "type")?;
    let text = c.opt_str(obj, "text");
    let spans = match obj.get("spans") {
        Some(Value::Array(spans)) => spans.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            c.error("spans", format!("expected an array, found {}", kind_of(other)));
            Vec::new()
        }
    };
    let data = c.opt_field(obj, "data").cloned();
    Some(TextBlock {
        block_type,
        text,
        spans,
        data,
    })
}

// ============================================================================
// Link fields
// ============================================================================

/// Discriminant of a polymorphic link field.
///
/// Unknown discriminants degrade to [`LinkType::None`] so a bad link never
/// fails a whole document; resolution simply yields no URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LinkType {
    Web,
    Document,
    Media,
    #[default]
    None,
}

impl LinkType {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "Web" => Self::Web,
            "Document" => Self::Document,
            "Media" => Self::Media,
            _ => Self::None,
        }
    }
}

/// Polymorphic link: web URL, internal document, media asset, or empty.
///
/// Validated permissively: only the `link_type` discriminant is required,
/// and unrecognized keys are retained for later resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinkField {
    pub link_type: LinkType,
    pub url: Option<String>,
    pub target: Option<String>,
    pub id: Option<String>,
    pub uid: Option<String>,
    /// Target document type, for Document links.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub lang: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const LINK_KEYS: [&str; 7] = ["link_type", "url", "target", "id", "uid", "type", "lang"];

pub(crate) fn check_link(c: &mut Checker, value: &Value) -> Option<LinkField> {
    let obj = c.object(value)?;
    let link_type = match obj.get("link_type") {
        Some(Value::String(s)) => LinkType::from_raw(s),
        Some(Value::Null) | None => {
            c.error("link_type", "link field is missing its discriminant");
            return None;
        }
        Some(other) => {
            c.error(
                "link_type",
                format!("expected a string, found {}", kind_of(other)),
            );
            return None;
        }
    };

    let mut link = LinkField {
        link_type,
        url: c.opt_str(obj, "url"),
        target: c.opt_str(obj, "target"),
        id: c.opt_str(obj, "id"),
        uid: c.opt_str(obj, "uid"),
        doc_type: c.opt_str(obj, "type"),
        lang: c.opt_str(obj, "lang"),
        extra: Map::new(),
    };
    for (key, v) in obj {
        if !LINK_KEYS.contains(&key.as_str()) {
            link.extra.insert(key.clone(), v.clone());
        }
    }
    Some(link)
}

/// Optional link field on an object.
pub(crate) fn opt_link(
    c: &mut Checker,
    obj: &Map<String, Value>,
    key: &str,
) -> Option<LinkField> {
    let v = c.opt_field(obj, key)?;
    c.scoped(key, |c| check_link(c, v))
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// CMS-hosted image with alt text and optional dimensions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageField {
    pub url: String,
    pub alt: Option<String>,
    pub copyright: Option<String>,
    pub dimensions: Option<ImageDimensions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const IMAGE_KEYS: [&str; 4] = ["url", "alt", "copyright", "dimensions"];

pub(crate) fn check_image(c: &mut Checker, value: &Value) -> Option<ImageField> {
    let obj = c.object(value)?;
    let url = c.req_str(obj, "url")?;
    if url::Url::parse(&url).is_err() {
        c.error("url", format!("`{url}` is not an absolute URL"));
        return None;
    }
    // when dimensions is present, both sides are required
    let dimensions = c.opt_field(obj, "dimensions").and_then(|v| {
        c.scoped("dimensions", |c| {
            let obj = c.object(v)?;
            let width = c.req_u32(obj, "width");
            let height = c.req_u32(obj, "height");
            Some(ImageDimensions {
                width: width?,
                height: height?,
            })
        })
    });

    let mut image = ImageField {
        url,
        alt: c.opt_str(obj, "alt"),
        copyright: c.opt_str(obj, "copyright"),
        dimensions,
        extra: Map::new(),
    };
    for (key, v) in obj {
        if !IMAGE_KEYS.contains(&key.as_str()) {
            image.extra.insert(key.clone(), v.clone());
        }
    }
    Some(image)
}

/// Optional image field on an object.
pub(crate) fn opt_image(
    c: &mut Checker,
    obj: &Map<String, Value>,
    key: &str,
) -> Option<ImageField> {
    let v = c.opt_field(obj, key)?;
    c.scoped(key, |c| check_image(c, v))
}

// ============================================================================
// Repeatable groups
// ============================================================================

/// Single-label group entry (services, roles).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Labeled {
    pub label: Option<String>,
}

pub(crate) fn check_labeled(c: &mut Checker, value: &Value) -> Option<Labeled> {
    let obj = c.object(value)?;
    Some(Labeled {
        label: c.opt_str(obj, "label"),
    })
}

/// Label/value/context triple (project and case-study metrics).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Metric {
    pub label: Option<String>,
    pub value: Option<String>,
    pub context: Option<String>,
}

pub(crate) fn check_metric(c: &mut Checker, value: &Value) -> Option<Metric> {
    let obj = c.object(value)?;
    Some(Metric {
        label: c.opt_str(obj, "label"),
        value: c.opt_str(obj, "value"),
        context: c.opt_str(obj, "context"),
    })
}

/// Image plus caption (project gallery, media gallery slices).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem {
    pub media: Option<ImageField>,
    pub caption: Option<String>,
}

pub(crate) fn check_gallery_item(c: &mut Checker, value: &Value) -> Option<GalleryItem> {
    let obj = c.object(value)?;
    Some(GalleryItem {
        media: opt_image(c, obj, "media"),
        caption: c.opt_str(obj, "caption"),
    })
}

/// Per-document SEO override entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoEntry {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<ImageField>,
}

pub(crate) fn check_seo_entry(c: &mut Checker, value: &Value) -> Option<SeoEntry> {
    let obj = c.object(value)?;
    Some(SeoEntry {
        meta_title: c.opt_str(obj, "meta_title"),
        meta_description: c.opt_str(obj, "meta_description"),
        og_image: opt_image(c, obj, "og_image"),
    })
}

// ============================================================================
// Scalar shape checks
// ============================================================================

/// Optional hex color (`#rgb` / `#rrggbb` / `#rrggbbaa`).
pub(crate) fn opt_hex_color(
    c: &mut Checker,
    obj: &Map<String, Value>,
    key: &str,
) -> Option<String> {
    let color = c.opt_str(obj, key)?;
    if HEX_COLOR.is_match(&color) {
        Some(color)
    } else {
        c.error_with_hint(
            key,
            format!("`{color}` is not a hex color"),
            "use format like #0ea5e9",
        );
        None
    }
}

/// Optional ISO-8601 date string.
pub(crate) fn opt_iso_date(
    c: &mut Checker,
    obj: &Map<String, Value>,
    key: &str,
) -> Option<String> {
    let date = c.opt_str(obj, key)?;
    if ISO_DATE.is_match(&date) {
        Some(date)
    } else {
        c.error_with_hint(
            key,
            format!("`{date}` is not an ISO-8601 date"),
            "use format like 2024-04-12T09:00:00+0000",
        );
        None
    }
}

/// Optional uid slug: present strings must be non-empty.
pub(crate) fn opt_slug(c: &mut Checker, obj: &Map<String, Value>, key: &str) -> Option<String> {
    let slug = c.opt_str(obj, key)?;
    if slug.is_empty() {
        c.error(key, "uid must not be empty");
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check<T>(
        f: impl FnOnce(&mut Checker) -> T,
    ) -> (T, Result<(), crate::schema::SchemaError>) {
        let mut c = Checker::new();
        let out = f(&mut c);
        (out, c.finish())
    }

    #[test]
    fn test_rich_text_empty_is_valid() {
        let (blocks, result) = check(|c| check_rich_text(c, &json!([])));
        assert!(blocks.is_empty());
        assert!(result.is_ok());
    }

    #[test]
    fn test_rich_text_preserves_order() {
        let value = json!([
            { "type": "heading1", "text": "First", "spans": [] },
            { "type": "paragraph", "text": "Second", "spans": [] },
        ]);
        let (blocks, result) = check(|c| check_rich_text(c, &value));
        assert!(result.is_ok());
        let texts: Vec<_> = blocks.iter().filter_map(|b| b.text.as_deref()).collect();
        assert_eq!(texts, ["First", "Second"]);
    }

    #[test]
    fn test_link_requires_discriminant() {
        let (link, result) = check(|c| check_link(c, &json!({ "url": "https://example.com" })));
        assert!(link.is_none());
        assert!(result.is_err());
    }

    #[test]
    fn test_link_passthrough_keeps_unknown_keys() {
        let value = json!({
            "link_type": "Web",
            "url": "https://guilded.com",
            "target": "_blank",
            "isBroken": false,
        });
        let (link, result) = check(|c| check_link(c, &value));
        assert!(result.is_ok());
        let link = link.expect("valid link");
        assert_eq!(link.link_type, LinkType::Web);
        assert_eq!(link.url.as_deref(), Some("https://guilded.com"));
        assert_eq!(link.extra.get("isBroken"), Some(&json!(false)));
    }

    #[test]
    fn test_link_unknown_discriminant_degrades_to_none() {
        let (link, result) = check(|c| check_link(c, &json!({ "link_type": "Any" })));
        assert!(result.is_ok());
        assert_eq!(link.expect("valid link").link_type, LinkType::None);
    }

    #[test]
    fn test_image_dimensions_require_both_sides() {
        let value = json!({
            "url": "https://images.folio.dev/cover.jpg",
            "dimensions": { "width": 1600 },
        });
        let (_, result) = check(|c| check_image(c, &value));
        let err = result.expect_err("half a dimensions object must fail");
        assert!(format!("{err}").contains("dimensions.height"), "{err}");
    }

    #[test]
    fn test_image_requires_absolute_url() {
        let (image, result) = check(|c| check_image(c, &json!({ "url": "/relative.jpg" })));
        assert!(image.is_none());
        assert!(result.is_err());
    }

    #[test]
    fn test_hex_color_shapes() {
        let value = json!({ "ok": "#0ea5e9", "bad": "blue" });
        let obj = value.as_object().unwrap();
        let (colors, result) = check(|c| (opt_hex_color(c, obj, "ok"), opt_hex_color(c, obj, "bad")));
        assert_eq!(colors.0.as_deref(), Some("#0ea5e9"));
        assert_eq!(colors.1, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_iso_date_shapes() {
        let value = json!({ "ok": "2024-04-12T09:00:00+0000", "bad": "last Tuesday" });
        let obj = value.as_object().unwrap();
        let (dates, result) = check(|c| (opt_iso_date(c, obj, "ok"), opt_iso_date(c, obj, "bad")));
        assert!(dates.0.is_some());
        assert_eq!(dates.1, None);
        assert!(result.is_err());
    }
}
