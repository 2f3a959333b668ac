//! Body slices: the polymorphic content blocks embedded in documents.
//!
//! The union is **closed** and tagged on `slice_type`. Slice renderers have a
//! fixed component registry, so an unrecognized `slice_type` fails validation
//! instead of passing through and crashing (or silently dropping) downstream.

use super::check::Checker;
use super::fields::{
    GalleryItem, ImageField, LinkField, Metric, RichText, check_gallery_item, check_metric,
    opt_image, opt_link, opt_rich_text,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Every slice type the renderer registry knows about.
pub const SLICE_TYPES: [&str; 10] = [
    "hero",
    "metrics",
    "quote",
    "rich_text_section",
    "media_gallery",
    "image_grid",
    "callout",
    "link_group",
    "code_block",
    "cta_banner",
];

/// A user-ordered content block. Order in `body` is display order and
/// round-trips through validation unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "slice_type", rename_all = "snake_case")]
pub enum Slice {
    Hero(HeroSlice),
    Metrics(MetricsSlice),
    Quote(QuoteSlice),
    RichTextSection(RichTextSlice),
    MediaGallery(MediaGallerySlice),
    ImageGrid(ImageGridSlice),
    Callout(CalloutSlice),
    LinkGroup(LinkGroupSlice),
    CodeBlock(CodeBlockSlice),
    CtaBanner(CtaBannerSlice),
}

impl Slice {
    pub fn slice_type(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Metrics(_) => "metrics",
            Self::Quote(_) => "quote",
            Self::RichTextSection(_) => "rich_text_section",
            Self::MediaGallery(_) => "media_gallery",
            Self::ImageGrid(_) => "image_grid",
            Self::Callout(_) => "callout",
            Self::LinkGroup(_) => "link_group",
            Self::CodeBlock(_) => "code_block",
            Self::CtaBanner(_) => "cta_banner",
        }
    }

    pub fn variation(&self) -> &str {
        match self {
            Self::Hero(s) => &s.variation,
            Self::Metrics(s) => &s.variation,
            Self::Quote(s) => &s.variation,
            Self::RichTextSection(s) => &s.variation,
            Self::MediaGallery(s) => &s.variation,
            Self::ImageGrid(s) => &s.variation,
            Self::Callout(s) => &s.variation,
            Self::LinkGroup(s) => &s.variation,
            Self::CodeBlock(s) => &s.variation,
            Self::CtaBanner(s) => &s.variation,
        }
    }
}

// ============================================================================
// hero
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSlice {
    pub variation: String,
    pub primary: HeroPrimary,
    pub items: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeroPrimary {
    pub eyebrow: Option<String>,
    pub heading: Option<String>,
    pub subheading: RichText,
    pub primary_action_label: Option<String>,
    pub primary_action_link: Option<LinkField>,
    pub secondary_action_label: Option<String>,
    pub secondary_action_link: Option<LinkField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Highlight {
    pub label: Option<String>,
    pub detail: Option<String>,
}

// ============================================================================
// metrics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSlice {
    pub variation: String,
    pub primary: MetricsPrimary,
    pub items: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MetricsPrimary {
    pub title: Option<String>,
    pub caption: Option<String>,
}

// ============================================================================
// quote
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteSlice {
    pub variation: String,
    pub primary: QuotePrimary,
    /// Unused by the quote renderer; kept as raw passthrough.
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuotePrimary {
    pub quote: RichText,
    pub attribution: Option<String>,
    pub title: Option<String>,
}

// ============================================================================
// rich_text_section
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichTextSlice {
    pub variation: String,
    pub primary: RichTextPrimary,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RichTextPrimary {
    pub title: Option<String>,
    pub align: Option<String>,
    pub content: RichText,
}

// ============================================================================
// media_gallery
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaGallerySlice {
    pub variation: String,
    pub primary: HeadingPrimary,
    pub items: Vec<GalleryItem>,
}

/// Shared heading/description primary (media gallery, image grid, link group).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeadingPrimary {
    pub heading: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// image_grid
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGridSlice {
    pub variation: String,
    pub primary: HeadingPrimary,
    pub items: Vec<ImageGridItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGridItem {
    pub image: Option<ImageField>,
    pub caption: Option<String>,
}

// ============================================================================
// callout
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalloutSlice {
    pub variation: String,
    pub primary: CalloutPrimary,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CalloutPrimary {
    pub label: Option<String>,
    pub heading: Option<String>,
    pub body: RichText,
}

// ============================================================================
// link_group
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkGroupSlice {
    pub variation: String,
    pub primary: HeadingPrimary,
    pub items: Vec<LinkGroupItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinkGroupItem {
    pub label: Option<String>,
    pub link: Option<LinkField>,
    pub icon: Option<String>,
}

// ============================================================================
// code_block
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlockSlice {
    pub variation: String,
    pub primary: CodeBlockPrimary,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CodeBlockPrimary {
    pub title: Option<String>,
    pub language: Option<String>,
    pub code: RichText,
    pub caption: Option<String>,
}

// ============================================================================
// cta_banner
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtaBannerSlice {
    pub variation: String,
    pub primary: CtaBannerPrimary,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CtaBannerPrimary {
    pub heading: Option<String>,
    pub description: RichText,
    pub action_label: Option<String>,
    pub action_link: Option<LinkField>,
}

// ============================================================================
// validation
// ============================================================================

pub(crate) fn check_slice(c: &mut Checker, value: &Value) -> Option<Slice> {
    let obj = c.object(value)?;
    let slice_type = c.req_str(obj, "slice_type")?;
    let variation = c.req_str(obj, "variation").unwrap_or_default();

    // `primary` is a required object on every slice type
    let primary = match c.opt_field(obj, "primary") {
        Some(v) => Some(v),
        None => {
            c.error("primary", "required object is missing");
            None
        }
    };
    let primary_obj: Map<String, Value> = primary
        .and_then(|v| c.scoped("primary", |c| c.object(v).cloned()))
        .unwrap_or_default();

    let slice = match slice_type.as_str() {
        "hero" => Slice::Hero(HeroSlice {
            variation,
            primary: c.scoped("primary", |c| HeroPrimary {
                eyebrow: c.opt_str(&primary_obj, "eyebrow"),
                heading: c.opt_str(&primary_obj, "heading"),
                subheading: opt_rich_text(c, &primary_obj, "subheading"),
                primary_action_label: c.opt_str(&primary_obj, "primary_action_label"),
                primary_action_link: opt_link(c, &primary_obj, "primary_action_link"),
                secondary_action_label: c.opt_str(&primary_obj, "secondary_action_label"),
                secondary_action_link: opt_link(c, &primary_obj, "secondary_action_link"),
            }),
            items: c.arr(obj, "items", |c, v| {
                let obj = c.object(v)?;
                Some(Highlight {
                    label: c.opt_str(obj, "label"),
                    detail: c.opt_str(obj, "detail"),
                })
            }),
        }),
        "metrics" => Slice::Metrics(MetricsSlice {
            variation,
            primary: c.scoped("primary", |c| MetricsPrimary {
                title: c.opt_str(&primary_obj, "title"),
                caption: c.opt_str(&primary_obj, "caption"),
            }),
            items: c.arr(obj, "items", check_metric),
        }),
        "quote" => Slice::Quote(QuoteSlice {
            variation,
            primary: c.scoped("primary", |c| QuotePrimary {
                quote: opt_rich_text(c, &primary_obj, "quote"),
                attribution: c.opt_str(&primary_obj, "attribution"),
                title: c.opt_str(&primary_obj, "title"),
            }),
            items: c.raw_items(obj, "items"),
        }),
        "rich_text_section" => Slice::RichTextSection(RichTextSlice {
            variation,
            primary: c.scoped("primary", |c| RichTextPrimary {
                title: c.opt_str(&primary_obj, "title"),
                align: c.opt_str(&primary_obj, "align"),
                content: opt_rich_text(c, &primary_obj, "content"),
            }),
            items: c.raw_items(obj, "items"),
        }),
        "media_gallery" => Slice::MediaGallery(MediaGallerySlice {
            variation,
            primary: check_heading_primary(c, &primary_obj),
            items: c.arr(obj, "items", check_gallery_item),
        }),
        "image_grid" => Slice::ImageGrid(ImageGridSlice {
            variation,
            primary: check_heading_primary(c, &primary_obj),
            items: c.arr(obj, "items", |c, v| {
                let obj = c.object(v)?;
                Some(ImageGridItem {
                    image: opt_image(c, obj, "image"),
                    caption: c.opt_str(obj, "caption"),
                })
            }),
        }),
        "callout" => Slice::Callout(CalloutSlice {
            variation,
            primary: c.scoped("primary", |c| CalloutPrimary {
                label: c.opt_str(&primary_obj, "label"),
                heading: c.opt_str(&primary_obj, "heading"),
                body: opt_rich_text(c, &primary_obj, "body"),
            }),
            items: c.raw_items(obj, "items"),
        }),
        "link_group" => Slice::LinkGroup(LinkGroupSlice {
            variation,
            primary: check_heading_primary(c, &primary_obj),
            items: c.arr(obj, "items", |c, v| {
                let obj = c.object(v)?;
                Some(LinkGroupItem {
                    label: c.opt_str(obj, "label"),
                    link: opt_link(c, obj, "link"),
                    icon: c.opt_str(obj, "icon"),
                })
            }),
        }),
        "code_block" => Slice::CodeBlock(CodeBlockSlice {
            variation,
            primary: c.scoped("primary", |c| CodeBlockPrimary {
                title: c.opt_str(&primary_obj, "title"),
                language: c.opt_str(&primary_obj, "language"),
                code: opt_rich_text(c, &primary_obj, "code"),
                caption: c.opt_str(&primary_obj, "caption"),
            }),
            items: c.raw_items(obj, "items"),
        }),
        "cta_banner" => Slice::CtaBanner(CtaBannerSlice {
            variation,
            primary: c.scoped("primary", |c| CtaBannerPrimary {
                heading: c.opt_str(&primary_obj, "heading"),
                description: opt_rich_text(c, &primary_obj, "description"),
                action_label: c.opt_str(&primary_obj, "action_label"),
                action_link: opt_link(c, &primary_obj, "action_link"),
            }),
            items: c.raw_items(obj, "items"),
        }),
        other => {
            c.error_with_hint(
                "slice_type",
                format!("unknown slice type `{other}`"),
                format!("known types: {}", SLICE_TYPES.join(", ")),
            );
            return None;
        }
    };
    Some(slice)
}

fn check_heading_primary(c: &mut Checker, primary_obj: &Map<String, Value>) -> HeadingPrimary {
    c.scoped("primary", |c| HeadingPrimary {
        heading: c.opt_str(primary_obj, "heading"),
        description: c.opt_str(primary_obj, "description"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(value: &Value) -> Result<Option<Slice>, crate::schema::SchemaError> {
        let mut c = Checker::new();
        let slice = check_slice(&mut c, value);
        c.finish()?;
        Ok(slice)
    }

    #[test]
    fn test_unknown_slice_type_is_rejected() {
        let result = validate(&json!({
            "slice_type": "carousel",
            "variation": "default",
            "primary": {},
            "items": [],
        }));
        let err = result.expect_err("unknown slice type must fail");
        assert!(format!("{err}").contains("carousel"));
    }

    #[test]
    fn test_hero_slice() {
        let slice = validate(&json!({
            "slice_type": "hero",
            "variation": "default",
            "primary": {
                "eyebrow": "Selected work",
                "heading": "Expressive systems",
                "subheading": [{ "type": "paragraph", "text": "Hello", "spans": [] }],
                "primary_action_label": "Explore",
                "primary_action_link": { "link_type": "Web", "url": "https://guilded.com" },
            },
            "items": [{ "label": "Craft", "detail": "Motion-first" }],
        }))
        .expect("valid hero")
        .expect("slice value");

        assert_eq!(slice.slice_type(), "hero");
        let Slice::Hero(hero) = slice else {
            panic!("expected hero variant");
        };
        assert_eq!(hero.primary.heading.as_deref(), Some("Expressive systems"));
        assert_eq!(hero.items.len(), 1);
    }

    #[test]
    fn test_metrics_slice_preserves_item_order() {
        let slice = validate(&json!({
            "slice_type": "metrics",
            "variation": "default",
            "primary": { "title": "Outcomes" },
            "items": [
                { "label": "Activation", "value": "+36%" },
                { "label": "Retention", "value": "+18%" },
                { "label": "NPS", "value": "+22" },
            ],
        }))
        .expect("valid metrics")
        .expect("slice value");

        let Slice::Metrics(metrics) = slice else {
            panic!("expected metrics variant");
        };
        let labels: Vec<_> = metrics
            .items
            .iter()
            .filter_map(|m| m.label.as_deref())
            .collect();
        assert_eq!(labels, ["Activation", "Retention", "NPS"]);
    }

    #[test]
    fn test_bad_nested_field_reports_full_path() {
        let result = validate(&json!({
            "slice_type": "media_gallery",
            "variation": "default",
            "primary": {},
            "items": [{ "media": { "url": "not-a-url" }, "caption": "x" }],
        }));
        let err = result.expect_err("bad image url must fail");
        assert!(format!("{err}").contains("items[0].media.url"), "{err}");
    }

    #[test]
    fn test_serialized_slice_carries_tag() {
        let slice = validate(&json!({
            "slice_type": "quote",
            "variation": "default",
            "primary": { "quote": [], "attribution": "Alex" },
            "items": [],
        }))
        .expect("valid quote")
        .expect("slice value");

        let out = serde_json::to_value(&slice).expect("serializable");
        assert_eq!(out.get("slice_type"), Some(&json!("quote")));
        assert_eq!(out.get("variation"), Some(&json!("default")));
    }
}
