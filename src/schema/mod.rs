//! Typed content schemas and the validation layer over raw CMS payloads.
//!
//! Raw API documents arrive as `serde_json::Value`. Each document type has a
//! `validate` constructor that walks the payload with a path-tracking
//! [`Checker`], collects every mismatch into [`SchemaDiagnostics`], and only
//! then produces the typed value. Validated documents serialize back to the
//! shape they were checked against, so validating a serialized document is a
//! no-op.

mod case_study;
mod check;
mod diag;
mod fields;
mod navigation;
mod post;
mod project;
mod relations;
mod settings;
mod slice;
mod taxonomy;

pub use case_study::{CaseStudy, CaseStudyData};
pub use diag::{SchemaDiagnostic, SchemaDiagnostics, SchemaError};
pub use fields::{
    GalleryItem, ImageDimensions, ImageField, Labeled, LinkField, LinkType, Metric, RichText,
    SeoEntry, TextBlock,
};
pub use navigation::{FooterEntry, NavEntry, NavSocialLink, Navigation, NavigationData};
pub use post::{Post, PostData};
pub use project::{Project, ProjectData, ProjectLink};
pub use relations::{
    ProjectRelation, RelatedProject, RelatedProjectData, RelatedSkill, RelatedSkillData,
    RelatedTag, RelatedTagData, SkillRelation, TagRelation,
};
pub use settings::{SeoDefaults, Settings, SettingsData, SocialLink};
pub use slice::{
    CalloutPrimary, CalloutSlice, CodeBlockPrimary, CodeBlockSlice, CtaBannerPrimary,
    CtaBannerSlice, HeadingPrimary, HeroPrimary, HeroSlice, Highlight, ImageGridItem,
    ImageGridSlice, LinkGroupItem, LinkGroupSlice, MediaGallerySlice, MetricsPrimary,
    MetricsSlice, QuotePrimary, QuoteSlice, RichTextPrimary, RichTextSlice, SLICE_TYPES, Slice,
};
pub use taxonomy::{Skill, SkillData, Tag, TagData};

use check::Checker;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Every document type the content model defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Project,
    CaseStudy,
    Post,
    Tag,
    Skill,
    Settings,
    Navigation,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        Self::Project,
        Self::CaseStudy,
        Self::Post,
        Self::Tag,
        Self::Skill,
        Self::Settings,
        Self::Navigation,
    ];

    /// The `type` discriminant the API uses for this document type.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::CaseStudy => "case_study",
            Self::Post => "post",
            Self::Tag => "tag",
            Self::Skill => "skill",
            Self::Settings => "settings",
            Self::Navigation => "navigation",
        }
    }

    /// Singletons exist exactly once per repository and have no uid route.
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Settings | Self::Navigation)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.api_name() == s)
            .ok_or_else(|| format!("unknown document type `{s}`"))
    }
}

/// A validated document of any type, tagged the way the API tags it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Document {
    Project(Project),
    CaseStudy(CaseStudy),
    Post(Post),
    Tag(Tag),
    Skill(Skill),
    Settings(Settings),
    Navigation(Navigation),
}

impl Document {
    pub fn doc_type(&self) -> DocumentType {
        match self {
            Self::Project(_) => DocumentType::Project,
            Self::CaseStudy(_) => DocumentType::CaseStudy,
            Self::Post(_) => DocumentType::Post,
            Self::Tag(_) => DocumentType::Tag,
            Self::Skill(_) => DocumentType::Skill,
            Self::Settings(_) => DocumentType::Settings,
            Self::Navigation(_) => DocumentType::Navigation,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Project(d) => &d.id,
            Self::CaseStudy(d) => &d.id,
            Self::Post(d) => &d.id,
            Self::Tag(d) => &d.id,
            Self::Skill(d) => &d.id,
            Self::Settings(d) => &d.id,
            Self::Navigation(d) => &d.id,
        }
    }

    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Project(d) => d.uid.as_deref(),
            Self::CaseStudy(d) => d.uid.as_deref(),
            Self::Post(d) => d.uid.as_deref(),
            Self::Tag(d) => d.uid.as_deref(),
            Self::Skill(d) => d.uid.as_deref(),
            Self::Settings(_) | Self::Navigation(_) => None,
        }
    }
}

fn check_document(c: &mut Checker, value: &Value) -> Option<Document> {
    let obj = c.object(value)?;
    let doc_type = c.req_str(obj, "type")?;
    match DocumentType::from_str(&doc_type) {
        Ok(DocumentType::Project) => project::check_project(c, value).map(Document::Project),
        Ok(DocumentType::CaseStudy) => {
            case_study::check_case_study(c, value).map(Document::CaseStudy)
        }
        Ok(DocumentType::Post) => post::check_post(c, value).map(Document::Post),
        Ok(DocumentType::Tag) => taxonomy::check_tag(c, value).map(Document::Tag),
        Ok(DocumentType::Skill) => taxonomy::check_skill(c, value).map(Document::Skill),
        Ok(DocumentType::Settings) => settings::check_settings(c, value).map(Document::Settings),
        Ok(DocumentType::Navigation) => {
            navigation::check_navigation(c, value).map(Document::Navigation)
        }
        Err(msg) => {
            c.error("type", msg);
            None
        }
    }
}

/// Validates a raw payload into whichever document type its `type` field
/// names. All mismatches are collected before the result is decided.
pub fn validate_document(value: &Value) -> Result<Document, SchemaError> {
    let mut c = Checker::new();
    let doc = check_document(&mut c, value);
    c.finish_with(doc)
}

/// Parses a raw JSON payload and validates the document it holds.
pub fn validate_json(raw: &str) -> Result<Document, SchemaError> {
    let value: Value = serde_json::from_str(raw)?;
    validate_document(&value)
}

/// Validates a batch of raw documents. Diagnostics carry the item index, and
/// one bad document fails the whole batch.
pub fn validate_documents(values: &[Value]) -> Result<Vec<Document>, SchemaError> {
    let mut c = Checker::new();
    let mut out = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if let Some(doc) = c.indexed(i, |c| check_document(c, value)) {
            out.push(doc);
        }
    }
    c.finish()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_project() -> Value {
        json!({
            "id": "prj_guilded",
            "type": "project",
            "uid": "guilded-platform-refresh",
            "lang": "en-us",
            "tags": ["Platforms"],
            "data": {
                "title": "Guilded platform refresh",
                "summary": [
                    { "type": "paragraph", "text": "A ground-up refresh.", "spans": [] },
                ],
                "cover": {
                    "url": "https://images.example.com/guilded-cover.jpg",
                    "alt": "Guilded dashboard",
                    "dimensions": { "width": 1600, "height": 900 },
                },
                "year": 2024,
                "client": "Guilded",
                "services": [{ "label": "Product design" }],
                "tags": [{ "tag": { "id": "tag_3", "type": "tag", "uid": "platforms" } }],
                "body": [
                    { "slice_type": "hero", "variation": "default", "primary": {
                        "heading": "Guilded platform refresh",
                    }, "items": [] },
                    { "slice_type": "metrics", "variation": "default", "primary": {},
                      "items": [{ "label": "Activation", "value": "+36%" }] },
                ],
            },
        })
    }

    #[test]
    fn test_dispatch_on_type_field() {
        let doc = validate_document(&sample_project()).expect("valid document");
        assert_eq!(doc.doc_type(), DocumentType::Project);
        assert_eq!(doc.uid(), Some("guilded-platform-refresh"));
    }

    #[test]
    fn test_unknown_document_type_is_rejected() {
        let err = validate_document(&json!({
            "id": "x",
            "type": "testimonial",
            "data": {},
        }))
        .expect_err("unknown type");
        assert!(format!("{err}").contains("testimonial"), "{err}");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let doc = validate_document(&sample_project()).expect("valid document");
        let serialized = serde_json::to_value(&doc).expect("serializable");
        let revalidated = validate_document(&serialized).expect("own output validates");
        assert_eq!(doc, revalidated);
    }

    #[test]
    fn test_batch_diagnostics_carry_item_index() {
        let err = validate_documents(&[
            sample_project(),
            json!({ "id": "bad", "type": "project", "data": {} }),
        ])
        .expect_err("second document is invalid");
        assert!(format!("{err}").contains("[1].data.title"), "{err}");
    }

    #[test]
    fn test_validate_json_rejects_malformed_payloads() {
        let err = validate_json("{ not json").expect_err("malformed JSON");
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_singletons_have_no_uid() {
        assert!(DocumentType::Settings.is_singleton());
        assert!(DocumentType::Navigation.is_singleton());
        assert!(!DocumentType::Project.is_singleton());

        let doc = validate_document(&json!({
            "id": "settings_1",
            "type": "settings",
            "data": { "site_title": "Alex Rivera" },
        }))
        .expect("valid settings");
        assert_eq!(doc.uid(), None);
    }
}
