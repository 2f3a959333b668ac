//! Project documents: individual portfolio entries under `/work`.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{
    GalleryItem, ImageField, Labeled, LinkField, Metric, RichText, SeoEntry, check_gallery_item,
    check_labeled, check_metric, check_seo_entry, opt_image, opt_link, opt_rich_text, opt_slug,
};
use super::relations::{SkillRelation, TagRelation, check_skill_relation, check_tag_relation};
use super::slice::{Slice, check_slice};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub uid: Option<String>,
    pub lang: Option<String>,
    /// Flat API tags, distinct from the `data.tags` relation group.
    pub tags: Vec<String>,
    pub data: ProjectData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectData {
    pub title: String,
    pub summary: RichText,
    pub cover: Option<ImageField>,
    pub services: Vec<Labeled>,
    pub roles: Vec<Labeled>,
    pub year: Option<i64>,
    pub client: Option<String>,
    pub duration: Option<String>,
    pub links: Vec<ProjectLink>,
    pub tags: Vec<TagRelation>,
    pub skills: Vec<SkillRelation>,
    pub metrics: Vec<Metric>,
    pub gallery: Vec<GalleryItem>,
    pub seo: Vec<SeoEntry>,
    pub body: Vec<Slice>,
}

/// External link attached to a project (live site, press, repository).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectLink {
    pub label: Option<String>,
    pub url: Option<LinkField>,
}

impl Project {
    /// Validates a raw payload into a typed project, collecting every
    /// mismatch instead of stopping at the first.
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let project = check_project(&mut c, value);
        c.finish_with(project)
    }
}

pub(crate) fn check_project(c: &mut Checker, value: &Value) -> Option<Project> {
    let obj = c.object(value)?;
    let id = c.req_str(obj, "id");
    let uid = opt_slug(c, obj, "uid");
    let lang = c.opt_str(obj, "lang");
    let tags = c.opt_arr(obj, "tags", |c, v| match v {
        Value::String(s) => Some(s.clone()),
        other => {
            c.error_here(format!(
                "expected a string tag, found {}",
                super::check::kind_of(other)
            ));
            None
        }
    });

    let data_value = match c.opt_field(obj, "data") {
        Some(v) => v,
        None => {
            c.error("data", "required object is missing");
            return None;
        }
    };
    let data = c.scoped("data", |c| {
        let obj = c.object(data_value)?;
        let title = c.req_str(obj, "title");
        Some(ProjectData {
            title: title.unwrap_or_default(),
            summary: opt_rich_text(c, obj, "summary"),
            cover: opt_image(c, obj, "cover"),
            services: c.opt_arr(obj, "services", check_labeled),
            roles: c.opt_arr(obj, "roles", check_labeled),
            year: c.opt_int(obj, "year"),
            client: c.opt_str(obj, "client"),
            duration: c.opt_str(obj, "duration"),
            links: c.opt_arr(obj, "links", |c, v| {
                let obj = c.object(v)?;
                Some(ProjectLink {
                    label: c.opt_str(obj, "label"),
                    url: opt_link(c, obj, "url"),
                })
            }),
            tags: c.opt_arr(obj, "tags", check_tag_relation),
            skills: c.opt_arr(obj, "skills", check_skill_relation),
            metrics: c.opt_arr(obj, "metrics", check_metric),
            gallery: c.opt_arr(obj, "gallery", check_gallery_item),
            seo: c.opt_arr(obj, "seo", check_seo_entry),
            body: c.opt_arr(obj, "body", check_slice),
        })
    })?;

    Some(Project {
        id: id?,
        uid,
        lang,
        tags,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_project() {
        let project = Project::validate(&json!({
            "id": "prj_1",
            "uid": "vesto-wealth",
            "data": { "title": "Vesto wealth" },
        }))
        .expect("minimal project is valid");

        assert_eq!(project.data.title, "Vesto wealth");
        assert!(project.data.body.is_empty());
        assert!(project.data.seo.is_empty());
    }

    #[test]
    fn test_missing_title_reports_data_path() {
        let err = Project::validate(&json!({
            "id": "prj_1",
            "uid": "vesto-wealth",
            "data": {},
        }))
        .expect_err("title is required");
        assert!(format!("{err}").contains("data.title"), "{err}");
    }

    #[test]
    fn test_body_order_survives_validation() {
        let project = Project::validate(&json!({
            "id": "prj_1",
            "uid": "guilded-platform-refresh",
            "data": {
                "title": "Guilded platform refresh",
                "body": [
                    { "slice_type": "hero", "variation": "default", "primary": {}, "items": [] },
                    { "slice_type": "metrics", "variation": "default", "primary": {}, "items": [] },
                    { "slice_type": "quote", "variation": "default", "primary": {}, "items": [] },
                ],
            },
        }))
        .expect("valid project");

        let order: Vec<_> = project.data.body.iter().map(|s| s.slice_type()).collect();
        assert_eq!(order, ["hero", "metrics", "quote"]);
    }

    #[test]
    fn test_aggregates_errors_across_fields() {
        let err = Project::validate(&json!({
            "id": "prj_1",
            "data": {
                "year": "2024",
                "cover": { "url": "relative/path" },
                "body": [
                    { "slice_type": "carousel", "variation": "default", "primary": {}, "items": [] },
                ],
            },
        }))
        .expect_err("multiple mismatches");
        let msg = format!("{err}");
        assert!(msg.contains("data.title"), "{msg}");
        assert!(msg.contains("data.year"), "{msg}");
        assert!(msg.contains("data.cover.url"), "{msg}");
        assert!(msg.contains("data.body[0].slice_type"), "{msg}");
    }
}
