//! Taxonomy documents: tags and skills.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{opt_hex_color, opt_slug};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: String,
    pub uid: Option<String>,
    pub data: TagData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagData {
    pub label: String,
    pub description: Option<String>,
    /// `#rgb` or `#rrggbb`.
    pub color: Option<String>,
}

impl Tag {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let tag = check_tag(&mut c, value);
        c.finish_with(tag)
    }
}

pub(crate) fn check_tag(c: &mut Checker, value: &Value) -> Option<Tag> {
    let obj = c.object(value)?;
    let id = c.req_str(obj, "id");
    let uid = opt_slug(c, obj, "uid");

    let data_value = match c.opt_field(obj, "data") {
        Some(v) => v,
        None => {
            c.error("data", "required object is missing");
            return None;
        }
    };
    let data = c.scoped("data", |c| {
        let obj = c.object(data_value)?;
        let label = c.req_str(obj, "label");
        Some(TagData {
            label: label.unwrap_or_default(),
            description: c.opt_str(obj, "description"),
            color: opt_hex_color(c, obj, "color"),
        })
    })?;

    Some(Tag { id: id?, uid, data })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: String,
    pub uid: Option<String>,
    pub data: SkillData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillData {
    pub label: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
}

impl Skill {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let skill = check_skill(&mut c, value);
        c.finish_with(skill)
    }
}

pub(crate) fn check_skill(c: &mut Checker, value: &Value) -> Option<Skill> {
    let obj = c.object(value)?;
    let id = c.req_str(obj, "id");
    let uid = opt_slug(c, obj, "uid");

    let data_value = match c.opt_field(obj, "data") {
        Some(v) => v,
        None => {
            c.error("data", "required object is missing");
            return None;
        }
    };
    let data = c.scoped("data", |c| {
        let obj = c.object(data_value)?;
        let label = c.req_str(obj, "label");
        Some(SkillData {
            label: label.unwrap_or_default(),
            description: c.opt_str(obj, "description"),
            category: c.opt_str(obj, "category"),
            color: opt_hex_color(c, obj, "color"),
        })
    })?;

    Some(Skill { id: id?, uid, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_color_formats() {
        let tag = Tag::validate(&json!({
            "id": "tag_1",
            "uid": "product-strategy",
            "data": { "label": "Product strategy", "color": "#6C5CE7" },
        }))
        .expect("valid tag");
        assert_eq!(tag.data.color.as_deref(), Some("#6C5CE7"));

        let err = Tag::validate(&json!({
            "id": "tag_1",
            "uid": "product-strategy",
            "data": { "label": "Product strategy", "color": "6C5CE7" },
        }))
        .expect_err("missing # is rejected");
        assert!(format!("{err}").contains("data.color"), "{err}");
    }

    #[test]
    fn test_skill_requires_label() {
        let err = Skill::validate(&json!({
            "id": "skill_1",
            "uid": "facilitation",
            "data": { "category": "leadership" },
        }))
        .expect_err("label is required");
        assert!(format!("{err}").contains("data.label"), "{err}");
    }
}
