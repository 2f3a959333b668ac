//! Content relationship fields.
//!
//! Relations point at other documents and may be broken (the target was
//! unpublished or deleted). A broken or absent relation validates to `None`;
//! consumers omit it instead of crashing.

use super::check::Checker;
use super::fields::{ImageField, RichText, opt_image, opt_rich_text};
use serde::Serialize;
use serde_json::{Map, Value};

/// Group entry wrapping a tag relation (`{ tag: ... }`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TagRelation {
    pub tag: Option<RelatedTag>,
}

/// Resolved snapshot of a linked tag document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedTag {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub uid: Option<String>,
    pub data: Option<RelatedTagData>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedTagData {
    pub label: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Group entry wrapping a skill relation (`{ skill: ... }`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SkillRelation {
    pub skill: Option<RelatedSkill>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedSkill {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub uid: Option<String>,
    pub data: Option<RelatedSkillData>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedSkillData {
    pub label: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
}

/// Group entry wrapping a project relation (`{ project: ... }`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProjectRelation {
    pub project: Option<RelatedProject>,
}

/// Partial snapshot of a linked project (title/summary/cover only).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedProject {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub rel_type: Option<String>,
    pub uid: Option<String>,
    pub data: RelatedProjectData,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelatedProjectData {
    pub title: Option<String>,
    pub summary: RichText,
    pub cover: Option<ImageField>,
}

impl RelatedProject {
    /// True if the relation still points at a typed, routable project.
    pub fn is_concrete(&self) -> bool {
        self.uid.is_some() && self.rel_type.as_deref() != Some("broken_type")
    }
}

// ============================================================================
// checks
// ============================================================================

/// Validate the type discriminant carried by a relation, when present.
fn check_rel_type(c: &mut Checker, obj: &Map<String, Value>, expected: &str) -> Option<String> {
    let rel_type = c.opt_str(obj, "type")?;
    // "broken_type" is how the CMS marks unpublished targets; keep it so
    // consumers can filter.
    if rel_type != expected && rel_type != "broken_type" {
        c.error(
            "type",
            format!("expected a {expected} relation, found `{rel_type}`"),
        );
        return None;
    }
    Some(rel_type)
}

pub(crate) fn check_tag_relation(c: &mut Checker, value: &Value) -> Option<TagRelation> {
    let obj = c.object(value)?;
    let tag = c.opt_field(obj, "tag").and_then(|v| {
        c.scoped("tag", |c| {
            let obj = c.object(v)?;
            let data = c.opt_field(obj, "data").and_then(|v| {
                c.scoped("data", |c| {
                    let obj = c.object(v)?;
                    Some(RelatedTagData {
                        label: c.opt_str(obj, "label"),
                        color: c.opt_str(obj, "color"),
                        description: c.opt_str(obj, "description"),
                    })
                })
            });
            Some(RelatedTag {
                id: c.opt_str(obj, "id"),
                rel_type: check_rel_type(c, obj, "tag"),
                uid: c.opt_str(obj, "uid"),
                data,
            })
        })
    });
    Some(TagRelation { tag })
}

pub(crate) fn check_skill_relation(c: &mut Checker, value: &Value) -> Option<SkillRelation> {
    let obj = c.object(value)?;
    let skill = c.opt_field(obj, "skill").and_then(|v| {
        c.scoped("skill", |c| {
            let obj = c.object(v)?;
            let data = c.opt_field(obj, "data").and_then(|v| {
                c.scoped("data", |c| {
                    let obj = c.object(v)?;
                    Some(RelatedSkillData {
                        label: c.opt_str(obj, "label"),
                        description: c.opt_str(obj, "description"),
                        category: c.opt_str(obj, "category"),
                        color: c.opt_str(obj, "color"),
                    })
                })
            });
            Some(RelatedSkill {
                id: c.opt_str(obj, "id"),
                rel_type: check_rel_type(c, obj, "skill"),
                uid: c.opt_str(obj, "uid"),
                data,
            })
        })
    });
    Some(SkillRelation { skill })
}

pub(crate) fn check_project_relation(c: &mut Checker, value: &Value) -> Option<ProjectRelation> {
    let obj = c.object(value)?;
    let project = c.opt_field(obj, "project").and_then(|v| {
        c.scoped("project", |c| {
            let obj = c.object(v)?;
            let data = c
                .opt_field(obj, "data")
                .and_then(|v| {
                    c.scoped("data", |c| {
                        let obj = c.object(v)?;
                        Some(RelatedProjectData {
                            title: c.opt_str(obj, "title"),
                            summary: opt_rich_text(c, obj, "summary"),
                            cover: opt_image(c, obj, "cover"),
                        })
                    })
                })
                .unwrap_or_default();
            Some(RelatedProject {
                id: c.opt_str(obj, "id"),
                rel_type: check_rel_type(c, obj, "project"),
                uid: c.opt_str(obj, "uid"),
                data,
            })
        })
    });
    Some(ProjectRelation { project })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_broken_relation_is_absent_not_an_error() {
        let mut c = Checker::new();
        let rel = check_tag_relation(&mut c, &json!({ "tag": null }));
        assert!(c.finish().is_ok());
        assert_eq!(rel.expect("group entry").tag, None);
    }

    #[test]
    fn test_mismatched_relation_type_is_rejected() {
        let mut c = Checker::new();
        let _ = check_tag_relation(
            &mut c,
            &json!({ "tag": { "id": "x", "type": "post", "uid": "x" } }),
        );
        assert!(c.finish().is_err());
    }

    #[test]
    fn test_concrete_project_relation() {
        let mut c = Checker::new();
        let rel = check_project_relation(
            &mut c,
            &json!({
                "project": {
                    "id": "project-guilded",
                    "type": "project",
                    "uid": "guilded-platform-refresh",
                    "data": { "title": "Guilded platform refresh" }
                }
            }),
        );
        assert!(c.finish().is_ok());
        let project = rel.and_then(|r| r.project).expect("concrete relation");
        assert!(project.is_concrete());
    }
}
