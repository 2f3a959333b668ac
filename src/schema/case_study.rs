//! Case study documents: long-form narratives that bundle related projects.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{
    ImageField, Metric, RichText, SeoEntry, check_metric, check_seo_entry, opt_image,
    opt_rich_text, opt_slug,
};
use super::relations::{ProjectRelation, RelatedProject, check_project_relation};
use super::slice::{Slice, check_slice};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudy {
    pub id: String,
    pub uid: Option<String>,
    pub lang: Option<String>,
    pub data: CaseStudyData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyData {
    pub title: String,
    pub hero_kicker: Option<String>,
    pub hero_headline: Option<String>,
    pub hero_description: RichText,
    pub hero_media: Option<ImageField>,
    pub problem_statement: RichText,
    pub approach: RichText,
    pub outcomes: RichText,
    pub metrics: Vec<Metric>,
    pub related_projects: Vec<ProjectRelation>,
    pub seo: Vec<SeoEntry>,
    pub body: Vec<Slice>,
}

impl CaseStudy {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let case_study = check_case_study(&mut c, value);
        c.finish_with(case_study)
    }

    /// Related projects that actually resolve to a published document.
    /// Broken and empty relations are skipped.
    pub fn concrete_projects(&self) -> impl Iterator<Item = &RelatedProject> {
        self.data
            .related_projects
            .iter()
            .filter_map(|rel| rel.project.as_ref())
            .filter(|p| p.is_concrete())
    }
}

pub(crate) fn check_case_study(c: &mut Checker, value: &Value) -> Option<CaseStudy> {
    let obj = c.object(value)?;
    let id = c.req_str(obj, "id");
    let uid = opt_slug(c, obj, "uid");
    let lang = c.opt_str(obj, "lang");

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
        Some(CaseStudyData {
            title: title.unwrap_or_default(),
            hero_kicker: c.opt_str(obj, "hero_kicker"),
            hero_headline: c.opt_str(obj, "hero_headline"),
            hero_description: opt_rich_text(c, obj, "hero_description"),
            hero_media: opt_image(c, obj, "hero_media"),
            problem_statement: opt_rich_text(c, obj, "problem_statement"),
            approach: opt_rich_text(c, obj, "approach"),
            outcomes: opt_rich_text(c, obj, "outcomes"),
            metrics: c.opt_arr(obj, "metrics", check_metric),
            related_projects: c.opt_arr(obj, "related_projects", check_project_relation),
            seo: c.opt_arr(obj, "seo", check_seo_entry),
            body: c.opt_arr(obj, "body", check_slice),
        })
    })?;

    Some(CaseStudy {
        id: id?,
        uid,
        lang,
        data,
    })
}
