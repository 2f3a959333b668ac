//! Blog post documents.

use super::check::Checker;
use super::diag::SchemaError;
use super::fields::{
    LinkField, RichText, SeoEntry, check_seo_entry, opt_iso_date, opt_link, opt_rich_text,
    opt_slug,
};
use super::relations::{TagRelation, check_tag_relation};
use super::slice::{Slice, check_slice};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub uid: Option<String>,
    pub lang: Option<String>,
    pub data: PostData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostData {
    pub title: String,
    pub excerpt: RichText,
    pub author: Option<String>,
    pub reading_time: Option<i64>,
    /// `YYYY-MM-DD`, checked at validation time.
    pub published_at: Option<String>,
    pub tags: Vec<TagRelation>,
    pub canonical_url: Option<LinkField>,
    pub seo: Vec<SeoEntry>,
    pub body: Vec<Slice>,
}

impl Post {
    pub fn validate(value: &Value) -> Result<Self, SchemaError> {
        let mut c = Checker::new();
        let post = check_post(&mut c, value);
        c.finish_with(post)
    }
}

pub(crate) fn check_post(c: &mut Checker, value: &Value) -> Option<Post> {
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
        Some(PostData {
            title: title.unwrap_or_default(),
            excerpt: opt_rich_text(c, obj, "excerpt"),
            author: c.opt_str(obj, "author"),
            reading_time: c.opt_int(obj, "reading_time"),
            published_at: opt_iso_date(c, obj, "published_at"),
            tags: c.opt_arr(obj, "tags", check_tag_relation),
            canonical_url: opt_link(c, obj, "canonical_url"),
            seo: c.opt_arr(obj, "seo", check_seo_entry),
            body: c.opt_arr(obj, "body", check_slice),
        })
    })?;

    Some(Post {
        id: id?,
        uid,
        lang,
        data,
    })
}
