//! Listing-page projections of validated documents.
//!
//! Previews carry only what index pages render, with routes and plain-text
//! summaries already resolved.

use crate::normalize::{RouteTable, as_plain_text, pick_label, resolve_uid};
use crate::schema::{CaseStudy, DocumentType, Post, Project, Skill, Tag};
use serde::Serialize;

const SUMMARY_CHARS: usize = 160;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPreview {
    pub uid: String,
    pub title: String,
    pub client: Option<String>,
    pub year: Option<i64>,
    pub summary: String,
    pub href: String,
    pub cover_url: Option<String>,
}

impl ProjectPreview {
    pub fn from_project(project: &Project, routes: &RouteTable) -> Self {
        let uid = resolve_uid(project.uid.as_deref(), &project.id);
        Self {
            uid: uid.to_string(),
            title: project.data.title.clone(),
            client: project.data.client.clone(),
            year: project.data.year,
            summary: as_plain_text(&project.data.summary, Some(SUMMARY_CHARS)),
            href: routes
                .resolve(DocumentType::Project, uid)
                .unwrap_or_default(),
            cover_url: project.data.cover.as_ref().map(|c| c.url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyPreview {
    pub uid: String,
    pub title: String,
    pub headline: Option<String>,
    pub description: String,
    pub href: String,
    pub related_count: usize,
}

impl CaseStudyPreview {
    pub fn from_case_study(case_study: &CaseStudy, routes: &RouteTable) -> Self {
        let uid = resolve_uid(case_study.uid.as_deref(), &case_study.id);
        Self {
            uid: uid.to_string(),
            title: case_study.data.title.clone(),
            headline: case_study.data.hero_headline.clone(),
            description: as_plain_text(&case_study.data.hero_description, Some(SUMMARY_CHARS)),
            href: routes
                .resolve(DocumentType::CaseStudy, uid)
                .unwrap_or_default(),
            related_count: case_study.concrete_projects().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPreview {
    pub uid: String,
    pub title: String,
    pub excerpt: String,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub reading_time: Option<i64>,
    pub href: String,
}

impl PostPreview {
    pub fn from_post(post: &Post, routes: &RouteTable) -> Self {
        let uid = resolve_uid(post.uid.as_deref(), &post.id);
        Self {
            uid: uid.to_string(),
            title: post.data.title.clone(),
            excerpt: as_plain_text(&post.data.excerpt, Some(SUMMARY_CHARS)),
            author: post.data.author.clone(),
            published_at: post.data.published_at.clone(),
            reading_time: post.data.reading_time,
            href: routes.resolve(DocumentType::Post, uid).unwrap_or_default(),
        }
    }
}

/// Uniform projection of a tag or skill for filter chips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    pub uid: String,
    pub label: String,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl Taxonomy {
    pub fn from_tag(tag: &Tag) -> Self {
        Self {
            uid: resolve_uid(tag.uid.as_deref(), &tag.id).to_string(),
            label: pick_label(Some(tag.data.label.as_str()), "Tag"),
            color: tag.data.color.clone(),
            description: tag.data.description.clone(),
        }
    }

    pub fn from_skill(skill: &Skill) -> Self {
        Self {
            uid: resolve_uid(skill.uid.as_deref(), &skill.id).to_string(),
            label: pick_label(Some(skill.data.label.as_str()), "Skill"),
            color: skill.data.color.clone(),
            description: skill.data.description.clone(),
        }
    }
}
