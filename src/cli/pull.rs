//! `folio pull`: fetch, validate, and print repository content.

use super::args::Kind;
use crate::config::FolioConfig;
use crate::loader::Loader;
use crate::preview::{CaseStudyPreview, PostPreview, ProjectPreview, Taxonomy};
use crate::source::{CmsClient, FixtureSet};
use anyhow::{Context, bail};
use serde::Serialize;
use std::sync::Arc;

pub async fn run(config: &FolioConfig, kind: Kind, uid: Option<&str>, raw: bool) -> anyhow::Result<()> {
    if kind.wants_uid() && uid.is_none() {
        bail!("pulling a single document requires a uid");
    }

    let client = CmsClient::new(&config.repository);
    let loader = Loader::new(Arc::new(client), FixtureSet::builtin())
        .with_fallback(config.fallback.enable);
    let routes = config.route_table();

    match kind {
        Kind::Projects => {
            let projects = loader.projects().await;
            if raw {
                print_json(&projects)
            } else {
                let previews: Vec<_> = projects
                    .iter()
                    .map(|p| ProjectPreview::from_project(p, &routes))
                    .collect();
                print_json(&previews)
            }
        }
        Kind::Project => {
            let uid = uid.unwrap_or_default();
            let Some(project) = loader.project(uid).await else {
                bail!("project `{uid}` not found");
            };
            if raw {
                print_json(&project)
            } else {
                print_json(&ProjectPreview::from_project(&project, &routes))
            }
        }
        Kind::CaseStudies => {
            let case_studies = loader.case_studies().await;
            if raw {
                print_json(&case_studies)
            } else {
                let previews: Vec<_> = case_studies
                    .iter()
                    .map(|c| CaseStudyPreview::from_case_study(c, &routes))
                    .collect();
                print_json(&previews)
            }
        }
        Kind::CaseStudy => {
            let uid = uid.unwrap_or_default();
            let Some(case_study) = loader.case_study(uid).await else {
                bail!("case study `{uid}` not found");
            };
            if raw {
                print_json(&case_study)
            } else {
                print_json(&CaseStudyPreview::from_case_study(&case_study, &routes))
            }
        }
        Kind::Posts => {
            let posts = loader.posts().await;
            if raw {
                print_json(&posts)
            } else {
                let previews: Vec<_> = posts
                    .iter()
                    .map(|p| PostPreview::from_post(p, &routes))
                    .collect();
                print_json(&previews)
            }
        }
        Kind::Post => {
            let uid = uid.unwrap_or_default();
            let Some(post) = loader.post(uid).await else {
                bail!("post `{uid}` not found");
            };
            if raw {
                print_json(&post)
            } else {
                print_json(&PostPreview::from_post(&post, &routes))
            }
        }
        Kind::Tags => {
            let tags = loader.tags().await;
            if raw {
                print_json(&tags)
            } else {
                let previews: Vec<_> = tags.iter().map(Taxonomy::from_tag).collect();
                print_json(&previews)
            }
        }
        Kind::Skills => {
            let skills = loader.skills().await;
            if raw {
                print_json(&skills)
            } else {
                let previews: Vec<_> = skills.iter().map(Taxonomy::from_skill).collect();
                print_json(&previews)
            }
        }
        Kind::Settings => {
            let Some(settings) = loader.settings().await else {
                bail!("settings not found");
            };
            print_json(&settings)
        }
        Kind::Navigation => {
            let Some(navigation) = loader.navigation().await else {
                bail!("navigation not found");
            };
            print_json(&navigation)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("could not serialize output")?;
    println!("{pretty}");
    Ok(())
}
