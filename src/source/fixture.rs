//! Built-in fixture content, used whenever the live repository is
//! unreachable or returns documents that fail validation.

use crate::schema::{
    CaseStudy, CaseStudyData, FooterEntry, GalleryItem, HeroPrimary, HeroSlice, Highlight,
    ImageDimensions, ImageField, Labeled, LinkField, LinkType, Metric, MetricsPrimary,
    MetricsSlice, NavEntry, NavSocialLink, Navigation, NavigationData, Post, PostData, Project,
    ProjectData, ProjectLink, ProjectRelation, QuotePrimary, QuoteSlice, RelatedProject,
    RelatedProjectData, RelatedSkill, RelatedSkillData, RelatedTag, RelatedTagData, RichText,
    SeoDefaults, SeoEntry, Settings, SettingsData, Skill, SkillData, SkillRelation, Slice,
    SocialLink, Tag, TagData, TagRelation, TextBlock,
};
use serde_json::Map;

/// The complete fixture content model: everything the site needs to render
/// without a network connection.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub projects: Vec<Project>,
    pub case_studies: Vec<CaseStudy>,
    pub posts: Vec<Post>,
    pub tags: Vec<Tag>,
    pub skills: Vec<Skill>,
    pub settings: Settings,
    pub navigation: Navigation,
}

impl FixtureSet {
    pub fn project(&self, uid: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.uid.as_deref() == Some(uid))
    }

    pub fn case_study(&self, uid: &str) -> Option<&CaseStudy> {
        self.case_studies
            .iter()
            .find(|c| c.uid.as_deref() == Some(uid))
    }

    pub fn post(&self, uid: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.uid.as_deref() == Some(uid))
    }

    /// The built-in content model: three projects, one case study, two
    /// posts, and matching taxonomies and singletons.
    pub fn builtin() -> Self {
        Self {
            projects: vec![guilded_platform_refresh(), vesto_wealth(), tona_guilded()],
            case_studies: vec![guilded_case_study()],
            posts: vec![designing_motion_systems(), integrated_research_loops()],
            tags: builtin_tags(),
            skills: builtin_skills(),
            settings: builtin_settings(),
            navigation: builtin_navigation(),
        }
    }
}

impl Default for FixtureSet {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// field helpers
// ============================================================================

fn rich(paragraphs: &[&str]) -> RichText {
    paragraphs
        .iter()
        .map(|text| TextBlock {
            block_type: "paragraph".to_string(),
            text: Some((*text).to_string()),
            spans: Vec::new(),
            data: None,
        })
        .collect()
}

fn image(url: &str, alt: &str, width: u32, height: u32) -> ImageField {
    ImageField {
        url: url.to_string(),
        alt: Some(alt.to_string()),
        copyright: None,
        dimensions: Some(ImageDimensions { width, height }),
        extra: Map::new(),
    }
}

fn web_link(url: &str) -> LinkField {
    LinkField {
        link_type: LinkType::Web,
        url: Some(url.to_string()),
        ..Default::default()
    }
}

fn tag_rel(id: &str, uid: &str, label: &str) -> TagRelation {
    TagRelation {
        tag: Some(RelatedTag {
            id: Some(id.to_string()),
            rel_type: Some("tag".to_string()),
            uid: Some(uid.to_string()),
            data: Some(RelatedTagData {
                label: Some(label.to_string()),
                color: None,
                description: None,
            }),
        }),
    }
}

fn skill_rel(id: &str, uid: &str, label: &str) -> SkillRelation {
    SkillRelation {
        skill: Some(RelatedSkill {
            id: Some(id.to_string()),
            rel_type: Some("skill".to_string()),
            uid: Some(uid.to_string()),
            data: Some(RelatedSkillData {
                label: Some(label.to_string()),
                description: None,
                category: None,
                color: None,
            }),
        }),
    }
}

fn project_rel(id: &str, uid: &str, title: &str, summary: &str) -> ProjectRelation {
    ProjectRelation {
        project: Some(RelatedProject {
            id: Some(id.to_string()),
            rel_type: Some("project".to_string()),
            uid: Some(uid.to_string()),
            data: RelatedProjectData {
                title: Some(title.to_string()),
                summary: rich(&[summary]),
                cover: None,
            },
        }),
    }
}

fn labeled(labels: &[&str]) -> Vec<Labeled> {
    labels
        .iter()
        .map(|l| Labeled {
            label: Some((*l).to_string()),
        })
        .collect()
}

fn metric(label: &str, value: &str, context: Option<&str>) -> Metric {
    Metric {
        label: Some(label.to_string()),
        value: Some(value.to_string()),
        context: context.map(str::to_string),
    }
}

fn seo(title: &str, description: &str) -> Vec<SeoEntry> {
    vec![SeoEntry {
        meta_title: Some(title.to_string()),
        meta_description: Some(description.to_string()),
        og_image: None,
    }]
}

// ============================================================================
// projects
// ============================================================================

fn guilded_platform_refresh() -> Project {
    Project {
        id: "prj_guilded".to_string(),
        uid: Some("guilded-platform-refresh".to_string()),
        lang: Some("en-us".to_string()),
        tags: vec!["Platforms".to_string()],
        data: ProjectData {
            title: "Guilded platform refresh".to_string(),
            summary: rich(&[
                "A ground-up refresh of the Guilded creator platform, from design system to \
                 activation flows.",
            ]),
            cover: Some(image(
                "https://images.folio.dev/guilded-cover.jpg",
                "Guilded dashboard on a wide display",
                1600,
                900,
            )),
            services: labeled(&["Product design", "Design systems"]),
            roles: labeled(&["Creative direction"]),
            year: Some(2024),
            client: Some("Guilded".to_string()),
            duration: Some("6 months".to_string()),
            links: vec![ProjectLink {
                label: Some("Live platform".to_string()),
                url: Some(web_link("https://guilded.example.com")),
            }],
            tags: vec![
                tag_rel("tag_platforms", "platforms", "Platforms"),
                tag_rel("tag_product", "product-strategy", "Product strategy"),
            ],
            skills: vec![skill_rel(
                "skill_systems",
                "systems-architecture",
                "Systems architecture",
            )],
            metrics: vec![
                metric("Activation", "+36%", Some("first 90 days")),
                metric("Weekly retention", "+18%", None),
            ],
            gallery: vec![GalleryItem {
                media: Some(image(
                    "https://images.folio.dev/guilded-gallery-1.jpg",
                    "Component library overview",
                    1600,
                    1000,
                )),
                caption: Some("The refreshed component library".to_string()),
            }],
            seo: seo(
                "Guilded platform refresh",
                "A ground-up refresh of the Guilded creator platform.",
            ),
            body: vec![
                Slice::Hero(HeroSlice {
                    variation: "default".to_string(),
                    primary: HeroPrimary {
                        eyebrow: Some("Selected work".to_string()),
                        heading: Some("Guilded platform refresh".to_string()),
                        subheading: rich(&["Design system to activation flows."]),
                        ..Default::default()
                    },
                    items: vec![Highlight {
                        label: Some("Scope".to_string()),
                        detail: Some("Platform-wide".to_string()),
                    }],
                }),
                Slice::Metrics(MetricsSlice {
                    variation: "default".to_string(),
                    primary: MetricsPrimary {
                        title: Some("Outcomes".to_string()),
                        caption: None,
                    },
                    items: vec![
                        metric("Activation", "+36%", None),
                        metric("Weekly retention", "+18%", None),
                    ],
                }),
            ],
        },
    }
}

fn vesto_wealth() -> Project {
    Project {
        id: "prj_vesto".to_string(),
        uid: Some("vesto-wealth".to_string()),
        lang: Some("en-us".to_string()),
        tags: vec!["Product strategy".to_string()],
        data: ProjectData {
            title: "Vesto wealth onboarding".to_string(),
            summary: rich(&[
                "Rebuilding Vesto's onboarding to earn trust in the first five minutes.",
            ]),
            cover: Some(image(
                "https://images.folio.dev/vesto-cover.jpg",
                "Vesto onboarding screens",
                1600,
                900,
            )),
            services: labeled(&["Product strategy", "Interaction design"]),
            roles: labeled(&["Design lead"]),
            year: Some(2023),
            client: Some("Vesto".to_string()),
            duration: Some("4 months".to_string()),
            links: Vec::new(),
            tags: vec![tag_rel("tag_product", "product-strategy", "Product strategy")],
            skills: vec![skill_rel(
                "skill_facilitation",
                "facilitation",
                "Facilitation",
            )],
            metrics: vec![metric("Completed onboardings", "+52%", None)],
            gallery: Vec::new(),
            seo: seo(
                "Vesto wealth onboarding",
                "Rebuilding Vesto's onboarding flows.",
            ),
            body: vec![Slice::Quote(QuoteSlice {
                variation: "default".to_string(),
                primary: QuotePrimary {
                    quote: rich(&["The clearest our product has ever felt."]),
                    attribution: Some("Vesto product team".to_string()),
                    title: None,
                },
                items: Vec::new(),
            })],
        },
    }
}

fn tona_guilded() -> Project {
    Project {
        id: "prj_tona".to_string(),
        uid: Some("tona-guilded".to_string()),
        lang: Some("en-us".to_string()),
        tags: vec!["Motion design".to_string()],
        data: ProjectData {
            title: "Tona motion identity".to_string(),
            summary: rich(&["A motion identity for Tona's launch, built as a reusable system."]),
            cover: Some(image(
                "https://images.folio.dev/tona-cover.jpg",
                "Tona brand motion frames",
                1600,
                900,
            )),
            services: labeled(&["Motion design"]),
            roles: labeled(&["Creative direction"]),
            year: Some(2023),
            client: Some("Tona".to_string()),
            duration: Some("8 weeks".to_string()),
            links: Vec::new(),
            tags: vec![tag_rel("tag_motion", "motion-design", "Motion design")],
            skills: vec![skill_rel(
                "skill_creative",
                "creative-direction",
                "Creative direction",
            )],
            metrics: Vec::new(),
            gallery: Vec::new(),
            seo: Vec::new(),
            body: Vec::new(),
        },
    }
}

// ============================================================================
// case studies
// ============================================================================

fn guilded_case_study() -> CaseStudy {
    CaseStudy {
        id: "cs_guilded".to_string(),
        uid: Some("guilded".to_string()),
        lang: Some("en-us".to_string()),
        data: CaseStudyData {
            title: "Guilded: rebuilding for creators".to_string(),
            hero_kicker: Some("Case study".to_string()),
            hero_headline: Some("Rebuilding Guilded for the next million creators".to_string()),
            hero_description: rich(&[
                "How a platform-wide refresh moved activation and retention without pausing \
                 feature work.",
            ]),
            hero_media: Some(image(
                "https://images.folio.dev/guilded-hero.jpg",
                "Guilded platform collage",
                2000,
                1200,
            )),
            problem_statement: rich(&[
                "Guilded's interface had grown faster than its design language.",
            ]),
            approach: rich(&[
                "We rebuilt the design system first, then migrated surfaces one activation \
                 flow at a time.",
            ]),
            outcomes: rich(&["Activation rose 36% in the first quarter after launch."]),
            metrics: vec![
                metric("Activation", "+36%", Some("first 90 days")),
                metric("Support tickets", "-24%", None),
            ],
            related_projects: vec![
                project_rel(
                    "prj_guilded",
                    "guilded-platform-refresh",
                    "Guilded platform refresh",
                    "A ground-up refresh of the Guilded creator platform.",
                ),
                project_rel(
                    "prj_tona",
                    "tona-guilded",
                    "Tona motion identity",
                    "A motion identity built as a reusable system.",
                ),
            ],
            seo: seo(
                "Guilded case study",
                "Rebuilding Guilded for the next million creators.",
            ),
            body: Vec::new(),
        },
    }
}

// ============================================================================
// posts
// ============================================================================

fn designing_motion_systems() -> Post {
    Post {
        id: "post_motion".to_string(),
        uid: Some("designing-motion-systems".to_string()),
        lang: Some("en-us".to_string()),
        data: PostData {
            title: "Designing motion systems that scale".to_string(),
            excerpt: rich(&[
                "Motion reads as polish until it breaks. Here is how to make it structural.",
            ]),
            author: Some("Alex Rivera".to_string()),
            reading_time: Some(7),
            published_at: Some("2024-03-12".to_string()),
            tags: vec![tag_rel("tag_motion", "motion-design", "Motion design")],
            canonical_url: None,
            seo: Vec::new(),
            body: Vec::new(),
        },
    }
}

fn integrated_research_loops() -> Post {
    Post {
        id: "post_research".to_string(),
        uid: Some("integrated-research-loops".to_string()),
        lang: Some("en-us".to_string()),
        data: PostData {
            title: "Integrated research loops".to_string(),
            excerpt: rich(&[
                "Research works when it ships with the sprint, not after it.",
            ]),
            author: Some("Alex Rivera".to_string()),
            reading_time: Some(5),
            published_at: Some("2024-01-28".to_string()),
            tags: vec![tag_rel("tag_product", "product-strategy", "Product strategy")],
            canonical_url: None,
            seo: Vec::new(),
            body: Vec::new(),
        },
    }
}

// ============================================================================
// taxonomies and singletons
// ============================================================================

fn builtin_tags() -> Vec<Tag> {
    let tag = |id: &str, uid: &str, label: &str, color: &str| Tag {
        id: id.to_string(),
        uid: Some(uid.to_string()),
        data: TagData {
            label: label.to_string(),
            description: None,
            color: Some(color.to_string()),
        },
    };
    vec![
        tag("tag_product", "product-strategy", "Product strategy", "#6C5CE7"),
        tag("tag_motion", "motion-design", "Motion design", "#00B894"),
        tag("tag_platforms", "platforms", "Platforms", "#0984E3"),
    ]
}

fn builtin_skills() -> Vec<Skill> {
    let skill = |id: &str, uid: &str, label: &str, category: &str| Skill {
        id: id.to_string(),
        uid: Some(uid.to_string()),
        data: SkillData {
            label: label.to_string(),
            description: None,
            category: Some(category.to_string()),
            color: None,
        },
    };
    vec![
        skill(
            "skill_creative",
            "creative-direction",
            "Creative direction",
            "leadership",
        ),
        skill(
            "skill_systems",
            "systems-architecture",
            "Systems architecture",
            "craft",
        ),
        skill("skill_facilitation", "facilitation", "Facilitation", "process"),
    ]
}

fn builtin_settings() -> Settings {
    Settings {
        id: "settings_folio".to_string(),
        data: SettingsData {
            site_title: Some("Alex Rivera".to_string()),
            site_description: Some(
                "Design direction and systems for product teams.".to_string(),
            ),
            tagline: Some("Systems, motion, and strategy".to_string()),
            contact_email: Some("hello@folio.dev".to_string()),
            default_og_image: Some(image(
                "https://images.folio.dev/og-default.jpg",
                "Alex Rivera portfolio",
                1200,
                630,
            )),
            primary_color: Some("#101014".to_string()),
            secondary_color: Some("#F5F5F2".to_string()),
            accent_color: Some("#6C5CE7".to_string()),
            typeface_primary: Some("Söhne".to_string()),
            typeface_secondary: Some("Signifier".to_string()),
            analytics_provider: Some("plausible".to_string()),
            analytics_id: Some("folio.dev".to_string()),
            social_links: vec![
                SocialLink {
                    label: Some("GitHub".to_string()),
                    url: Some(web_link("https://github.com/alexrivera")),
                    icon: Some("github".to_string()),
                },
                SocialLink {
                    label: Some("LinkedIn".to_string()),
                    url: Some(web_link("https://linkedin.com/in/alexrivera")),
                    icon: Some("linkedin".to_string()),
                },
            ],
            seo_defaults: vec![SeoDefaults {
                meta_title_suffix: Some(" | Alex Rivera".to_string()),
                meta_description: Some(
                    "Design direction and systems for product teams.".to_string(),
                ),
                twitter_handle: Some("@alexrivera".to_string()),
            }],
        },
    }
}

fn builtin_navigation() -> Navigation {
    let entry = |label: &str, url: &str| NavEntry {
        label: Some(label.to_string()),
        link: Some(web_link(url)),
        description: None,
    };
    Navigation {
        id: "nav_folio".to_string(),
        data: NavigationData {
            primary_navigation: vec![
                entry("Work", "/work"),
                entry("Case studies", "/case-study"),
                entry("Blog", "/blog"),
            ],
            secondary_navigation: vec![entry("About", "/about"), entry("Contact", "/contact")],
            footer_navigation: vec![
                FooterEntry {
                    section_label: Some("Explore".to_string()),
                    label: Some("Work".to_string()),
                    link: Some(web_link("/work")),
                },
                FooterEntry {
                    section_label: Some("Explore".to_string()),
                    label: Some("Blog".to_string()),
                    link: Some(web_link("/blog")),
                },
                FooterEntry {
                    section_label: Some("Connect".to_string()),
                    label: Some("Email".to_string()),
                    link: Some(web_link("mailto:hello@folio.dev")),
                },
            ],
            social_links: vec![NavSocialLink {
                label: Some("GitHub".to_string()),
                link: Some(web_link("https://github.com/alexrivera")),
                icon: Some("github".to_string()),
            }],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_document;

    fn assert_validates<T: serde::Serialize>(doc: &T, doc_type: &str) {
        let mut v = serde_json::to_value(doc).expect("serializable");
        v.as_object_mut()
            .expect("object")
            .insert("type".to_string(), doc_type.into());
        if let Err(err) = validate_document(&v) {
            panic!("fixture {doc_type} fails its own schema:\n{err}");
        }
    }

    #[test]
    fn test_builtin_fixtures_validate_against_their_own_schemas() {
        let fixtures = FixtureSet::builtin();
        for p in &fixtures.projects {
            assert_validates(p, "project");
        }
        for c in &fixtures.case_studies {
            assert_validates(c, "case_study");
        }
        for p in &fixtures.posts {
            assert_validates(p, "post");
        }
        for t in &fixtures.tags {
            assert_validates(t, "tag");
        }
        for s in &fixtures.skills {
            assert_validates(s, "skill");
        }
        assert_validates(&fixtures.settings, "settings");
        assert_validates(&fixtures.navigation, "navigation");
    }

    #[test]
    fn test_lookup_by_uid() {
        let fixtures = FixtureSet::builtin();
        let project = fixtures
            .project("guilded-platform-refresh")
            .expect("builtin project");
        assert_eq!(project.data.title, "Guilded platform refresh");
        assert!(fixtures.project("does-not-exist").is_none());
    }

    #[test]
    fn test_case_study_relations_resolve_to_builtin_projects() {
        let fixtures = FixtureSet::builtin();
        let case_study = fixtures.case_study("guilded").expect("builtin case study");
        for related in case_study.concrete_projects() {
            let uid = related.uid.as_deref().expect("concrete relation has uid");
            assert!(fixtures.project(uid).is_some(), "unknown relation {uid}");
        }
    }
}
