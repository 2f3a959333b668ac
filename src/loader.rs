//! The content loading facade: fetch, validate, fall back.
//!
//! Every operation tries the injected [`ContentSource`] first. If the fetch
//! or the validation fails, the error is logged and the built-in fixture
//! content is served instead, so pages always have something to render.
//! Fallback can be disabled for environments where silent degradation would
//! hide real problems.

use crate::log;
use crate::schema::{
    CaseStudy, Document, DocumentType, Navigation, Post, Project, SchemaError, Settings, Skill,
    Tag, validate_document, validate_documents,
};
use crate::source::{ContentSource, FixtureSet, SourceError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("expected a {expected}, repository returned a {found}")]
    WrongType {
        expected: DocumentType,
        found: DocumentType,
    },
}

pub struct Loader {
    source: Arc<dyn ContentSource>,
    fixtures: FixtureSet,
    fallback: bool,
}

impl Loader {
    pub fn new(source: Arc<dyn ContentSource>, fixtures: FixtureSet) -> Self {
        Self {
            source,
            fixtures,
            fallback: true,
        }
    }

    /// Disables fixture fallback; failed loads yield empty results instead.
    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    async fn load_all(&self, doc_type: DocumentType) -> Result<Vec<Document>, LoadError> {
        let raw = self.source.get_all_by_type(doc_type).await?;
        Ok(validate_documents(&raw)?)
    }

    async fn load_one(&self, doc_type: DocumentType, uid: &str) -> Result<Document, LoadError> {
        let raw = self.source.get_by_uid(doc_type, uid).await?;
        Ok(validate_document(&raw)?)
    }

    async fn load_single(&self, doc_type: DocumentType) -> Result<Document, LoadError> {
        let raw = self.source.get_single(doc_type).await?;
        Ok(validate_document(&raw)?)
    }

    fn note_fallback(&self, what: &str, err: &LoadError) {
        if self.fallback {
            log!("cms"; "falling back to fixture {what}: {err}");
        } else {
            log!("cms"; "failed to load {what} (fallback disabled): {err}");
        }
    }

    pub async fn projects(&self) -> Vec<Project> {
        match self.load_all(DocumentType::Project).await {
            Ok(docs) => collect(docs, |d| match d {
                Document::Project(p) => Some(p),
                _ => None,
            }),
            Err(err) => {
                self.note_fallback("projects", &err);
                if self.fallback {
                    self.fixtures.projects.clone()
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub async fn project(&self, uid: &str) -> Option<Project> {
        match self.load_one(DocumentType::Project, uid).await {
            Ok(Document::Project(p)) => Some(p),
            Ok(doc) => {
                self.note_fallback(
                    "project",
                    &LoadError::WrongType {
                        expected: DocumentType::Project,
                        found: doc.doc_type(),
                    },
                );
                self.fallback_project(uid)
            }
            Err(err) => {
                self.note_fallback("project", &err);
                self.fallback_project(uid)
            }
        }
    }

    fn fallback_project(&self, uid: &str) -> Option<Project> {
        if self.fallback {
            self.fixtures.project(uid).cloned()
        } else {
            None
        }
    }

    pub async fn case_studies(&self) -> Vec<CaseStudy> {
        match self.load_all(DocumentType::CaseStudy).await {
            Ok(docs) => collect(docs, |d| match d {
                Document::CaseStudy(c) => Some(c),
                _ => None,
            }),
            Err(err) => {
                self.note_fallback("case studies", &err);
                if self.fallback {
                    self.fixtures.case_studies.clone()
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub async fn case_study(&self, uid: &str) -> Option<CaseStudy> {
        match self.load_one(DocumentType::CaseStudy, uid).await {
            Ok(Document::CaseStudy(c)) => Some(c),
            Ok(doc) => {
                self.note_fallback(
                    "case study",
                    &LoadError::WrongType {
                        expected: DocumentType::CaseStudy,
                        found: doc.doc_type(),
                    },
                );
                self.fallback_case_study(uid)
            }
            Err(err) => {
                self.note_fallback("case study", &err);
                self.fallback_case_study(uid)
            }
        }
    }

    fn fallback_case_study(&self, uid: &str) -> Option<CaseStudy> {
        if self.fallback {
            self.fixtures.case_study(uid).cloned()
        } else {
            None
        }
    }

    pub async fn posts(&self) -> Vec<Post> {
        match self.load_all(DocumentType::Post).await {
            Ok(docs) => collect(docs, |d| match d {
                Document::Post(p) => Some(p),
                _ => None,
            }),
            Err(err) => {
                self.note_fallback("posts", &err);
                if self.fallback {
                    self.fixtures.posts.clone()
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub async fn post(&self, uid: &str) -> Option<Post> {
        match self.load_one(DocumentType::Post, uid).await {
            Ok(Document::Post(p)) => Some(p),
            Ok(doc) => {
                self.note_fallback(
                    "post",
                    &LoadError::WrongType {
                        expected: DocumentType::Post,
                        found: doc.doc_type(),
                    },
                );
                self.fallback_post(uid)
            }
            Err(err) => {
                self.note_fallback("post", &err);
                self.fallback_post(uid)
            }
        }
    }

    fn fallback_post(&self, uid: &str) -> Option<Post> {
        if self.fallback {
            self.fixtures.post(uid).cloned()
        } else {
            None
        }
    }

    pub async fn tags(&self) -> Vec<Tag> {
        match self.load_all(DocumentType::Tag).await {
            Ok(docs) => collect(docs, |d| match d {
                Document::Tag(t) => Some(t),
                _ => None,
            }),
            Err(err) => {
                self.note_fallback("tags", &err);
                if self.fallback {
                    self.fixtures.tags.clone()
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub async fn skills(&self) -> Vec<Skill> {
        match self.load_all(DocumentType::Skill).await {
            Ok(docs) => collect(docs, |d| match d {
                Document::Skill(s) => Some(s),
                _ => None,
            }),
            Err(err) => {
                self.note_fallback("skills", &err);
                if self.fallback {
                    self.fixtures.skills.clone()
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub async fn settings(&self) -> Option<Settings> {
        match self.load_single(DocumentType::Settings).await {
            Ok(Document::Settings(s)) => Some(s),
            Ok(doc) => {
                self.note_fallback(
                    "settings",
                    &LoadError::WrongType {
                        expected: DocumentType::Settings,
                        found: doc.doc_type(),
                    },
                );
                self.fallback.then(|| self.fixtures.settings.clone())
            }
            Err(err) => {
                self.note_fallback("settings", &err);
                self.fallback.then(|| self.fixtures.settings.clone())
            }
        }
    }

    pub async fn navigation(&self) -> Option<Navigation> {
        match self.load_single(DocumentType::Navigation).await {
            Ok(Document::Navigation(n)) => Some(n),
            Ok(doc) => {
                self.note_fallback(
                    "navigation",
                    &LoadError::WrongType {
                        expected: DocumentType::Navigation,
                        found: doc.doc_type(),
                    },
                );
                self.fallback.then(|| self.fixtures.navigation.clone())
            }
            Err(err) => {
                self.note_fallback("navigation", &err);
                self.fallback.then(|| self.fixtures.navigation.clone())
            }
        }
    }
}

fn collect<T>(docs: Vec<Document>, f: impl Fn(Document) -> Option<T>) -> Vec<T> {
    docs.into_iter().filter_map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    /// Source double that either fails every call or serves canned payloads.
    struct FakeSource {
        documents: Vec<Value>,
        fail: bool,
    }

    impl FakeSource {
        fn failing() -> Self {
            Self {
                documents: Vec::new(),
                fail: true,
            }
        }

        fn serving(documents: Vec<Value>) -> Self {
            Self {
                documents,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn get_all_by_type(
            &self,
            doc_type: DocumentType,
        ) -> Result<Vec<Value>, SourceError> {
            if self.fail {
                return Err(SourceError::MissingRepository);
            }
            Ok(self
                .documents
                .iter()
                .filter(|d| d.get("type").and_then(Value::as_str) == Some(doc_type.api_name()))
                .cloned()
                .collect())
        }

        async fn get_by_uid(
            &self,
            doc_type: DocumentType,
            uid: &str,
        ) -> Result<Value, SourceError> {
            self.get_all_by_type(doc_type)
                .await?
                .into_iter()
                .find(|d| d.get("uid").and_then(Value::as_str) == Some(uid))
                .ok_or_else(|| SourceError::NotFound(format!("{doc_type} `{uid}`")))
        }

        async fn get_single(&self, doc_type: DocumentType) -> Result<Value, SourceError> {
            self.get_all_by_type(doc_type)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| SourceError::NotFound(format!("{doc_type} singleton")))
        }
    }

    fn loader(source: FakeSource) -> Loader {
        Loader::new(Arc::new(source), FixtureSet::builtin())
    }

    #[tokio::test]
    async fn test_unreachable_source_falls_back_to_fixtures() {
        let loader = loader(FakeSource::failing());
        let project = loader
            .project("guilded-platform-refresh")
            .await
            .expect("fixture fallback");
        assert_eq!(project.data.title, "Guilded platform refresh");

        let projects = loader.projects().await;
        assert_eq!(projects.len(), 3);
    }

    #[tokio::test]
    async fn test_live_documents_win_over_fixtures() {
        let loader = loader(FakeSource::serving(vec![json!({
            "id": "prj_live",
            "type": "project",
            "uid": "live-project",
            "data": { "title": "Live project" },
        })]));
        let projects = loader.projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].data.title, "Live project");
    }

    #[tokio::test]
    async fn test_invalid_live_document_triggers_fallback() {
        // title missing, so validation fails and fixtures are served
        let loader = loader(FakeSource::serving(vec![json!({
            "id": "prj_bad",
            "type": "project",
            "uid": "bad-project",
            "data": {},
        })]));
        let projects = loader.projects().await;
        assert_eq!(projects.len(), 3, "fixture set replaces the bad batch");
    }

    #[tokio::test]
    async fn test_disabled_fallback_yields_empty_results() {
        let loader = loader(FakeSource::failing()).with_fallback(false);
        assert!(loader.projects().await.is_empty());
        assert!(loader.project("guilded-platform-refresh").await.is_none());
    }

    #[tokio::test]
    async fn test_singletons_fall_back_to_fixtures() {
        let loader = loader(FakeSource::failing());
        let settings = loader.settings().await.expect("fixture settings");
        assert_eq!(settings.data.site_title.as_deref(), Some("Alex Rivera"));
        let navigation = loader.navigation().await.expect("fixture navigation");
        assert!(!navigation.data.primary_navigation.is_empty());
    }
}
