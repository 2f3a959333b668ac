//! HTTP client for the hosted content repository API.

use super::{ContentSource, SourceError};
use crate::config::RepositoryConfig;
use crate::debug;
use crate::schema::DocumentType;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const PAGE_SIZE: u32 = 100;

/// Client for the repository's REST search API.
///
/// Construction never fails: a missing repository only surfaces as
/// [`SourceError::MissingRepository`] once a request is made, so callers can
/// wire the client unconditionally and rely on fixture fallback.
pub struct CmsClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    page: u32,
    total_pages: u32,
    results: Vec<Value>,
}

impl CmsClient {
    pub fn new(config: &RepositoryConfig) -> Self {
        let endpoint = config.endpoint.clone().or_else(|| {
            config
                .name
                .as_deref()
                .map(|name| format!("https://{name}.cdn.prismic.io/api/v2"))
        });
        Self {
            http: reqwest::Client::new(),
            endpoint,
            access_token: config.resolved_token(),
        }
    }

    fn endpoint(&self) -> Result<&str, SourceError> {
        self.endpoint_str().ok_or(SourceError::MissingRepository)
    }

    fn endpoint_str(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// The ref pointing at currently published content. Fetched per call so
    /// long-running processes never pin a stale release.
    async fn master_ref(&self) -> Result<String, SourceError> {
        let endpoint = self.endpoint()?;
        let mut req = self.http.get(endpoint);
        if let Some(token) = &self.access_token {
            req = req.query(&[("access_token", token.as_str())]);
        }
        let info: ApiInfo = req.send().await?.error_for_status()?.json().await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master)
            .map(|r| r.reference)
            .ok_or_else(|| SourceError::Payload("api info carries no master ref".to_string()))
    }

    /// Runs one predicate query, following pagination to the end.
    async fn search(&self, predicate: &str) -> Result<Vec<Value>, SourceError> {
        let endpoint = self.endpoint()?;
        let master_ref = self.master_ref().await?;
        let url = format!("{endpoint}/documents/search");

        let mut results = Vec::new();
        let mut page = 1u32;
        loop {
            let mut req = self.http.get(&url).query(&[
                ("q", predicate),
                ("ref", master_ref.as_str()),
            ]);
            req = req.query(&[("page", page), ("pageSize", PAGE_SIZE)]);
            if let Some(token) = &self.access_token {
                req = req.query(&[("access_token", token.as_str())]);
            }
            let response: SearchResponse = req.send().await?.error_for_status()?.json().await?;
            debug!("cms"; "page {}/{} returned {} documents",
                response.page, response.total_pages, response.results.len());
            results.extend(response.results);
            if response.page >= response.total_pages {
                break;
            }
            page = response.page + 1;
        }
        Ok(results)
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn get_all_by_type(&self, doc_type: DocumentType) -> Result<Vec<Value>, SourceError> {
        let predicate = format!("[[at(document.type,\"{}\")]]", doc_type.api_name());
        self.search(&predicate).await
    }

    async fn get_by_uid(&self, doc_type: DocumentType, uid: &str) -> Result<Value, SourceError> {
        let escaped = uid.replace('\\', "\\\\").replace('"', "\\\"");
        let predicate = format!("[[at(my.{}.uid,\"{escaped}\")]]", doc_type.api_name());
        self.search(&predicate)
            .await?
            .into_iter()
            .next()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepositoryConfig;

    #[test]
    fn test_endpoint_derived_from_repository_name() {
        let client = CmsClient::new(&RepositoryConfig {
            name: Some("alex-folio".to_string()),
            ..Default::default()
        });
        assert_eq!(
            client.endpoint_str(),
            Some("https://alex-folio.cdn.prismic.io/api/v2")
        );
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let client = CmsClient::new(&RepositoryConfig {
            name: Some("alex-folio".to_string()),
            endpoint: Some("http://localhost:8091/api/v2".to_string()),
            ..Default::default()
        });
        assert_eq!(client.endpoint_str(), Some("http://localhost:8091/api/v2"));
    }

    #[tokio::test]
    async fn test_unconfigured_client_reports_missing_repository() {
        let client = CmsClient::new(&RepositoryConfig::default());
        let err = client
            .get_all_by_type(DocumentType::Project)
            .await
            .expect_err("no repository configured");
        assert!(matches!(err, SourceError::MissingRepository));
    }
}
