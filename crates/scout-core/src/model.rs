use crate::secret::SecretBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "gitlab")]
    GitLab,
    #[serde(rename = "bitbucket")]
    Bitbucket,
    #[serde(rename = "azure-devops")]
    AzureDevOps,
}

impl ProviderKind {
    pub fn as_prefix(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "github",
            ProviderKind::GitLab => "gitlab",
            ProviderKind::Bitbucket => "bitbucket",
            ProviderKind::AzureDevOps => "azure-devops",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => "GitHub",
            ProviderKind::GitLab => "GitLab",
            ProviderKind::Bitbucket => "Bitbucket",
            ProviderKind::AzureDevOps => "Azure DevOps",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_prefix())
    }
}

/// Everything needed to reach one provider account. Fields the caller may
/// leave unset are `Option`s; the validator reports each missing one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub provider: Option<ProviderKind>,
    pub base_url: Option<String>,
    pub api_url: Option<String>,
    pub username: Option<String>,
    #[serde(skip)]
    pub secret: Option<SecretBuffer>,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(default)]
    pub self_hosted: bool,
}

fn default_verify_ssl() -> bool {
    true
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            provider: None,
            base_url: None,
            api_url: None,
            username: None,
            secret: None,
            verify_ssl: true,
            self_hosted: false,
        }
    }
}

impl ConnectionConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider: Some(provider),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_secret(mut self, secret: SecretBuffer) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    pub fn with_self_hosted(mut self, self_hosted: bool) -> Self {
        self.self_hosted = self_hosted;
        self
    }

    /// Drops the secret after zeroing it.
    pub fn wipe_secret(&mut self) {
        if let Some(secret) = self.secret.as_mut() {
            secret.wipe();
        }
        self.secret = None;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    #[serde(default)]
    pub description: Option<String>,
    pub clone_url: String,
    #[serde(default)]
    pub ssh_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    pub default_branch: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub size_kb: Option<u64>,
    #[serde(default)]
    pub stars: Option<u64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub provider: ProviderKind,
}

impl RepositoryMetadata {
    /// Case-insensitive substring match on name, full name, or description.
    /// An empty query matches every repository.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.full_name.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}

/// One page of a paginated listing. `page` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPage {
    pub repositories: Vec<RepositoryMetadata>,
    pub page: u32,
    pub per_page: u32,
    pub has_more: bool,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl DiscoveryPage {
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            repositories: Vec::new(),
            page,
            per_page,
            has_more: false,
            total_count: None,
        }
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(name: &str) -> RepositoryMetadata {
        RepositoryMetadata {
            id: name.to_string(),
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            owner: "acme".to_string(),
            description: Some("Internal tooling".to_string()),
            clone_url: format!("https://github.com/acme/{name}.git"),
            ssh_url: None,
            web_url: None,
            default_branch: "main".to_string(),
            visibility: Visibility::Public,
            language: Some("Rust".to_string()),
            archived: false,
            fork: false,
            size_kb: None,
            stars: None,
            updated_at: None,
            provider: ProviderKind::GitHub,
        }
    }

    #[test]
    fn provider_kind_serializes_as_prefix() {
        let value = serde_json::to_value(ProviderKind::AzureDevOps).unwrap();
        assert_eq!(value, json!("azure-devops"));
        let kind: ProviderKind = serde_json::from_value(json!("bitbucket")).unwrap();
        assert_eq!(kind, ProviderKind::Bitbucket);
    }

    #[test]
    fn connection_config_never_serializes_secret() {
        let config = ConnectionConfig::new(ProviderKind::GitHub)
            .with_username("octocat")
            .with_secret(SecretBuffer::from("ghp_secret".to_string()));
        let text = serde_json::to_string(&config).unwrap();
        assert!(!text.contains("ghp_secret"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn connection_config_defaults_verify_ssl() {
        let config: ConnectionConfig =
            serde_json::from_value(json!({ "provider": "gitlab" })).unwrap();
        assert!(config.verify_ssl);
        assert!(!config.self_hosted);
        assert!(config.secret.is_none());
    }

    #[test]
    fn wipe_secret_removes_it() {
        let mut config = ConnectionConfig::new(ProviderKind::GitHub)
            .with_secret(SecretBuffer::from("token".to_string()));
        config.wipe_secret();
        assert!(config.secret.is_none());
    }

    #[test]
    fn metadata_parses_rfc3339_activity() {
        let value = json!({
            "id": "1",
            "name": "tool",
            "full_name": "acme/tool",
            "owner": "acme",
            "clone_url": "https://example.com/acme/tool.git",
            "default_branch": "main",
            "visibility": "private",
            "updated_at": "2024-03-01T12:00:00Z",
            "provider": "gitlab"
        });
        let repo: RepositoryMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(repo.visibility, Visibility::Private);
        assert_eq!(repo.updated_at.map(|ts| ts.year()), Some(2024));
        assert!(!repo.archived);
    }

    #[test]
    fn matches_query_checks_name_and_description() {
        let item = repo("scout-core");
        assert!(item.matches_query("SCOUT"));
        assert!(item.matches_query("tooling"));
        assert!(item.matches_query(""));
        assert!(!item.matches_query("mirror"));
    }
}
