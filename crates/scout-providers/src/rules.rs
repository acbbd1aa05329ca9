use regex::Regex;
use scout_core::model::{ConnectionConfig, ProviderKind};
use scout_core::validation::{Advisory, CredentialValidator, ProviderRule, RuleSet};
use std::sync::OnceLock;

pub struct GitHubRule;
pub struct GitLabRule;
pub struct BitbucketRule;

const GITHUB_PUBLIC: &str = r"(?i)^https?://(api\.)?github\.com(/\S*)?$";
const GITHUB_ENTERPRISE: &str = r"(?i)^https?://[^/\s]+/api/v3(/\S*)?$";
const GITLAB_PUBLIC: &str = r"(?i)^https?://(www\.)?gitlab\.com(/\S*)?$";
const BITBUCKET_CLOUD: &str = r"(?i)^https?://(api\.)?bitbucket\.org(/\S*)?$";
const GENERIC_HOST: &str = r"(?i)^https?://[^/\s]+(/\S*)?$";

const GITHUB_GUIDANCE: &str = "GitHub: use https://github.com (or https://<host>/api/v3 \
for Enterprise Server) as the base URL and https://api.github.com as the API URL. Create a \
fine-grained personal access token at https://github.com/settings/personal-access-tokens/new \
with Contents (Read-only) and Metadata (Read-only) repository permissions, plus Members \
(Read-only) when listing organization repositories. Keep SSL verification on.";

const GITLAB_GUIDANCE: &str = "GitLab: use https://gitlab.com or your self-hosted instance URL \
as the base URL and <base>/api/v4 as the API URL. Create a personal access token at \
https://gitlab.com/-/profile/personal_access_tokens with the read_api and read_repository \
scopes.";

const BITBUCKET_GUIDANCE: &str = "Bitbucket: use https://bitbucket.org (or your Bitbucket \
Server URL) as the base URL and https://api.bitbucket.org/2.0 as the API URL. Sign in with \
your username and an app password that grants Repositories (Read) and Workspace membership \
(Read); avoid your account password.";

const GITLAB_SELF_HOSTED: &str =
    "Self-hosted GitLab instance: make sure the API URL points at <base>/api/v4";

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, url: &str) -> bool {
    compiled(cell, pattern).is_some_and(|regex| regex.is_match(url))
}

fn generic_host(url: &str) -> bool {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    matches(&CELL, GENERIC_HOST, url)
}

fn base_url_contains(config: &ConnectionConfig, needle: &str) -> bool {
    config
        .base_url
        .as_deref()
        .map(|url| url.to_ascii_lowercase().contains(needle))
        .unwrap_or(false)
}

impl ProviderRule for GitHubRule {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitHub
    }

    fn url_shape_matches(&self, url: &str) -> bool {
        static PUBLIC: OnceLock<Option<Regex>> = OnceLock::new();
        static ENTERPRISE: OnceLock<Option<Regex>> = OnceLock::new();
        matches(&PUBLIC, GITHUB_PUBLIC, url) || matches(&ENTERPRISE, GITHUB_ENTERPRISE, url)
    }

    fn advisories(&self, config: &ConnectionConfig) -> Vec<Advisory> {
        if base_url_contains(config, "github.com") && !config.verify_ssl {
            return vec![Advisory::Warning(
                "SSL verification should not be disabled for github.com".to_string(),
            )];
        }
        Vec::new()
    }

    fn guidance(&self) -> &'static str {
        GITHUB_GUIDANCE
    }
}

impl ProviderRule for GitLabRule {
    fn kind(&self) -> ProviderKind {
        ProviderKind::GitLab
    }

    fn url_shape_matches(&self, url: &str) -> bool {
        static PUBLIC: OnceLock<Option<Regex>> = OnceLock::new();
        matches(&PUBLIC, GITLAB_PUBLIC, url) || generic_host(url)
    }

    fn advisories(&self, config: &ConnectionConfig) -> Vec<Advisory> {
        if config.self_hosted {
            return vec![Advisory::Info(GITLAB_SELF_HOSTED.to_string())];
        }
        Vec::new()
    }

    fn guidance(&self) -> &'static str {
        GITLAB_GUIDANCE
    }
}

impl ProviderRule for BitbucketRule {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Bitbucket
    }

    fn url_shape_matches(&self, url: &str) -> bool {
        static CLOUD: OnceLock<Option<Regex>> = OnceLock::new();
        matches(&CLOUD, BITBUCKET_CLOUD, url) || generic_host(url)
    }

    fn advisories(&self, config: &ConnectionConfig) -> Vec<Advisory> {
        if base_url_contains(config, "bitbucket.org") {
            return vec![Advisory::Info(
                "Bitbucket Cloud: prefer an app password over your account password".to_string(),
            )];
        }
        Vec::new()
    }

    fn guidance(&self) -> &'static str {
        BITBUCKET_GUIDANCE
    }
}

pub fn default_rules() -> RuleSet {
    RuleSet::new()
        .with(Box::new(GitHubRule))
        .with(Box::new(GitLabRule))
        .with(Box::new(BitbucketRule))
}

/// Shared validator over [`default_rules`].
pub fn default_validator() -> &'static CredentialValidator {
    static VALIDATOR: OnceLock<CredentialValidator> = OnceLock::new();
    VALIDATOR.get_or_init(|| CredentialValidator::new(default_rules()))
}

pub fn is_valid_url_for_provider(kind: Option<ProviderKind>, url: &str) -> bool {
    default_validator().is_valid_url_for_provider(kind, url)
}

pub fn validation_suggestions(kind: Option<ProviderKind>) -> &'static str {
    default_validator().validation_suggestions(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::secret::SecretBuffer;

    fn connection(kind: ProviderKind, base: &str, api: &str) -> ConnectionConfig {
        ConnectionConfig::new(kind)
            .with_base_url(base)
            .with_api_url(api)
            .with_username("john.doe")
            .with_secret(SecretBuffer::from("s3cret-token".to_string()))
    }

    #[test]
    fn github_accepts_public_and_enterprise_shapes() {
        let github = Some(ProviderKind::GitHub);
        assert!(is_valid_url_for_provider(github, "https://github.com"));
        assert!(is_valid_url_for_provider(github, "https://github.com/acme"));
        assert!(is_valid_url_for_provider(github, "https://api.github.com/orgs/acme"));
        assert!(is_valid_url_for_provider(github, "http://git.corp.example/api/v3"));
        assert!(is_valid_url_for_provider(github, "https://git.corp.example:8443/api/v3/repos"));
    }

    #[test]
    fn github_match_is_anchored() {
        let github = Some(ProviderKind::GitHub);
        assert!(!is_valid_url_for_provider(github, "https://evil.com/github.com"));
        assert!(!is_valid_url_for_provider(github, "https://github.com.evil.com"));
        assert!(!is_valid_url_for_provider(github, "https://git.corp.example"));
        assert!(!is_valid_url_for_provider(github, "ftp://github.com"));
    }

    #[test]
    fn gitlab_and_bitbucket_accept_generic_hosts() {
        for kind in [ProviderKind::GitLab, ProviderKind::Bitbucket] {
            assert!(is_valid_url_for_provider(Some(kind), "https://git.internal.example"));
            assert!(is_valid_url_for_provider(Some(kind), "http://10.0.0.5:8080/scm"));
            assert!(!is_valid_url_for_provider(Some(kind), "https://"));
            assert!(!is_valid_url_for_provider(Some(kind), "git.internal.example"));
            assert!(is_valid_url_for_provider(Some(kind), "http://[::1]:8080/gitlab"));
            assert!(is_valid_url_for_provider(Some(kind), "https://git_lab.corp"));
            assert!(is_valid_url_for_provider(Some(kind), "https://user@gitlab.corp"));
            assert!(!is_valid_url_for_provider(Some(kind), "https:///scm"));
            assert!(!is_valid_url_for_provider(Some(kind), "https://git corp/scm"));
        }
        let gitlab = Some(ProviderKind::GitLab);
        let bitbucket = Some(ProviderKind::Bitbucket);
        assert!(is_valid_url_for_provider(gitlab, "https://www.gitlab.com/group"));
        assert!(is_valid_url_for_provider(bitbucket, "https://api.bitbucket.org/2.0"));
    }

    #[test]
    fn unsupported_kind_never_matches() {
        let azure = Some(ProviderKind::AzureDevOps);
        assert!(!is_valid_url_for_provider(azure, "https://dev.azure.com/org"));
        assert!(!is_valid_url_for_provider(None, "https://github.com"));
    }

    #[test]
    fn github_ssl_disabled_on_public_host_warns_once() {
        let config = connection(
            ProviderKind::GitHub,
            "https://github.com/acme",
            "https://api.github.com",
        )
        .with_verify_ssl(false);
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(verdict.is_valid(), "{verdict}");
        assert_eq!(verdict.warnings().len(), 1);
        assert!(verdict.warnings()[0].contains("SSL"));
    }

    #[test]
    fn github_enterprise_without_ssl_has_no_warning() {
        let config = connection(
            ProviderKind::GitHub,
            "https://git.corp.example/api/v3",
            "https://git.corp.example/api/v3",
        )
        .with_verify_ssl(false);
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(verdict.is_valid());
        assert!(verdict.warnings().is_empty());
    }

    #[test]
    fn gitlab_self_hosted_adds_info() {
        let config = connection(
            ProviderKind::GitLab,
            "https://git.example.com",
            "https://git.example.com/api/v4",
        )
        .with_self_hosted(true);
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(verdict.is_valid());
        assert!(verdict.warnings().is_empty());
        assert_eq!(verdict.info().len(), 1);
    }

    #[test]
    fn bitbucket_cloud_recommends_app_password() {
        let config = connection(
            ProviderKind::Bitbucket,
            "https://bitbucket.org/workspace",
            "https://api.bitbucket.org/2.0",
        );
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(verdict.is_valid());
        assert_eq!(verdict.info().len(), 1);
        assert!(verdict.info()[0].contains("app password"));
    }

    #[test]
    fn uppercase_scheme_agrees_with_full_validation() {
        let github = Some(ProviderKind::GitHub);
        assert!(is_valid_url_for_provider(github, "HTTPS://github.com"));
        let config = connection(
            ProviderKind::GitHub,
            "HTTPS://github.com",
            "HTTPS://api.github.com",
        );
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(verdict.is_valid(), "{verdict}");
    }

    #[test]
    fn github_rejects_foreign_base_url() {
        let config = connection(
            ProviderKind::GitHub,
            "https://evil.com/github.com",
            "https://api.github.com",
        );
        let verdict = default_validator().validate_connection(Some(&config));
        assert!(!verdict.is_valid());
        assert!(verdict.errors()[0].contains("GitHub"));
    }

    #[test]
    fn suggestions_are_never_empty() {
        let github = validation_suggestions(Some(ProviderKind::GitHub));
        assert!(github.contains("personal-access-tokens"));
        assert!(validation_suggestions(Some(ProviderKind::GitLab)).contains("read_api"));
        assert!(validation_suggestions(Some(ProviderKind::Bitbucket)).contains("app password"));
        assert!(!validation_suggestions(None).is_empty());
        assert!(!validation_suggestions(Some(ProviderKind::AzureDevOps)).is_empty());
    }

    #[test]
    fn default_rules_cover_three_providers() {
        assert_eq!(
            default_rules().kinds(),
            vec![ProviderKind::Bitbucket, ProviderKind::GitHub, ProviderKind::GitLab]
        );
    }
}
