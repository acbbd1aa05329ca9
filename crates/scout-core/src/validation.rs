use crate::model::{ConnectionConfig, ProviderKind};
use crate::secret::SecretBuffer;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

pub const MAX_USERNAME_LEN: usize = 100;
pub const MIN_SECRET_LEN: usize = 1;
pub const MAX_SECRET_LEN: usize = 1000;

const GENERIC_GUIDANCE: &str = "Select a supported provider (GitHub, GitLab or Bitbucket), \
then enter the web base URL, the API URL, your username and a personal access token \
or app password.";

/// Outcome of a validation pass. Only `errors` decide validity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    errors: Vec<String>,
    warnings: Vec<String>,
    info: Vec<String>,
}

impl ValidationVerdict {
    pub fn builder() -> VerdictBuilder {
        VerdictBuilder::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            writeln!(f, "Connection is valid")?;
        } else {
            writeln!(f, "Connection is invalid")?;
        }
        for error in &self.errors {
            writeln!(f, "  error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(f, "  warning: {warning}")?;
        }
        for note in &self.info {
            writeln!(f, "  info: {note}")?;
        }
        Ok(())
    }
}

/// Accumulates findings for a single validation pass.
#[derive(Debug, Default)]
pub struct VerdictBuilder {
    verdict: ValidationVerdict,
}

impl VerdictBuilder {
    pub fn error(&mut self, message: impl Into<String>) -> &mut Self {
        self.verdict.errors.push(message.into());
        self
    }

    pub fn warning(&mut self, message: impl Into<String>) -> &mut Self {
        self.verdict.warnings.push(message.into());
        self
    }

    pub fn info(&mut self, message: impl Into<String>) -> &mut Self {
        self.verdict.info.push(message.into());
        self
    }

    pub fn advisory(&mut self, advisory: Advisory) -> &mut Self {
        match advisory {
            Advisory::Warning(message) => self.warning(message),
            Advisory::Info(message) => self.info(message),
        }
    }

    pub fn build(self) -> ValidationVerdict {
        self.verdict
    }
}

/// Provider-specific findings. There is no error variant: provider rules can
/// nudge but never block a connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    Warning(String),
    Info(String),
}

/// Per-provider validation behaviour.
pub trait ProviderRule: Send + Sync {
    fn kind(&self) -> ProviderKind;
    fn url_shape_matches(&self, url: &str) -> bool;
    fn advisories(&self, config: &ConnectionConfig) -> Vec<Advisory>;
    fn guidance(&self) -> &'static str;
}

#[derive(Default)]
pub struct RuleSet {
    rules: HashMap<ProviderKind, Box<dyn ProviderRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rule` under its own kind, replacing any previous rule.
    pub fn register(&mut self, rule: Box<dyn ProviderRule>) -> &mut Self {
        self.rules.insert(rule.kind(), rule);
        self
    }

    pub fn with(mut self, rule: Box<dyn ProviderRule>) -> Self {
        self.register(rule);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&dyn ProviderRule> {
        self.rules.get(&kind).map(|rule| rule.as_ref())
    }

    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.rules.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_prefix());
        kinds
    }
}

pub struct CredentialValidator {
    rules: RuleSet,
}

impl CredentialValidator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Runs every check and reports all findings at once. `None` is reported
    /// as a single error rather than a panic.
    pub fn validate_connection(&self, config: Option<&ConnectionConfig>) -> ValidationVerdict {
        let Some(config) = config else {
            let mut builder = ValidationVerdict::builder();
            builder.error("Connection configuration is required");
            return builder.build();
        };

        let mut builder = ValidationVerdict::builder();
        let rule = config.provider.and_then(|kind| self.rules.get(kind));

        match config.provider {
            None => {
                builder.error("Provider type is required");
            }
            Some(kind) if rule.is_none() => {
                builder.error(format!(
                    "Provider type {} is not supported",
                    kind.display_name()
                ));
            }
            Some(_) => {}
        }

        match present(config.base_url.as_deref()) {
            None => {
                builder.error("Base URL is required");
            }
            Some(url) if !has_http_scheme(url) => {
                builder.error("Base URL must start with http:// or https://");
            }
            Some(url) => {
                if let Some(rule) = rule
                    && !rule.url_shape_matches(url)
                {
                    builder.error(format!(
                        "Base URL does not match the expected format for {}",
                        rule.kind().display_name()
                    ));
                }
            }
        }

        match present(config.api_url.as_deref()) {
            None => {
                builder.error("API URL is required");
            }
            Some(url) if !has_http_scheme(url) => {
                builder.error("API URL must start with http:// or https://");
            }
            Some(_) => {}
        }

        check_username(&mut builder, config.username.as_deref());
        check_secret(&mut builder, config.secret.as_ref());

        if let Some(rule) = rule {
            for advisory in rule.advisories(config) {
                builder.advisory(advisory);
            }
        }

        let verdict = builder.build();
        debug!(
            provider = ?config.provider,
            errors = verdict.errors().len(),
            warnings = verdict.warnings().len(),
            info = verdict.info().len(),
            "validated connection"
        );
        verdict
    }

    pub fn validate_credentials(
        &self,
        username: Option<&str>,
        secret: Option<&SecretBuffer>,
    ) -> ValidationVerdict {
        validate_credentials(username, secret)
    }

    /// Quick base-URL shape check; kinds without a registered rule never match.
    pub fn is_valid_url_for_provider(&self, kind: Option<ProviderKind>, url: &str) -> bool {
        kind.and_then(|kind| self.rules.get(kind))
            .map(|rule| rule.url_shape_matches(url))
            .unwrap_or(false)
    }

    pub fn validation_suggestions(&self, kind: Option<ProviderKind>) -> &'static str {
        kind.and_then(|kind| self.rules.get(kind))
            .map(|rule| rule.guidance())
            .unwrap_or(GENERIC_GUIDANCE)
    }
}

/// Username and secret checks only, for flows that re-check credentials
/// without a full connection.
pub fn validate_credentials(
    username: Option<&str>,
    secret: Option<&SecretBuffer>,
) -> ValidationVerdict {
    let mut builder = ValidationVerdict::builder();
    check_username(&mut builder, username);
    check_secret(&mut builder, secret);
    builder.build()
}

fn check_username(builder: &mut VerdictBuilder, username: Option<&str>) {
    let Some(username) = present(username) else {
        builder.error("Username is required");
        return;
    };
    if username.chars().count() > MAX_USERNAME_LEN {
        builder.error(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        ));
    }
    if !username_regex().is_some_and(|regex| regex.is_match(username)) {
        builder.error("Username may only contain letters, digits, '.', '-' and '_'");
    }
}

fn check_secret(builder: &mut VerdictBuilder, secret: Option<&SecretBuffer>) {
    let Some(secret) = secret.filter(|secret| !secret.is_empty()) else {
        builder.error("Password or token is required");
        return;
    };
    if !(MIN_SECRET_LEN..=MAX_SECRET_LEN).contains(&secret.len()) {
        builder.error(format!(
            "Password or token must be between {MIN_SECRET_LEN} and {MAX_SECRET_LEN} characters"
        ));
    }
    if secret.contains_nul() {
        builder.error("Password or token must not contain null bytes");
    }
}

fn username_regex() -> Option<&'static Regex> {
    static USERNAME: OnceLock<Option<Regex>> = OnceLock::new();
    USERNAME
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").ok())
        .as_ref()
}

/// The raw value when it is not blank. Later checks see surrounding
/// whitespace and reject it.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Case-insensitive, matching the provider URL patterns.
pub fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
