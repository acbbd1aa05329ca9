use scout_core::model::{ConnectionConfig, ProviderKind};
use scout_core::validation::{CredentialValidator, RuleSet, ValidationVerdict};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::RepoDiscovery;
use crate::rules::default_rules;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("connection is invalid\n{0}")]
    Invalid(ValidationVerdict),
    #[error("no discovery implementation registered for {0}")]
    Unsupported(ProviderKind),
}

/// Validation rules plus the discovery implementations available to the
/// application, one per provider kind.
pub struct ProviderRegistry {
    validator: CredentialValidator,
    discovery: HashMap<ProviderKind, Arc<dyn RepoDiscovery>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            validator: CredentialValidator::new(rules),
            discovery: HashMap::new(),
        }
    }

    pub fn validator(&self) -> &CredentialValidator {
        &self.validator
    }

    /// Registers `discovery` under the kind it supports and returns the
    /// implementation it replaced, if any.
    pub fn register(
        &mut self,
        discovery: Arc<dyn RepoDiscovery>,
    ) -> Option<Arc<dyn RepoDiscovery>> {
        let kind = discovery.supported_provider();
        info!(
            provider = %kind,
            max_per_call = discovery.max_repositories_per_call(),
            "registered discovery"
        );
        self.discovery.insert(kind, discovery)
    }

    pub fn discovery(&self, kind: ProviderKind) -> Result<Arc<dyn RepoDiscovery>, RegistryError> {
        self.discovery
            .get(&kind)
            .cloned()
            .ok_or(RegistryError::Unsupported(kind))
    }

    pub fn supported_kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.discovery.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_prefix());
        kinds
    }

    /// Validates `config` and selects the implementation for its provider.
    pub fn prepare(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Arc<dyn RepoDiscovery>, RegistryError> {
        let verdict = self.validator.validate_connection(Some(config));
        if !verdict.is_valid() {
            debug!(errors = verdict.errors().len(), "connection rejected before discovery");
            return Err(RegistryError::Invalid(verdict));
        }
        let Some(kind) = config.provider else {
            return Err(RegistryError::Invalid(verdict));
        };
        self.discovery(kind)
    }
}
