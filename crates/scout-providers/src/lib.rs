pub mod paging;
pub mod query;
pub mod registry;
pub mod rules;
pub mod status;

pub use registry::{ProviderRegistry, RegistryError};

use scout_core::filter::{FilterDimension, RepositoryFilter};
use scout_core::model::{ConnectionConfig, DiscoveryPage, ProviderKind, RepositoryMetadata};
use scout_core::provider::{ConnectionFuture, DiscoveryFuture, MissingOrganizationPolicy};

/// Repository discovery against one hosting provider.
///
/// Every listing call is independent and returns a `Send` future; dropping the
/// future abandons the call. Implementations wrap a provider HTTP client and
/// must keep any pooling or rate-limit state internally synchronised.
pub trait RepoDiscovery: Send + Sync {
    fn supported_provider(&self) -> ProviderKind;

    /// Upper bound for `per_page` in [`RepoDiscovery::discover_repositories_page`].
    fn max_repositories_per_call(&self) -> u32;

    /// Whether every [`FilterDimension`] is honoured by
    /// [`RepoDiscovery::discover_repositories_with_filter`].
    fn supports_advanced_filtering(&self) -> bool;

    /// Dimensions actually applied when filtering. Implementations that return
    /// false from `supports_advanced_filtering` must override this.
    fn honored_filter_dimensions(&self) -> &'static [FilterDimension] {
        if self.supports_advanced_filtering() {
            FilterDimension::ALL
        } else {
            &[]
        }
    }

    fn missing_organization_policy(&self) -> MissingOrganizationPolicy;

    /// Provider kind matches and the connection passes structural validation.
    /// Does not touch the network; use `test_connection` for reachability.
    fn supports_connection(&self, config: &ConnectionConfig) -> bool {
        config.provider == Some(self.supported_provider())
            && rules::default_validator()
                .validate_connection(Some(config))
                .is_valid()
    }

    /// Resolves true only when the provider confirmed both reachability and
    /// authentication.
    fn test_connection<'a>(&'a self, config: &'a ConnectionConfig) -> ConnectionFuture<'a>;

    /// Every repository visible to the authenticated principal, aggregated
    /// across upstream pages, in a stable order.
    fn discover_all_repositories<'a>(
        &'a self,
        config: &'a ConnectionConfig,
    ) -> DiscoveryFuture<'a, Vec<RepositoryMetadata>>;

    /// Repositories of one organization, group or workspace. Unknown
    /// organizations follow [`RepoDiscovery::missing_organization_policy`].
    fn discover_organization_repositories<'a>(
        &'a self,
        config: &'a ConnectionConfig,
        organization: &'a str,
    ) -> DiscoveryFuture<'a, Vec<RepositoryMetadata>>;

    /// Free-text search; never stricter than case-insensitive substring on name.
    fn search_repositories<'a>(
        &'a self,
        config: &'a ConnectionConfig,
        query: &'a str,
    ) -> DiscoveryFuture<'a, Vec<RepositoryMetadata>>;

    fn discover_repositories_with_filter<'a>(
        &'a self,
        config: &'a ConnectionConfig,
        filter: &'a RepositoryFilter,
    ) -> DiscoveryFuture<'a, Vec<RepositoryMetadata>>;

    /// `page` is 1-based. `per_page` above the maximum is clamped, and a page
    /// past the end resolves to an empty page with `has_more == false`.
    fn discover_repositories_page<'a>(
        &'a self,
        config: &'a ConnectionConfig,
        page: u32,
        per_page: u32,
    ) -> DiscoveryFuture<'a, DiscoveryPage>;
}
