use scout_core::filter::{FilterDimension, RepositoryFilter};
use scout_core::model::RepositoryMetadata;

/// Keeps the repositories matching every constrained dimension of `filter`,
/// preserving order.
pub fn apply_filter(
    repositories: Vec<RepositoryMetadata>,
    filter: &RepositoryFilter,
) -> Vec<RepositoryMetadata> {
    if filter.is_empty() {
        return repositories;
    }
    let matcher = filter.matcher();
    repositories
        .into_iter()
        .filter(|repo| matcher.matches(repo))
        .collect()
}

/// Applies locally whatever `honored` did not already cover upstream.
pub fn apply_residual_filter(
    repositories: Vec<RepositoryMetadata>,
    filter: &RepositoryFilter,
    honored: &[FilterDimension],
) -> Vec<RepositoryMetadata> {
    apply_filter(repositories, &filter.without(honored))
}

pub fn apply_search(repositories: Vec<RepositoryMetadata>, query: &str) -> Vec<RepositoryMetadata> {
    repositories
        .into_iter()
        .filter(|repo| repo.matches_query(query))
        .collect()
}
