use crate::model::{RepositoryMetadata, Visibility};
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The independent predicates a [`RepositoryFilter`] can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    NamePattern,
    Language,
    Visibility,
    Archived,
    Fork,
    ActivityWindow,
    MinStars,
}

impl FilterDimension {
    pub const ALL: &'static [FilterDimension] = &[
        FilterDimension::NamePattern,
        FilterDimension::Language,
        FilterDimension::Visibility,
        FilterDimension::Archived,
        FilterDimension::Fork,
        FilterDimension::ActivityWindow,
        FilterDimension::MinStars,
    ];
}

/// Conjunctive repository predicates. `None` on a field places no constraint
/// on that dimension. A constrained dimension never matches a repository that
/// does not report the attribute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryFilter {
    /// Case-insensitive, anchored; `*` matches any run of characters.
    #[serde(default)]
    pub name_pattern: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub fork: Option<bool>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_after: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub updated_before: Option<OffsetDateTime>,
    #[serde(default)]
    pub min_stars: Option<u64>,
}

impl RepositoryFilter {
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Dimensions this filter constrains, in declaration order.
    pub fn dimensions(&self) -> Vec<FilterDimension> {
        let mut dims = Vec::new();
        if self.name_pattern.is_some() {
            dims.push(FilterDimension::NamePattern);
        }
        if self.language.is_some() {
            dims.push(FilterDimension::Language);
        }
        if self.visibility.is_some() {
            dims.push(FilterDimension::Visibility);
        }
        if self.archived.is_some() {
            dims.push(FilterDimension::Archived);
        }
        if self.fork.is_some() {
            dims.push(FilterDimension::Fork);
        }
        if self.updated_after.is_some() || self.updated_before.is_some() {
            dims.push(FilterDimension::ActivityWindow);
        }
        if self.min_stars.is_some() {
            dims.push(FilterDimension::MinStars);
        }
        dims
    }

    /// Copy of this filter with the given dimensions cleared. Implementations
    /// that push some dimensions upstream use this to apply the rest locally.
    pub fn without(&self, dims: &[FilterDimension]) -> Self {
        let mut residual = self.clone();
        for dim in dims {
            match dim {
                FilterDimension::NamePattern => residual.name_pattern = None,
                FilterDimension::Language => residual.language = None,
                FilterDimension::Visibility => residual.visibility = None,
                FilterDimension::Archived => residual.archived = None,
                FilterDimension::Fork => residual.fork = None,
                FilterDimension::ActivityWindow => {
                    residual.updated_after = None;
                    residual.updated_before = None;
                }
                FilterDimension::MinStars => residual.min_stars = None,
            }
        }
        residual
    }

    pub fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            filter: self,
            name: self.name_pattern.as_deref().map(compile_name_pattern),
        }
    }

    pub fn matches(&self, repo: &RepositoryMetadata) -> bool {
        self.matcher().matches(repo)
    }
}

/// A filter with its name pattern compiled once, for matching many repositories.
pub struct FilterMatcher<'a> {
    filter: &'a RepositoryFilter,
    name: Option<Option<Regex>>,
}

impl FilterMatcher<'_> {
    pub fn matches(&self, repo: &RepositoryMetadata) -> bool {
        let filter = self.filter;
        if let Some(pattern) = &self.name {
            match pattern {
                Some(regex) if regex.is_match(&repo.name) => {}
                _ => return false,
            }
        }
        if let Some(language) = filter.language.as_deref() {
            let matched = repo
                .language
                .as_deref()
                .map(|value| value.eq_ignore_ascii_case(language.trim()))
                .unwrap_or(false);
            if !matched {
                return false;
            }
        }
        if let Some(visibility) = filter.visibility
            && repo.visibility != visibility
        {
            return false;
        }
        if let Some(archived) = filter.archived
            && repo.archived != archived
        {
            return false;
        }
        if let Some(fork) = filter.fork
            && repo.fork != fork
        {
            return false;
        }
        if filter.updated_after.is_some() || filter.updated_before.is_some() {
            let Some(updated) = repo.updated_at else {
                return false;
            };
            if filter.updated_after.is_some_and(|after| updated < after) {
                return false;
            }
            if filter.updated_before.is_some_and(|before| updated > before) {
                return false;
            }
        }
        if let Some(min) = filter.min_stars {
            let Some(stars) = repo.stars else {
                return false;
            };
            if stars < min {
                return false;
            }
        }
        true
    }
}

fn compile_name_pattern(pattern: &str) -> Option<Regex> {
    let body = pattern
        .trim()
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("(?i)^{body}$")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProviderKind;
    use time::Duration;

    fn repo(name: &str, language: Option<&str>) -> RepositoryMetadata {
        RepositoryMetadata {
            id: name.to_string(),
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            owner: "acme".to_string(),
            description: None,
            clone_url: format!("https://gitlab.com/acme/{name}.git"),
            ssh_url: None,
            web_url: None,
            default_branch: "main".to_string(),
            visibility: Visibility::Private,
            language: language.map(str::to_string),
            archived: false,
            fork: false,
            size_kb: Some(120),
            stars: Some(3),
            updated_at: Some(OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)),
            provider: ProviderKind::GitLab,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RepositoryFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&repo("anything", None)));
    }

    #[test]
    fn name_pattern_is_anchored_and_case_insensitive() {
        let filter = RepositoryFilter {
            name_pattern: Some("svc-*".to_string()),
            ..RepositoryFilter::default()
        };
        assert!(filter.matches(&repo("SVC-billing", None)));
        assert!(!filter.matches(&repo("legacy-svc-billing", None)));

        let exact = RepositoryFilter {
            name_pattern: Some("a.b".to_string()),
            ..RepositoryFilter::default()
        };
        assert!(exact.matches(&repo("a.b", None)));
        assert!(!exact.matches(&repo("axb", None)));
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let filter = RepositoryFilter {
            language: Some("rust".to_string()),
            visibility: Some(Visibility::Private),
            min_stars: Some(5),
            ..RepositoryFilter::default()
        };
        let mut item = repo("core", Some("Rust"));
        assert!(!filter.matches(&item));
        item.stars = Some(10);
        assert!(filter.matches(&item));
        item.visibility = Visibility::Public;
        assert!(!filter.matches(&item));
    }

    #[test]
    fn missing_attribute_fails_constrained_dimension() {
        let filter = RepositoryFilter {
            language: Some("Go".to_string()),
            ..RepositoryFilter::default()
        };
        assert!(!filter.matches(&repo("core", None)));

        let window = RepositoryFilter {
            updated_after: Some(OffsetDateTime::UNIX_EPOCH),
            ..RepositoryFilter::default()
        };
        let mut item = repo("core", None);
        assert!(window.matches(&item));
        item.updated_at = None;
        assert!(!window.matches(&item));

        let any_stars = RepositoryFilter {
            min_stars: Some(0),
            ..RepositoryFilter::default()
        };
        let mut item = repo("core", None);
        assert!(any_stars.matches(&item));
        item.stars = None;
        assert!(!any_stars.matches(&item));
    }

    #[test]
    fn activity_window_bounds_are_inclusive() {
        let item = repo("core", None);
        let updated = item.updated_at.unwrap();
        let filter = RepositoryFilter {
            updated_after: Some(updated),
            updated_before: Some(updated),
            ..RepositoryFilter::default()
        };
        assert!(filter.matches(&item));
        let later = RepositoryFilter {
            updated_after: Some(updated + Duration::seconds(1)),
            ..RepositoryFilter::default()
        };
        assert!(!later.matches(&item));
    }

    #[test]
    fn without_clears_honored_dimensions() {
        let filter = RepositoryFilter {
            name_pattern: Some("x*".to_string()),
            archived: Some(false),
            updated_before: Some(OffsetDateTime::UNIX_EPOCH),
            ..RepositoryFilter::default()
        };
        assert_eq!(
            filter.dimensions(),
            vec![
                FilterDimension::NamePattern,
                FilterDimension::Archived,
                FilterDimension::ActivityWindow
            ]
        );
        let residual =
            filter.without(&[FilterDimension::NamePattern, FilterDimension::ActivityWindow]);
        assert_eq!(residual.dimensions(), vec![FilterDimension::Archived]);
    }
}
