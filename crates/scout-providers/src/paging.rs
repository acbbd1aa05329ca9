use reqwest::Url;
use reqwest::header::HeaderMap;
use scout_core::error::DiscoveryError;
use scout_core::model::{DiscoveryPage, ProviderKind, RepositoryMetadata};
use serde::Deserialize;
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, warn};

/// One upstream page as fetched by a provider client.
#[derive(Debug, Default)]
pub struct FetchedPage {
    pub repositories: Vec<RepositoryMetadata>,
    pub next_page: Option<u32>,
}

/// Bitbucket-style cursor page: `values` plus an absolute `next` link.
#[derive(Debug, Deserialize)]
pub struct CursorPage<T> {
    pub values: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pagelen: Option<u32>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl<T> CursorPage<T> {
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(page_from_url)
    }
}

/// Clamps a requested page size into `1..=max`. Never fails.
pub fn clamp_per_page(requested: u32, max: u32) -> u32 {
    requested.clamp(1, max.max(1))
}

/// Slices an ordered listing into one page. Page numbers are 1-based; page 0
/// is read as page 1. A page past the end is empty with `has_more == false`.
pub fn paginate(
    repositories: Vec<RepositoryMetadata>,
    page: u32,
    per_page: u32,
    max: u32,
) -> DiscoveryPage {
    let page = page.max(1);
    let per_page = clamp_per_page(per_page, max);
    let total = repositories.len();
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    if start >= total {
        return DiscoveryPage {
            total_count: Some(total as u64),
            ..DiscoveryPage::empty(page, per_page)
        };
    }
    let end = start.saturating_add(per_page as usize).min(total);
    let repositories = repositories
        .into_iter()
        .skip(start)
        .take(end - start)
        .collect();
    DiscoveryPage {
        repositories,
        page,
        per_page,
        has_more: end < total,
        total_count: Some(total as u64),
    }
}

/// Walks upstream pages starting at 1 until `fetch` reports no next page.
/// Repositories keep first-seen order; an id seen on an earlier page is not
/// repeated if the upstream listing shifts between requests.
pub async fn collect_pages<F, Fut>(
    provider: ProviderKind,
    mut fetch: F,
) -> Result<Vec<RepositoryMetadata>, DiscoveryError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<FetchedPage, DiscoveryError>>,
{
    let mut page = 1;
    let mut seen = HashSet::new();
    let mut repos = Vec::new();
    loop {
        let fetched = fetch(page).await?;
        debug!(%provider, page, count = fetched.repositories.len(), "fetched repository page");
        if fetched.repositories.is_empty() {
            break;
        }
        for repo in fetched.repositories {
            if seen.insert(repo.id.clone()) {
                repos.push(repo);
            }
        }
        match fetched.next_page {
            Some(next) if next > page => page = next,
            Some(next) => {
                warn!(%provider, page, next, "upstream pagination did not advance");
                break;
            }
            None => break,
        }
    }
    Ok(repos)
}

/// GitHub-style `Link: <...&page=N>; rel="next"` header.
pub fn next_page_from_link_header(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get("link")?.to_str().ok()?;
    link.split(',')
        .map(str::trim)
        .filter(|part| part.contains("rel=\"next\""))
        .find_map(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            page_from_url(part.get(start..end)?)
        })
}

/// GitLab-style numeric headers such as `x-next-page`.
pub fn next_page_from_header(headers: &HeaderMap, name: &str) -> Option<u32> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok())
}

pub fn total_from_header(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

/// Reads the `page` query parameter of an absolute URL.
pub fn page_from_url(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
}
