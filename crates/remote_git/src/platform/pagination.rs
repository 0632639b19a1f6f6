//! Page-by-page listing shared by the remote backends.
//!
//! A backend describes *what* to list as an ordered queue of [`Listing`]s and
//! *how* pages are addressed with a [`PageConfig`]. The [`Pager`] walks the
//! queue one page at a time and [`ProjectStream`] applies the caller's filter,
//! so nothing is fetched before the consumer asks for it.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;

use crate::filter::ProjectFilter;
use crate::http::{ApiClient, encode_query};

use super::errors::{ClientError, Result};
use super::types::Project;

/// Provider-specific paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    /// Query parameter carrying the page size (`per_page` or `limit`).
    pub per_page_param: &'static str,
    /// Items requested per page.
    pub per_page: u32,
    /// Safety bound on the number of pages read per listing.
    pub max_pages: u32,
}

impl PageConfig {
    /// Conservative baseline.
    pub const DEFAULT: Self = Self {
        per_page_param: "per_page",
        per_page: 50,
        max_pages: 1000,
    };

    /// Same limits with a different page-size parameter name.
    #[must_use]
    pub const fn with_param(self, per_page_param: &'static str) -> Self {
        Self {
            per_page_param,
            ..self
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One paginated listing endpoint with its fixed query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Listing {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Converts one raw listing element into a [`Project`].
pub type ProjectConverter = fn(serde_json::Value) -> Result<Project>;

/// Something that hands out projects a page at a time.
///
/// `Ok(None)` means the source is exhausted.
#[async_trait]
pub trait PageSource: Send {
    async fn next_page(&mut self) -> Result<Option<Vec<Project>>>;
}

/// Walks a queue of listings page by page.
///
/// Each listing ends at its first empty page, or once `max_pages` pages have
/// been read.
pub struct Pager<'a> {
    api: &'a ApiClient,
    config: PageConfig,
    listings: VecDeque<Listing>,
    page: u32,
    convert: ProjectConverter,
}

impl<'a> Pager<'a> {
    pub fn new(
        api: &'a ApiClient,
        config: PageConfig,
        listings: impl IntoIterator<Item = Listing>,
        convert: ProjectConverter,
    ) -> Self {
        Self {
            api,
            config,
            listings: listings.into_iter().collect(),
            page: 1,
            convert,
        }
    }

    fn page_uri(&self, listing: &Listing, page: u32) -> String {
        let mut params = listing.params.clone();
        params.push(("page".to_string(), page.to_string()));
        params.push((
            self.config.per_page_param.to_string(),
            self.config.per_page.to_string(),
        ));
        format!("{}?{}", listing.path, encode_query(&params))
    }

    fn next_listing(&mut self) {
        self.listings.pop_front();
        self.page = 1;
    }

    async fn fetch_records(&self, uri: &str) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("GET {}", uri);
        let response = self.api.get(uri, &[]).await?;
        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                url: self.api.resolve(uri),
                message: response.text(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

#[async_trait]
impl PageSource for Pager<'_> {
    async fn next_page(&mut self) -> Result<Option<Vec<Project>>> {
        loop {
            let (uri, path) = match self.listings.front() {
                Some(listing) => (self.page_uri(listing, self.page), listing.path.clone()),
                None => return Ok(None),
            };

            if self.page > self.config.max_pages {
                tracing::warn!(
                    "Stopping {} after {} pages without reaching an empty page",
                    path,
                    self.config.max_pages
                );
                self.next_listing();
                continue;
            }

            let records = self.fetch_records(&uri).await?;
            if records.is_empty() {
                self.next_listing();
                continue;
            }

            self.page += 1;
            let projects = records
                .into_iter()
                .map(self.convert)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Some(projects));
        }
    }
}

/// Lazy, single-pass sequence of accepted projects.
///
/// Pages are requested only when the buffered ones are used up; dropping the
/// stream stops the enumeration.
pub struct ProjectStream<'a> {
    source: Box<dyn PageSource + 'a>,
    filter: Arc<dyn ProjectFilter>,
    buffer: VecDeque<Project>,
    finished: bool,
}

impl<'a> ProjectStream<'a> {
    pub fn new(source: impl PageSource + 'a, filter: Arc<dyn ProjectFilter>) -> Self {
        Self {
            source: Box::new(source),
            filter,
            buffer: VecDeque::new(),
            finished: false,
        }
    }

    /// Next accepted project, `None` once the sequence is exhausted.
    ///
    /// An error ends the sequence.
    pub async fn next(&mut self) -> Option<Result<Project>> {
        loop {
            if let Some(project) = self.buffer.pop_front() {
                if self.filter.is_accepted(&project).await {
                    return Some(Ok(project));
                }
                continue;
            }

            if self.finished {
                return None;
            }

            match self.source.next_page().await {
                Ok(Some(page)) => self.buffer.extend(page),
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }

    /// Drain the sequence into a vector.
    pub async fn try_collect(mut self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        while let Some(project) = self.next().await {
            projects.push(project?);
        }
        Ok(projects)
    }

    /// Collect at most `limit` projects, leaving later pages unfetched.
    pub async fn take(mut self, limit: usize) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        while projects.len() < limit {
            match self.next().await {
                Some(project) => projects.push(project?),
                None => break,
            }
        }
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterCollection;
    use crate::http::MockTransport;
    use crate::test_support::{StaticFilter, project};

    const BASE: &str = "https://forge.test";

    fn convert(raw: serde_json::Value) -> Result<Project> {
        let name = raw["name"]
            .as_str()
            .ok_or_else(|| ClientError::invalid_project("missing name"))?;
        Ok(project(name))
    }

    fn page(names: &[&str]) -> serde_json::Value {
        serde_json::Value::Array(
            names
                .iter()
                .map(|n| serde_json::json!({ "name": n }))
                .collect(),
        )
    }

    fn api(transport: &MockTransport) -> ApiClient {
        ApiClient::new(BASE, Vec::new(), Arc::new(transport.clone()))
    }

    fn accept_all() -> Arc<dyn ProjectFilter> {
        Arc::new(FilterCollection::new())
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    const SMALL: PageConfig = PageConfig {
        per_page_param: "per_page",
        per_page: 2,
        max_pages: 1000,
    };

    #[tokio::test]
    async fn stops_at_first_empty_page() {
        let transport = MockTransport::new();
        transport.push_json(format!("{BASE}/repos?page=1&per_page=2"), page(&["a", "b"]));
        transport.push_json(format!("{BASE}/repos?page=2&per_page=2"), page(&["c"]));
        transport.push_json(format!("{BASE}/repos?page=3&per_page=2"), page(&[]));

        let api = api(&transport);
        let pager = Pager::new(&api, SMALL, [Listing::new("/repos")], convert);
        let projects = ProjectStream::new(pager, accept_all())
            .try_collect()
            .await
            .expect("listing should succeed");

        assert_eq!(names(&projects), vec!["a", "b", "c"]);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn never_exceeds_page_ceiling() {
        let transport = MockTransport::new();
        for page_number in 1..=3 {
            transport.push_json(
                format!("{BASE}/repos?page={page_number}&limit=1"),
                page(&[&format!("p{page_number}")]),
            );
        }
        let config = PageConfig {
            per_page_param: "limit",
            per_page: 1,
            max_pages: 2,
        };

        let api = api(&transport);
        let pager = Pager::new(&api, config, [Listing::new("/repos")], convert);
        let projects = ProjectStream::new(pager, accept_all())
            .try_collect()
            .await
            .expect("listing should succeed");

        assert_eq!(names(&projects), vec!["p1", "p2"]);
        assert_eq!(
            transport.requested_urls(),
            vec![
                format!("{BASE}/repos?page=1&limit=1"),
                format!("{BASE}/repos?page=2&limit=1"),
            ]
        );
    }

    #[tokio::test]
    async fn listings_are_walked_in_order_with_their_params() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{BASE}/users/u/repos?type=owner&page=1&per_page=2"),
            page(&["u/1", "u/2"]),
        );
        transport.push_json(
            format!("{BASE}/users/u/repos?type=owner&page=2&per_page=2"),
            page(&[]),
        );
        transport.push_json(format!("{BASE}/orgs/o/repos?page=1&per_page=2"), page(&["o/1"]));
        transport.push_json(format!("{BASE}/orgs/o/repos?page=2&per_page=2"), page(&[]));

        let api = api(&transport);
        let listings = [
            Listing::new("/users/u/repos").with_param("type", "owner"),
            Listing::new("/orgs/o/repos"),
        ];
        let pager = Pager::new(&api, SMALL, listings, convert);
        let projects = ProjectStream::new(pager, accept_all())
            .try_collect()
            .await
            .expect("listing should succeed");

        assert_eq!(names(&projects), vec!["u/1", "u/2", "o/1"]);
    }

    #[tokio::test]
    async fn filter_is_applied_per_item() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{BASE}/repos?page=1&per_page=2"),
            page(&["keep/a", "drop/b"]),
        );
        transport.push_json(format!("{BASE}/repos?page=2&per_page=2"), page(&["keep/c"]));
        transport.push_json(format!("{BASE}/repos?page=3&per_page=2"), page(&[]));

        let api = api(&transport);
        let pager = Pager::new(&api, SMALL, [Listing::new("/repos")], convert);
        let filter = StaticFilter::by_prefix("keep/");
        let projects = ProjectStream::new(pager, Arc::new(filter.clone()))
            .try_collect()
            .await
            .expect("listing should succeed");

        assert_eq!(names(&projects), vec!["keep/a", "keep/c"]);
        assert_eq!(filter.calls(), 3);
    }

    #[tokio::test]
    async fn stopping_early_leaves_later_pages_unfetched() {
        let transport = MockTransport::new();
        transport.push_json(format!("{BASE}/repos?page=1&per_page=2"), page(&["a", "b"]));
        transport.push_json(format!("{BASE}/repos?page=2&per_page=2"), page(&["c", "d"]));

        let api = api(&transport);
        let pager = Pager::new(&api, SMALL, [Listing::new("/repos")], convert);
        let projects = ProjectStream::new(pager, accept_all())
            .take(2)
            .await
            .expect("listing should succeed");

        assert_eq!(names(&projects), vec!["a", "b"]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn api_error_ends_the_stream() {
        let transport = MockTransport::new();
        transport.push_text(format!("{BASE}/repos?page=1&per_page=2"), 500, "boom");

        let api = api(&transport);
        let pager = Pager::new(&api, SMALL, [Listing::new("/repos")], convert);
        let mut stream = ProjectStream::new(pager, accept_all());

        match stream.next().await {
            Some(Err(ClientError::Api { status, message, .. })) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn empty_listing_queue_yields_nothing() {
        let transport = MockTransport::new();
        let api = api(&transport);
        let pager = Pager::new(&api, SMALL, Vec::<Listing>::new(), convert);
        let projects = ProjectStream::new(pager, accept_all())
            .try_collect()
            .await
            .expect("listing should succeed");

        assert!(projects.is_empty());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn page_config_defaults() {
        assert_eq!(PageConfig::default(), PageConfig::DEFAULT);
        assert_eq!(PageConfig::DEFAULT.per_page, 50);
        assert_eq!(PageConfig::DEFAULT.max_pages, 1000);
        assert_eq!(PageConfig::DEFAULT.with_param("limit").per_page_param, "limit");
    }
}
