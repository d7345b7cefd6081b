use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::ClientError;
use crate::config::ClientConfig;
use crate::domain::EpisodeId;
use crate::models::{Episode, PageResult};
use crate::services::EpisodeQuery;

/// Remote side of the list client.
#[async_trait]
pub trait EpisodeApi: Send + Sync {
    async fn fetch_episodes(&self, query: &EpisodeQuery) -> Result<PageResult, ClientError>;

    async fn set_watched(&self, id: &EpisodeId, watched: bool) -> Result<Episode, ClientError>;
}

#[derive(Debug, Serialize)]
struct SetWatchedBody {
    watched: bool,
}

#[derive(Clone)]
pub struct HttpEpisodeApi {
    client: Client,
    base_url: Url,
}

impl HttpEpisodeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("episodic/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// `watched` travels as the literal `all`/`true`/`false`; `search` is
    /// only sent when non-empty.
    pub fn episodes_url(&self, query: &EpisodeQuery) -> Result<Url, ClientError> {
        let mut url = self.base_url.join("episodes")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &query.page.to_string())
                .append_pair("pageSize", &query.page_size.to_string())
                .append_pair("watched", query.watched.as_str())
                .append_pair("sortBy", query.sort_by.as_str())
                .append_pair("order", query.order.as_str());

            let search = query.search.trim();
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
        }
        Ok(url)
    }

    pub fn watched_url(&self, id: &EpisodeId) -> Result<Url, ClientError> {
        let path = format!("episodes/{}/watched", urlencoding::encode(id.as_str()));
        Ok(self.base_url.join(&path)?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Status { status, body })
    }
}

#[async_trait]
impl EpisodeApi for HttpEpisodeApi {
    async fn fetch_episodes(&self, query: &EpisodeQuery) -> Result<PageResult, ClientError> {
        let url = self.episodes_url(query)?;
        debug!(%url, "Fetching episodes");

        let response = self.client.get(url).send().await?;
        let page = Self::check(response).await?.json().await?;
        Ok(page)
    }

    async fn set_watched(&self, id: &EpisodeId, watched: bool) -> Result<Episode, ClientError> {
        let url = self.watched_url(id)?;
        debug!(%url, watched, "Updating watched state");

        let response = self
            .client
            .patch(url)
            .json(&SetWatchedBody { watched })
            .send()
            .await?;
        let episode = Self::check(response).await?.json().await?;
        Ok(episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SortField, SortOrder, WatchedFilter};

    fn api(base: &str) -> HttpEpisodeApi {
        HttpEpisodeApi::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn episodes_url_carries_wire_values() {
        let query = EpisodeQuery {
            sort_by: SortField::SeriesTitle,
            order: SortOrder::Descending,
            watched: WatchedFilter::Unwatched,
            page: 2,
            page_size: 8,
            search: "  night shift ".to_string(),
        };

        let url = api("http://localhost:4000").episodes_url(&query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/episodes?page=2&pageSize=8&watched=false&sortBy=seriesTitle&order=desc&search=night+shift"
        );
    }

    #[test]
    fn empty_search_is_omitted() {
        let url = api("http://localhost:4000")
            .episodes_url(&EpisodeQuery::default())
            .unwrap();
        assert!(!url.as_str().contains("search"));
        assert!(url.as_str().contains("watched=all"));
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = api("http://example.test/api")
            .watched_url(&EpisodeId::new("a/b c"))
            .unwrap();
        assert_eq!(url.as_str(), "http://example.test/api/episodes/a%2Fb%20c/watched");
    }

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(matches!(
            HttpEpisodeApi::new("::nope::", Duration::from_secs(1)),
            Err(ClientError::Url(_))
        ));
    }
}
