//! HTML retrieval client.
//!
//! Blocking-style sequential fetches with a fixed User-Agent, a URL-keyed
//! response cache with TTL, and an inter-request delay so target sites do
//! not rate-limit the agent. This is the only caching mechanism in the
//! system; retry/backoff is deliberately not implemented here.

use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.113 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// HTTP page fetcher shared by the search provider and performer
/// database client.
pub struct HtmlFetcher {
    client: reqwest::Client,
    delay: Duration,
    cache_ttl: Duration,
    cache: Mutex<HashMap<String, (Instant, String)>>,
    last_request: Mutex<Option<Instant>>,
}

impl HtmlFetcher {
    pub fn new(delay_secs: u64, cache_ttl_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            delay: Duration::from_secs(delay_secs),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cache: Mutex::new(HashMap::new()),
            last_request: Mutex::new(None),
        })
    }

    /// Fetch a page body, serving from cache when fresh.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(body) = self.cached(url) {
            tracing::debug!("Cache hit: {}", url);
            return Ok(body);
        }

        if let Some(wait) = self.time_until_allowed() {
            tracing::debug!("Delaying {:?} before fetching {}", wait, url);
            tokio::time::sleep(wait).await;
        }

        let result = async {
            let response = self.client.get(url).send().await?;
            let response = response.error_for_status()?;
            response.text().await
        }
        .await;

        *self.last_request.lock().unwrap() = Some(Instant::now());

        match result {
            Ok(body) => {
                self.cache
                    .lock()
                    .unwrap()
                    .insert(url.to_string(), (Instant::now(), body.clone()));
                Ok(body)
            }
            Err(e) => Err(crate::Error::FetchFailure {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn cached(&self, url: &str) -> Option<String> {
        let cache = self.cache.lock().unwrap();
        cache.get(url).and_then(|(stored, body)| {
            if stored.elapsed() < self.cache_ttl {
                Some(body.clone())
            } else {
                None
            }
        })
    }

    fn time_until_allowed(&self) -> Option<Duration> {
        let last = self.last_request.lock().unwrap();
        last.and_then(|at| self.delay.checked_sub(at.elapsed()))
    }
}
