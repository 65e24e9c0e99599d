/*!
 * Continuation-token pagination shared by the admin and query APIs
 */

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default item cap used by accessor listing
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Default page size used by accessor listing
pub const DEFAULT_PAGE_SIZE: i32 = 50;

/// Limits for a pagination loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Stop once this many items have been collected
    pub max_items: Option<usize>,

    /// Per-request page size forwarded as `MaxResults`
    pub page_size: Option<i32>,

    /// Token to resume from
    pub starting_token: Option<String>,
}

impl PaginationConfig {
    pub fn new(max_items: usize, page_size: i32) -> Self {
        Self {
            max_items: Some(max_items),
            page_size: Some(page_size),
            starting_token: None,
        }
    }

    pub fn with_starting_token(mut self, token: impl Into<String>) -> Self {
        self.starting_token = Some(token.into());
        self
    }
}

/// Request arguments for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub next_token: Option<String>,
    pub max_results: Option<i32>,
}

impl PageRequest {
    pub fn first(max_results: Option<i32>) -> Self {
        Self {
            next_token: None,
            max_results,
        }
    }
}

/// One page of a list operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    /// Page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn has_more(&self) -> bool {
        self.next_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

/// Drive `fetch` until the continuation token runs out
///
/// Starts from `config.starting_token` and stops on an empty token, when
/// `max_items` is reached (excess items are dropped) or when the service
/// hands back the token it was just given. The first error is returned.
pub async fn collect_pages<T, E, F, Fut>(config: &PaginationConfig, fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    match collect_pages_partial(config, fetch).await {
        (items, None) => Ok(items),
        (_, Some(e)) => Err(e),
    }
}

/// Same loop as [`collect_pages`], but an error ends the loop and is handed
/// back alongside the items gathered before it
pub async fn collect_pages_partial<T, E, F, Fut>(
    config: &PaginationConfig,
    mut fetch: F,
) -> (Vec<T>, Option<E>)
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut token = config.starting_token.clone();
    let mut pages = 0usize;

    loop {
        let request = PageRequest {
            next_token: token.clone(),
            max_results: config.page_size,
        };
        let page = match fetch(request).await {
            Ok(page) => page,
            Err(e) => return (items, Some(e)),
        };
        pages += 1;
        items.extend(page.items);

        if let Some(max) = config.max_items {
            if items.len() >= max {
                items.truncate(max);
                debug!(pages, items = items.len(), "Reached max_items, stopping");
                break;
            }
        }

        match page.next_token {
            Some(next) if !next.is_empty() => {
                if token.as_deref() == Some(next.as_str()) {
                    warn!(token = %next, "Service repeated pagination token, stopping");
                    break;
                }
                token = Some(next);
            }
            _ => break,
        }
    }

    debug!(pages, items = items.len(), "Pagination complete");
    (items, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn pages() -> Vec<Page<u32>> {
        vec![
            Page::new(vec![1, 2], Some("t1".to_string())),
            Page::new(vec![3, 4], Some("t2".to_string())),
            Page::new(vec![5], Some(String::new())),
        ]
    }

    async fn run(config: PaginationConfig) -> (Vec<u32>, Vec<PageRequest>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let script = pages();
        let recorder = seen.clone();
        let items = collect_pages::<_, (), _, _>(&config, move |request| {
            let index = match request.next_token.as_deref() {
                None | Some("t0") => 0,
                Some("t1") => 1,
                _ => 2,
            };
            recorder.lock().unwrap().push(request);
            let page = script[index].clone();
            async move { Ok(page) }
        })
        .await
        .unwrap();
        let seen = seen.lock().unwrap().clone();
        (items, seen)
    }

    #[tokio::test]
    async fn test_collects_until_empty_token() {
        let (items, seen) = run(PaginationConfig::default()).await;
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[1].next_token.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_max_items_truncates() {
        let (items, seen) = run(PaginationConfig::new(3, 2)).await;
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|r| r.max_results == Some(2)));
    }

    #[tokio::test]
    async fn test_starting_token() {
        let config = PaginationConfig::default().with_starting_token("t1");
        let (items, seen) = run(config).await;
        assert_eq!(items, vec![3, 4, 5]);
        assert_eq!(seen[0].next_token.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_repeated_token_stops() {
        let mut calls = 0;
        let items = collect_pages::<_, (), _, _>(&PaginationConfig::default(), |_| {
            calls += 1;
            async { Ok(Page::new(vec![7u32], Some("same".to_string()))) }
        })
        .await
        .unwrap();
        assert_eq!(items, vec![7, 7]);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_first_error_is_returned() {
        let result = collect_pages::<u32, _, _, _>(&PaginationConfig::default(), |_| async {
            Err("boom")
        })
        .await;
        assert_eq!(result, Err("boom"));
    }

    #[tokio::test]
    async fn test_partial_keeps_items_before_error() {
        let mut calls = 0;
        let (items, error) = collect_pages_partial(&PaginationConfig::default(), |_| {
            calls += 1;
            let reply = if calls == 1 {
                Ok(Page::new(vec![1u32, 2], Some("t1".to_string())))
            } else {
                Err("throttled")
            };
            async move { reply }
        })
        .await;
        assert_eq!(items, vec![1, 2]);
        assert_eq!(error, Some("throttled"));
    }

    #[test]
    fn test_page_has_more() {
        assert!(Page::new(vec![1], Some("x".to_string())).has_more());
        assert!(!Page::new(vec![1], Some(String::new())).has_more());
        assert!(!Page::<u32>::last(vec![]).has_more());
    }
}
