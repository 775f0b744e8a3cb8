//! Cursor pagination for Interacta list endpoints.
//!
//! List endpoints take a [`Pagination`] block in the request body and answer
//! with a [`Page`]. The server hands out an opaque `nextPageToken` which must
//! be echoed back verbatim; a missing token marks the last page.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::error::Result;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// A page of results from the Interacta API.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The items on this page.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Token for the next page, `None` on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Total number of items across all pages (if requested and known).
    #[serde(default)]
    pub total_items_count: Option<u64>,
}

impl<T> Page<T> {
    /// Create a new page.
    #[must_use]
    pub fn new(items: Vec<T>, next_page_token: Option<String>, total_items_count: Option<u64>) -> Self {
        Self {
            items,
            next_page_token,
            total_items_count,
        }
    }

    /// Whether the server announced another page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_token().is_some()
    }

    /// The continuation token, with an empty token read as "no more pages".
    #[must_use]
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
            total_items_count: self.total_items_count,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Paging fields shared by every list request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Opaque server token, `None` for the first page.
    #[serde(default)]
    pub page_token: Option<String>,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Ask the server to fill `totalItemsCount`.
    #[serde(default = "default_true")]
    pub calculate_total_items_count: bool,
    /// Reverse the default ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_desc: Option<bool>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            calculate_total_items_count: true,
            order_desc: None,
        }
    }
}

impl Pagination {
    /// Pagination with a custom page size.
    #[must_use]
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

/// A list request that carries a [`Pagination`] block.
pub trait PageRequest {
    /// The paging fields.
    fn pagination(&self) -> &Pagination;

    /// Mutable access to the paging fields.
    fn pagination_mut(&mut self) -> &mut Pagination;

    /// Overwrite the page token.
    fn set_page_token(&mut self, token: Option<String>) {
        self.pagination_mut().page_token = token;
    }
}

impl PageRequest for Pagination {
    fn pagination(&self) -> &Pagination {
        self
    }

    fn pagination_mut(&mut self) -> &mut Pagination {
        self
    }
}

/// Fetch every page of a list operation and concatenate the items.
///
/// Before each call the page token of `query` is overwritten with the last
/// token seen (none for the first call); the other fields are left as the
/// caller set them. Items keep the order in which the server returned them.
/// The loop stops on the first page without a continuation token and has no
/// iteration cap.
///
/// # Errors
///
/// The first failing call aborts the collection and its error is returned;
/// items gathered before the failure are dropped.
pub async fn collect_all<Q, T, F, Fut>(query: &mut Q, mut fetch: F) -> Result<Vec<T>>
where
    Q: PageRequest + Clone,
    F: FnMut(Q) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        query.set_page_token(page_token.take());
        let page = fetch(query.clone()).await?;
        pages += 1;

        page_token = page.next_token().map(str::to_string);
        all_items.extend(page.items);

        if page_token.is_none() {
            break;
        }
    }

    tracing::debug!(pages, items = all_items.len(), "collected paginated results");
    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InteractaError;
    use crate::response::raw_for_test;

    #[test]
    fn test_page_has_more() {
        let page: Page<i32> = Page::new(vec![1, 2], Some("tok".to_string()), Some(3));
        assert!(page.has_more());

        let page: Page<i32> = Page::new(vec![3], None, Some(3));
        assert!(!page.has_more());

        let page: Page<i32> = Page::new(vec![3], Some(String::new()), None);
        assert!(!page.has_more());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], Some("next".to_string()), Some(10));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.next_page_token.as_deref(), Some("next"));
        assert_eq!(mapped.total_items_count, Some(10));
    }

    #[test]
    fn test_page_deserializes_null_items_as_empty() {
        let page: Page<u64> =
            serde_json::from_str(r#"{"items": null, "nextPageToken": null}"#).unwrap();
        assert!(page.is_empty());
        assert!(!page.has_more());

        let page: Page<u64> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_items_count, None);
    }

    #[test]
    fn test_pagination_wire_names_and_defaults() {
        let json = serde_json::to_value(Pagination::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageToken": null,
                "pageSize": 15,
                "calculateTotalItemsCount": true
            })
        );

        let parsed: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Pagination::default());

        let back: Pagination = serde_json::from_value(json).unwrap();
        assert_eq!(back.page_size, 15);
        assert!(back.calculate_total_items_count);
    }

    #[tokio::test]
    async fn test_collect_all_follows_tokens_in_order() {
        let mut responses = vec![
            Page::new(vec![1, 2], Some("tok1".to_string()), None),
            Page::new(vec![3], None, None),
        ]
        .into_iter();
        let mut seen_tokens = Vec::new();
        let mut query = Pagination::default();

        let items = collect_all(&mut query, |q: Pagination| {
            seen_tokens.push(q.page_token.clone());
            let next = responses.next();
            async move { Ok(next.expect("called too often")) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(seen_tokens, vec![None, Some("tok1".to_string())]);
    }

    #[tokio::test]
    async fn test_collect_all_keeps_filter_fields() {
        let mut query = Pagination::with_page_size(100);
        query.order_desc = Some(true);
        let mut calls = 0;

        collect_all(&mut query, |q: Pagination| {
            calls += 1;
            assert_eq!(q.page_size, 100);
            assert_eq!(q.order_desc, Some(true));
            let token = (calls < 3).then(|| format!("t{calls}"));
            async move { Ok(Page::<u8>::new(vec![0], token, None)) }
        })
        .await
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(query.page_token.as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn test_collect_all_propagates_first_error() {
        let mut query = Pagination::default();
        let result = collect_all(&mut query, |_q: Pagination| async {
            Err::<Page<u32>, _>(InteractaError::Response(Box::new(raw_for_test(500, "boom"))))
        })
        .await;

        assert!(matches!(result, Err(InteractaError::Response(_))));
    }

    #[tokio::test]
    async fn test_collect_all_discards_partial_results_on_error() {
        let mut query = Pagination::default();
        let mut calls = 0;
        let result = collect_all(&mut query, |_q: Pagination| {
            calls += 1;
            let first = calls == 1;
            async move {
                if first {
                    Ok(Page::new(vec![1, 2], Some("more".to_string()), None))
                } else {
                    Err(InteractaError::Response(Box::new(raw_for_test(503, ""))))
                }
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls, 2);
    }
}
