use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        let has_more = next_cursor.is_some();
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// Builds a page from a query that fetched one row more than `limit`.
    /// `next_cursor` is only called when that extra row exists.
    pub fn from_overfetch(
        mut items: Vec<T>,
        limit: usize,
        next_cursor: impl FnOnce() -> String,
    ) -> Self {
        if items.len() > limit {
            items.truncate(limit);
            Self::new(items, Some(next_cursor()))
        } else {
            Self::new(items, None)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CursorPage;

    #[test]
    fn overfetched_row_signals_another_page() {
        let page = CursorPage::from_overfetch(vec![1, 2, 3], 2, || "next".to_string());
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("next"));
    }

    #[test]
    fn short_result_is_the_last_page() {
        let page = CursorPage::from_overfetch(vec![1, 2], 2, || unreachable!());
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }
}
