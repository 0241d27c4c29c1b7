// tests/support/mocks/slug.rs
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tabletop_catalog::domain::{
    errors::{DomainError, DomainResult},
    slug::SlugLookup,
};

/// Slug collection backed by a set, recording every queried value.
pub struct SetLookup {
    field: &'static str,
    taken: Mutex<HashSet<String>>,
    queries: Mutex<Vec<String>>,
}

impl SetLookup {
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: "slug",
            taken: Mutex::new(taken.into_iter().map(Into::into).collect()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// A collection whose slug column is named `field`.
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = field;
        self
    }

    pub fn insert(&self, slug: impl Into<String>) {
        self.taken.lock().unwrap().insert(slug.into());
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlugLookup for SetLookup {
    async fn slug_exists(&self, field: &str, value: &str) -> DomainResult<bool> {
        if field != self.field {
            return Err(DomainError::Configuration(format!(
                "collection has no field '{field}'"
            )));
        }
        self.queries.lock().unwrap().push(value.to_string());
        Ok(self.taken.lock().unwrap().contains(value))
    }
}
