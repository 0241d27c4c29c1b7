// tests/support/helpers.rs
use super::mocks::{
    DummyPasswordHasher, DummyTokenManager, FixedClock, InMemoryCatalogRepo, InMemoryUserRepo,
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use tabletop_catalog::{
    application::services::{ApplicationServices, CatalogRepositories},
    domain::{
        catalog::{
            AuthorFields, CatalogId, CatalogKind, CatalogReferenceChecker, EditionFields,
            GameFields, GameLicenseFields, GameSystemFields, ProductFields, PublisherFields,
        },
        errors::DomainResult,
        user::Timezone,
    },
    infrastructure::util::DefaultSlugGenerator,
    presentation::http::{routes::build_router, state::HttpState},
};
use tower::ServiceExt;

pub const TEST_DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// One in-memory collection per catalog kind.
#[derive(Clone)]
pub struct TestCatalog {
    pub licenses: Arc<InMemoryCatalogRepo<GameLicenseFields>>,
    pub publishers: Arc<InMemoryCatalogRepo<PublisherFields>>,
    pub authors: Arc<InMemoryCatalogRepo<AuthorFields>>,
    pub systems: Arc<InMemoryCatalogRepo<GameSystemFields>>,
    pub games: Arc<InMemoryCatalogRepo<GameFields>>,
    pub editions: Arc<InMemoryCatalogRepo<EditionFields>>,
    pub products: Arc<InMemoryCatalogRepo<ProductFields>>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            licenses: InMemoryCatalogRepo::new(),
            publishers: InMemoryCatalogRepo::new(),
            authors: InMemoryCatalogRepo::new(),
            systems: InMemoryCatalogRepo::new(),
            games: InMemoryCatalogRepo::new(),
            editions: InMemoryCatalogRepo::new(),
            products: InMemoryCatalogRepo::new(),
        }
    }

    pub fn repositories(&self) -> CatalogRepositories {
        CatalogRepositories {
            licenses: self.licenses.clone(),
            publishers: self.publishers.clone(),
            authors: self.authors.clone(),
            systems: self.systems.clone(),
            games: self.games.clone(),
            editions: self.editions.clone(),
            products: self.products.clone(),
            references: Arc::new(self.clone()),
        }
    }

    fn contains(&self, kind: CatalogKind, id: CatalogId) -> bool {
        match kind {
            CatalogKind::GameLicense => self.licenses.contains(id),
            CatalogKind::Publisher => self.publishers.contains(id),
            CatalogKind::Author => self.authors.contains(id),
            CatalogKind::GameSystem => self.systems.contains(id),
            CatalogKind::Game => self.games.contains(id),
            CatalogKind::Edition => self.editions.contains(id),
            CatalogKind::Product => self.products.contains(id),
        }
    }
}

#[async_trait]
impl CatalogReferenceChecker for TestCatalog {
    async fn missing(&self, kind: CatalogKind, ids: &[CatalogId]) -> DomainResult<Vec<CatalogId>> {
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !self.contains(kind, *id))
            .collect())
    }
}

pub fn build_services(
    users: Arc<InMemoryUserRepo>,
    catalog: CatalogRepositories,
) -> ApplicationServices {
    ApplicationServices::new(
        users,
        catalog,
        Arc::new(DummyPasswordHasher),
        Arc::new(DummyTokenManager),
        Arc::new(FixedClock),
        Arc::new(DefaultSlugGenerator),
        Timezone::new(TEST_DEFAULT_TIMEZONE).expect("test time zone"),
    )
}

/// Router over in-memory storage, with handles to inspect that storage.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepo>,
    pub catalog: TestCatalog,
}

pub fn test_app() -> TestApp {
    let users = InMemoryUserRepo::new();
    let catalog = TestCatalog::new();
    let services = build_services(users.clone(), catalog.repositories());
    let state = HttpState {
        services: Arc::new(services),
    };
    TestApp {
        router: build_router(state, &["http://localhost:3000".to_string()]),
        users,
        catalog,
    }
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Sends one request and returns the status with the JSON body, `Null` when empty.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Asserts an error body of the shape `{error, message}` with the given status.
pub fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        expected.canonical_reason(),
        "body: {body}"
    );
    assert!(body.get("message").and_then(Value::as_str).is_some());
}
