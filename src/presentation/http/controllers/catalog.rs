// src/presentation/http/controllers/catalog.rs
use crate::application::{
    commands::catalog::{
        CreateCatalogEntryCommand, DeleteCatalogEntryCommand, UpdateCatalogEntryCommand,
    },
    dto::{CatalogChoicesDto, CatalogEntryDto, CursorPage},
    queries::catalog::ListCatalogQuery,
    services::{ApplicationServices, CatalogServiceFor},
};
use crate::domain::catalog::{
    AuthorFields, CatalogFields, EditionFields, GameFields, GameLicenseFields, GameSystemFields,
    ProductFields, PublisherFields,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiQuery, Authenticated};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogListParams {
    /// Page size, clamped to 1..=100. Defaults to 20.
    #[serde(default)]
    pub limit: Option<u32>,
    /// `next_cursor` of the previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Body of create and update requests: the kind's fields plus an optional slug.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct CatalogEntryRequest<F> {
    /// On create, omitted or empty generates one. On update, omitted keeps
    /// the current slug and an empty string regenerates it.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub fields: F,
}

async fn list_entries<F>(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<CatalogListParams>,
) -> HttpResult<Json<CursorPage<CatalogEntryDto<F>>>>
where
    F: CatalogFields + Serialize,
    ApplicationServices: CatalogServiceFor<F>,
{
    let query = ListCatalogQuery {
        limit: params.limit,
        cursor: params.cursor,
    };
    state
        .services
        .catalog_for::<F>()
        .queries
        .list(query)
        .await
        .into_http()
        .map(Json)
}

async fn get_entry<F>(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<CatalogEntryDto<F>>>
where
    F: CatalogFields + Serialize,
    ApplicationServices: CatalogServiceFor<F>,
{
    state
        .services
        .catalog_for::<F>()
        .queries
        .get_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

async fn create_entry<F>(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    ApiJson(payload): ApiJson<CatalogEntryRequest<F>>,
) -> HttpResult<(StatusCode, Json<CatalogEntryDto<F>>)>
where
    F: CatalogFields + Serialize + DeserializeOwned,
    ApplicationServices: CatalogServiceFor<F>,
{
    let command = CreateCatalogEntryCommand {
        slug: payload.slug,
        fields: payload.fields,
    };
    state
        .services
        .catalog_for::<F>()
        .commands
        .create_entry(&user, command)
        .await
        .into_http()
        .map(|entry| (StatusCode::CREATED, Json(entry)))
}

async fn update_entry<F>(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(slug): Path<String>,
    ApiJson(payload): ApiJson<CatalogEntryRequest<F>>,
) -> HttpResult<Json<CatalogEntryDto<F>>>
where
    F: CatalogFields + Serialize + DeserializeOwned,
    ApplicationServices: CatalogServiceFor<F>,
{
    let command = UpdateCatalogEntryCommand {
        slug,
        new_slug: payload.slug,
        fields: payload.fields,
    };
    state
        .services
        .catalog_for::<F>()
        .commands
        .update_entry(&user, command)
        .await
        .into_http()
        .map(Json)
}

async fn delete_entry<F>(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(slug): Path<String>,
) -> HttpResult<StatusCode>
where
    F: CatalogFields,
    ApplicationServices: CatalogServiceFor<F>,
{
    state
        .services
        .catalog_for::<F>()
        .commands
        .delete_entry(&user, DeleteCatalogEntryCommand { slug })
        .await
        .into_http()
        .map(|()| StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/catalog/choices",
    responses(
        (status = 200, description = "Codes accepted by choice fields.", body = CatalogChoicesDto)
    ),
    tag = "Catalog"
)]
pub async fn choices() -> Json<CatalogChoicesDto> {
    Json(CatalogChoicesDto::current())
}

/// Documented per-kind handlers and their router.
macro_rules! catalog_endpoints {
    ($($module:ident: $fields:ident, $tag:literal, $collection:literal, $item:literal;)+) => {
        $(
            pub mod $module {
                use super::*;

                #[utoipa::path(
                    get,
                    path = $collection,
                    params(CatalogListParams),
                    responses(
                        (status = 200, description = "One page of entries.", body = CursorPage<CatalogEntryDto<$fields>>),
                        (status = 400, description = "Invalid cursor.", body = ErrorResponse)
                    ),
                    tag = $tag
                )]
                pub async fn list(
                    state: Extension<HttpState>,
                    params: ApiQuery<CatalogListParams>,
                ) -> HttpResult<Json<CursorPage<CatalogEntryDto<$fields>>>> {
                    list_entries(state, params).await
                }

                #[utoipa::path(
                    post,
                    path = $collection,
                    request_body = CatalogEntryRequest<$fields>,
                    responses(
                        (status = 201, description = "Entry created.", body = CatalogEntryDto<$fields>),
                        (status = 400, description = "Invalid fields or slug.", body = ErrorResponse),
                        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
                        (status = 403, description = "Caller is not a superuser.", body = ErrorResponse),
                        (status = 409, description = "Slug already taken.", body = ErrorResponse)
                    ),
                    security(("bearerAuth" = [])),
                    tag = $tag
                )]
                pub async fn create(
                    state: Extension<HttpState>,
                    user: Authenticated,
                    payload: ApiJson<CatalogEntryRequest<$fields>>,
                ) -> HttpResult<(StatusCode, Json<CatalogEntryDto<$fields>>)> {
                    create_entry(state, user, payload).await
                }

                #[utoipa::path(
                    get,
                    path = $item,
                    params(("slug" = String, Path, description = "Entry slug")),
                    responses(
                        (status = 200, description = "The entry.", body = CatalogEntryDto<$fields>),
                        (status = 404, description = "No entry with that slug.", body = ErrorResponse)
                    ),
                    tag = $tag
                )]
                pub async fn retrieve(
                    state: Extension<HttpState>,
                    slug: Path<String>,
                ) -> HttpResult<Json<CatalogEntryDto<$fields>>> {
                    get_entry(state, slug).await
                }

                #[utoipa::path(
                    put,
                    path = $item,
                    params(("slug" = String, Path, description = "Entry slug")),
                    request_body = CatalogEntryRequest<$fields>,
                    responses(
                        (status = 200, description = "Entry replaced.", body = CatalogEntryDto<$fields>),
                        (status = 400, description = "Invalid fields or slug.", body = ErrorResponse),
                        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
                        (status = 403, description = "Caller is not a superuser.", body = ErrorResponse),
                        (status = 404, description = "No entry with that slug.", body = ErrorResponse),
                        (status = 409, description = "Slug taken or entry modified concurrently.", body = ErrorResponse)
                    ),
                    security(("bearerAuth" = [])),
                    tag = $tag
                )]
                pub async fn update(
                    state: Extension<HttpState>,
                    user: Authenticated,
                    slug: Path<String>,
                    payload: ApiJson<CatalogEntryRequest<$fields>>,
                ) -> HttpResult<Json<CatalogEntryDto<$fields>>> {
                    update_entry(state, user, slug, payload).await
                }

                #[utoipa::path(
                    delete,
                    path = $item,
                    params(("slug" = String, Path, description = "Entry slug")),
                    responses(
                        (status = 204, description = "Entry deleted."),
                        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
                        (status = 403, description = "Caller is not a superuser.", body = ErrorResponse),
                        (status = 404, description = "No entry with that slug.", body = ErrorResponse)
                    ),
                    security(("bearerAuth" = [])),
                    tag = $tag
                )]
                pub async fn destroy(
                    state: Extension<HttpState>,
                    user: Authenticated,
                    slug: Path<String>,
                ) -> HttpResult<StatusCode> {
                    delete_entry::<$fields>(state, user, slug).await
                }

                #[derive(OpenApi)]
                #[openapi(paths(list, create, retrieve, update, destroy))]
                pub struct Doc;

                pub fn router() -> Router {
                    Router::new()
                        .route($collection, get(list).post(create))
                        .route($item, get(retrieve).put(update).delete(destroy))
                }
            }
        )+

        /// Routes for every catalog kind plus the choices listing.
        pub fn router() -> Router {
            Router::new()
                .route("/api/v1/catalog/choices", get(choices))
                $(.merge($module::router()))+
        }

        /// Path documents of every catalog kind.
        pub fn openapi_docs() -> Vec<utoipa::openapi::OpenApi> {
            vec![$($module::Doc::openapi()),+]
        }
    };
}

catalog_endpoints! {
    licenses: GameLicenseFields, "Licenses", "/api/v1/catalog/licenses", "/api/v1/catalog/licenses/{slug}";
    publishers: PublisherFields, "Publishers", "/api/v1/catalog/publishers", "/api/v1/catalog/publishers/{slug}";
    authors: AuthorFields, "Authors", "/api/v1/catalog/authors", "/api/v1/catalog/authors/{slug}";
    systems: GameSystemFields, "Systems", "/api/v1/catalog/systems", "/api/v1/catalog/systems/{slug}";
    games: GameFields, "Games", "/api/v1/catalog/games", "/api/v1/catalog/games/{slug}";
    editions: EditionFields, "Editions", "/api/v1/catalog/editions", "/api/v1/catalog/editions/{slug}";
    products: ProductFields, "Products", "/api/v1/catalog/products", "/api/v1/catalog/products/{slug}";
}
