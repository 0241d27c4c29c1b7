// src/presentation/http/openapi.rs
use crate::presentation::http::controllers::catalog;
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::me,
        crate::presentation::http::controllers::users::register,
        crate::presentation::http::controllers::users::get_user,
        crate::presentation::http::controllers::users::update_profile,
        crate::presentation::http::controllers::catalog::choices,
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::users::RegisterRequest,
            crate::presentation::http::controllers::users::UpdateProfileRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserDetailDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CatalogChoicesDto,
            crate::domain::catalog::Choice,
        )
    ),
    tags(
        (name = "System", description = "Health and documentation"),
        (name = "Auth", description = "Token issuance and the current account"),
        (name = "Users", description = "Accounts and profiles"),
        (name = "Catalog", description = "Shared catalog metadata"),
        (name = "Licenses", description = "Game licenses"),
        (name = "Publishers", description = "Publishers"),
        (name = "Authors", description = "Authors"),
        (name = "Systems", description = "Game systems"),
        (name = "Games", description = "Games"),
        (name = "Editions", description = "Editions of games"),
        (name = "Products", description = "Purchasable products of an edition")
    ),
    modifiers(&ApiDocCustomizer)
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// The full document: fixed routes plus every catalog kind.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for kind_doc in catalog::openapi_docs() {
        doc.merge(kind_doc);
    }
    doc
}

/// Swagger UI at `/docs`; the UI also serves the document at `/openapi.json`.
pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the document to `OPENAPI_SNAPSHOT_PATH` and returns that path.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let doc = openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_catalog_kind() {
        let doc = openapi();
        for segment in [
            "licenses",
            "publishers",
            "authors",
            "systems",
            "games",
            "editions",
            "products",
        ] {
            let collection = format!("/api/v1/catalog/{segment}");
            let item = format!("{collection}/{{slug}}");
            assert!(doc.paths.paths.contains_key(&collection), "{collection}");
            assert!(doc.paths.paths.contains_key(&item), "{item}");
        }
        assert!(doc.paths.paths.contains_key("/api/v1/users/{username}"));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
    }
}
