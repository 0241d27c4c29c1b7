// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{RegisterUserCommand, UpdateProfileCommand},
    dto::UserDetailDto,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, Authenticated, MaybeAuthenticated};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Ignored for the first account, which is always a superuser.
    #[serde(default)]
    pub is_superuser: bool,
}

/// Omitted fields keep their current value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// IANA time zone name, e.g. `Europe/Berlin`.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created.", body = UserDetailDto),
        (status = 400, description = "Invalid username or password.", body = ErrorResponse),
        (status = 401, description = "Accounts exist and no token was sent.", body = ErrorResponse),
        (status = 403, description = "Caller is not a superuser.", body = ErrorResponse),
        (status = 409, description = "Username taken.", body = ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn register(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> HttpResult<(StatusCode, Json<UserDetailDto>)> {
    let command = RegisterUserCommand {
        username: payload.username,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        is_superuser: payload.is_superuser,
    };

    state
        .services
        .user_commands
        .register(actor.0.as_ref(), command)
        .await
        .into_http()
        .map(|user| (StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Login name")),
    responses(
        (status = 200, description = "User with profile.", body = UserDetailDto),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Not the owner or a superuser.", body = ErrorResponse),
        (status = 404, description = "No such user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(username): Path<String>,
) -> HttpResult<Json<UserDetailDto>> {
    state
        .services
        .user_queries
        .get_user_detail(&user, &username)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Login name")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated.", body = UserDetailDto),
        (status = 400, description = "Invalid name or time zone.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse),
        (status = 403, description = "Not the owner or a superuser.", body = ErrorResponse),
        (status = 404, description = "No such user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(username): Path<String>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> HttpResult<Json<UserDetailDto>> {
    let command = UpdateProfileCommand {
        username,
        first_name: payload.first_name,
        last_name: payload.last_name,
        timezone: payload.timezone,
    };

    state
        .services
        .user_commands
        .update_profile(&user, command)
        .await
        .into_http()
        .map(Json)
}
