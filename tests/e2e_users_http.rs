// tests/e2e_users_http.rs
mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::{
    ADMIN_TOKEN, MEMBER_TOKEN, OTHER_TOKEN, TEST_DEFAULT_TIMEZONE, TestApp, assert_error,
    json_request, send, test_app,
};

const PASSWORD: &str = "correct horse battery";

/// Registers `admin` (first user), then `member` and `other` through the API.
async fn seeded_app() -> TestApp {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({ "username": "admin", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    for name in ["member", "other"] {
        let (status, body) = send(
            &app.router,
            json_request(
                Method::POST,
                "/api/v1/users",
                Some(ADMIN_TOKEN),
                Some(json!({ "username": name, "password": PASSWORD })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }
    app
}

#[tokio::test]
async fn first_registration_creates_superuser() {
    let app = test_app();
    let (status, body) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({
                "username": "founder",
                "password": PASSWORD,
                "first_name": "Ada",
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["is_superuser"], true);
    assert_eq!(body["first_name"], "Ada");
    assert_eq!(body["timezone"], TEST_DEFAULT_TIMEZONE);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn later_registration_requires_superuser() {
    let app = seeded_app().await;
    let body = || Some(json!({ "username": "drifter", "password": PASSWORD }));

    let (status, err) = send(
        &app.router,
        json_request(Method::POST, "/api/v1/users", None, body()),
    )
    .await;
    assert_error(status, &err, StatusCode::UNAUTHORIZED);

    let (status, err) = send(
        &app.router,
        json_request(Method::POST, "/api/v1/users", Some(MEMBER_TOKEN), body()),
    )
    .await;
    assert_error(status, &err, StatusCode::FORBIDDEN);

    let (status, err) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/users",
            Some(ADMIN_TOKEN),
            Some(json!({ "username": "member", "password": PASSWORD })),
        ),
    )
    .await;
    assert_error(status, &err, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_and_me() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "member", "password": PASSWORD })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["token"]["token"], "token-for-member");
    assert_eq!(body["user"]["username"], "member");

    let (status, err) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "member", "password": "wrong password" })),
        ),
    )
    .await;
    assert_error(status, &err, StatusCode::UNAUTHORIZED);

    let (status, me) = send(
        &app.router,
        json_request(Method::GET, "/api/v1/auth/me", Some(MEMBER_TOKEN), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "member");
    assert_eq!(me["timezone"], TEST_DEFAULT_TIMEZONE);

    let (status, err) = send(
        &app.router,
        json_request(Method::GET, "/api/v1/auth/me", None, None),
    )
    .await;
    assert_error(status, &err, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn disabled_account_cannot_log_in() {
    let app = seeded_app().await;
    app.users.deactivate("member");

    let (status, err) = send(
        &app.router,
        json_request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": "member", "password": PASSWORD })),
        ),
    )
    .await;
    assert_error(status, &err, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_access_follows_owner_or_superuser_rule() {
    let app = seeded_app().await;
    let get = |token: Option<&str>| json_request(Method::GET, "/api/v1/users/member", token, None);

    let (status, _) = send(&app.router, get(Some(MEMBER_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app.router, get(Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, err) = send(&app.router, get(Some(OTHER_TOKEN))).await;
    assert_error(status, &err, StatusCode::FORBIDDEN);

    let (status, err) = send(&app.router, get(None)).await;
    assert_error(status, &err, StatusCode::UNAUTHORIZED);

    let (status, err) = send(
        &app.router,
        json_request(Method::GET, "/api/v1/users/ghost", Some(ADMIN_TOKEN), None),
    )
    .await;
    assert_error(status, &err, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_update_round_trip() {
    let app = seeded_app().await;
    let put = |token: &str, body: serde_json::Value| {
        json_request(Method::PUT, "/api/v1/users/member", Some(token), Some(body))
    };

    let (status, body) = send(
        &app.router,
        put(
            MEMBER_TOKEN,
            json!({ "first_name": "Jo", "last_name": "Doe", "timezone": "Asia/Tokyo" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["first_name"], "Jo");
    assert_eq!(body["timezone"], "Asia/Tokyo");

    let (status, err) = send(&app.router, put(OTHER_TOKEN, json!({ "first_name": "X" }))).await;
    assert_error(status, &err, StatusCode::FORBIDDEN);

    let (status, err) = send(
        &app.router,
        put(MEMBER_TOKEN, json!({ "timezone": "Not/AZone" })),
    )
    .await;
    assert_error(status, &err, StatusCode::BAD_REQUEST);

    let stored = app.users.account("member").unwrap();
    assert_eq!(stored.user.first_name.as_str(), "Jo");
    assert_eq!(stored.profile.timezone.name(), "Asia/Tokyo");
}
