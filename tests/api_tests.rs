use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use user_accounts::config::Config;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.security.token_secret = "api-test-secret".to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = user_accounts::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    user_accounts::api::router(state)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_signup_returns_confirmation() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            &serde_json::json!({ "username": "alice", "password": "pw123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User was registered successfully");
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            &serde_json::json!({ "password": "pw123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Username invalid");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            &serde_json::json!({ "username": "alice", "password": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Password invalid");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = spawn_app().await;
    let payload = serde_json::json!({ "username": "dupe", "password": "pw" });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users/signup", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users/signup", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["message"],
        "Could not create user: Username already in use!"
    );

    // Temp and permanent accounts share one namespace.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/createtemp",
            &serde_json::json!({ "username": "dupe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_createtemp_returns_id_and_username() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/createtemp",
            &serde_json::json!({ "username": "temp1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["id"].is_string());
    assert_eq!(body["username"], "temp1");
    assert!(body.get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/users/createtemp", &serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deletetemp_refuses_permanent_user() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            &serde_json::json!({ "username": "keeper", "password": "pw" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signin",
            &serde_json::json!({ "username": "keeper", "password": "pw" }),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/users/deletetemp/{id}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "Non-temp user could not be deleted"
    );

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/users/getuser/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["loggedIn"], true);
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/users/deletetemp/no-such-user"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/users/getuser/no-such-user"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_id_is_bad_request() {
    let app = spawn_app().await;

    for (method, uri) in [
        ("DELETE", "/users/deletetemp/"),
        ("DELETE", "/users/deletetemp"),
        ("GET", "/users/getuser/"),
        ("GET", "/users/getuser"),
    ] {
        let response = app.clone().oneshot(empty_request(method, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body_json(response).await["message"], "Invalid ID");
    }
}

#[tokio::test]
async fn test_signin_failures() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/users/signup",
            &serde_json::json!({ "username": "bob", "password": "right" }),
        ))
        .await
        .unwrap();

    for payload in [
        serde_json::json!({ "username": "bob", "password": "wrong" }),
        serde_json::json!({ "username": "nobody", "password": "right" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/users/signin", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid username/password combination");
        assert!(body.get("accessToken").is_none());
    }

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signin",
            &serde_json::json!({ "username": "bob" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_temp_user_cannot_sign_in() {
    let app = spawn_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/users/createtemp",
            &serde_json::json!({ "username": "ghost" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users/signin",
            &serde_json::json!({ "username": "ghost", "password": "temp_password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_content_type_is_treated_as_empty_body() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/createtemp")
                .body(Body::from(r#"{"username":"sam"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Username invalid");
}

#[tokio::test]
async fn test_form_bodies_are_accepted() {
    let app = spawn_app().await;

    let form_request = |uri: &str, body: &'static str| {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(form_request("/users/createtemp", "username=sam"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["username"], "sam");

    let response = app
        .clone()
        .oneshot(form_request("/users/signup", "username=samm&password=jebbidy3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(form_request("/users/signin", "username=samm&password=jebbidy3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["accessToken"].is_string());
}

#[tokio::test]
async fn test_malformed_json_gets_message_body() {
    let app = spawn_app().await;

    for raw in [r#"{"username":5}"#, "not json"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/createtemp")
                    .header("Content-Type", "application/json")
                    .body(Body::from(raw))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{raw}");
        assert!(body_json(response).await["message"].is_string(), "{raw}");
    }
}
