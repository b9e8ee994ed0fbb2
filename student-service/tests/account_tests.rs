mod common;

use auth::Role;
use common::TestApp;
use common::ADMIN_USERNAME;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;
use student_service::account::models::Account;
use student_service::account::models::Credential;
use student_service::account::models::Username;

#[tokio::test]
async fn test_list_accounts_as_admin() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    app.register("nicola", "pass_word!").await;

    let response = app
        .get("/api/users")
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "username": ADMIN_USERNAME, "role": "ADMIN" },
            { "username": "nicola", "role": "STUDENT" }
        ])
    );
}

#[tokio::test]
async fn test_get_account_never_exposes_credential() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;
    app.register("nicola", "pass_word!").await;

    let response = app
        .get("/api/users/nicola")
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "username": "nicola", "role": "STUDENT" }));
}

#[tokio::test]
async fn test_get_missing_account() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    for path in ["/api/users/nobody", "/api/users/x"] {
        let response = app
            .get(path)
            .bearer_auth(&admin)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_account_routes_are_admin_only() {
    let app = TestApp::spawn().await;
    let student = app.student_token("nicola").await;

    let forbidden = app
        .get("/api/users")
        .bearer_auth(&student)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let anonymous = app
        .get("/api/users/nicola")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_legacy_short_username_is_listed_and_fetched() {
    let app = TestApp::spawn().await;
    let admin = app.admin_token().await;

    let mut legacy = Account::new(
        Username::from_stored("ab".to_string()),
        Credential::new("secret1".to_string()),
        Role::Student,
    );
    legacy.role = None;
    app.accounts.insert_raw(legacy).await;

    let list = app
        .get("/api/users")
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(list.status(), StatusCode::OK);
    let body: Value = list.json().await.unwrap();
    assert_eq!(body[0], json!({ "username": "ab", "role": "STUDENT" }));

    let fetched = app
        .get("/api/users/ab")
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);
}
