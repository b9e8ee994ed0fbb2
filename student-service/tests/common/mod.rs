#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::Role;
use auth::TokenConfig;
use axum::Router;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use student_service::account::models::Username;
use student_service::account::ports::AccountServicePort;
use student_service::account::service::AccountService;
use student_service::inbound::http::router::create_router;
use student_service::outbound::repositories::InMemoryAccountRepository;
use student_service::outbound::repositories::InMemoryStudentRepository;
use student_service::student::service::StudentService;

pub const SIGNING_KEY: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub students: Arc<InMemoryStudentRepository>,
}

impl TestApp {
    /// Spawn the application in a background task with the admin account bootstrapped
    pub async fn spawn() -> Self {
        let authenticator = test_authenticator();

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let students = Arc::new(InMemoryStudentRepository::new());

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&accounts),
            Arc::clone(&authenticator),
        ));
        let student_service = Arc::new(StudentService::new(Arc::clone(&students)));

        account_service
            .ensure_admin(
                &Username::new(ADMIN_USERNAME.to_string()).unwrap(),
                ADMIN_PASSWORD,
            )
            .await
            .expect("Failed to bootstrap admin");

        let router = create_router(account_service, student_service, Arc::clone(&authenticator));
        let (address, port) = serve(router).await;

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            accounts,
            students,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Register an account and return the response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Token of the bootstrapped admin
    pub async fn admin_token(&self) -> String {
        token_of(self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await).await
    }

    /// Token of a freshly registered STUDENT account
    pub async fn student_token(&self, username: &str) -> String {
        token_of(self.register(username, "secret1").await).await
    }

    /// Token signed with the test key, bypassing login
    pub fn issue_token(&self, subject: &str, role: Role) -> String {
        self.authenticator
            .issue_token(subject, role)
            .expect("Failed to issue token")
    }

    /// Create a student as admin
    pub async fn create_student(&self, token: &str, student: Value) -> reqwest::Response {
        self.post("/api/students")
            .bearer_auth(token)
            .json(&student)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Authenticator over the shared test signing key
pub fn test_authenticator() -> Arc<Authenticator> {
    let token_config =
        TokenConfig::new(SIGNING_KEY.to_vec(), Duration::hours(1)).expect("Invalid token config");
    Arc::new(Authenticator::new(&token_config))
}

/// Serve `router` on a random port in a background task and return its address
pub async fn serve(router: Router) -> (String, u16) {
    // Use random port (0 = OS assigns)
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server error");
    });

    (address, port)
}

pub async fn token_of(response: reqwest::Response) -> String {
    assert!(
        response.status().is_success(),
        "Expected success, got {}",
        response.status()
    );
    let body: Value = response.json().await.expect("Failed to parse response");
    body["token"]
        .as_str()
        .expect("Response has no token")
        .to_string()
}

pub fn student_json(id: i64, name: &str, year: i32, attendance: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "branch": "CSE",
        "studentYear": year,
        "attendancePercentage": attendance
    })
}

/// Test database helper
///
/// Each instance owns a freshly created, migrated database on the server
/// named by `DATABASE_URL`.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name.
    ///
    /// Returns `None` when `DATABASE_URL` is not set, so that suites can run
    /// without a PostgreSQL server.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        let db_name = format!(
            "test_student_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
