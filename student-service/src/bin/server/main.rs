use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use student_service::account::models::AdminBootstrap;
use student_service::account::models::Username;
use student_service::account::ports::AccountServicePort;
use student_service::account::service::AccountService;
use student_service::config::Config;
use student_service::inbound::http::router::create_router;
use student_service::outbound::repositories::PostgresAccountRepository;
use student_service::outbound::repositories::PostgresStudentRepository;
use student_service::student::service::StudentService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "student_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "student-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.expiration_seconds,
        admin_username = %config.admin.username,
        "Configuration loaded"
    );

    let token_config = config.jwt.token_config()?;
    let authenticator = Arc::new(Authenticator::new(&token_config));

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let student_repository = Arc::new(PostgresStudentRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
    ));
    let student_service = Arc::new(StudentService::new(student_repository));

    let admin_username = Username::new(config.admin.username.clone())?;
    match account_service
        .ensure_admin(&admin_username, &config.admin.password)
        .await?
    {
        AdminBootstrap::Skipped => {
            tracing::info!("Admin bootstrap skipped: no admin password configured")
        }
        AdminBootstrap::Created => {
            tracing::info!(username = %admin_username, "Admin account created")
        }
        AdminBootstrap::Updated => {
            tracing::info!(username = %admin_username, "Admin account updated")
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, student_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
