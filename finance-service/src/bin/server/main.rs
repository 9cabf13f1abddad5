use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use finance_service::config::Config;
use finance_service::domain::transaction::service::TransactionService;
use finance_service::domain::user::service::UserService;
use finance_service::inbound::http::router::create_router;
use finance_service::outbound::repositories::PostgresTransactionRepository;
use finance_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finance_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "finance-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The database URL may embed credentials and is not logged.
    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(config.password.into())?;
    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            Duration::hours(config.jwt.expiration_hours),
        )?
        .with_password_hasher(password_hasher),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let transaction_repository = Arc::new(PostgresTransactionRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, transaction_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
