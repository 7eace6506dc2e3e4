use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use profile_service::config::Config;
use profile_service::domain::profile::ports::ProfileServicePort;
use profile_service::domain::profile::service::ProfileService;
use profile_service::domain::user::ports::UserServicePort;
use profile_service::domain::user::service::UserService;
use profile_service::inbound::http::router::create_router;
use profile_service::outbound::repositories::InMemoryRepository;
use profile_service::outbound::repositories::PostgresProfileRepository;
use profile_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "profile-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        in_memory = config.database.is_in_memory(),
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let (user_service, profile_service): (Arc<dyn UserServicePort>, Arc<dyn ProfileServicePort>) =
        if config.database.is_in_memory() {
            let repository = Arc::new(InMemoryRepository::new());
            tracing::warn!(database = "memory", "No database url set, data will not persist");

            let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            ));
            let profile_service: Arc<dyn ProfileServicePort> = Arc::new(ProfileService::new(
                Arc::clone(&repository),
                Arc::clone(&repository),
            ));
            (user_service, profile_service)
        } else {
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

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
            let profile_repository = Arc::new(PostgresProfileRepository::new(pg_pool));

            let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                Arc::clone(&user_repository),
                Arc::clone(&authenticator),
            ));
            let profile_service: Arc<dyn ProfileServicePort> =
                Arc::new(ProfileService::new(profile_repository, user_repository));
            (user_service, profile_service)
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, profile_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
