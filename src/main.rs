use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tracker_backend::config::Config;
use tracker_backend::db::{
    activity_log_repository::ActivityLogRepository,
    postgres_activity_log_repository::PostgresActivityLogRepository,
    postgres_project_repository::PostgresProjectRepository,
    postgres_user_repository::PostgresUserRepository, project_repository::ProjectRepository,
    user_repository::UserRepository,
};
use tracker_backend::responses::JsonResponse;
use tracker_backend::routes;
use tracker_backend::token::TokenManager;
use tracker_backend::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;

    // Stricter limiter for /api/auth/*
    let auth_governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.auth_rate_limit_seconds)
            .burst_size(config.auth_rate_limit_burst)
            .use_headers()
            .error_handler(|_err| {
                JsonResponse::too_many_requests(
                    "Too many requests. Please wait a moment and try again.",
                )
                .into_response()
            })
            .finish()
            .context("invalid auth rate limiter settings")?,
    );

    let governor_limiter = auth_governor_conf.limiter().clone();
    std::thread::spawn(move || loop {
        std::thread::sleep(Duration::from_secs(60));
        governor_limiter.retain_recent();
    });

    let tokens = Arc::new(TokenManager::new(&config.token));
    let validity_seconds = tokens.validity_window().num_seconds();

    let pg_pool = establish_connection(&config.database_url).await?;
    let state = AppState {
        db: Arc::new(PostgresUserRepository {
            pool: pg_pool.clone(),
        }) as Arc<dyn UserRepository>,
        project_repo: Arc::new(PostgresProjectRepository {
            pool: pg_pool.clone(),
        }) as Arc<dyn ProjectRepository>,
        activity_repo: Arc::new(PostgresActivityLogRepository { pool: pg_pool })
            as Arc<dyn ActivityLogRepository>,
        tokens,
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_origin
                .parse::<HeaderValue>()
                .context("FRONTEND_ORIGIN is not a valid header value")?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let auth_routes = routes::auth_routes().layer(GovernorLayer {
        config: auth_governor_conf,
    });
    let app = routes::build(state, auth_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        validity_seconds,
        "listening"
    );
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// `RUST_LOG` picks the filter (default `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Establish a connection to the database and verify it.
async fn establish_connection(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(database_url)
        .await
        .context("failed to connect to the database")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("failed to verify database connection")?;

    info!("connected to the database");
    Ok(pool)
}
