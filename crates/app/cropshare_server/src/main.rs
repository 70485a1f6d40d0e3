//! CropShare web server binary.
//!
//! Runs migrations and the startup seed, then serves the HTTP API.

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use cropshare_api::config::ApiConfig;
use cropshare_api::AppState;

/// CLI arguments for the CropShare server.
#[derive(Parser, Debug)]
#[command(name = "cropshare_server", about = "CropShare web server")]
struct Args {
    /// Address to bind the HTTP listener.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/cropshare"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,cropshare_api=debug,cropshare_core=debug".parse().unwrap()
            }),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, bind_addr = %args.bind_addr, "starting cropshare_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    cropshare_api::migrate(&pool).await?;

    info!("seeding default users and pantries");
    cropshare_core::seed::seed(&pool).await?;

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        jwt_secret: cropshare_core::auth::jwt::resolve_secret(),
    };

    let state = AppState::new(pool, config.clone());
    let app = cropshare_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
