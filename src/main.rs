//! Board Checker - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_web::middleware::Compress;
use actix_web::{App, HttpServer, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use board_checker_lib::auth::TokenKeys;
use board_checker_lib::config::Config;
use board_checker_lib::db::DbPool;
use board_checker_lib::middleware::{self, RequestLogger, ResolveIdentity};
use board_checker_lib::services::PhotoStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and BC_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Board Checker");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Using development defaults for DATABASE_URL and BC_SECRET");
    }

    // Photo store layout
    let store = PhotoStore::new(config.store_dir.clone());
    if let Err(e) = store.ensure_layout().await {
        error!("{}", e);
        std::process::exit(1);
    }

    // Initialize database
    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("{}", e);
        std::process::exit(1);
    }

    // Prepare shared state
    let bind_address = config.bind_address();
    let keys = TokenKeys::new(config.secret.clone(), !config.is_development());
    let max_upload_size = config.max_upload_size;
    let static_dir = config.static_dir.clone();
    let store_dir = config.store_dir.clone();

    info!(
        "Upload limit: {}MB, store at {:?}, static files from {:?}",
        max_upload_size / 1024 / 1024,
        store_dir,
        static_dir
    );
    if !config.require_assignment {
        info!("Worksheets without zone or team are readable");
    }

    let worker_count = if config.is_development() {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        App::new()
            // Last wrap runs first: the logger sees every response, identity resolves right before routing
            .wrap(ResolveIdentity)
            .wrap(middleware::secure_headers())
            .wrap(Compress::default())
            .wrap(RequestLogger)
            // Add shared state
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(keys.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(max_upload_size))
            .app_data(web::PayloadConfig::new(max_upload_size))
            .app_data(web::FormConfig::default().limit(64 * 1024))
            .configure(board_checker_lib::configure_app(
                static_dir.clone(),
                store_dir.clone(),
            ))
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
