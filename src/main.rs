use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use seatboard::config;
use seatboard::db;
use seatboard::github::{GithubClient, SeatsProvider};
use seatboard::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Load configuration
    let config = config::Config::from_env().map_err(|e| {
        log::error!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!(
        "Starting Seatboard server on {}:{} for {}",
        config.host,
        config.port,
        config.github.scope
    );

    // Snapshot store pool, when configured
    let db_pool = match &config.database {
        Some(database) => {
            let pool = db::create_pool(database).await.map_err(|e| {
                log::error!("Database pool error: {}", e);
                std::io::Error::other(e.to_string())
            })?;

            db::run_migrations(&pool).await.map_err(|e| {
                log::error!("Migration error: {}", e);
                std::io::Error::other(e.to_string())
            })?;

            Some(pool)
        }
        None => {
            log::info!("DATABASE_URL not set, historical snapshots disabled");
            None
        }
    };

    // GitHub API client shared by all handlers
    let github: Arc<dyn SeatsProvider> = Arc::new(GithubClient::new(&config.github).map_err(
        |e| {
            log::error!("GitHub client error: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        },
    )?);

    // Clone values for the closure
    let host = config.host.clone();
    let port = config.port;

    let server = HttpServer::new(move || {
        // The dashboard frontend is served from a different origin and
        // only ever reads
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::ACCEPT,
                actix_web::http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            // Share the API client, store pool and config with all handlers
            .app_data(web::Data::from(github.clone()))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(config.clone()))
            // Middleware
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(cors)
            // Health check routes
            .service(
                web::scope("/health")
                    .route("", web::get().to(routes::health::liveness))
                    .route("/ready", web::get().to(routes::health::readiness)),
            )
            // API routes
            .configure(routes::seats::configure)
            .configure(routes::teams::configure)
    })
    .bind((host.as_str(), port))?
    .shutdown_timeout(30)
    .run();

    // Spawn graceful shutdown handler
    let server_handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        log::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                // Wait forever if signal handler fails
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
