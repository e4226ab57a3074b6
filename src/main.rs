use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;

use memories::database::init_database;
use memories::middleware::RequestIdMiddleware;
use memories::config::DEFAULT_JWT_SECRET;
use memories::{routes, AppState, Config, SessionService};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("Starting Memories API server...");

    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);
    if config.is_production() && config.jwt_secret == DEFAULT_JWT_SECRET {
        log::warn!("JWT_SECRET is not set; session tokens are signed with the built-in default key");
    }
    if config.is_development() {
        log::debug!("Accepting browser requests from {}", config.client_base_url);
    }

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    let app_state = web::Data::new(AppState::sqlite(pool));
    let session_service = web::Data::new(SessionService::new(config.clone()));

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(session_service.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
