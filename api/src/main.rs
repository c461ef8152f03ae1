use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use ps_api::app::{create_app, AppState};
use ps_api::config;
use ps_core::services::{CredentialConfig, CredentialHelper, CredentialService, ProfileService};
use ps_shared::config::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first so it wins over the generic .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = config::load().context("failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.filter.as_str()),
    );

    info!("Starting profile service ({})", config.environment);
    if config.auth.jwt.is_using_default_secret() {
        log::warn!("Using the default JWT secret, set JWT_SECRET before deploying");
    }

    let infra = ps_infra::initialize(&config.database)
        .await
        .context("failed to initialize infrastructure")?;
    info!("{}", infra.pool.get_statistics());

    let credentials: Arc<dyn CredentialHelper> =
        Arc::new(CredentialService::new(CredentialConfig::from(&config.auth)));
    let profile_service = Arc::new(ProfileService::new(
        Arc::new(infra.profiles.clone()),
        credentials,
    ));
    let app_state = web::Data::new(AppState::new(profile_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .client_request_timeout(Duration::from_secs(config.server.request_timeout));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    infra.pool.close().await;
    Ok(())
}
