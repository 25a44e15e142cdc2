//! Account service entry-point: loads settings, wires adapters, seeds the
//! bootstrap admin, and serves the REST API.

use std::sync::Arc;

use actix_web::cookie::SameSite;
use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use account_service::domain::ensure_admin;
use account_service::domain::ports::{AccountRepository, NotificationSink, PasswordHasher};
use account_service::inbound::http::health::HealthState;
use account_service::outbound::notification::{HttpNotificationSink, TracingNotificationSink};
use account_service::outbound::persistence::{
    DbPool, DieselAccountRepository, InMemoryAccountRepository, PoolConfig, run_migrations,
};
use account_service::server::{AppSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let accounts = account_store(&settings).await?;
    let notifications = notification_sink(&settings)?;
    let hasher: Arc<dyn PasswordHasher> = Arc::new(settings.password_hasher()?);

    if let Some(seed) = settings.bootstrap_admin()? {
        ensure_admin(accounts.as_ref(), hasher.as_ref(), seed)
            .await
            .wrap_err("failed to provision bootstrap admin")?;
    }

    let config = ServerConfig::new(
        settings.session_key()?,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr()?,
    )
    .with_accounts(accounts)
    .with_hasher(hasher)
    .with_notifications(notifications)
    .with_expose_password_hash(settings.expose_password_hash);

    info!(addr = %config.bind_addr(), "starting account service");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}

async fn account_store(settings: &AppSettings) -> Result<Arc<dyn AccountRepository>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database configured; accounts are kept in memory");
        return Ok(Arc::new(InMemoryAccountRepository::new()));
    };
    run_migrations(database_url).await?;
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    Ok(Arc::new(DieselAccountRepository::new(pool)))
}

fn notification_sink(settings: &AppSettings) -> Result<Arc<dyn NotificationSink>> {
    match settings.notification_url()? {
        Some(url) => {
            let sink = HttpNotificationSink::new(url, settings.notification_timeout())
                .wrap_err("failed to build notification client")?;
            Ok(Arc::new(sink))
        }
        None => {
            warn!("no notification endpoint configured; notifications are only logged");
            Ok(Arc::new(TracingNotificationSink))
        }
    }
}
