//! Wiring of configuration, infrastructure and services

use std::sync::Arc;

use actix_web::web;
use anyhow::Context;

use mt_core::repositories::UserRepository;
use mt_core::services::account::{AccountService, AccountServiceConfig};
use mt_core::services::otp::{
    MailServiceTrait, OtpService, OtpServiceConfig, OtpTokenCodec, ReplayGuardTrait,
};
use mt_infra::cache::{RedisClient, RedisReplayGuard};
use mt_infra::database::{DatabasePool, PgUserRepository};
use mt_infra::mail::{create_mail_service, MailServiceAdapter};
use mt_shared::config::AppConfig;

use crate::app::AppState;

/// Production application state
pub type ServerState = AppState<PgUserRepository, MailServiceAdapter>;

/// Build services around the given collaborators
///
/// A replay guard makes every token single-use.
pub fn build_services<U, M>(
    config: &AppConfig,
    user_repository: Arc<U>,
    mail_service: Arc<M>,
    replay_guard: Option<Arc<dyn ReplayGuardTrait>>,
) -> anyhow::Result<AppState<U, M>>
where
    U: UserRepository,
    M: MailServiceTrait,
{
    let codec = OtpTokenCodec::from_config(&config.otp).context("Invalid OTP signing configuration")?;

    let mut otp_service = OtpService::new(
        mail_service,
        Arc::new(codec),
        OtpServiceConfig::from(&config.otp),
    );
    if let Some(guard) = replay_guard {
        otp_service = otp_service.with_replay_guard(guard);
    }
    let otp_service = Arc::new(otp_service);

    let account_service = Arc::new(AccountService::new(
        user_repository,
        otp_service.clone(),
        AccountServiceConfig::default(),
    ));

    Ok(AppState::new(
        otp_service,
        account_service,
        config.otp.expose_code_in_response,
    ))
}

/// Connect infrastructure and build the production state
///
/// Returns the database pool as well so the caller can close it on
/// shutdown.
pub async fn build_state(config: &AppConfig) -> anyhow::Result<(web::Data<ServerState>, DatabasePool)> {
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    pool.run_migrations()
        .await
        .context("Failed to run database migrations")?;
    let user_repository = Arc::new(PgUserRepository::new(pool.get_pool().clone()));

    let transport = create_mail_service(&config.mail).context("Failed to set up the mail transport")?;
    let adapter = MailServiceAdapter::new(transport);
    tracing::info!(provider = adapter.provider_name(), "Mail transport ready");

    let replay_guard: Option<Arc<dyn ReplayGuardTrait>> = if config.otp.single_use {
        let client = RedisClient::new(config.cache.clone())
            .await
            .context("Failed to connect to Redis for the replay guard")?;
        tracing::info!("Single-use verification tokens enabled");
        Some(Arc::new(RedisReplayGuard::new(client)))
    } else {
        None
    };

    let state = build_services(config, user_repository, Arc::new(adapter), replay_guard)?;
    Ok((web::Data::new(state), pool))
}
