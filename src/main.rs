//! Animia SMS Dispatch - Main entry point
//!
//! Runs the MCP server over stdio. Logs go to stderr.

use animia_sms_dispatch::channels::{
    AppIntentChannel, DeliveryChannel, DeviceRelaySms, NativeChannel, StaticPermissionProvider,
    SystemUriOpener,
};
use animia_sms_dispatch::client::{AsyncSmsApiClient, AsyncSmsApiClientImpl};
use animia_sms_dispatch::dispatch::{BulkOrchestrator, HistoryRecorder, SmartDispatcher};
use animia_sms_dispatch::repositories::{
    ApiBeneficiaryRepository, ApiHistoryRepository, BeneficiaryRepository, HistoryRepository,
};
use animia_sms_dispatch::services::{SmsService, SmsServiceImpl};
use animia_sms_dispatch::{
    AnimiaSmsServer, Config, ContactExtractor, Metrics, PhoneNormalizer, SmsApiClient,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL from .env applies
    let config = Config::from_env();
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // stderr only, stdout carries MCP frames
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Animia SMS server with API URL: {}",
        config.api_base_url
    );

    let metrics = Metrics::new();
    let sync_client = SmsApiClient::new(&config, metrics.clone());
    let client = Arc::new(AsyncSmsApiClientImpl::new(sync_client)) as Arc<dyn AsyncSmsApiClient>;

    let beneficiary_repo =
        Arc::new(ApiBeneficiaryRepository::new(client.clone())) as Arc<dyn BeneficiaryRepository>;
    let history_repo =
        Arc::new(ApiHistoryRepository::new(client.clone())) as Arc<dyn HistoryRepository>;

    let settings = config.dispatch_settings();

    let app_intent = Arc::new(AppIntentChannel::new(
        config.target_platform,
        Arc::new(SystemUriOpener::default()),
    )) as Arc<dyn DeliveryChannel>;
    let mut dispatcher = SmartDispatcher::new(app_intent).with_metrics(metrics);

    match &config.relay_device_id {
        Some(device_id) => {
            info!("Native SMS enabled through relay device {}", device_id);
            let native = NativeChannel::new(
                Arc::new(StaticPermissionProvider::new(config.sms_permission_granted)),
                Arc::new(DeviceRelaySms::new(client.clone(), device_id.clone())),
            )
            .with_retry(settings.native_max_attempts, settings.native_retry_delay);
            dispatcher = dispatcher.with_native(Arc::new(native));
        }
        None => info!("No relay device configured, using messaging app only"),
    }

    let extractor = ContactExtractor::new(PhoneNormalizer::new(&config.default_country_code));
    let orchestrator = BulkOrchestrator::new(Arc::new(dispatcher), extractor)
        .with_inter_send_delay(settings.inter_send_delay)
        .with_observer(Arc::new(HistoryRecorder::new(history_repo.clone())));

    let sms_service = Arc::new(SmsServiceImpl::new(
        Arc::new(orchestrator),
        beneficiary_repo,
        history_repo,
        config.prefer_native,
    )) as Arc<dyn SmsService>;

    let server = AnimiaSmsServer::new(sms_service);

    info!(
        platform = %config.target_platform,
        inter_send_delay_ms = config.inter_send_delay_ms,
        "Animia SMS server initialized"
    );

    info!("Starting MCP server with stdio transport");
    animia_sms_dispatch::server::run_server(server).await?;

    info!("Animia SMS server shutdown complete");
    Ok(())
}
