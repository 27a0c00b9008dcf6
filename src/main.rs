use anyhow::Result;
use symptom_triage::{
    SymptomChecker,
    config::Config,
    server::{AppState, start_http_server},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    symptom_triage::init_tracing(&config.runtime.log_level);

    tracing::info!(
        "{} v{} starting (bind={}, timeout={}ms)",
        config.service.name,
        config.service.version,
        config.http.bind,
        config.http.request_timeout_ms
    );

    let state = AppState::new(SymptomChecker::new(), config);
    start_http_server(state).await?;
    Ok(())
}
