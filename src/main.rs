//! Tidskollen - A visual countdown timer for children
//! 
//! This is the main entry point for the tidskollen application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tidskollen::{
    api::create_router,
    config::Config,
    countdown::TokioScheduler,
    state::{AppState, StateConfig},
    storage::{ProfileManager, SettingsStore},
    tasks::{completion_alert_task, tick_driver_task},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tidskollen={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tidskollen v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, timer={}min",
          config.host, config.port, config.minutes);

    let data_dir = config.data_dir()?;
    info!("Data directory: {}", data_dir.display());

    // Settings are loaded once and handed to the state explicitly
    let settings_store = SettingsStore::new(&data_dir);
    let mut settings = settings_store.load();
    if !settings.welcome_shown {
        info!("Welcome to Time Check! Pick a preset, press start and watch the red wedge shrink.");
        settings.welcome_shown = true;
        if let Err(e) = settings_store.save(&settings) {
            warn!("Failed to save settings: {}", e);
        }
    }

    let mut profiles = ProfileManager::open(&data_dir)?;
    if let Some(name) = &config.profile {
        profiles.switch(name)?;
    }
    info!("Active profile: {}", profiles.current());

    let presets = config.presets();
    info!("Presets: {:?} minutes", presets.as_slice());

    let (scheduler, tick_rx) = TokioScheduler::new();
    let state = Arc::new(AppState::new(
        StateConfig {
            port: config.port,
            host: config.host.clone(),
            total_seconds: config.total_seconds(),
            presets,
            settings,
        },
        profiles,
        Box::new(scheduler),
    ));

    // Feed scheduler ticks into the countdown
    tokio::spawn(tick_driver_task(Arc::clone(&state), tick_rx));

    // Fire alerts when a countdown finishes
    let alerts = config.alerts();
    tokio::spawn(completion_alert_task(state.event_tx.subscribe(), alerts));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start             - Start the countdown");
    info!("  POST /stop              - Pause the countdown");
    info!("  POST /reset             - Rewind to the full duration");
    info!("  POST /preset/:minutes   - Select a preset duration");
    info!("  GET  /status            - Timer, clock and profile status");
    info!("  GET  /render.svg        - Progress ring as SVG");
    info!("  GET  /export/:format    - Sessions as csv or json");
    info!("  GET  /profiles          - List profiles");
    info!("  POST /profiles/:name    - Switch profile");
    info!("  GET  /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // A run cut short by shutdown is logged as not completed
    if let Err(e) = state.stop() {
        warn!("Failed to stop countdown: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}
