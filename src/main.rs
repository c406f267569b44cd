use domain::Platform;
use log::*;
use service::{config::Config, logging::Logger};
use web::AppState;

#[tokio::main]
async fn main() {
    let config = Config::new();

    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting up Review Platform API in {} mode",
        config.runtime_env()
    );
    debug!(
        "Listing at most {} repositories per provider",
        config.repo_list_limit
    );

    let platform = match Platform::from_config(&config) {
        Ok(platform) => platform,
        Err(e) => {
            error!("Failed to build provider clients: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, platform);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        std::process::exit(1);
    }
}
