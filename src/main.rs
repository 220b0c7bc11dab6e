mod app;
mod client;
mod config;
mod models;
mod render;
mod tasks;
mod voting;

use app::App;
use client::HttpVoteSource;
use config::Config;
use log::{error, info};
use render::ConsoleRenderer;

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let source = match HttpVoteSource::new(&config) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Watching {}", source.url());

    let renderer = ConsoleRenderer::new(std::io::stdout(), &config);
    let mut app = App::new(&config, source, renderer);
    app.start();

    // No other way out than Ctrl-C
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    app.shutdown();

    let last = app.state();
    info!(
        "Poller {:?}, last seen {}% / {}% of {} votes",
        app.poller_state(),
        last.a_percent,
        last.b_percent,
        last.total
    );
}
