mod app;
mod config;
mod engine;
mod models;
mod ui;
mod workflow;

#[cfg(test)]
mod test_utils;

use dioxus::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ConsoleConfig;
use crate::engine::backend::HttpBackend;


fn main() {
    let log_dir = config::data_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::never(log_dir, "batchpay.log");
    tracing_subscriber::registry()
      .with(tracing_subscriber::fmt::layer().with_writer(file_appender))
      .init();

    // Config and HTTP client are ready before the window opens; either
    // failing shows the error screen instead of the console.
    let startup = ConsoleConfig::load()
        .map_err(|e| e.to_string())
        .and_then(|config| {
            HttpBackend::new(&config)
                .map(|backend| (config, backend))
                .map_err(|e| e.to_string())
        });

    match startup {
        Ok((config, backend)) => {
            tracing::info!("starting console against {}", config.api_base);
            LaunchBuilder::new()
                .with_context(config)
                .with_context(backend)
                .launch(app::App);
        }
        Err(err) => {
            tracing::error!("startup failed: {}", err);
            LaunchBuilder::new()
                .with_context(app::StartupError(err))
                .launch(app::StartupErrorApp);
        }
    }
}
