// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_import::{
    build_router, ApiState, CommandLineInput, HttpNotionConnector, NotionImport, ServiceConfig,
    SupabaseStore,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion_import.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the store and Notion connector into the import service.
fn build_state(config: &ServiceConfig) -> anyhow::Result<ApiState> {
    let store = SupabaseStore::new(&config.supabase_url, &config.supabase_service_key)
        .context("failed to create notes store client")?;
    let notion = HttpNotionConnector::new(config.notion_base_url.clone());

    let import = NotionImport::new(Arc::new(store), Arc::new(notion))
        .with_max_depth(config.max_depth);
    Ok(ApiState::new(import))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ServiceConfig::resolve(cli).context("invalid configuration")?;
    log::info!(
        "Notion API at {}, notes store at {}, fetch depth {}",
        config.notion_base_url,
        config.supabase_url,
        config.max_depth
    );

    let router = build_router(build_state(&config)?);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!("Listening on {}", config.bind);

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
