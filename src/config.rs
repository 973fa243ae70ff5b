// src/config.rs
use crate::constants::{NOTION_API_BASE_URL, NOTION_MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::types::{AccessToken, ValidatedUrl};
use clap::Parser;
use std::net::SocketAddr;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address the HTTP service listens on
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Notion API root; overrides NOTION_API_BASE_URL (defaults to https://api.notion.com/v1)
    #[arg(long)]
    pub notion_base_url: Option<String>,

    /// Nesting depth at which block children stop being fetched
    #[arg(long, default_value_t = NOTION_MAX_FETCH_DEPTH)]
    pub max_depth: usize,
}

/// Resolved service configuration, validated once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub verbose: bool,
    pub notion_base_url: ValidatedUrl,
    pub supabase_url: ValidatedUrl,
    pub supabase_service_key: AccessToken,
    pub max_depth: usize,
}

impl ServiceConfig {
    /// Resolves a complete service configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves configuration reading variables through `env`.
    pub fn resolve_with<F>(cli: CommandLineInput, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set",
                        name
                    ))
                })
        };

        let supabase_url = ValidatedUrl::parse(&required("SUPABASE_URL")?)?;
        let supabase_service_key = AccessToken::new(required("SUPABASE_SERVICE_ROLE_KEY")?)?;

        let notion_base_url = cli
            .notion_base_url
            .or_else(|| env("NOTION_API_BASE_URL").filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| NOTION_API_BASE_URL.to_string());
        let notion_base_url = ValidatedUrl::parse(&notion_base_url)?;

        if cli.max_depth == 0 {
            return Err(AppError::Validation(
                "--max-depth must be at least 1".to_string(),
            ));
        }

        Ok(ServiceConfig {
            bind: cli.bind,
            verbose: cli.verbose,
            notion_base_url,
            supabase_url,
            supabase_service_key,
            max_depth: cli.max_depth,
        })
    }
}
