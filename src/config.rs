// src/config.rs
use crate::constants::{DEFAULT_FETCH_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::types::{Credential, Locale};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Locale to resolve translations for
    #[arg(short, long, default_value = "en-US")]
    pub locale: String,

    /// Locale used when an item has no translation for --locale
    #[arg(long)]
    pub fallback_locale: Option<String>,

    /// Use CMS_ADMIN_TOKEN instead of CMS_PUBLIC_TOKEN
    #[arg(long, default_value_t = false)]
    pub elevated: bool,

    /// Seconds before a CMS request is abandoned
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Attempts per request for transient failures (1 = no retry)
    #[arg(long, default_value_t = DEFAULT_FETCH_ATTEMPTS)]
    pub attempts: u32,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Listing options shared by collection commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Maximum number of items
    #[arg(long)]
    pub limit: Option<u32>,

    /// Items to skip
    #[arg(long)]
    pub offset: Option<u32>,

    /// Sort fields, comma separated, '-' prefix for descending
    #[arg(long)]
    pub sort: Option<String>,

    /// Filter as JSON, e.g. '{"stars":{"_gte":4}}'
    #[arg(long)]
    pub filter: Option<String>,

    /// Full-text search term
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List hotels
    Hotels {
        #[command(flatten)]
        list: ListArgs,
        /// Only hotels in this destination
        #[arg(long)]
        destination: Option<String>,
        /// Only featured hotels
        #[arg(long, default_value_t = false)]
        featured: bool,
    },
    /// One hotel with its rooms
    Hotel { slug: String },
    /// List destinations
    Destinations {
        #[command(flatten)]
        list: ListArgs,
    },
    /// One destination with its hotels
    Destination { slug: String },
    /// List categories
    Categories {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Rooms of a hotel
    Rooms { hotel_id: String },
    /// List pages
    Pages {
        #[command(flatten)]
        list: ListArgs,
    },
    /// One page
    Page { slug: String },
    /// A navigation menu
    Navigation {
        menu: String,
        /// Nest entries under their parents
        #[arg(long, default_value_t = false)]
        tree: bool,
    },
    /// Interface strings
    Strings {
        #[arg(long)]
        namespace: Option<String>,
    },
    /// All slugs of hotels or destinations
    Slugs { collection: SlugCollection },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugCollection {
    Hotels,
    Destinations,
}

/// Resolved configuration, validated and ready to build the client.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub base_url: String,
    pub asset_url: String,
    pub locale: Locale,
    pub fallback_locale: Option<Locale>,
    pub credential: Credential,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub verbose: bool,
    pub command: Command,
}

impl ContentConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Same as [`resolve`](Self::resolve) with an injectable variable lookup.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let base_url = env("CMS_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration("CMS_URL environment variable not set".to_string())
            })?;
        let asset_url = env("CMS_ASSET_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| base_url.clone());

        let (token_var, token) = if cli.elevated {
            ("CMS_ADMIN_TOKEN", env("CMS_ADMIN_TOKEN"))
        } else {
            ("CMS_PUBLIC_TOKEN", env("CMS_PUBLIC_TOKEN"))
        };
        let token = token.ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", token_var))
        })?;
        let credential = if cli.elevated {
            Credential::elevated(token)?
        } else {
            Credential::public(token)?
        };

        let locale = Locale::new(cli.locale)?;
        let fallback_locale = cli.fallback_locale.map(Locale::new).transpose()?;

        Ok(ContentConfig {
            base_url,
            asset_url,
            locale,
            fallback_locale,
            credential,
            timeout: Duration::from_secs(cli.timeout_secs.max(1)),
            retry: RetryPolicy {
                max_attempts: cli.attempts.max(1),
                ..RetryPolicy::default()
            },
            verbose: cli.verbose,
            command: cli.command,
        })
    }
}
