// src/main.rs

use anyhow::Context;
use clap::Parser;
use content_resolver::config::{Command, ListArgs, SlugCollection};
use content_resolver::{
    nest_navigation, AssetResolver, CmsHttpClient, CommandLineInput, ContentClient, ContentConfig,
    FilterSpec, ItemNormalizer, QueryOptions, RequestContext,
};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde::Serialize;
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration. Console output goes to stderr so stdout
/// stays clean JSON.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("content_resolver.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the collection-level options from shared listing flags.
fn list_options(list: &ListArgs) -> anyhow::Result<QueryOptions> {
    let mut options = QueryOptions::new();
    if let Some(raw) = &list.filter {
        let json: serde_json::Value =
            serde_json::from_str(raw).context("--filter must be a JSON object")?;
        let filter = FilterSpec::from_json(&json).context("--filter must be a JSON object")?;
        options = options.with_filter(filter);
    }
    if let Some(limit) = list.limit {
        options = options.with_limit(limit);
    }
    if let Some(offset) = list.offset {
        options = options.with_offset(offset);
    }
    if let Some(sort) = &list.sort {
        options = options.with_sort(sort.as_str());
    }
    if let Some(search) = &list.search {
        options = options.with_search(search.as_str());
    }
    Ok(options)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one command against the CMS and prints the normalized result.
async fn run(config: &ContentConfig) -> anyhow::Result<()> {
    let transport = CmsHttpClient::with_timeout(&config.base_url, config.timeout)?;
    let normalizer = ItemNormalizer::new(AssetResolver::new(&config.asset_url)?);
    let client = ContentClient::new(Arc::new(transport), normalizer).with_retry(config.retry);

    let mut ctx = RequestContext::new(config.locale.clone(), config.credential.clone());
    if let Some(fallback) = &config.fallback_locale {
        ctx = ctx.with_fallback(fallback.clone());
    }
    log::info!(
        "Resolving content for {} with {}",
        ctx.locale(),
        ctx.credential
    );

    match &config.command {
        Command::Hotels {
            list,
            destination,
            featured,
        } => {
            let mut options = list_options(list)?;
            if *featured {
                let filter = FilterSpec::new()
                    .eq("featured", true)
                    .merged_over(&options.filter);
                options = options.with_filter(filter);
            }
            let hotels = match destination {
                Some(slug) => client.hotels_in_destination(slug, options, &ctx).await,
                None => client.hotels(options, &ctx).await,
            };
            print_json(&hotels)
        }
        Command::Hotel { slug } => print_json(&client.hotel_by_slug(slug, &ctx).await),
        Command::Destinations { list } => {
            print_json(&client.destinations(list_options(list)?, &ctx).await)
        }
        Command::Destination { slug } => {
            print_json(&client.destination_by_slug(slug, &ctx).await)
        }
        Command::Categories { list } => {
            print_json(&client.categories(list_options(list)?, &ctx).await)
        }
        Command::Rooms { hotel_id } => print_json(&client.rooms_for_hotel(hotel_id, &ctx).await),
        Command::Pages { list } => print_json(&client.pages(list_options(list)?, &ctx).await),
        Command::Page { slug } => print_json(&client.page_by_slug(slug, &ctx).await),
        Command::Navigation { menu, tree } => {
            let navigation = client.navigation(menu, &ctx).await;
            if *tree {
                print_json(&nest_navigation(&navigation.data))
            } else {
                print_json(&navigation)
            }
        }
        Command::Strings { namespace } => {
            print_json(&client.ui_strings(namespace.as_deref(), &ctx).await)
        }
        Command::Slugs { collection } => {
            let slugs = match collection {
                SlugCollection::Hotels => client.hotel_slugs(&ctx).await,
                SlugCollection::Destinations => client.destination_slugs(&ctx).await,
            };
            print_json(&slugs)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ContentConfig::resolve(cli)?;

    run(&config).await?;

    Ok(())
}
