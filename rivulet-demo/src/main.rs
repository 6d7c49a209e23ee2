// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::{Context, Result};
use clap::Parser;
use rivulet_demo::{
    showcase, DataSource, DemoConfig, DispatchOutcome, DispatchSettings, Dispatcher,
    FilePreferences, HttpFetcher, MemoryPreferences, Operator, PostBoard, PreferenceStore,
    TracingIndicator, ValueForm,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Dispatch reactive combination operators against a JSON posts API.
#[derive(Parser, Debug)]
#[command(name = "rivulet-demo", version)]
struct Args {
    /// Operators to dispatch, in order (e.g. fork-join, merge, replay-subject)
    operators: Vec<Operator>,

    /// TOML configuration file (defaults to ./rivulet.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Numeric selection: 0 fork-join, 1 zip, 2 combine-latest, 3 merge, else no-op
    #[arg(long, allow_negative_numbers = true)]
    index: Option<i64>,

    /// Store VALUE under the preference key, then read it back
    #[arg(long, value_name = "VALUE")]
    save: Option<String>,

    /// Read the stored preference
    #[arg(long)]
    load: bool,

    /// Run the cold-producer basics before dispatching
    #[arg(long)]
    basics: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let config = DemoConfig::load(args.config.as_deref()).context("loading configuration")?;
    info!(base_url = %config.base_url, user_id = config.user_id, "rivulet-demo: starting");

    if args.basics {
        showcase::run_basics().await;
    }

    if args.save.is_some() || args.load {
        run_preferences(&config, args.save, args.load).await?;
    }

    let fetcher = HttpFetcher::new(config.base_url.clone(), config.request_timeout())
        .context("building http client")?;
    let source = DataSource::new(Arc::new(fetcher), config.user_id);
    let dispatcher = Arc::new(Dispatcher::new(
        source,
        PostBoard::new(),
        Arc::new(TracingIndicator),
        DispatchSettings::from_config(&config),
    ));

    let on_interrupt = Arc::clone(&dispatcher);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("rivulet-demo: interrupted");
            on_interrupt.teardown();
        }
    });

    dispatcher.load_initial().await;

    let mut operators = args.operators;
    if let Some(index) = args.index {
        operators.push(Operator::from_index(index));
    }

    for operator in operators {
        if dispatcher.is_torn_down() {
            break;
        }
        match dispatcher.dispatch(operator).await {
            DispatchOutcome::Failed { kind, message } => {
                warn!(%operator, ?kind, %message, "rivulet-demo: dispatch failed");
            }
            outcome => info!(%operator, ?outcome, "rivulet-demo: dispatched"),
        }
    }

    let rows = dispatcher.board().rows();
    println!("{}", serde_json::to_string_pretty(&rows)?);

    dispatcher.teardown();
    Ok(())
}

async fn run_preferences(config: &DemoConfig, save: Option<String>, load: bool) -> Result<()> {
    let store: Arc<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => Arc::new(FilePreferences::new(path)),
        None => Arc::new(MemoryPreferences::new()),
    };
    let mut form = ValueForm::new(store, config.preference_key.clone());

    if let Some(value) = save {
        form.set_input(value);
        form.save().await.context("saving preference")?;
    } else if load {
        form.load().await.context("loading preference")?;
    }

    println!(
        "{} = {}",
        config.preference_key,
        form.stored().unwrap_or("<unset>")
    );
    Ok(())
}
