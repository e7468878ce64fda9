// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;

use annofilter::cli::{Args, Command, OutputFormat};
use annofilter::config::{self, Config};
use annofilter::filter::{self, AnnotationPredicate};
use annofilter::input;
use annofilter::kubernetes::{self, ClusterClient, KNOWN_KINDS};
use annofilter::output::FilterResult;
use annofilter::progress::FetchProgress;

/// Initialize logging with file output and optional stderr
fn init_logging(verbose: bool) {
    use tracing_rolling_file::{RollingConditionBase, RollingFileAppenderBase};
    use tracing_subscriber::fmt::format::FmtSpan;

    let log_dir = config::base_dir()
        .map(|p| p.join("log"))
        .unwrap_or_else(|_| std::path::PathBuf::from("."));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        return;
    }

    // Rotate daily or at 10MB, keep 5 files
    let log_path = log_dir.join("annofilter.log");
    let condition = RollingConditionBase::new()
        .daily()
        .max_size(10 * 1024 * 1024);

    let file_appender = match RollingFileAppenderBase::new(log_path, condition, 5) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {}", e);
            return;
        }
    };

    let filter = if verbose {
        "annofilter=debug"
    } else {
        "annofilter=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file_appender))
        .with_ansi(false)
        .with_span_events(FmtSpan::NONE);

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::NONE)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A provider may already be installed; either way TLS has one to use
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let args = Args::parse();

    // Always log to ~/.annofilter/log/annofilter.log, and to stderr with -v
    init_logging(args.verbose);

    match &args.command {
        Some(Command::Kinds) => {
            print_kinds();
            Ok(())
        }
        Some(Command::Contexts) => print_contexts(),
        Some(Command::Config {
            context,
            resources,
            namespace,
            clear,
        }) => run_config(context.clone(), resources.clone(), namespace.clone(), *clear),
        None => run_filter(&args).await,
    }
}

async fn run_filter(args: &Args) -> Result<()> {
    let key = args
        .annotation
        .as_deref()
        .ok_or_else(|| anyhow!("--annotation <KEY> is required"))?;

    // Reject malformed predicates before touching any input
    let predicate = AnnotationPredicate::from_args(key, !args.absent, &args.equals)?;
    debug!(predicate = %predicate, "Built predicate");

    let result = match &args.file {
        Some(path) => filter_file(Path::new(path), &predicate)?,
        None => filter_cluster(args, &predicate).await?,
    };

    println!("{}", result.format(&args.output, args.no_headers));
    Ok(())
}

fn filter_file(path: &Path, predicate: &AnnotationPredicate) -> Result<FilterResult> {
    let records = input::load_records(path)?;
    let matched = filter::filter_values(&records, predicate)
        .with_context(|| format!("Cannot filter records from {}", path.display()))?;

    info!(
        file = %path.display(),
        predicate = %predicate,
        matched = matched.len(),
        total = records.len(),
        "Filtered file records"
    );

    let mut result = FilterResult::new(predicate.key());
    result.extend_values(predicate.key(), matched);
    Ok(result)
}

async fn filter_cluster(args: &Args, predicate: &AnnotationPredicate) -> Result<FilterResult> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config");
        Config::default()
    });

    let specs = if args.resources.is_empty() {
        &config.default_resources
    } else {
        &args.resources
    };
    if specs.is_empty() {
        return Err(anyhow!(
            "No resources given. Pass e.g. `nodes deploy`, or save defaults with \
             `annofilter config --resources nodes,deploy`"
        ));
    }
    let targets = kubernetes::parse_targets(specs)?;

    let context = args
        .context
        .as_deref()
        .or(config.default_context.as_deref());
    let namespace = args.namespace.as_deref().or(config.namespace.as_deref());

    let mut progress = if args.output == OutputFormat::Table {
        FetchProgress::new(context.unwrap_or("current context"), targets.len())
    } else {
        FetchProgress::hidden(targets.len())
    };

    let client = ClusterClient::connect(context).await?;
    let mut result = FilterResult::new(predicate.key());

    for target in &targets {
        let name = target.to_string();
        progress.fetching(&name);

        let snapshot = client.list(target, namespace).await?;
        let matched = filter::filter(&snapshot.items, predicate);

        info!(
            context = %client.context(),
            resource = %name,
            predicate = %predicate,
            matched = matched.len(),
            total = snapshot.items.len(),
            "Filtered resources"
        );
        progress.fetched(&name, matched.len(), snapshot.items.len());

        result.extend_objects(&snapshot.api_resource.kind, predicate.key(), matched);
    }

    progress.finish();
    Ok(result)
}

fn print_kinds() {
    let mut result = FilterResult {
        columns: vec![
            "RESOURCE".to_string(),
            "GROUP".to_string(),
            "KIND".to_string(),
            "ALIASES".to_string(),
        ],
        rows: Vec::new(),
    };
    for kind in KNOWN_KINDS {
        result.rows.push(vec![
            kind.resource.to_string(),
            if kind.group.is_empty() {
                "core".to_string()
            } else {
                kind.group.to_string()
            },
            kind.kind.to_string(),
            kind.aliases.join(","),
        ]);
    }
    println!("{}", result.format(&OutputFormat::Table, false));
}

fn print_contexts() -> Result<()> {
    let current = kubernetes::current_context();
    for name in kubernetes::list_contexts()? {
        let marker = if current.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, name);
    }
    Ok(())
}

fn run_config(
    context: Option<String>,
    resources: Option<Vec<String>>,
    namespace: Option<String>,
    clear: bool,
) -> Result<()> {
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;

    let changed = if clear {
        let was_set = config != Config::default();
        config = Config::default();
        was_set
    } else {
        if let Some(resources) = &resources {
            // Validate before persisting
            kubernetes::parse_targets(resources)?;
        }
        config.update(context, resources, namespace)
    };

    if changed {
        config.save_to(&path)?;
        info!(path = %path.display(), "Saved config");
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
