mod cli;

use clap::Parser;
use cli::{Cli, Command};
use formforge_core::api::{ApiVersion, scout_resolver};
use formforge_core::config::FormforgeConfig;
use formforge_core::error::{FormforgeError, Result};
use formforge_core::operation::{self, BatchReport, OperationSettings};
use formforge_core::source_model::JavaEnvironment;
use formforge_core::source_model::stubs::register_runtime_stubs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    info!("Loading Formforge configuration");
    let config = match FormforgeConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let requested = cli
        .api_version
        .as_deref()
        .unwrap_or(&config.generate.api_version);
    let api = scout_resolver().resolve(&ApiVersion::parse(requested)?)?;
    info!(requested = %requested, max_level = %api.max_level(), "API binding resolved");

    let mut env = JavaEnvironment::new();
    register_runtime_stubs(&mut env, &api)?;
    for root in &config.generate.source_roots {
        let count = env.load_source_folder(root)?;
        debug!(root = %root, count, "Source root loaded");
    }

    let settings = OperationSettings {
        line_delimiter: config.general.line_delimiter,
        todo_user: config.general.todo_user.clone(),
    };
    let cancel = AtomicBool::new(false);

    match cli.command {
        Command::Generate { types } => {
            let targets = target_types(&env, types);
            let report = operation::update_dtos(&env, &api, &targets, &settings, &cancel);
            write_outputs(&config, &report)?;
            summarize("generate", &report)
        }
        Command::Wellform { types } => {
            let targets = target_types(&env, types);
            let report = operation::wellform_types(&env, &targets, &cancel);
            write_outputs(&config, &report)?;
            summarize("wellform", &report)
        }
        Command::Info => {
            println!("requested api:  {}", requested);
            println!("resolved level: {}", api.max_level());
            println!(
                "data objects:   {}",
                if api.data_object().is_some() {
                    "supported"
                } else {
                    "not supported"
                }
            );
            println!("source types:   {}", env.source_type_names().count());
            Ok(())
        }
    }
}

/// Explicit targets, or every registered source type.
fn target_types(env: &JavaEnvironment, explicit: Vec<String>) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit;
    }
    let mut all: Vec<String> = env.source_type_names().map(str::to_string).collect();
    all.sort();
    all
}

/// Write produced units below the configured output root, one file per
/// primary type, package segments as directories.
fn write_outputs(config: &FormforgeConfig, report: &BatchReport) -> Result<()> {
    let Some(output_root) = &config.generate.output_root else {
        for unit in &report.outputs {
            println!("{}", unit.source);
        }
        return Ok(());
    };
    for unit in &report.outputs {
        let mut path = PathBuf::from(output_root);
        for segment in unit.target_fqn.split('.') {
            path.push(segment);
        }
        path.set_extension("java");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &unit.source)?;
        info!(path = %path.display(), "Unit written");
    }
    Ok(())
}

fn summarize(operation: &str, report: &BatchReport) -> Result<()> {
    info!(
        operation,
        outputs = report.outputs.len(),
        errors = report.errors.len(),
        cancelled = report.cancelled,
        "Batch finished"
    );
    for (item, e) in &report.errors {
        // a model type that simply drives no DTO is not a failure
        if matches!(e, FormforgeError::NotAModelType { .. }) {
            debug!(item = %item, "Skipped: not a model type");
            continue;
        }
        error!(item = %item, error = %e, "Item failed");
    }
    let hard_errors = report
        .errors
        .iter()
        .filter(|(_, e)| !matches!(e, FormforgeError::NotAModelType { .. }))
        .count();
    if hard_errors > 0 {
        return Err(FormforgeError::generate(
            "<batch>",
            format!("{} item(s) failed", hard_errors),
        ));
    }
    Ok(())
}
