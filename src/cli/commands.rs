//! Command implementations for the complaint router CLI.

use log::info;

use crate::category::CategoryLabel;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::corpus::{builtin_corpus, load_corpus};
use crate::engine::Engine;
use crate::error::Result;
use crate::routing::notifier::{LogNotifier, notify_department};

/// Execute a CLI command.
pub fn execute_command(args: RouterArgs) -> Result<()> {
    match &args.command {
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Route(route_args) => route(route_args.clone(), &args),
        Command::Departments => list_departments(&args),
    }
}

/// Load the configuration named on the command line, or the defaults.
fn load_config(cli_args: &RouterArgs) -> Result<EngineConfig> {
    match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            EngineConfig::from_file(path)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Build a ready engine: from `--model` when given, otherwise trained on the
/// built-in corpus.
fn build_engine(config: EngineConfig, cli_args: &RouterArgs) -> Result<Engine> {
    match &cli_args.model {
        Some(path) => {
            let engine = Engine::new(config)?;
            if engine.config().skip_nlp_init {
                info!("Model initialization skipped");
            } else {
                engine.load_snapshot(path)?;
                info!("Loaded model snapshot from {}", path.display());
            }
            Ok(engine)
        }
        None => Engine::with_corpus(config, &builtin_corpus()?),
    }
}

/// Classify one complaint.
fn classify(args: ClassifyArgs, cli_args: &RouterArgs) -> Result<()> {
    let mut config = load_config(cli_args)?;
    if let Some(threshold) = args.threshold {
        config = config.with_confidence_threshold(threshold);
    }
    let engine = build_engine(config, cli_args)?;

    let decision = engine.route_complaint(&args.title, &args.description);

    if let Some(complaint_id) = &args.notify {
        let notice = decision.notice(complaint_id.as_str(), args.title.as_str(), &args.description);
        notify_department(&LogNotifier::new(), &notice);
    }

    output_result(
        "Classification complete",
        &ClassificationResult {
            category: decision.prediction.category.to_string(),
            confidence: decision.prediction.confidence,
            accepted: decision.prediction.accepted,
            threshold: engine.gate().threshold(),
            department: decision.department,
        },
        cli_args,
    )
}

/// Train a model and optionally save it.
fn train(args: TrainArgs, cli_args: &RouterArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let corpus = match &args.corpus {
        Some(path) => load_corpus(path)?,
        None => builtin_corpus()?,
    };

    let engine = Engine::new(config)?;
    let report = engine.retrain(&corpus)?;

    if let Some(output) = &args.output {
        engine.save_snapshot(output)?;
    }

    output_result(
        "Training complete",
        &TrainingResult {
            examples: report.n_examples,
            class_counts: report
                .class_counts
                .iter()
                .map(|(category, count)| (category.to_string(), *count))
                .collect(),
            vocabulary_size: report.vocabulary_size,
            training_accuracy: report.training_accuracy,
            duration_ms: report.duration.as_millis() as u64,
            snapshot: args
                .output
                .as_ref()
                .map(|path| path.to_string_lossy().to_string()),
        },
        cli_args,
    )
}

/// Show the department for a category name.
fn route(args: RouteArgs, cli_args: &RouterArgs) -> Result<()> {
    let engine = Engine::new(load_config(cli_args)?)?;
    let record = engine.directory().resolve_name(&args.category);

    if args.category.parse::<CategoryLabel>().is_err() {
        info!(
            "Unknown category {:?}, using the fallback department",
            args.category
        );
    }

    output_result("Department", record, cli_args)
}

/// List the department table.
fn list_departments(cli_args: &RouterArgs) -> Result<()> {
    let engine = Engine::new(load_config(cli_args)?)?;

    output_result(
        "Departments",
        &DepartmentList {
            departments: engine.directory().records().cloned().collect(),
        },
        cli_args,
    )
}
