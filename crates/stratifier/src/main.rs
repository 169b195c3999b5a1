use ast::{AstError, Program};
use clap::Parser;
use common::{get_example_files, AllResultsFormatter, Args, EXAMPLE_DIR};
use std::path::Path;
use std::process::ExitCode;
use stratifier::{render, RenderFormat, StratifyError, Stratifier};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Ast(#[from] AstError),
    #[error(transparent)]
    Stratify(#[from] StratifyError),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    if args.should_process_all() {
        return run_all_examples();
    }

    match run(Path::new(args.program()), &args) {
        Ok(stats) => {
            info!("{} stratified ({stats})", args.program_name());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Stratify one program, logging the graph and the strata. Returns a
/// one-line summary.
fn run(path: &Path, args: &Args) -> Result<String, CliError> {
    let program = Program::load(path)?;
    let stratifier = Stratifier::from_program(&program)?;
    let graph = stratifier.precedence_graph();

    info!("{graph}");
    if let Some(target) = args.dot() {
        let format = if args.html() {
            RenderFormat::Html
        } else {
            RenderFormat::Dot
        };
        let title = path.display().to_string();
        render::emit_best_effort(graph, format, &title, target);
    }

    let recursive_cnt = stratifier
        .is_recursive_stratum_bitmap()
        .iter()
        .filter(|b| **b)
        .count();
    info!(
        "Stratification ({} strata, {} recursive):{}",
        stratifier.strata().len(),
        recursive_cnt,
        stratifier
    );
    Ok(format!(
        "{} relations, {} strata, {} recursive",
        program.relations().len(),
        stratifier.strata().len(),
        recursive_cnt
    ))
}

fn run_all_examples() -> ExitCode {
    let files = match get_example_files(EXAMPLE_DIR) {
        Ok(files) if !files.is_empty() => files,
        Ok(_) => {
            error!("No .json files found in {EXAMPLE_DIR} directory");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("Error reading example directory '{EXAMPLE_DIR}': {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut formatter = AllResultsFormatter::new("stratifier", files.len());
    for path in &files {
        let file_name = path.display().to_string();
        formatter.begin(&file_name);
        let args = Args {
            program: file_name.clone(),
            dot: None,
            html: false,
        };
        match run(path, &args) {
            Ok(stats) => formatter.report_success(&file_name, Some(&stats)),
            Err(e) => formatter.report_failure(&file_name, &e),
        }
    }

    if formatter.finish() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
