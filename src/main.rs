// Command-line entry point for json2dot.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use json2dot::application::{OutputFormat, RenderOptions, RenderUsecase};
use json2dot::domain::builder::DEFAULT_ROOT_LABEL;
use json2dot::infrastructure::logging::init_tracing;
use json2dot::infrastructure::JsonFileLoader;
use json2dot::Json2DotError;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON document to render
    input: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Label of the document root node
    #[arg(long, default_value = DEFAULT_ROOT_LABEL)]
    root_label: String,

    /// Name of the emitted digraph
    #[arg(long)]
    graph_name: Option<String>,

    /// Log more (repeat for debug/trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let err = Json2DotError::Usage(e.render().to_string());
            eprint!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("[WARN] logging disabled: {:#}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<Json2DotError>()
                .map(Json2DotError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = RenderOptions {
        root_label: cli.root_label.clone(),
        graph_name: cli.graph_name.clone(),
        format: cli.format,
    };
    let builder = options.builder();
    let exporter = options.exporter();

    let usecase = RenderUsecase {
        loader: &JsonFileLoader,
        builder: &builder,
        exporter: exporter.as_ref(),
    };

    // Rendered fully in memory, so a failure leaves no partial output behind.
    let rendered = usecase.run(&cli.input)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .map_err(|source| Json2DotError::Output { source })
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), format = ?cli.format, "graph written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| Json2DotError::Output { source })?;
        }
    }

    Ok(())
}
