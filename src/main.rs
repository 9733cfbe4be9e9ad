use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use saikac::config::Config;
use saikac::diagnostics::{Diagnostic, TranspileError, diagnostic_json, render_diagnostic};
use saikac::lexer::Tokenizer;

#[derive(Parser)]
#[command(name = "saikac", version, about = "The Saika to Go compiler")]
struct Cli {
    /// Path to a saika.toml (defaults to discovery from the source file's directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Human)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a .saika source file to Go
    Emit {
        /// Source file path
        file: PathBuf,
        /// Output path. If omitted, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report diagnostics without writing output
    Check {
        /// Source file path
        file: PathBuf,
    },
    /// Print the token stream of a source file
    Tokens {
        /// Source file path
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Emit { file, output } => emit(&cli, file, output.as_deref()),
        Commands::Check { file } => check(&cli, file),
        Commands::Tokens { file } => tokens(&cli, file),
    };

    if let Err(err) = result {
        std::process::exit(report(&cli, err));
    }
}

fn load_config(cli: &Cli, file: &Path) -> Result<Config, TranspileError> {
    if let Some(path) = &cli.config {
        return Config::load(path);
    }
    let dir = file.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
    Ok(Config::discover(dir)?.unwrap_or_default())
}

fn read_source(file: &Path) -> Result<String, Failure> {
    std::fs::read_to_string(file).map_err(|e| Failure::new(TranspileError::io(file, e)))
}

fn emit(cli: &Cli, file: &Path, output: Option<&Path>) -> Result<(), Failure> {
    let config = load_config(cli, file).map_err(Failure::new)?;
    let source = read_source(file)?;
    let name = file.to_string_lossy();
    let go = saikac::transpile_with(&source, Some(&*name), &config)
        .map_err(|err| Failure::with_source(err, source.clone()))?;

    match output {
        Some(path) => {
            std::fs::write(path, go).map_err(|e| Failure::new(TranspileError::io(path, e)))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{go}"),
    }
    Ok(())
}

fn check(cli: &Cli, file: &Path) -> Result<(), Failure> {
    let config = load_config(cli, file).map_err(Failure::new)?;
    let source = read_source(file)?;
    let name = file.to_string_lossy();
    saikac::transpile_with(&source, Some(&*name), &config).map_err(|err| Failure::with_source(err, source.clone()))?;
    if cli.format == Format::Human {
        eprintln!("{}: ok", file.display());
    }
    Ok(())
}

fn tokens(cli: &Cli, file: &Path) -> Result<(), Failure> {
    let source = read_source(file)?;
    let name = file.to_string_lossy();
    let diagnostics = {
        let mut tokenizer = Tokenizer::with_file(source.as_str(), &*name);
        for token in tokenizer.by_ref() {
            match cli.format {
                Format::Human => {
                    println!("{}:{}\t{}\t{:?}", token.position.line, token.position.column, token.kind, token.literal)
                }
                Format::Json => match serde_json::to_string(&token) {
                    Ok(line) => println!("{line}"),
                    Err(e) => eprintln!("error: {e}"),
                },
            }
        }
        tokenizer.take_diagnostics()
    };
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(Failure::with_source(TranspileError::Diagnostics(diagnostics), source))
    }
}

/// A failed command, with the source text when diagnostics need rendering.
struct Failure {
    error: TranspileError,
    source: Option<String>,
}

impl Failure {
    fn new(error: TranspileError) -> Self {
        Self { error, source: None }
    }

    fn with_source(error: TranspileError, source: String) -> Self {
        Self { error, source: Some(source) }
    }
}

/// Print a failure to stderr and return the process exit code.
fn report(cli: &Cli, failure: Failure) -> i32 {
    match (&failure.error, failure.source.as_deref()) {
        (TranspileError::Diagnostics(diags), Some(source)) => {
            for diag in diags {
                print_diagnostic(cli.format, source, diag);
            }
            eprintln!("error: {}", failure.error);
            1
        }
        (err, _) => {
            eprintln!("error: {err}");
            2
        }
    }
}

fn print_diagnostic(format: Format, source: &str, diag: &Diagnostic) {
    match format {
        Format::Human => {
            if render_diagnostic(source, diag).is_err() {
                eprintln!("{diag}");
            }
        }
        Format::Json => match diagnostic_json(diag) {
            Ok(line) => eprintln!("{line}"),
            Err(_) => eprintln!("{diag}"),
        },
    }
}
