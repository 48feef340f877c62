//! Command-line interface for ccodetools.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::backend::{build_analyzer, initialize_runtime};
use ccodetools_api::{AnalyzerConfig, AnalyzerResult, CAnalyzer};

/// Exit codes.
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Structural analysis of C source files.
///
/// Every subcommand analyzes one file and prints JSON on stdout. Settings
/// are read from CCODETOOLS_* environment variables first; flags override
/// them. Set RUST_LOG to see diagnostics on stderr.
#[derive(Parser, Debug)]
#[command(name = "ccodetools")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Analysis backend: tree-sitter or clang
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Disable the content-hash cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Argument passed to libclang (repeatable, replaces the default -std=c11)
    #[arg(long = "clang-arg", global = true, allow_hyphen_values = true)]
    pub clang_args: Vec<String>,

    /// Directory containing libclang
    #[arg(long, global = true)]
    pub libclang_path: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full structural analysis of a file
    Analyze(FileArgs),
    /// Function definitions
    Functions(FileArgs),
    /// Body text of a function
    Body(FunctionArgs),
    /// Includes, defines and conditionals
    Directives(FileArgs),
    /// Direct callees of every function
    CallGraph(FileArgs),
    /// Calls, types and macros used by a function
    Dependencies(FunctionArgs),
    /// Heuristic behaviour flags of a function
    Summary(FunctionArgs),
    /// File-scope variables
    Globals(FileArgs),
    /// Lines where an identifier occurs
    Symbol(SymbolArgs),
    /// return and goto statements of a function
    ErrorPaths(FunctionArgs),
    /// I/O calls and allocation of a function
    SideEffects(FunctionArgs),
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// C source file
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct FunctionArgs {
    /// C source file
    pub file: PathBuf,

    /// Function name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct SymbolArgs {
    /// C source file
    pub file: PathBuf,

    /// Identifier to search for
    pub symbol: String,
}

impl Commands {
    /// File the command operates on
    pub fn file(&self) -> &Path {
        match self {
            Commands::Analyze(args)
            | Commands::Functions(args)
            | Commands::Directives(args)
            | Commands::CallGraph(args)
            | Commands::Globals(args) => &args.file,
            Commands::Body(args)
            | Commands::Dependencies(args)
            | Commands::Summary(args)
            | Commands::ErrorPaths(args)
            | Commands::SideEffects(args) => &args.file,
            Commands::Symbol(args) => &args.file,
        }
    }
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> AnalyzerResult<AnalyzerConfig> {
        self.apply(AnalyzerConfig::from_env()?)
    }

    /// Apply command-line overrides to `config`
    pub fn apply(&self, mut config: AnalyzerConfig) -> AnalyzerResult<AnalyzerConfig> {
        if let Some(backend) = &self.backend {
            config = config.with_backend(backend.parse()?);
        }
        if self.no_cache {
            config = config.with_cache(false);
        }
        if !self.clang_args.is_empty() {
            config = config.with_clang_arguments(self.clang_args.clone());
        }
        if let Some(path) = &self.libclang_path {
            config = config.with_libclang_path(path);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Run one command end to end
pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config()?;

    let file = cli.command.file();
    if !file.is_file() {
        return Err(format!("file not found: {}", file.display()).into());
    }

    let runtime = initialize_runtime(&config)?;
    let analyzer = build_analyzer(&config, runtime.as_ref())?;

    if let Commands::Body(args) = &cli.command {
        return match analyzer.get_function_body(&args.file, &args.name)? {
            Some(body) => {
                println!("{body}");
                Ok(())
            }
            None => Err(format!(
                "function '{}' not found in {}",
                args.name,
                args.file.display()
            )
            .into()),
        };
    }

    let output = execute(analyzer.as_ref(), &cli.command)?;
    let rendered = if cli.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{rendered}");
    Ok(())
}

/// Run a JSON-producing command against `analyzer`
pub fn execute(analyzer: &dyn CAnalyzer, command: &Commands) -> Result<Value, Box<dyn Error>> {
    let value = match command {
        Commands::Analyze(args) => serde_json::to_value(analyzer.analyze_file(&args.file)?)?,
        Commands::Functions(args) => serde_json::to_value(analyzer.list_functions(&args.file)?)?,
        Commands::Body(args) => {
            serde_json::to_value(analyzer.get_function_body(&args.file, &args.name)?)?
        }
        Commands::Directives(args) => {
            serde_json::to_value(analyzer.get_preprocessor_directives(&args.file)?)?
        }
        Commands::CallGraph(args) => serde_json::to_value(analyzer.get_call_graph(&args.file)?)?,
        Commands::Dependencies(args) => {
            serde_json::to_value(analyzer.get_function_dependencies(&args.file, &args.name)?)?
        }
        Commands::Summary(args) => {
            serde_json::to_value(analyzer.summarize_function(&args.file, &args.name)?)?
        }
        Commands::Globals(args) => serde_json::to_value(analyzer.list_globals(&args.file)?)?,
        Commands::Symbol(args) => {
            serde_json::to_value(analyzer.find_symbol(&args.file, &args.symbol)?)?
        }
        Commands::ErrorPaths(args) => {
            serde_json::to_value(analyzer.get_error_handling_paths(&args.file, &args.name)?)?
        }
        Commands::SideEffects(args) => {
            serde_json::to_value(analyzer.list_side_effects(&args.file, &args.name)?)?
        }
    };
    Ok(value)
}
