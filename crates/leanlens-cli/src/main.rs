mod display;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use leanlens_core::config::{self, LeanLensConfig, OutputFormat};
use leanlens_core::storage::{AssessmentStorage, FileStore};
use leanlens_core::{analyzer, loader};
use leanlens_core::{AssessmentId, Process, ProcessAnalysis, ProcessAssessment, ProcessId};
use log::info;
use std::path::{Path, PathBuf};

/// Index of the final intake stage; saved assessments are marked as having reached it.
const COMPLETED_WIZARD_STEP: u32 = 3;

#[derive(Parser)]
#[command(
    name = "leanlens",
    version,
    about = "LeanLens — Business process analyzer",
    long_about = "Analyze a business process description for Lean waste, bottlenecks and automation opportunities.\n\nDescribe your process steps in YAML or JSON; LeanLens scores it and tells you what to fix first."
)]
struct Cli {
    /// Path to a config file (defaults to .leanlens/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze process description files for waste and bottlenecks
    Analyze {
        /// Path to a process file or a directory of process files
        #[arg(default_value = "processes/")]
        path: PathBuf,

        /// Output format (overrides the configured default)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Save the process, its analysis and an assessment record
        #[arg(long)]
        save: bool,
    },

    /// Show a previously saved analysis
    Show {
        /// Process id the analysis was saved under
        process_id: String,

        /// Output format (overrides the configured default)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List saved assessments
    List,

    /// Delete a saved assessment together with its process and analysis
    Delete {
        /// Assessment id to delete
        assessment_id: String,
    },

    /// Remove all saved LeanLens data
    Clear,

    /// Write a sample process description to start from
    Init {
        /// Destination file
        #[arg(default_value = "process.yml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = config::resolve_config(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Analyze { path, format, save } => {
            cmd_analyze(&config, &path, resolve_format(&config, format), save)
        }
        Commands::Show { process_id, format } => {
            cmd_show(&config, &process_id, resolve_format(&config, format))
        }
        Commands::List => cmd_list(&config),
        Commands::Delete { assessment_id } => cmd_delete(&config, &assessment_id),
        Commands::Clear => cmd_clear(&config),
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "leanlens", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn resolve_format(config: &LeanLensConfig, arg: Option<FormatArg>) -> OutputFormat {
    arg.map(OutputFormat::from).unwrap_or(config.output.format)
}

fn open_storage(config: &LeanLensConfig) -> Result<AssessmentStorage<FileStore>> {
    let store = FileStore::open(&config.storage.data_dir).with_context(|| {
        format!(
            "Failed to open data directory '{}'",
            config.storage.data_dir.display()
        )
    })?;
    Ok(AssessmentStorage::new(store, config.storage.namespace.clone()))
}

fn print_analysis(process: &Process, analysis: &ProcessAnalysis, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => display::print_analysis_report(process, analysis),
        _ => print_machine(analysis, format)?,
    }
    Ok(())
}

fn cmd_analyze(config: &LeanLensConfig, path: &Path, format: OutputFormat, save: bool) -> Result<()> {
    let files = loader::discover_process_files(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    if files.is_empty() {
        anyhow::bail!(
            "No process files found at '{}'. \
            Make sure the path points to a .yml, .yaml or .json process description.",
            path.display()
        );
    }

    let mut storage = if save { Some(open_storage(config)?) } else { None };
    let mut machine_output = Vec::new();

    for file in &files {
        let process = loader::load_process(file)
            .with_context(|| format!("Failed to load {}", file.display()))?;

        let analysis = analyzer::analyze_process(&process);

        if let Some(storage) = storage.as_mut() {
            let assessment = ProcessAssessment::completed(process.id.clone(), COMPLETED_WIZARD_STEP);
            storage.save_process(&process)?;
            storage.save_analysis(&analysis)?;
            storage.save_assessment(&assessment)?;
            info!("Saved assessment {} for process {}", assessment.id, process.id);
            if format == OutputFormat::Text {
                display::print_saved(&process, &assessment);
            }
        }

        if format == OutputFormat::Text {
            display::print_analysis_report(&process, &analysis);
        } else {
            machine_output.push(analysis);
        }
    }

    // A single file prints one document; several print one array.
    match machine_output.as_slice() {
        [] => {}
        [analysis] => print_machine(analysis, format)?,
        analyses => print_machine(analyses, format)?,
    }

    Ok(())
}

fn print_machine<T: serde::Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    print!("{}", render_machine(value, format)?);
    Ok(())
}

fn render_machine<T: serde::Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Text => String::new(),
    })
}

fn cmd_show(config: &LeanLensConfig, process_id: &str, format: OutputFormat) -> Result<()> {
    let storage = open_storage(config)?;
    let process_id = ProcessId::from(process_id);

    let analysis = storage
        .load_analysis(&process_id)?
        .with_context(|| format!("No saved analysis for process '{}'", process_id))?;
    let process = storage
        .load_process(&process_id)?
        .with_context(|| format!("No saved process '{}'", process_id))?;

    print_analysis(&process, &analysis, format)
}

fn cmd_list(config: &LeanLensConfig) -> Result<()> {
    let storage = open_storage(config)?;

    let mut rows = Vec::new();
    for id in storage.list_assessments()? {
        let Some(assessment) = storage.load_assessment(&id)? else {
            continue;
        };
        let process = storage.load_process(&assessment.process_id)?;
        let score = storage
            .load_analysis(&assessment.process_id)?
            .map(|a| a.overall_score);
        rows.push(display::AssessmentRow {
            assessment,
            process_name: process.map(|p| p.name),
            score,
        });
    }

    rows.sort_by(|a, b| b.assessment.updated_at.cmp(&a.assessment.updated_at));
    display::print_assessment_list(&rows);
    Ok(())
}

fn cmd_delete(config: &LeanLensConfig, assessment_id: &str) -> Result<()> {
    let mut storage = open_storage(config)?;
    let id = AssessmentId::from(assessment_id);

    let assessment = storage
        .load_assessment(&id)?
        .with_context(|| format!("No saved assessment '{}'", id))?;

    storage.delete_analysis(&assessment.process_id)?;
    storage.delete_process(&assessment.process_id)?;
    storage.delete_assessment(&id)?;

    println!("Deleted assessment {} (process {})", id, assessment.process_id);
    Ok(())
}

fn cmd_clear(config: &LeanLensConfig) -> Result<()> {
    let mut storage = open_storage(config)?;
    let removed = storage.clear_all()?;
    println!(
        "Removed {} saved entries from namespace '{}'",
        removed,
        storage.namespace()
    );
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    std::fs::write(path, loader::SAMPLE_PROCESS_YAML)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Sample process written to {}", path.display());
    println!("Run `leanlens analyze {}` to analyze it", path.display());
    Ok(())
}
