use crate::error::{LeanLensError, Result};
use crate::process::Process;
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Serialization of a process description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yml") | Some("yaml") => Ok(InputFormat::Yaml),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(LeanLensError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse, normalize and validate a process description.
pub fn parse_process(content: &str, format: InputFormat) -> Result<Process> {
    let mut process: Process = match format {
        InputFormat::Yaml => serde_yaml::from_str(content)?,
        InputFormat::Json => serde_json::from_str(content)?,
    };
    process.normalize();
    process.validate()?;
    Ok(process)
}

/// Load a process description from a `.yml`, `.yaml` or `.json` file.
pub fn load_process(path: &Path) -> Result<Process> {
    let format = InputFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let process = parse_process(&content, format)?;
    debug!(
        "Loaded process '{}' ({} steps) from {}",
        process.name,
        process.steps.len(),
        path.display()
    );
    Ok(process)
}

/// Resolve `path` to the process files it names: the file itself, or every
/// supported file below a directory, sorted. Hidden entries below the
/// directory (such as `.leanlens/data`) are skipped.
pub fn discover_process_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(LeanLensError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Path '{}' does not exist", path.display()),
        )));
    }

    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let base = glob::Pattern::escape(&path.display().to_string());

    let mut files = Vec::new();
    for ext in ["yml", "yaml", "json"] {
        let pattern = format!("{}/**/*.{}", base, ext);
        files.extend(
            glob::glob_with(&pattern, options)?
                .filter_map(|r| r.ok())
                .filter(|f| !is_hidden_below(path, f)),
        );
    }
    files.sort();
    Ok(files)
}

fn is_hidden_below(base: &Path, file: &Path) -> bool {
    file.strip_prefix(base).map_or(false, |rel| {
        rel.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    })
}

/// Starter template written by `leanlens init`.
pub const SAMPLE_PROCESS_YAML: &str = r#"# LeanLens process description
name: Customer onboarding
purpose: Get new customers set up and billing correctly
trigger: Signed contract received
# multiple_daily | daily | weekly | monthly | quarterly | ad_hoc
frequency: weekly
stakeholders:
  - Sales
  - Finance
  - Support
steps:
  - name: Collect customer details
    description: Copy contract details into the CRM
    responsible_role: Sales
    estimated_duration: 30
    inputs: [Signed contract]
    outputs: [Customer record]
    tools: [Salesforce, Excel]
    pain_points:
      - Manual data entry from PDF contracts
      - Details often missing or wrong
  - name: Wait for credit approval
    description: Finance reviews the account before billing is set up
    responsible_role: Finance
    estimated_duration: 240
    inputs: [Customer record]
    outputs: [Approved account]
    tools: [Email]
    pain_points:
      - Requests sit pending for days
  - name: Send welcome pack
    description: Email onboarding documents and schedule a kickoff call
    responsible_role: Support
    estimated_duration: 20
    inputs: [Approved account]
    outputs: [Welcome email]
    tools: [Gmail, Calendly]
    pain_points: []
"#;
