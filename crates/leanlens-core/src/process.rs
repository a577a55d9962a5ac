use crate::error::{LeanLensError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random (v4 UUID) identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a [`Process`].
    ProcessId
);
define_id!(
    /// Identifies a [`ProcessStep`] within its parent process.
    StepId
);
define_id!(
    /// Identifies a [`ProcessAssessment`].
    AssessmentId
);

/// How often the process is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessFrequency {
    MultipleDaily,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    #[default]
    AdHoc,
}

impl ProcessFrequency {
    /// Weight applied to a step's duration when estimating waste impact.
    pub fn multiplier(&self) -> u32 {
        match self {
            ProcessFrequency::MultipleDaily => 5,
            ProcessFrequency::Daily => 4,
            ProcessFrequency::Weekly => 3,
            ProcessFrequency::Monthly => 2,
            ProcessFrequency::Quarterly => 1,
            ProcessFrequency::AdHoc => 1,
        }
    }

    /// Phrase used in impact narratives ("... multiple times daily").
    pub fn label(&self) -> &'static str {
        match self {
            ProcessFrequency::MultipleDaily => "multiple times daily",
            ProcessFrequency::Daily => "daily",
            ProcessFrequency::Weekly => "weekly",
            ProcessFrequency::Monthly => "monthly",
            ProcessFrequency::Quarterly => "quarterly",
            ProcessFrequency::AdHoc => "as needed",
        }
    }
}

/// A single unit of work within a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    #[serde(default = "StepId::generate")]
    pub id: StepId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsible_role: String,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub estimated_duration: u32,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
}

impl ProcessStep {
    pub fn new(name: impl Into<String>, estimated_duration: u32) -> Self {
        Self {
            id: StepId::generate(),
            name: name.into(),
            description: String::new(),
            responsible_role: String::new(),
            estimated_duration,
            inputs: Vec::new(),
            outputs: Vec::new(),
            tools: Vec::new(),
            pain_points: Vec::new(),
        }
    }

    /// Role label normalized for comparison (lowercased, trimmed).
    pub fn normalized_role(&self) -> String {
        self.responsible_role.trim().to_lowercase()
    }

    /// Name, description and pain points joined into one searchable blob.
    pub fn text(&self) -> String {
        let mut parts = vec![self.name.as_str(), self.description.as_str()];
        parts.extend(self.pain_points.iter().map(String::as_str));
        parts.join(" ")
    }

    /// Like [`ProcessStep::text`], with tool names appended.
    pub fn text_with_tools(&self) -> String {
        let mut text = self.text();
        for tool in &self.tools {
            text.push(' ');
            text.push_str(tool);
        }
        text
    }
}

/// A business process: an ordered sequence of steps plus context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    #[serde(default = "ProcessId::generate")]
    pub id: ProcessId,
    pub name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub frequency: ProcessFrequency,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
}

impl Process {
    pub fn new(name: impl Into<String>, frequency: ProcessFrequency) -> Self {
        Self {
            id: ProcessId::generate(),
            name: name.into(),
            purpose: String::new(),
            trigger: String::new(),
            frequency,
            steps: Vec::new(),
            stakeholders: Vec::new(),
        }
    }

    pub fn step(&self, id: &StepId) -> Option<&ProcessStep> {
        self.steps.iter().find(|s| &s.id == id)
    }

    /// Name of the step with the given id, or "Unknown step" when the step is
    /// missing or unnamed.
    pub fn step_name(&self, id: &StepId) -> &str {
        self.step(id)
            .filter(|s| !s.name.is_empty())
            .map_or("Unknown step", |s| s.name.as_str())
    }

    /// Trim list entries and drop empty ones, the way intake forms submit them.
    pub fn normalize(&mut self) {
        tidy_list(&mut self.stakeholders);
        for step in &mut self.steps {
            tidy_list(&mut step.inputs);
            tidy_list(&mut step.outputs);
            tidy_list(&mut step.tools);
            tidy_list(&mut step.pain_points);
        }
    }

    /// Check the preconditions the analysis engine relies on callers to enforce.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("process name must not be empty".to_string());
        }

        if !self.steps.iter().any(|s| !s.name.trim().is_empty()) {
            problems.push("at least one step with a name is required".to_string());
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(&step.id) {
                problems.push(format!("duplicate step id '{}'", step.id));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(LeanLensError::InvalidProcess(problems))
        }
    }
}

fn tidy_list(items: &mut Vec<String>) {
    *items = items
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
    Archived,
}

impl AssessmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentStatus::InProgress => "in progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Archived => "archived",
        }
    }
}

/// One run of the intake flow that produced a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAssessment {
    pub id: AssessmentId,
    pub process_id: ProcessId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: AssessmentStatus,
    pub current_step: u32,
    #[serde(default)]
    pub answers: serde_json::Map<String, serde_json::Value>,
}

impl ProcessAssessment {
    /// A completed assessment for an already-submitted process.
    pub fn completed(process_id: ProcessId, current_step: u32) -> Self {
        let now = Utc::now();
        Self {
            id: AssessmentId::generate(),
            process_id,
            created_at: now,
            updated_at: now,
            status: AssessmentStatus::Completed,
            current_step,
            answers: serde_json::Map::new(),
        }
    }
}
