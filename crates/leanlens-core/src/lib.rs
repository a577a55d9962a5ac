pub mod analyzer;
pub mod config;
pub mod error;
pub mod loader;
pub mod process;
pub mod recommendations;
pub mod score;
pub mod storage;

pub use analyzer::analyze_process;
pub use analyzer::report::{
    AutomationOpportunity, ProcessAnalysis, ProcessMetrics, Severity, WasteInstance, WasteType,
};
pub use error::{LeanLensError, Result};
pub use process::{
    AssessmentId, AssessmentStatus, Process, ProcessAssessment, ProcessFrequency, ProcessId,
    ProcessStep, StepId,
};
pub use score::{ProcessScorer, ScoreGrade};
pub use storage::{AssessmentStorage, FileStore, KeyValueStore, MemoryStore};
