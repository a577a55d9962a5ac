use crate::process::{ProcessId, StepId};
use serde::{Deserialize, Serialize};

/// Three-level rating shared by waste severity and automation tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn priority(&self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }

    /// Score deduction applied per waste instance of this severity.
    pub fn penalty(&self) -> u32 {
        match self {
            Severity::High => 15,
            Severity::Medium => 8,
            Severity::Low => 3,
        }
    }
}

/// Lean waste category (TIMWOODS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Transportation,
    Inventory,
    Motion,
    Waiting,
    Overproduction,
    Overprocessing,
    Defects,
    Skills,
}

impl WasteType {
    /// All categories in detection order.
    pub const ALL: [WasteType; 8] = [
        WasteType::Transportation,
        WasteType::Inventory,
        WasteType::Motion,
        WasteType::Waiting,
        WasteType::Overproduction,
        WasteType::Overprocessing,
        WasteType::Defects,
        WasteType::Skills,
    ];

    pub fn label(&self) -> &str {
        match self {
            WasteType::Transportation => "Transportation",
            WasteType::Inventory => "Inventory",
            WasteType::Motion => "Motion",
            WasteType::Waiting => "Waiting",
            WasteType::Overproduction => "Overproduction",
            WasteType::Overprocessing => "Overprocessing",
            WasteType::Defects => "Defects",
            WasteType::Skills => "Unused Skills",
        }
    }
}

/// A single waste finding attributed to one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteInstance {
    #[serde(rename = "type")]
    pub waste_type: WasteType,
    pub step_id: StepId,
    pub description: String,
    pub severity: Severity,
    pub estimated_impact: String,
}

/// Automation assessment for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationOpportunity {
    pub step_id: StepId,
    pub potential: Severity,
    pub complexity: Severity,
    pub roi_potential: Severity,
    pub suggested_tools: Vec<String>,
    pub description: String,
}

/// Timing and quality figures derived from the step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Minutes across all steps.
    pub lead_time: u64,
    /// Minutes across steps that are not pure waiting.
    pub cycle_time: u64,
    /// Percentage, 0-100.
    pub process_efficiency: u32,
    /// Percentage, 0-100.
    pub first_pass_yield: u32,
    pub touch_points: usize,
}

/// The complete analysis of one process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAnalysis {
    pub process_id: ProcessId,
    pub metrics: ProcessMetrics,
    pub wastes: Vec<WasteInstance>,
    pub bottlenecks: Vec<StepId>,
    pub automation_opportunities: Vec<AutomationOpportunity>,
    /// Composite score, 0-100.
    pub overall_score: u32,
    pub recommendations: Vec<String>,
}

impl ProcessAnalysis {
    pub fn waste_count(&self, severity: Severity) -> usize {
        self.wastes.iter().filter(|w| w.severity == severity).count()
    }

    pub fn high_roi_count(&self) -> usize {
        self.automation_opportunities
            .iter()
            .filter(|o| o.roi_potential == Severity::High)
            .count()
    }

    pub fn is_bottleneck(&self, step_id: &StepId) -> bool {
        self.bottlenecks.contains(step_id)
    }

    /// Minutes of non-value-adding time (lead minus cycle).
    pub fn waiting_time(&self) -> u64 {
        self.metrics.lead_time.saturating_sub(self.metrics.cycle_time)
    }
}

/// Format minutes into a human-readable duration string.
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}
