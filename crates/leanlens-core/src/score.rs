use crate::analyzer::report::{ProcessMetrics, WasteInstance};
use serde::{Deserialize, Serialize};

/// Process score calculator
///
/// Combines two views of process quality:
/// - Metrics: efficiency, first-pass yield and touch points
/// - Waste: a deduction per waste finding, weighted by severity
#[derive(Debug, Clone)]
pub struct ProcessScorer {
    weights: ScoreWeights,
}

/// Weights for the score components
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub efficiency: f64,
    pub first_pass_yield: f64,
    pub touch_points: f64,
    pub metrics: f64,
    pub waste: f64,
}

/// Touch points up to this count carry no penalty.
const IDEAL_TOUCH_POINTS: usize = 3;

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            efficiency: 0.4,
            first_pass_yield: 0.3,
            touch_points: 0.3,
            metrics: 0.4,
            waste: 0.6,
        }
    }
}

/// Score grade bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Excellent, // 80-100
    Good,      // 60-79
    NeedsWork, // 40-59
    Critical,  // 0-39
}

impl ProcessScorer {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score derived from the process metrics alone (0-100).
    pub fn metrics_score(&self, metrics: &ProcessMetrics) -> u32 {
        let excess = metrics.touch_points.saturating_sub(IDEAL_TOUCH_POINTS) as f64;
        let touch_points_score = (100.0 - excess * 10.0).max(0.0);

        let score = metrics.process_efficiency as f64 * self.weights.efficiency
            + metrics.first_pass_yield as f64 * self.weights.first_pass_yield
            + touch_points_score * self.weights.touch_points;

        score.round() as u32
    }

    /// Overall score (0-100), 40% metrics and 60% waste by default.
    pub fn calculate(&self, metrics: &ProcessMetrics, wastes: &[WasteInstance]) -> u32 {
        let metrics_score = self.metrics_score(metrics) as f64;
        let waste_score = calculate_waste_score(wastes) as f64;

        let score = (metrics_score * self.weights.metrics + waste_score * self.weights.waste).round();
        score.clamp(0.0, 100.0) as u32
    }
}

impl Default for ProcessScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// 100 minus the severity penalty of every waste instance, floored at 0.
pub fn calculate_waste_score(wastes: &[WasteInstance]) -> u32 {
    let penalty: u32 = wastes.iter().map(|w| w.severity.penalty()).sum();
    100u32.saturating_sub(penalty)
}

/// Overall score with the default weights.
pub fn calculate_process_score(metrics: &ProcessMetrics, wastes: &[WasteInstance]) -> u32 {
    ProcessScorer::new().calculate(metrics, wastes)
}

impl ScoreGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => ScoreGrade::Excellent,
            60..=79 => ScoreGrade::Good,
            40..=59 => ScoreGrade::NeedsWork,
            _ => ScoreGrade::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "Excellent",
            ScoreGrade::Good => "Good",
            ScoreGrade::NeedsWork => "Needs Work",
            ScoreGrade::Critical => "Critical",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "Process is lean with little waste",
            ScoreGrade::Good => "Process works well with some room for improvement",
            ScoreGrade::NeedsWork => "Process has notable waste and delays worth addressing",
            ScoreGrade::Critical => "Process needs significant redesign",
        }
    }
}
