use crate::analyzer::contains_keyword;
use crate::analyzer::report::ProcessMetrics;
use crate::process::{Process, ProcessStep};
use std::collections::HashSet;

/// Steps whose name or description mention these are treated as pure waiting.
const WAITING_KEYWORDS: &[&str] = &["wait", "pending", "queue", "hold", "approval"];

/// Pain points mentioning these count against first-pass yield.
const DEFECT_KEYWORDS: &[&str] = &["error", "rework", "fix", "correct", "mistake", "redo", "reject"];

/// Yield lost per step that reports defects.
const DEFECT_PENALTY_PER_STEP: u32 = 10;

/// Calculate all metrics for a process.
pub fn calculate_metrics(process: &Process) -> ProcessMetrics {
    let lead_time = calculate_lead_time(&process.steps);
    let cycle_time = calculate_cycle_time(&process.steps);

    ProcessMetrics {
        lead_time,
        cycle_time,
        process_efficiency: calculate_process_efficiency(lead_time, cycle_time),
        first_pass_yield: calculate_first_pass_yield(&process.steps),
        touch_points: calculate_touch_points(&process.steps),
    }
}

/// Total minutes across every step.
pub fn calculate_lead_time(steps: &[ProcessStep]) -> u64 {
    steps.iter().map(|s| s.estimated_duration as u64).sum()
}

/// Total minutes across steps that are not waiting steps.
pub fn calculate_cycle_time(steps: &[ProcessStep]) -> u64 {
    steps
        .iter()
        .filter(|s| !is_waiting_step(s))
        .map(|s| s.estimated_duration as u64)
        .sum()
}

fn is_waiting_step(step: &ProcessStep) -> bool {
    contains_keyword(&step.name, WAITING_KEYWORDS)
        || contains_keyword(&step.description, WAITING_KEYWORDS)
}

/// Share of lead time spent on value-adding work, as a rounded percentage.
pub fn calculate_process_efficiency(lead_time: u64, cycle_time: u64) -> u32 {
    if lead_time == 0 {
        return 0;
    }
    (cycle_time as f64 / lead_time as f64 * 100.0).round() as u32
}

/// Distinct roles involved plus the number of role changes between consecutive steps.
pub fn calculate_touch_points(steps: &[ProcessStep]) -> usize {
    let roles: Vec<String> = steps.iter().map(ProcessStep::normalized_role).collect();

    let unique_roles: HashSet<&String> = roles.iter().collect();
    let handoffs = roles.windows(2).filter(|pair| pair[0] != pair[1]).count();

    unique_roles.len() + handoffs
}

/// Estimated percentage of runs completing without rework.
pub fn calculate_first_pass_yield(steps: &[ProcessStep]) -> u32 {
    let defect_steps = steps
        .iter()
        .filter(|s| {
            s.pain_points
                .iter()
                .any(|pp| contains_keyword(pp, DEFECT_KEYWORDS))
        })
        .count() as u32;

    100u32.saturating_sub(defect_steps.saturating_mul(DEFECT_PENALTY_PER_STEP))
}
