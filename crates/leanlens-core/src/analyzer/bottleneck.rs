use crate::analyzer::contains_keyword;
use crate::process::{ProcessStep, StepId};
use std::collections::HashMap;

/// Pain points mentioning these mark a step as a bottleneck.
const DELAY_KEYWORDS: &[&str] = &["wait", "delay", "pending", "blocked", "stuck", "bottleneck", "slow"];

/// Shared figures every per-step check compares against.
struct StepStats {
    mean_duration: f64,
    max_pain_points: usize,
    role_counts: HashMap<String, usize>,
}

impl StepStats {
    fn from_steps(steps: &[ProcessStep]) -> Self {
        let total: u64 = steps.iter().map(|s| s.estimated_duration as u64).sum();
        let mean_duration = total as f64 / steps.len() as f64;

        let max_pain_points = steps.iter().map(|s| s.pain_points.len()).max().unwrap_or(0);

        let mut role_counts = HashMap::new();
        for step in steps {
            *role_counts.entry(step.normalized_role()).or_insert(0) += 1;
        }

        Self {
            mean_duration,
            max_pain_points,
            role_counts,
        }
    }
}

/// Identify steps that disproportionately slow down or strain the process.
/// Returns step ids in process order.
pub fn identify_bottlenecks(steps: &[ProcessStep]) -> Vec<StepId> {
    if steps.is_empty() {
        return Vec::new();
    }

    let stats = StepStats::from_steps(steps);

    steps
        .iter()
        .filter(|step| is_bottleneck(step, &stats))
        .map(|step| step.id.clone())
        .collect()
}

fn is_bottleneck(step: &ProcessStep, stats: &StepStats) -> bool {
    let duration = step.estimated_duration as f64;

    // Takes more than twice as long as the average step
    if duration > stats.mean_duration * 2.0 {
        return true;
    }

    // Carries the most pain points (ties included)
    if stats.max_pain_points >= 2 && step.pain_points.len() == stats.max_pain_points {
        return true;
    }

    if step
        .pain_points
        .iter()
        .any(|pp| contains_keyword(pp, DELAY_KEYWORDS))
    {
        return true;
    }

    // Single point of failure: only step for its role, and slower than average
    let role_count = stats
        .role_counts
        .get(&step.normalized_role())
        .copied()
        .unwrap_or(0);
    role_count == 1 && duration > stats.mean_duration
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, duration: u32, role: &str, pain_points: &[&str]) -> ProcessStep {
        let mut s = ProcessStep::new(name, duration);
        s.responsible_role = role.to_string();
        s.pain_points = pain_points.iter().map(|p| p.to_string()).collect();
        s
    }

    #[test]
    fn test_empty_steps_have_no_bottlenecks() {
        assert!(identify_bottlenecks(&[]).is_empty());
    }

    #[test]
    fn test_long_step_flagged() {
        let steps = vec![
            step("Intake", 30, "Ops", &[]),
            step("Review", 30, "Ops", &[]),
            step("Build", 180, "Ops", &[]),
        ];
        let bottlenecks = identify_bottlenecks(&steps);
        assert_eq!(bottlenecks, vec![steps[2].id.clone()]);
    }

    #[test]
    fn test_most_pain_points_ties_included() {
        let steps = vec![
            step("A", 10, "Ops", &["too many forms", "unclear owner"]),
            step("B", 10, "Ops", &["bad data", "missing fields"]),
            step("C", 10, "Ops", &["meh"]),
        ];
        let bottlenecks = identify_bottlenecks(&steps);
        assert_eq!(bottlenecks, vec![steps[0].id.clone(), steps[1].id.clone()]);
    }

    #[test]
    fn test_single_pain_point_max_not_enough() {
        let steps = vec![
            step("A", 10, "Ops", &["bad data"]),
            step("B", 10, "Ops", &[]),
        ];
        assert!(identify_bottlenecks(&steps).is_empty());
    }

    #[test]
    fn test_delay_pain_point_flagged() {
        let steps = vec![
            step("A", 10, "Ops", &["Often STUCK behind legal"]),
            step("B", 10, "Ops", &[]),
        ];
        assert_eq!(identify_bottlenecks(&steps), vec![steps[0].id.clone()]);
    }

    #[test]
    fn test_single_point_of_failure() {
        let steps = vec![
            step("A", 10, "Clerk", &[]),
            step("B", 10, "Clerk", &[]),
            step("C", 25, "Controller", &[]),
            step("D", 5, "Auditor", &[]),
        ];
        // mean = 12.5: C is the only Controller step and above mean; D is below mean
        assert_eq!(identify_bottlenecks(&steps), vec![steps[2].id.clone()]);
    }
}
