pub mod automation;
pub mod bottleneck;
pub mod metrics;
pub mod report;
pub mod waste_detector;

use crate::process::Process;
use crate::recommendations::generate_recommendations;
use crate::score::calculate_process_score;
use log::debug;
use report::ProcessAnalysis;

/// Run all analyzers on a process and assemble the complete analysis.
pub fn analyze_process(process: &Process) -> ProcessAnalysis {
    let metrics = metrics::calculate_metrics(process);
    let wastes = waste_detector::detect_waste(process);
    let bottlenecks = bottleneck::identify_bottlenecks(&process.steps);
    let automation_opportunities = automation::analyze_automation_opportunities(&process.steps);

    let overall_score = calculate_process_score(&metrics, &wastes);

    let recommendations = generate_recommendations(
        process,
        &metrics,
        &wastes,
        &bottlenecks,
        &automation_opportunities,
    );

    debug!(
        "Analyzed '{}': {} steps, {} wastes, {} bottlenecks, score {}",
        process.name,
        process.steps.len(),
        wastes.len(),
        bottlenecks.len(),
        overall_score
    );

    ProcessAnalysis {
        process_id: process.id.clone(),
        metrics,
        wastes,
        bottlenecks,
        automation_opportunities,
        overall_score,
        recommendations,
    }
}

/// Case-insensitive substring match against any keyword.
pub(crate) fn contains_keyword(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
}
