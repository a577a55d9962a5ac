use crate::analyzer::report::{
    AutomationOpportunity, ProcessMetrics, Severity, WasteInstance, WasteType,
};
use crate::process::{Process, StepId};
use std::collections::HashSet;

const MAX_WASTE_RECOMMENDATIONS: usize = 5;
const MAX_BOTTLENECK_RECOMMENDATIONS: usize = 3;
const MAX_AUTOMATION_RECOMMENDATIONS: usize = 3;
const MAX_TOOLS_PER_RECOMMENDATION: usize = 3;

/// Build prioritized, deduplicated advice from the analysis results.
///
/// Order: waste, bottlenecks, automation, then metrics. Duplicates are
/// compared case-insensitively and the first occurrence wins.
pub fn generate_recommendations(
    process: &Process,
    metrics: &ProcessMetrics,
    wastes: &[WasteInstance],
    bottlenecks: &[StepId],
    opportunities: &[AutomationOpportunity],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    recommendations.extend(waste_recommendations(process, wastes));
    recommendations.extend(bottleneck_recommendations(process, bottlenecks));
    recommendations.extend(automation_recommendations(process, opportunities));
    recommendations.extend(metrics_recommendations(metrics));

    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|rec| seen.insert(rec.to_lowercase()))
        .collect()
}

fn waste_recommendations(process: &Process, wastes: &[WasteInstance]) -> Vec<String> {
    let mut sorted: Vec<&WasteInstance> = wastes.iter().collect();
    // Stable: equal severities keep detection order
    sorted.sort_by_key(|w| std::cmp::Reverse(w.severity.priority()));

    sorted
        .into_iter()
        .take(MAX_WASTE_RECOMMENDATIONS)
        .map(|w| waste_message(w, process.step_name(&w.step_id)))
        .collect()
}

fn waste_message(waste: &WasteInstance, step_name: &str) -> String {
    let desc = &waste.description;
    match waste.waste_type {
        WasteType::Transportation => format!(
            "Reduce data movement in \"{}\": {}. Consider consolidating systems or creating direct integrations.",
            step_name, desc
        ),
        WasteType::Inventory => format!(
            "Address work backlog in \"{}\": {}. Implement flow-based processing to reduce batch sizes.",
            step_name, desc
        ),
        WasteType::Motion => format!(
            "Eliminate unnecessary searching in \"{}\": {}. Organize information and create clear navigation paths.",
            step_name, desc
        ),
        WasteType::Waiting => format!(
            "Reduce wait times in \"{}\": {}. Consider parallel processing or automated approvals.",
            step_name, desc
        ),
        WasteType::Overproduction => format!(
            "Eliminate overproduction in \"{}\": {}. Produce only what is needed, when it is needed.",
            step_name, desc
        ),
        WasteType::Overprocessing => format!(
            "Simplify processing in \"{}\": {}. Review approval chains and remove unnecessary steps.",
            step_name, desc
        ),
        WasteType::Defects => format!(
            "Reduce errors in \"{}\": {}. Implement validation checks and error-proofing mechanisms.",
            step_name, desc
        ),
        WasteType::Skills => format!(
            "Better utilize skills in \"{}\": {}. Automate routine tasks to free up human potential.",
            step_name, desc
        ),
    }
}

fn bottleneck_recommendations(process: &Process, bottlenecks: &[StepId]) -> Vec<String> {
    bottlenecks
        .iter()
        .take(MAX_BOTTLENECK_RECOMMENDATIONS)
        .filter_map(|id| process.step(id))
        .map(|step| {
            if step.estimated_duration > 60 {
                format!(
                    "\"{}\" takes {} minutes. Consider breaking it into smaller parallel tasks or automating portions.",
                    step.name, step.estimated_duration
                )
            } else {
                format!(
                    "\"{}\" is a bottleneck. Review resource allocation and consider cross-training to reduce dependency.",
                    step.name
                )
            }
        })
        .collect()
}

fn automation_recommendations(
    process: &Process,
    opportunities: &[AutomationOpportunity],
) -> Vec<String> {
    opportunities
        .iter()
        .filter(|o| o.roi_potential == Severity::High)
        .take(MAX_AUTOMATION_RECOMMENDATIONS)
        .map(|o| {
            let tools: Vec<&str> = o
                .suggested_tools
                .iter()
                .take(MAX_TOOLS_PER_RECOMMENDATION)
                .map(String::as_str)
                .collect();
            format!(
                "Automate \"{}\" using {}. This step has high automation potential with low complexity.",
                process.step_name(&o.step_id),
                tools.join(", ")
            )
        })
        .collect()
}

fn metrics_recommendations(metrics: &ProcessMetrics) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.process_efficiency < 50 {
        recommendations.push(format!(
            "Process efficiency is {}%. Target 70%+ by reducing non-value-add activities and wait times.",
            metrics.process_efficiency
        ));
    }

    if metrics.first_pass_yield < 80 {
        recommendations.push(format!(
            "First pass yield is {}%. Implement quality checks and validation to reduce rework.",
            metrics.first_pass_yield
        ));
    }

    if metrics.touch_points > 5 {
        recommendations.push(format!(
            "{} touch points detected. Reduce handoffs by consolidating responsibilities or automating transitions.",
            metrics.touch_points
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ProcessFrequency, ProcessStep};

    fn healthy_metrics() -> ProcessMetrics {
        ProcessMetrics {
            lead_time: 60,
            cycle_time: 60,
            process_efficiency: 100,
            first_pass_yield: 100,
            touch_points: 1,
        }
    }

    fn sample_process() -> Process {
        let mut process = Process::new("Order handling", ProcessFrequency::Daily);
        process.steps = vec![
            ProcessStep::new("Receive order", 90),
            ProcessStep::new("Pick items", 20),
        ];
        process
    }

    fn waste(waste_type: WasteType, step_id: &StepId, severity: Severity, desc: &str) -> WasteInstance {
        WasteInstance {
            waste_type,
            step_id: step_id.clone(),
            description: desc.to_string(),
            severity,
            estimated_impact: String::new(),
        }
    }

    #[test]
    fn test_waste_recommendations_sorted_by_severity_and_capped() {
        let process = sample_process();
        let id = &process.steps[0].id;
        let wastes = vec![
            waste(WasteType::Motion, id, Severity::Low, "hunting for files"),
            waste(WasteType::Waiting, id, Severity::High, "waits on legal"),
            waste(WasteType::Defects, id, Severity::Medium, "typos"),
            waste(WasteType::Skills, id, Severity::Low, "manual copy"),
            waste(WasteType::Inventory, id, Severity::Medium, "backlog"),
            waste(WasteType::Transportation, id, Severity::Low, "emailing files"),
        ];

        let recs = generate_recommendations(&process, &healthy_metrics(), &wastes, &[], &[]);
        assert_eq!(recs.len(), 5);
        assert_eq!(
            recs[0],
            "Reduce wait times in \"Receive order\": waits on legal. Consider parallel processing or automated approvals."
        );
        assert!(recs[1].starts_with("Reduce errors"));
        assert!(recs[2].starts_with("Address work backlog"));
        assert!(recs[3].starts_with("Eliminate unnecessary searching"));
        assert!(recs[4].starts_with("Better utilize skills"));
    }

    #[test]
    fn test_bottleneck_messages_depend_on_duration() {
        let process = sample_process();
        let bottlenecks = vec![
            process.steps[0].id.clone(),
            StepId::from("missing"),
            process.steps[1].id.clone(),
        ];

        let recs = generate_recommendations(&process, &healthy_metrics(), &[], &bottlenecks, &[]);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("takes 90 minutes"));
        assert!(recs[1].contains("\"Pick items\" is a bottleneck"));
    }

    #[test]
    fn test_automation_recommendations_only_high_roi() {
        let process = sample_process();
        let opportunities = vec![
            AutomationOpportunity {
                step_id: process.steps[0].id.clone(),
                potential: Severity::High,
                complexity: Severity::Low,
                roi_potential: Severity::High,
                suggested_tools: vec!["n8n".into(), "Make".into(), "Zapier".into(), "UiPath".into()],
                description: String::new(),
            },
            AutomationOpportunity {
                step_id: process.steps[1].id.clone(),
                potential: Severity::Low,
                complexity: Severity::High,
                roi_potential: Severity::Low,
                suggested_tools: vec!["n8n".into()],
                description: String::new(),
            },
        ];

        let recs = generate_recommendations(&process, &healthy_metrics(), &[], &[], &opportunities);
        assert_eq!(
            recs,
            vec!["Automate \"Receive order\" using n8n, Make, Zapier. This step has high automation potential with low complexity."]
        );
    }

    #[test]
    fn test_metrics_recommendations_cite_values() {
        let metrics = ProcessMetrics {
            lead_time: 100,
            cycle_time: 40,
            process_efficiency: 40,
            first_pass_yield: 70,
            touch_points: 7,
        };
        let recs = generate_recommendations(&sample_process(), &metrics, &[], &[], &[]);
        assert_eq!(recs.len(), 3);
        assert!(recs[0].contains("40%"));
        assert!(recs[1].contains("70%"));
        assert!(recs[2].starts_with("7 touch points"));
    }

    #[test]
    fn test_duplicates_removed_case_insensitively() {
        let mut process = sample_process();
        process.steps[1].name = "RECEIVE ORDER".to_string();
        let wastes = vec![
            waste(WasteType::Waiting, &process.steps[0].id, Severity::High, "stuck"),
            waste(WasteType::Waiting, &process.steps[1].id, Severity::High, "STUCK"),
        ];

        let recs = generate_recommendations(&process, &healthy_metrics(), &wastes, &[], &[]);
        assert_eq!(recs.len(), 1);

        let lowered: HashSet<String> = recs.iter().map(|r| r.to_lowercase()).collect();
        assert_eq!(lowered.len(), recs.len());
    }
}
