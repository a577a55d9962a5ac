use crate::analyzer::contains_keyword;
use crate::analyzer::report::{Severity, WasteInstance, WasteType};
use crate::process::{Process, ProcessFrequency, ProcessStep, StepId};
use std::collections::{HashMap, HashSet};

/// Keywords that signal each waste category in step text.
fn waste_keywords(waste_type: WasteType) -> &'static [&'static str] {
    match waste_type {
        WasteType::Transportation => &[
            "transfer", "move", "send", "email", "forward", "pass", "handoff", "route",
        ],
        WasteType::Inventory => &["backlog", "queue", "pile up", "accumulate", "batch", "stack"],
        WasteType::Motion => &[
            "search", "look for", "find", "locate", "navigate", "switch between",
        ],
        WasteType::Waiting => &["wait", "delay", "pending", "hold", "blocked", "stuck", "idle"],
        WasteType::Overproduction => &[
            "excess", "extra", "unused", "unnecessary", "redundant", "duplicate",
        ],
        WasteType::Overprocessing => &[
            "approval", "review", "sign-off", "multiple checks", "double entry", "re-enter",
        ],
        WasteType::Defects => &[
            "error", "rework", "fix", "correct", "mistake", "redo", "reject", "bug", "issue",
        ],
        WasteType::Skills => &[
            "manual", "automate", "repetitive", "tedious", "mundane", "copy paste", "routine",
        ],
    }
}

/// Severity keywords, checked in the order High, Medium, Low.
fn severity_keywords(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::High => &[
            "critical", "major", "always", "every time", "significant", "constant", "severe",
        ],
        Severity::Medium => &["often", "frequently", "sometimes", "moderate", "regular"],
        Severity::Low => &["occasionally", "minor", "rarely", "slight", "infrequent"],
    }
}

/// Detect all eight categories of waste across the process steps.
pub fn detect_waste(process: &Process) -> Vec<WasteInstance> {
    let mut wastes = Vec::new();

    for waste_type in WasteType::ALL {
        wastes.extend(detect_keyword_waste(&process.steps, waste_type, process.frequency));

        if waste_type == WasteType::Inventory {
            wastes.extend(detect_duplicate_outputs(&process.steps));
        }
    }

    dedup_wastes(wastes)
}

/// Flag every step whose text mentions a keyword of the given category.
pub fn detect_keyword_waste(
    steps: &[ProcessStep],
    waste_type: WasteType,
    frequency: ProcessFrequency,
) -> Vec<WasteInstance> {
    steps
        .iter()
        .filter_map(|step| detect_waste_in_step(step, waste_type, frequency))
        .collect()
}

fn detect_waste_in_step(
    step: &ProcessStep,
    waste_type: WasteType,
    frequency: ProcessFrequency,
) -> Option<WasteInstance> {
    let keywords = waste_keywords(waste_type);

    if !contains_keyword(&step.text(), keywords) {
        return None;
    }

    let description = step
        .pain_points
        .iter()
        .find(|pp| contains_keyword(pp, keywords))
        .unwrap_or(&step.description)
        .clone();

    Some(WasteInstance {
        waste_type,
        step_id: step.id.clone(),
        severity: assign_severity(&description, step.estimated_duration, frequency),
        estimated_impact: impact_description(waste_type, step, frequency),
        description,
    })
}

/// Severity from explicit wording, falling back to duration weighted by frequency.
pub fn assign_severity(text: &str, duration: u32, frequency: ProcessFrequency) -> Severity {
    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        if contains_keyword(text, severity_keywords(severity)) {
            return severity;
        }
    }

    let impact_score = duration as u64 * frequency.multiplier() as u64;
    if impact_score > 200 {
        Severity::High
    } else if impact_score > 50 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

fn impact_description(
    waste_type: WasteType,
    step: &ProcessStep,
    frequency: ProcessFrequency,
) -> String {
    let minutes = step.estimated_duration;
    let freq = frequency.label();

    match waste_type {
        WasteType::Transportation => {
            format!("Unnecessary data/material movement taking ~{} min {}", minutes, freq)
        }
        WasteType::Inventory => {
            format!("Work piling up, causing delays and context switching {}", freq)
        }
        WasteType::Motion => {
            format!("Time spent searching/navigating instead of productive work {}", freq)
        }
        WasteType::Waiting => {
            format!("Idle time of ~{} min while awaiting input/approval {}", minutes, freq)
        }
        WasteType::Overproduction => {
            format!("Creating more than needed, wasting resources {}", freq)
        }
        WasteType::Overprocessing => {
            format!("Excessive processing/approvals adding ~{} min {}", minutes, freq)
        }
        WasteType::Defects => {
            format!("Errors requiring rework, adding time and frustration {}", freq)
        }
        WasteType::Skills => {
            format!("Human potential underutilized on automatable tasks {}", freq)
        }
    }
}

/// Detect several steps producing the same output (work-in-progress buildup).
pub fn detect_duplicate_outputs(steps: &[ProcessStep]) -> Vec<WasteInstance> {
    // Output name -> producing step indices, in first-seen order
    let mut order: Vec<String> = Vec::new();
    let mut producers: HashMap<String, Vec<usize>> = HashMap::new();

    for (idx, step) in steps.iter().enumerate() {
        for output in &step.outputs {
            let key = output.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let entry = producers.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if !entry.contains(&idx) {
                entry.push(idx);
            }
        }
    }

    order
        .iter()
        .filter_map(|output| {
            let indices = &producers[output];
            if indices.len() < 2 {
                return None;
            }
            Some(WasteInstance {
                waste_type: WasteType::Inventory,
                step_id: steps[indices[0]].id.clone(),
                description: format!(
                    "Multiple steps producing same output \"{}\" may indicate work-in-progress buildup",
                    output
                ),
                severity: Severity::Medium,
                estimated_impact: format!(
                    "Potential inventory waste with {} steps producing similar outputs",
                    indices.len()
                ),
            })
        })
        .collect()
}

/// Keep the first instance per (category, step), preserving order.
fn dedup_wastes(wastes: Vec<WasteInstance>) -> Vec<WasteInstance> {
    let mut seen: HashSet<(WasteType, StepId)> = HashSet::new();
    wastes
        .into_iter()
        .filter(|w| seen.insert((w.waste_type, w.step_id.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, duration: u32, pain_points: &[&str]) -> ProcessStep {
        let mut s = ProcessStep::new(name, duration);
        s.pain_points = pain_points.iter().map(|p| p.to_string()).collect();
        s
    }

    fn process(steps: Vec<ProcessStep>) -> Process {
        let mut p = Process::new("Test", ProcessFrequency::Weekly);
        p.steps = steps;
        p
    }

    #[test]
    fn test_keyword_severity_beats_quantitative_fallback() {
        assert_eq!(
            assign_severity("critical error every time", 1, ProcessFrequency::AdHoc),
            Severity::High
        );
        assert_eq!(
            assign_severity("this happens occasionally", 500, ProcessFrequency::MultipleDaily),
            Severity::Low
        );
        assert_eq!(
            assign_severity("Sometimes late", 500, ProcessFrequency::Daily),
            Severity::Medium
        );
    }

    #[test]
    fn test_quantitative_severity_fallback() {
        // 60 * 4 = 240 > 200
        assert_eq!(assign_severity("", 60, ProcessFrequency::Daily), Severity::High);
        // 20 * 3 = 60 > 50
        assert_eq!(assign_severity("", 20, ProcessFrequency::Weekly), Severity::Medium);
        // 50 * 1 = 50, not above the cutoff
        assert_eq!(assign_severity("", 50, ProcessFrequency::Quarterly), Severity::Low);
    }

    #[test]
    fn test_waiting_waste_uses_matching_pain_point() {
        let s = step(
            "Manager sign off",
            30,
            &["Form is confusing", "Always waiting on the manager"],
        );
        let id = s.id.clone();
        let wastes = detect_waste(&process(vec![s]));

        let waiting = wastes
            .iter()
            .find(|w| w.waste_type == WasteType::Waiting && w.step_id == id)
            .expect("waiting waste");
        assert_eq!(waiting.description, "Always waiting on the manager");
        assert_eq!(waiting.severity, Severity::High);
        assert_eq!(
            waiting.estimated_impact,
            "Idle time of ~30 min while awaiting input/approval weekly"
        );
    }

    #[test]
    fn test_description_falls_back_to_step_description() {
        let mut s = step("Email invoice", 5, &["Customers complain"]);
        s.description = "Send the PDF to the customer".to_string();
        let wastes = detect_keyword_waste(&[s], WasteType::Transportation, ProcessFrequency::Daily);

        assert_eq!(wastes.len(), 1);
        assert_eq!(wastes[0].description, "Send the PDF to the customer");
        assert_eq!(wastes[0].severity, Severity::Low);
    }

    #[test]
    fn test_duplicate_outputs_flag_inventory() {
        let mut a = step("Draft contract", 10, &[]);
        a.outputs = vec!["Contract".to_string()];
        let mut b = step("Revise contract", 10, &[]);
        b.outputs = vec![" contract ".to_string()];
        let a_id = a.id.clone();

        let wastes = detect_duplicate_outputs(&[a, b]);
        assert_eq!(wastes.len(), 1);
        assert_eq!(wastes[0].step_id, a_id);
        assert_eq!(wastes[0].severity, Severity::Medium);
        assert!(wastes[0].description.contains("\"contract\""));
        assert!(wastes[0].estimated_impact.contains("2 steps"));
    }

    #[test]
    fn test_same_output_listed_twice_in_one_step_is_not_flagged() {
        let mut a = step("Export", 10, &[]);
        a.outputs = vec!["CSV".to_string(), "csv".to_string()];
        assert!(detect_duplicate_outputs(&[a]).is_empty());
    }

    #[test]
    fn test_no_duplicate_category_step_pairs() {
        let mut a = step(
            "Batch import backlog",
            45,
            &["Queue keeps growing", "Stack of pending forms"],
        );
        a.outputs = vec!["Records".to_string()];
        let mut b = step("Fix records", 20, &["Errors found often"]);
        b.outputs = vec!["records".to_string()];

        let wastes = detect_waste(&process(vec![a, b]));

        let mut keys = HashSet::new();
        for w in &wastes {
            assert!(keys.insert((w.waste_type, w.step_id.clone())));
        }
        // keyword inventory instance on the first step wins over the duplicate-output one
        let inventory: Vec<_> = wastes
            .iter()
            .filter(|w| w.waste_type == WasteType::Inventory)
            .collect();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].description, "Queue keeps growing");
    }

    #[test]
    fn test_clean_step_has_no_waste() {
        let wastes = detect_waste(&process(vec![step("Check dashboard", 15, &[])]));
        assert!(wastes.is_empty());
    }
}
