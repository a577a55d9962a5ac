use crate::analyzer::contains_keyword;
use crate::analyzer::report::{AutomationOpportunity, Severity};
use crate::process::ProcessStep;

const HIGH_POTENTIAL_KEYWORDS: &[&str] = &[
    "manual",
    "repetitive",
    "copy paste",
    "data entry",
    "spreadsheet",
    "excel",
];
const MEDIUM_POTENTIAL_KEYWORDS: &[&str] = &["slow", "tedious", "time-consuming", "routine"];

const HIGH_COMPLEXITY_KEYWORDS: &[&str] = &[
    "decision",
    "judgment",
    "complex",
    "custom",
    "exception",
    "approval required",
];
const MEDIUM_COMPLEXITY_KEYWORDS: &[&str] = &[
    "conditional",
    "variable",
    "multiple systems",
    "integration",
];

const SPREADSHEET_TOOLS: &[&str] = &["n8n", "Make", "Zapier", "Power Automate"];

/// Keyword -> tools worth suggesting when the keyword appears, in match order.
const AUTOMATION_TOOLS: &[(&str, &[&str])] = &[
    ("spreadsheet", SPREADSHEET_TOOLS),
    ("excel", SPREADSHEET_TOOLS),
    ("email", &["n8n", "Zapier", "SendGrid", "Mailchimp"]),
    ("crm", &["GoHighLevel", "HubSpot", "Salesforce"]),
    ("data entry", &["n8n", "UiPath", "Automation Anywhere"]),
    ("document", &["DocuSign", "PandaDoc", "Adobe Sign"]),
    ("scheduling", &["Calendly", "Acuity", "GoHighLevel"]),
];

const DEFAULT_TOOLS: &[&str] = &["n8n", "Make", "Zapier"];

/// Steps longer than this are worth partial automation even without keyword hints.
const LONG_STEP_MINUTES: u32 = 30;

/// Assess every step, one opportunity per step in input order.
pub fn analyze_automation_opportunities(steps: &[ProcessStep]) -> Vec<AutomationOpportunity> {
    steps
        .iter()
        .map(|step| {
            let potential = assess_automation_potential(step);
            let complexity = assess_automation_complexity(step);

            AutomationOpportunity {
                step_id: step.id.clone(),
                potential,
                complexity,
                roi_potential: roi_potential(potential, complexity),
                suggested_tools: suggest_automation_tools(step),
                description: opportunity_description(step, potential),
            }
        })
        .collect()
}

pub fn assess_automation_potential(step: &ProcessStep) -> Severity {
    let text = step.text_with_tools();

    if contains_keyword(&text, HIGH_POTENTIAL_KEYWORDS) {
        Severity::High
    } else if contains_keyword(&text, MEDIUM_POTENTIAL_KEYWORDS)
        || step.estimated_duration > LONG_STEP_MINUTES
    {
        Severity::Medium
    } else {
        Severity::Low
    }
}

pub fn assess_automation_complexity(step: &ProcessStep) -> Severity {
    let text = step.text();

    if contains_keyword(&text, HIGH_COMPLEXITY_KEYWORDS) {
        return Severity::High;
    }
    if contains_keyword(&text, MEDIUM_COMPLEXITY_KEYWORDS) {
        return Severity::Medium;
    }

    // More tools means more integration work
    match step.tools.len() {
        n if n > 3 => Severity::High,
        n if n > 1 => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Return on automating a step, given how much it would help and how hard it is.
pub fn roi_potential(potential: Severity, complexity: Severity) -> Severity {
    match (potential, complexity) {
        (Severity::High, Severity::Low)
        | (Severity::High, Severity::Medium)
        | (Severity::Medium, Severity::Low) => Severity::High,
        (Severity::Medium, Severity::Medium)
        | (Severity::High, Severity::High)
        | (Severity::Low, Severity::Low) => Severity::Medium,
        _ => Severity::Low,
    }
}

pub fn suggest_automation_tools(step: &ProcessStep) -> Vec<String> {
    let text = step.text_with_tools().to_lowercase();
    let mut tools: Vec<String> = Vec::new();

    for (keyword, suggestions) in AUTOMATION_TOOLS {
        if !text.contains(keyword) {
            continue;
        }
        for tool in suggestions.iter() {
            if !tools.iter().any(|t| t == tool) {
                tools.push(tool.to_string());
            }
        }
    }

    if tools.is_empty() {
        tools = DEFAULT_TOOLS.iter().map(|t| t.to_string()).collect();
    }

    tools
}

fn opportunity_description(step: &ProcessStep, potential: Severity) -> String {
    match potential {
        Severity::High => format!(
            "\"{}\" has high automation potential due to manual, repetitive tasks that can be streamlined.",
            step.name
        ),
        Severity::Medium => format!(
            "\"{}\" could benefit from partial automation to reduce time and effort.",
            step.name
        ),
        Severity::Low => format!(
            "\"{}\" has limited automation potential but may benefit from process improvements.",
            step.name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, duration: u32, pain_points: &[&str], tools: &[&str]) -> ProcessStep {
        let mut s = ProcessStep::new(name, duration);
        s.pain_points = pain_points.iter().map(|p| p.to_string()).collect();
        s.tools = tools.iter().map(|t| t.to_string()).collect();
        s
    }

    #[test]
    fn test_manual_data_entry_is_high_potential() {
        let s = step("Update records", 20, &["lots of manual data entry"], &[]);
        assert_eq!(assess_automation_potential(&s), Severity::High);

        let tools = suggest_automation_tools(&s);
        assert!(tools.iter().any(|t| t == "n8n" || t == "Zapier" || t == "Make"));
        assert!(tools.contains(&"UiPath".to_string()));
    }

    #[test]
    fn test_potential_from_tools_and_duration() {
        assert_eq!(
            assess_automation_potential(&step("Report", 10, &[], &["Excel"])),
            Severity::High
        );
        assert_eq!(
            assess_automation_potential(&step("Report", 45, &[], &[])),
            Severity::Medium
        );
        assert_eq!(
            assess_automation_potential(&step("Report", 30, &[], &[])),
            Severity::Low
        );
    }

    #[test]
    fn test_complexity_from_keywords_and_tool_count() {
        assert_eq!(
            assess_automation_complexity(&step("Credit decision", 10, &[], &[])),
            Severity::High
        );
        assert_eq!(
            assess_automation_complexity(&step("Sync", 10, &["needs integration"], &[])),
            Severity::Medium
        );
        assert_eq!(
            assess_automation_complexity(&step("Sync", 10, &[], &["A", "B", "C", "D"])),
            Severity::High
        );
        assert_eq!(
            assess_automation_complexity(&step("Sync", 10, &[], &["A", "B"])),
            Severity::Medium
        );
        assert_eq!(
            assess_automation_complexity(&step("Sync", 10, &[], &["A"])),
            Severity::Low
        );
    }

    #[test]
    fn test_roi_table() {
        use Severity::*;
        assert_eq!(roi_potential(High, Low), High);
        assert_eq!(roi_potential(High, Medium), High);
        assert_eq!(roi_potential(Medium, Low), High);
        assert_eq!(roi_potential(Medium, Medium), Medium);
        assert_eq!(roi_potential(High, High), Medium);
        assert_eq!(roi_potential(Low, Low), Medium);
        assert_eq!(roi_potential(Low, Medium), Low);
        assert_eq!(roi_potential(Low, High), Low);
        assert_eq!(roi_potential(Medium, High), Low);
    }

    #[test]
    fn test_tools_are_unique_and_default_when_unmatched() {
        let s = step("Copy spreadsheet into Excel", 10, &[], &[]);
        let tools = suggest_automation_tools(&s);
        assert_eq!(tools, vec!["n8n", "Make", "Zapier", "Power Automate"]);

        let plain = step("Walk to warehouse", 10, &[], &[]);
        assert_eq!(suggest_automation_tools(&plain), vec!["n8n", "Make", "Zapier"]);
    }

    #[test]
    fn test_one_opportunity_per_step_in_order() {
        let steps = vec![
            step("Email client", 10, &[], &[]),
            step("Schedule meeting", 10, &["scheduling back and forth"], &[]),
        ];
        let opportunities = analyze_automation_opportunities(&steps);
        assert_eq!(opportunities.len(), 2);
        assert_eq!(opportunities[0].step_id, steps[0].id);
        assert_eq!(opportunities[1].step_id, steps[1].id);
        assert!(opportunities[1].suggested_tools.contains(&"Calendly".to_string()));
        assert!(opportunities[0].description.starts_with("\"Email client\""));
    }
}
