use colored::*;
use leanlens_core::analyzer::report::{format_minutes, ProcessAnalysis, Severity, WasteInstance};
use leanlens_core::{Process, ProcessAssessment, ScoreGrade};

/// One line of `leanlens list`.
pub struct AssessmentRow {
    pub assessment: ProcessAssessment,
    pub process_name: Option<String>,
    pub score: Option<u32>,
}

/// Print a full analysis report to the terminal.
pub fn print_analysis_report(process: &Process, analysis: &ProcessAnalysis) {
    println!();
    println!(
        "{}",
        format!(
            " LeanLens v{} — Analyzing \"{}\"",
            env!("CARGO_PKG_VERSION"),
            process.name
        )
        .bold()
    );
    println!();

    print_overview(process, analysis);

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    print_wastes(process, &analysis.wastes);
    print_bottlenecks(process, analysis);
    print_automation(process, analysis);

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    print_recommendations(&analysis.recommendations);
    print_summary(analysis);
}

fn print_overview(process: &Process, analysis: &ProcessAnalysis) {
    let m = &analysis.metrics;

    println!(" {}", "Process Metrics".bold().underline());
    println!(
        " {} {} steps, runs {}",
        "|-".dimmed(),
        process.steps.len(),
        process.frequency.label().cyan()
    );
    println!(" {} Lead time:          {}", "|-".dimmed(), format_minutes(m.lead_time));
    println!(" {} Cycle time:         {}", "|-".dimmed(), format_minutes(m.cycle_time));
    println!(
        " {} Waiting time:       {}",
        "|-".dimmed(),
        format_minutes(analysis.waiting_time())
    );
    println!(
        " {} Process efficiency: {}",
        "|-".dimmed(),
        color_percent(m.process_efficiency, 50, 70)
    );
    println!(
        " {} First-pass yield:   {}",
        "|-".dimmed(),
        color_percent(m.first_pass_yield, 80, 90)
    );
    println!(" {} Touch points:       {}", "|-".dimmed(), m.touch_points);
    println!();
}

fn color_percent(value: u32, poor_below: u32, good_from: u32) -> String {
    let text = format!("{}%", value);
    if value < poor_below {
        text.red().bold().to_string()
    } else if value >= good_from {
        text.green().to_string()
    } else {
        text.yellow().to_string()
    }
}

fn severity_tag(severity: Severity) -> String {
    let label = format!(" {} ", severity.symbol());
    match severity {
        Severity::High => label.on_red().white().bold().to_string(),
        Severity::Medium => label.on_yellow().black().bold().to_string(),
        Severity::Low => label.dimmed().to_string(),
    }
}

fn print_wastes(process: &Process, wastes: &[WasteInstance]) {
    println!(" {}", "Waste Findings".bold().underline());

    if wastes.is_empty() {
        println!(
            " {} No waste detected. This process looks lean!",
            "OK".green().bold()
        );
        println!();
        return;
    }

    for waste in wastes {
        println!(
            " {} {} in \"{}\"",
            severity_tag(waste.severity),
            waste.waste_type.label().bold(),
            process.step_name(&waste.step_id)
        );
        if !waste.description.is_empty() {
            println!("   {} {}", "|".dimmed(), waste.description);
        }
        println!("   {} {}", "|".dimmed(), waste.estimated_impact.dimmed());
    }
    println!();
}

fn print_bottlenecks(process: &Process, analysis: &ProcessAnalysis) {
    if analysis.bottlenecks.is_empty() {
        return;
    }

    println!(" {}", "Bottlenecks".bold().underline());
    for id in &analysis.bottlenecks {
        let Some(step) = process.step(id) else {
            continue;
        };
        let role = if step.responsible_role.is_empty() {
            "unassigned"
        } else {
            step.responsible_role.as_str()
        };
        println!(
            " {} {} ({}, {})",
            "|-".dimmed(),
            step.name.yellow().bold(),
            format_minutes(step.estimated_duration as u64),
            role
        );
    }
    println!();
}

fn print_automation(process: &Process, analysis: &ProcessAnalysis) {
    println!(" {}", "Automation Opportunities".bold().underline());
    for opp in &analysis.automation_opportunities {
        let roi = match opp.roi_potential {
            Severity::High => "HIGH ROI".green().bold().to_string(),
            Severity::Medium => "MEDIUM ROI".yellow().to_string(),
            Severity::Low => "LOW ROI".dimmed().to_string(),
        };
        let marker = if analysis.is_bottleneck(&opp.step_id) {
            " (bottleneck)".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            " {} {}{} [{}] potential {}, complexity {}",
            "|-".dimmed(),
            process.step_name(&opp.step_id).bold(),
            marker,
            roi,
            opp.potential.symbol().to_lowercase(),
            opp.complexity.symbol().to_lowercase()
        );
        println!(
            " {}   Tools: {}",
            "|".dimmed(),
            opp.suggested_tools.join(", ").cyan()
        );
    }
    println!();
}

fn print_recommendations(recommendations: &[String]) {
    println!(" {}", "Recommendations".bold().underline());
    if recommendations.is_empty() {
        println!(" {} Nothing to change right now.", "OK".green().bold());
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(" {:>2}. {}", i + 1, rec);
    }
    println!();
}

fn print_summary(analysis: &ProcessAnalysis) {
    let grade = ScoreGrade::from_score(analysis.overall_score);
    let score = format!("{}/100", analysis.overall_score);
    let score = match grade {
        ScoreGrade::Excellent => score.green().bold(),
        ScoreGrade::Good => score.yellow().bold(),
        ScoreGrade::NeedsWork => score.yellow(),
        ScoreGrade::Critical => score.red().bold(),
    };

    println!(" {}", "Summary".bold().underline());
    println!(
        " {} Process score: {} ({})",
        "|-".dimmed(),
        score,
        grade.label().cyan()
    );
    println!(" {} {}", "|-".dimmed(), grade.description());

    let high = analysis.waste_count(Severity::High);
    let medium = analysis.waste_count(Severity::Medium);
    let low = analysis.waste_count(Severity::Low);
    println!(
        " {} Waste: {} high, {} medium, {} low",
        "|-".dimmed(),
        if high > 0 {
            high.to_string().red().bold().to_string()
        } else {
            "0".to_string()
        },
        medium,
        low
    );
    println!(
        " {} Bottlenecks: {} | High-ROI automation candidates: {}",
        "|-".dimmed(),
        analysis.bottlenecks.len(),
        analysis.high_roi_count()
    );
    println!();
}

/// Confirm a saved assessment.
pub fn print_saved(process: &Process, assessment: &ProcessAssessment) {
    println!();
    println!(
        " {} Saved \"{}\" as process {} (assessment {})",
        "SAVED".green().bold(),
        process.name,
        process.id.to_string().cyan(),
        assessment.id
    );
}

/// Print saved assessments, newest first.
pub fn print_assessment_list(rows: &[AssessmentRow]) {
    if rows.is_empty() {
        println!(" No saved assessments. Run `leanlens analyze <path> --save` to create one.");
        return;
    }

    println!();
    println!(" {}", "Saved Assessments".bold().underline());
    for row in rows {
        let name = row.process_name.as_deref().unwrap_or("(process missing)");
        let score = row
            .score
            .map(|s| format!("{}/100", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            " {} {} {} [{}] score {}",
            "|-".dimmed(),
            row.assessment.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            name.bold(),
            row.assessment.status.label(),
            score
        );
        println!(
            " {}   assessment {} | process {}",
            "|".dimmed(),
            row.assessment.id,
            row.assessment.process_id.to_string().cyan()
        );
    }
    println!();
}
