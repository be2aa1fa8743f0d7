//! Human-readable run summaries, colorized the way
//! `Jakedismo-codegraph-rust`'s `codegraph` binary formats its indexing and
//! server-status output.

use colored::Colorize;
use recommend::Recommendation;
use trace_model::{Priority, ProcessingStats};

pub fn print_processing_stats(stats: &ProcessingStats) {
    println!("{}", "Processing summary".bold());
    println!("  requirements processed:    {}", stats.requirements_processed);
    println!("  design elements processed: {}", stats.design_elements_processed);
    println!("  code components processed: {}", stats.code_components_processed);
    println!("  edges created:             {}", stats.edges_created.to_string().green());
    println!("  edges removed:             {}", stats.edges_removed.to_string().yellow());

    let failure_rate = stats.batch_failure_rate();
    let batches_line = format!(
        "  batches attempted/failed:  {}/{}",
        stats.batches_attempted, stats.batches_failed
    );
    if failure_rate > 0.0 {
        println!("{}", batches_line.yellow());
    } else {
        println!("{batches_line}");
    }
}

pub fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("{}", "No documentation recommendations.".green());
        return;
    }

    println!(
        "{}",
        format!("{} documentation recommendation(s)", recommendations.len()).bold()
    );
    for rec in recommendations {
        let label = format!("[{:?}] {}", rec.recommendation_type, rec.target_document);
        let colored_label = match rec.priority {
            Priority::Critical => label.red().bold(),
            Priority::High => label.red(),
            Priority::Medium => label.yellow(),
            Priority::Low => label.normal(),
            Priority::Other(_) => label.normal(),
        };
        println!("{colored_label}");
        println!("  section: {}", rec.section);
        println!("  why: {}", rec.why_update_needed);
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}
