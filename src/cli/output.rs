//! CLI output formatting utilities.

use crate::team::TeamReport;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a divider line.
    pub fn divider() {
        println!("{}", style("─".repeat(60)).dim());
    }

    /// Print a team report: document links first, then every response.
    pub fn report(report: &TeamReport, show_tool_calls: bool) {
        Output::header("Google Doc Links");
        let links = report.doc_links();
        if links.is_empty() {
            Output::warning("No Google Doc links found in the responses.");
        }
        for (persona, link) in links {
            println!(
                "  {} {}: {}",
                style("*").cyan(),
                style(persona.document_label()).bold(),
                style(link.url()).underlined()
            );
        }

        for outcome in &report.outcomes {
            Output::header(&outcome.persona.response_heading());
            println!();
            println!("{}", outcome.response.content.trim_end());

            if show_tool_calls && !outcome.response.tool_calls.is_empty() {
                println!();
                println!("{}", style(format!("Tool calls ({})", outcome.response.tool_calls.len())).dim());
                for call in &outcome.response.tool_calls {
                    println!("  {} {}", style("-").dim(), truncate(&call.to_string(), 100));
                }
            }

            println!();
            Output::divider();
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate to at most `max_chars` characters with an ellipsis.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
