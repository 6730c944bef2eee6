//! The result of one team run and its Markdown rendering.

use crate::agent::AgentResponse;
use crate::links::{extract_doc_link, DocLink};
use crate::persona::{Persona, TEAM};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// What one persona produced.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaOutcome {
    pub persona: &'static Persona,
    pub response: AgentResponse,
    pub doc_link: Option<DocLink>,
}

impl PersonaOutcome {
    /// Wrap a response, extracting its document link.
    pub fn new(persona: &'static Persona, response: AgentResponse) -> Self {
        let doc_link = extract_doc_link(&response.content);
        Self {
            persona,
            response,
            doc_link,
        }
    }
}

/// All persona outcomes of one run, in persona order.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub run_id: Uuid,
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub outcomes: Vec<PersonaOutcome>,
}

impl TeamReport {
    pub fn new(topic: &str) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            topic: topic.to_string(),
            generated_at: Utc::now(),
            outcomes: Vec::with_capacity(TEAM.len()),
        }
    }

    /// Document links with the persona that produced each.
    pub fn doc_links(&self) -> Vec<(&'static Persona, &DocLink)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.doc_link.as_ref().map(|link| (o.persona, link)))
            .collect()
    }

    /// Render the report as Markdown: links first, then each response.
    pub fn to_markdown(&self, show_tool_calls: bool) -> String {
        let mut out = format!("# Learning materials: {}\n\n", self.topic);

        out.push_str("### Google Doc Links:\n");
        for (persona, link) in self.doc_links() {
            out.push_str(&format!(
                "- **{}:** [View Document]({})\n",
                persona.document_label(),
                link.url()
            ));
        }
        out.push('\n');

        for outcome in &self.outcomes {
            out.push_str(&format!("### {}:\n\n", outcome.persona.response_heading()));
            out.push_str(outcome.response.content.trim_end());
            out.push_str("\n\n");

            if show_tool_calls && !outcome.response.tool_calls.is_empty() {
                out.push_str("Tool calls:\n");
                for call in &outcome.response.tool_calls {
                    out.push_str(&format!("- `{}`\n", call));
                }
                out.push('\n');
            }

            out.push_str("---\n\n");
        }

        out.push_str(&about_markdown());
        out
    }
}

/// The "About the Agents" section.
pub fn about_markdown() -> String {
    let mut out = String::from("### About the Agents:\n");
    for persona in TEAM {
        out.push_str(&format!("- **{}**: {}\n", persona.name, persona.summary));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolCallRecord;
    use crate::persona::{ACADEMIC_ADVISOR, PROFESSOR, RESEARCH_LIBRARIAN, TEACHING_ASSISTANT};

    fn response(content: &str) -> AgentResponse {
        AgentResponse {
            content: content.to_string(),
            tool_calls: Vec::new(),
            iterations: 1,
        }
    }

    fn report() -> TeamReport {
        let mut report = TeamReport::new("LoRA");
        report.outcomes.push(PersonaOutcome::new(
            &PROFESSOR,
            response("Knowledge base: https://docs.google.com/document/d/p1/edit done"),
        ));
        report
            .outcomes
            .push(PersonaOutcome::new(&ACADEMIC_ADVISOR, response("Roadmap without a link")));
        let mut librarian = response("Resources at https://docs.google.com/document/d/l3");
        librarian.tool_calls.push(ToolCallRecord {
            name: "duckduckgo_search".to_string(),
            arguments: r#"{"query":"LoRA"}"#.to_string(),
            result: String::new(),
        });
        report
            .outcomes
            .push(PersonaOutcome::new(&RESEARCH_LIBRARIAN, librarian));
        report.outcomes.push(PersonaOutcome::new(
            &TEACHING_ASSISTANT,
            response("Exercises: https://docs.google.com/document/d/t4/edit"),
        ));
        report
    }

    #[test]
    fn test_links_attributed_to_personas() {
        let report = report();
        let links = report.doc_links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].0.name, "Professor");
        assert_eq!(links[0].1.path, "/document/d/p1/edit");
        assert_eq!(links[1].0.name, "Research Librarian");
        assert_eq!(links[2].0.name, "Teaching Assistant");
    }

    #[test]
    fn test_markdown_layout() {
        let md = report().to_markdown(true);

        assert!(md.contains(
            "- **Professor's Document:** [View Document](https://docs.google.com/document/d/p1/edit)\n"
        ));
        assert!(!md.contains("Academic Advisor's Document"));

        let links_at = md.find("### Google Doc Links:").unwrap();
        let professor_at = md.find("### Professor's Response:").unwrap();
        let advisor_at = md.find("### Academic Advisor's Response:").unwrap();
        let librarian_at = md.find("### Research Librarian's Response:").unwrap();
        let assistant_at = md.find("### Teaching Assistant's Response:").unwrap();
        assert!(links_at < professor_at);
        assert!(professor_at < advisor_at && advisor_at < librarian_at && librarian_at < assistant_at);

        assert!(md.contains(r#"- `duckduckgo_search({"query":"LoRA"})`"#));
        assert!(md.contains("### About the Agents:"));
    }

    #[test]
    fn test_markdown_hides_tool_calls() {
        let md = report().to_markdown(false);
        assert!(!md.contains("Tool calls:"));
    }
}
