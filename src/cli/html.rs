//! HTML rendering for the web front-end.

use crate::persona::TEAM;
use crate::team::TeamReport;
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; display: flex; color: #262730; }
aside { width: 300px; min-height: 100vh; background: #f0f2f6; padding: 1.5rem; box-sizing: border-box; }
main { flex: 1; max-width: 760px; margin: 0 auto; padding: 2rem; }
label { display: block; font-size: 0.9rem; margin: 1rem 0 0.3rem; }
input[type=text], input[type=password] { width: 100%; padding: 0.5rem; box-sizing: border-box; }
button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
.info { background: #e8f0fe; padding: 0.8rem; border-radius: 0.4rem; margin: 1rem 0; }
.error { background: #fde8e8; color: #7d1a1a; padding: 0.8rem; border-radius: 0.4rem; margin: 1rem 0; }
.response { overflow-wrap: anywhere; }
.response table { border-collapse: collapse; }
.response td, .response th { border: 1px solid #d0d3d9; padding: 0.3rem 0.5rem; }
.tools { color: #6b6f76; font-size: 0.85rem; }
"#;

/// Everything a page render needs.
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub openai_api_key: &'a str,
    pub composio_api_key: &'a str,
    pub topic: &'a str,
    pub error: Option<String>,
    pub report: Option<&'a TeamReport>,
    pub show_tool_calls: bool,
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a persona response written in Markdown.
///
/// Raw HTML in the text is shown as text and `javascript:` links are dropped.
pub fn markdown(text: &str) -> String {
    let events = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH).map(
        |event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::from("#"),
                title,
                id,
            }),
            other => other,
        },
    );

    let mut html = String::with_capacity(text.len() * 3 / 2);
    push_html(&mut html, events);
    html
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("javascript:") || url.starts_with("vbscript:") || url.starts_with("data:")
}

impl Page<'_> {
    /// Render the full page.
    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>AI Teaching Agent Team</title>\n");
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
        html.push_str("<form method=\"post\" action=\"/run\" style=\"display: contents\">\n");

        html.push_str(&self.sidebar());
        html.push_str("<main>\n");
        html.push_str("<h1>AI Teaching Agent Team</h1>\n");
        html.push_str("<p>Enter a topic to generate a detailed learning path and resources</p>\n");
        html.push_str(
            "<div class=\"info\">The agents will create detailed Google Docs for each section \
             (Knowledge Base, Learning Roadmap, Resources, and Practice Materials). \
             The links to these documents will be displayed below after processing.</div>\n",
        );
        html.push_str("<label for=\"topic\">Enter the topic you want to learn about:</label>\n");
        html.push_str(&format!(
            "<input type=\"text\" id=\"topic\" name=\"topic\" placeholder=\"e.g., Machine Learning, LoRA, etc.\" value=\"{}\">\n",
            escape(self.topic)
        ));
        html.push_str("<button type=\"submit\">Start</button>\n");

        if let Some(error) = &self.error {
            html.push_str(&format!("<div class=\"error\">{}</div>\n", escape(error)));
        }

        if let Some(report) = self.report {
            html.push_str(&results(report, self.show_tool_calls));
        }

        html.push_str(&about());
        html.push_str("</main>\n</form>\n</body>\n</html>\n");
        html
    }

    fn sidebar(&self) -> String {
        format!(
            "<aside>\n<h2>API Keys Configuration</h2>\n\
             <label for=\"openai_api_key\">Enter your OpenAI API Key</label>\n\
             <input type=\"password\" id=\"openai_api_key\" name=\"openai_api_key\" value=\"{}\">\n\
             <label for=\"composio_api_key\">Enter your Composio API Key</label>\n\
             <input type=\"password\" id=\"composio_api_key\" name=\"composio_api_key\" value=\"{}\">\n\
             <div class=\"info\">Note: detailed agent runs are also logged in the terminal running the server.</div>\n\
             </aside>\n",
            escape(self.openai_api_key),
            escape(self.composio_api_key)
        )
    }
}

fn results(report: &TeamReport, show_tool_calls: bool) -> String {
    let mut html = String::from("<h3>Google Doc Links:</h3>\n<ul>\n");
    for (persona, link) in report.doc_links() {
        html.push_str(&format!(
            "<li><strong>{}:</strong> <a href=\"{}\" target=\"_blank\" rel=\"noopener\">View Document</a></li>\n",
            escape(&persona.document_label()),
            escape(&link.url())
        ));
    }
    html.push_str("</ul>\n");

    for outcome in &report.outcomes {
        html.push_str(&format!(
            "<h3>{}:</h3>\n<div class=\"response\">\n{}</div>\n",
            escape(&outcome.persona.response_heading()),
            markdown(outcome.response.content.trim())
        ));

        if show_tool_calls && !outcome.response.tool_calls.is_empty() {
            html.push_str("<ul class=\"tools\">\n");
            for call in &outcome.response.tool_calls {
                html.push_str(&format!("<li><code>{}</code></li>\n", escape(&call.to_string())));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<hr>\n");
    }

    html
}

fn about() -> String {
    let mut html = String::from("<hr>\n<h3>About the Agents:</h3>\n<ul>\n");
    for persona in TEAM {
        html.push_str(&format!(
            "<li><strong>{}</strong>: {}</li>\n",
            escape(persona.name),
            escape(persona.summary)
        ));
    }
    html.push_str("</ul>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentResponse;
    use crate::persona::PROFESSOR;
    use crate::team::PersonaOutcome;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_empty_page_has_form() {
        let html = Page::default().render();
        assert!(html.contains("name=\"openai_api_key\""));
        assert!(html.contains("name=\"composio_api_key\""));
        assert!(html.contains("name=\"topic\""));
        assert!(html.contains(">Start</button>"));
        assert!(html.contains("<strong>Teaching Assistant</strong>"));
        assert!(!html.contains("Google Doc Links"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_error_and_topic_are_escaped() {
        let html = Page {
            topic: "<b>",
            error: Some("Please enter a topic.".to_string()),
            ..Default::default()
        }
        .render();
        assert!(html.contains("value=\"&lt;b&gt;\""));
        assert!(html.contains("<div class=\"error\">Please enter a topic.</div>"));
    }

    #[test]
    fn test_results_section() {
        let mut report = TeamReport::new("LoRA");
        report.outcomes.push(PersonaOutcome::new(
            &PROFESSOR,
            AgentResponse {
                content: "See https://docs.google.com/document/d/abc <done>".to_string(),
                tool_calls: Vec::new(),
                iterations: 1,
            },
        ));

        let html = Page {
            report: Some(&report),
            ..Default::default()
        }
        .render();

        assert!(html.contains(
            "<li><strong>Professor&#x27;s Document:</strong> <a href=\"https://docs.google.com/document/d/abc\""
        ));
        assert!(html.contains("<h3>Professor&#x27;s Response:</h3>"));
        assert!(html.contains("&lt;done&gt;"));
    }

    #[test]
    fn test_markdown_response() {
        let html = markdown("## Week 1\n\n- **Ownership** basics\n- [Book](https://doc.rust-lang.org/book/)\n");
        assert!(html.contains("<h2>Week 1</h2>"));
        assert!(html.contains("<li><strong>Ownership</strong> basics</li>"));
        assert!(html.contains("<a href=\"https://doc.rust-lang.org/book/\">Book</a>"));
    }

    #[test]
    fn test_markdown_neutralises_html_and_script_links() {
        let html = markdown("<script>alert(1)</script>\n\nClick [here](javascript:alert(1)) or <b>there</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;there&lt;/b&gt;"));
        assert!(html.contains("<a href=\"#\">here</a>"));
        assert!(!html.contains("javascript:"));
    }
}
