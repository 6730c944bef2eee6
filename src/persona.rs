//! The four fixed personas of the teaching team.

use crate::agent::ToolKind;
use serde::Serialize;

/// Reminder appended to every persona's instructions.
const CREATE_DOC: &str = "Open a new Google Doc and write down the response of the agent neatly with great formatting and structure in it. **Include the Google Doc link in your response.**";

/// A fixed persona: instructions and tool bindings for one role.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub name: &'static str,
    pub role: &'static str,
    /// One-line description for the "About the Agents" section.
    pub summary: &'static str,
    /// Name of the document this persona produces.
    pub deliverable: &'static str,
    /// Shown while this persona is working.
    pub progress: &'static str,
    pub instructions: &'static [&'static str],
    pub tools: &'static [ToolKind],
}

impl Persona {
    /// Label for this persona's document link, e.g. "Professor's Document".
    pub fn document_label(&self) -> String {
        format!("{}'s Document", self.name)
    }

    /// Heading for this persona's response, e.g. "Professor's Response".
    pub fn response_heading(&self) -> String {
        format!("{}'s Response", self.name)
    }

    /// Build the system prompt for this persona.
    pub fn system_prompt(&self, markdown_instruction: Option<&str>) -> String {
        let mut prompt = format!("You are {}.\nYour role is: {}\n\n## Instructions\n", self.name, self.role);
        for instruction in self.instructions {
            prompt.push_str("- ");
            prompt.push_str(instruction);
            prompt.push('\n');
        }
        if let Some(extra) = markdown_instruction {
            prompt.push_str("- ");
            prompt.push_str(extra);
            prompt.push('\n');
        }
        prompt
    }
}

pub static PROFESSOR: Persona = Persona {
    name: "Professor",
    role: "Research and Knowledge Specialist",
    summary: "Researches the topic and creates a detailed knowledge base.",
    deliverable: "Knowledge Base",
    progress: "Generating Knowledge Base...",
    instructions: &[
        "Create a comprehensive knowledge base that covers fundamental concepts, advanced topics, and current developments of the given topic.",
        "Include key terminology, core principles, and practical applications and make it as a detailed report that anyone who's starting out can read and get maximum value out of it.",
        "Make sure it is formatted in a way that is easy to read and understand. DONT FORGET TO CREATE THE GOOGLE DOCUMENT.",
        CREATE_DOC,
    ],
    tools: &[ToolKind::CreateDocument],
};

pub static ACADEMIC_ADVISOR: Persona = Persona {
    name: "Academic Advisor",
    role: "Learning Path Designer",
    summary: "Designs a structured learning roadmap for the topic.",
    deliverable: "Learning Roadmap",
    progress: "Generating Learning Roadmap...",
    instructions: &[
        "Using the knowledge base for the given topic, create a detailed learning roadmap.",
        "Break down the topic into logical subtopics and arrange them in order of progression, a detailed report of roadmap that includes all the subtopics in order to be an expert in this topic.",
        "Include estimated time commitments for each section.",
        "Present the roadmap in a clear, structured format. DONT FORGET TO CREATE THE GOOGLE DOCUMENT.",
        CREATE_DOC,
    ],
    tools: &[ToolKind::CreateDocument],
};

pub static RESEARCH_LIBRARIAN: Persona = Persona {
    name: "Research Librarian",
    role: "Learning Resource Specialist",
    summary: "Curates high-quality learning resources.",
    deliverable: "Resources",
    progress: "Curating Learning Resources...",
    instructions: &[
        "Find and validate high-quality learning resources for the given topic.",
        "Use the DuckDuckGo search tool to find current and relevant learning materials.",
        "Include technical blogs, GitHub repositories, official documentation, video tutorials, and courses.",
        "Verify the credibility and relevance of each resource.",
        "Present the resources in a curated list with descriptions and quality assessments. DONT FORGET TO CREATE THE GOOGLE DOCUMENT.",
        CREATE_DOC,
    ],
    tools: &[
        ToolKind::CreateDocument,
        ToolKind::ArxivSearch,
        ToolKind::WebSearch,
    ],
};

pub static TEACHING_ASSISTANT: Persona = Persona {
    name: "Teaching Assistant",
    role: "Exercise Creator",
    summary: "Creates practice materials, exercises, and projects.",
    deliverable: "Practice Materials",
    progress: "Creating Practice Materials...",
    instructions: &[
        "Create comprehensive practice materials for the given topic.",
        "Use the DuckDuckGo search tool to find example problems and real-world applications.",
        "Include progressive exercises, quizzes, hands-on projects, and real-world application scenarios.",
        "Ensure the materials align with the roadmap progression.",
        "Provide detailed solutions and explanations for all practice materials. DONT FORGET TO CREATE THE GOOGLE DOCUMENT.",
        CREATE_DOC,
    ],
    tools: &[ToolKind::CreateDocument, ToolKind::WebSearch],
};

/// The team, in the order the personas run.
pub static TEAM: [&Persona; 4] = [
    &PROFESSOR,
    &ACADEMIC_ADVISOR,
    &RESEARCH_LIBRARIAN,
    &TEACHING_ASSISTANT,
];
