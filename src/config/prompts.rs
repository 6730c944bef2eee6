//! Prompt templates for Lectern.
//!
//! The task prompt can be customized by placing a `task.toml` file in the
//! custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub task: TaskPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// The message each persona receives for a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPrompts {
    pub user: String,
    /// Appended to every persona's instructions when Markdown output is on.
    pub markdown_instruction: String,
}

impl Default for TaskPrompts {
    fn default() -> Self {
        Self {
            user: "the topic is: {{topic}},Don't forget to add the Google Doc link in your response."
                .to_string(),
            markdown_instruction: "Use markdown to format your answers.".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let task_path = custom_path.join("task.toml");
            if task_path.exists() {
                let content = std::fs::read_to_string(&task_path)?;
                prompts.task = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Render the task message for a topic.
    pub fn task_for(&self, topic: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        self.render_with_custom(&self.task.user, &vars)
    }
}
