//! Prompt catalog — canned meta-prompts for the calling agent.
//!
//! Each catalog entry renders an *instruction* naming a tool and its
//! JSON-encoded arguments; the catalog never invokes the dispatcher itself.
//! The calling agent decides whether to follow the instruction. Unknown
//! prompt names are hard errors, unlike the dispatcher's tolerant
//! unknown-tool text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{Error, Result};

/// Argument accepted by a catalog prompt. Prompt arguments are always plain
/// strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgDef {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// A named meta-prompt exposed over `prompts/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptEntry {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgDef>,
}

/// Rendered prompt payload — a chat message for the calling agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

/// Immutable catalog of meta-prompts.
#[derive(Debug, Default)]
pub struct PromptCatalog {
    entries: Vec<PromptEntry>,
}

impl PromptCatalog {
    pub fn builtin() -> Self {
        let arg = |name: &str, description: &str, required: bool| PromptArgDef {
            name: name.to_string(),
            description: description.to_string(),
            required,
        };

        Self {
            entries: vec![
                PromptEntry {
                    name: "analyze-codebase".to_string(),
                    description: "Guided architectural analysis of the current codebase"
                        .to_string(),
                    arguments: vec![arg(
                        "focus",
                        "Analysis focus: overview, dependencies, patterns, structure, or coupling (defaults to overview)",
                        false,
                    )],
                },
                PromptEntry {
                    name: "security-review".to_string(),
                    description: "Security audit of selected paths".to_string(),
                    arguments: vec![
                        arg("paths", "Space-separated paths to audit", true),
                        arg(
                            "audit_type",
                            "Audit focus: sql_injection, xss, auth, general, or input_validation (defaults to general)",
                            false,
                        ),
                    ],
                },
                PromptEntry {
                    name: "verify-feature".to_string(),
                    description: "Check whether a feature is implemented in the codebase"
                        .to_string(),
                    arguments: vec![
                        arg("feature_name", "Feature to look for", true),
                        arg("paths", "Space-separated paths to search", true),
                    ],
                },
            ],
        }
    }

    /// All prompt entries in declaration order.
    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&PromptEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Render a prompt into the instruction message for the calling agent.
    ///
    /// The payload tells the agent which tool to invoke and with what
    /// arguments; nothing is executed here.
    pub fn get_prompt(
        &self,
        name: &str,
        args: &HashMap<String, String>,
    ) -> Result<PromptMessage> {
        let entry = self
            .get(name)
            .ok_or_else(|| Error::not_found(format!("Unknown prompt: {}", name)))?;

        for def in &entry.arguments {
            if def.required && !args.contains_key(&def.name) {
                return Err(Error::missing_argument(&entry.name, &def.name));
            }
        }

        let (tool, tool_args) = match entry.name.as_str() {
            "analyze-codebase" => {
                let focus = args.get("focus").map(String::as_str).unwrap_or("overview");
                (
                    "gemini_architecture_analysis",
                    json!({"analysis_type": focus, "paths": ["."]}),
                )
            }
            "security-review" => {
                let audit_type = args
                    .get("audit_type")
                    .map(String::as_str)
                    .unwrap_or("general");
                // Required args were checked above; missing keys cannot occur.
                let paths = args.get("paths").map(String::as_str).unwrap_or_default();
                (
                    "gemini_security_audit",
                    json!({
                        "audit_type": audit_type,
                        "paths": split_paths(paths),
                    }),
                )
            }
            "verify-feature" => {
                let feature = args.get("feature_name").map(String::as_str).unwrap_or_default();
                let paths = args.get("paths").map(String::as_str).unwrap_or_default();
                (
                    "gemini_verify_implementation",
                    json!({
                        "feature_name": feature,
                        "search_paths": split_paths(paths),
                    }),
                )
            }
            other => {
                return Err(Error::internal(format!(
                    "prompt '{}' has no renderer",
                    other
                )))
            }
        };

        Ok(PromptMessage {
            role: "user",
            text: render_instruction(tool, &tool_args)?,
        })
    }
}

fn split_paths(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(|s| s.to_string()).collect()
}

fn render_instruction(tool: &str, tool_args: &serde_json::Value) -> Result<String> {
    Ok(format!(
        "Invoke the {} tool with the following arguments:\n\n{}\n\n\
         Relay the tool's response back to the user, summarizing key findings.",
        tool,
        serde_json::to_string_pretty(tool_args)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builtin_prompts_are_stable() {
        let catalog = PromptCatalog::builtin();
        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["analyze-codebase", "security-review", "verify-feature"]
        );
    }

    #[test]
    fn unknown_prompt_is_a_hard_error() {
        let catalog = PromptCatalog::builtin();
        let err = catalog.get_prompt("nonexistent", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(err.to_string(), "not found: Unknown prompt: nonexistent");
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        let catalog = PromptCatalog::builtin();
        let err = catalog
            .get_prompt("verify-feature", &string_map(&[("paths", "src")]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingArgument { ref argument, .. } if argument == "feature_name"
        ));
    }

    #[test]
    fn security_review_names_tool_and_json_args() {
        let catalog = PromptCatalog::builtin();
        let message = catalog
            .get_prompt(
                "security-review",
                &string_map(&[("paths", "src lib"), ("audit_type", "xss")]),
            )
            .unwrap();

        assert_eq!(message.role, "user");
        assert!(message.text.contains("gemini_security_audit"));
        assert!(message.text.contains("\"xss\""));
        assert!(message.text.contains("\"src\""));
        assert!(message.text.contains("\"lib\""));
    }

    #[test]
    fn analyze_codebase_defaults_focus_to_overview() {
        let catalog = PromptCatalog::builtin();
        let message = catalog
            .get_prompt("analyze-codebase", &HashMap::new())
            .unwrap();
        assert!(message.text.contains("gemini_architecture_analysis"));
        assert!(message.text.contains("\"overview\""));
    }
}
