//! Request dispatcher — routes tool calls to command vectors.
//!
//! Each tool is described by a [`ToolPlan`] record (which argument holds the
//! path list, how the prompt is produced, whether the `--all_files` flag is
//! used); a single generic routine interprets the plan. The plan table is
//! built once at startup next to the catalog and never mutated.

pub mod annotate;
pub mod templates;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::executor::CommandRunner;
use crate::tools::ToolCatalog;
use crate::types::{Error, Result};
use annotate::annotate_all;
use templates::{TemplateTable, ARCHITECTURE_ANALYSIS, SECURITY_AUDIT};

/// How a tool's final prompt text is produced.
#[derive(Debug, Clone, Copy)]
enum PromptSpec {
    /// Taken verbatim from a required string argument.
    Argument(&'static str),
    /// Resolved from a template table keyed by a category argument.
    Templated {
        table: &'static TemplateTable,
        key_arg: &'static str,
    },
    /// Built from a feature name, unless an override prompt is supplied.
    Feature {
        name_arg: &'static str,
        override_arg: &'static str,
    },
}

/// Per-tool command-assembly strategy.
#[derive(Debug, Clone, Copy)]
struct ToolPlan {
    /// Name of the argument carrying the path list to annotate, if any.
    path_arg: Option<&'static str>,
    /// Insert `--all_files` instead of path tokens.
    all_files: bool,
    prompt: PromptSpec,
}

/// Routes `(tool name, arguments)` pairs to supervised command executions.
pub struct Dispatcher {
    catalog: ToolCatalog,
    plans: HashMap<&'static str, ToolPlan>,
    runner: Arc<dyn CommandRunner>,
    binary: String,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("binary", &self.binary)
            .field("tools", &self.catalog.len())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        let mut plans: HashMap<&'static str, ToolPlan> = HashMap::new();
        plans.insert(
            "gemini_analyze_files",
            ToolPlan {
                path_arg: Some("files"),
                all_files: false,
                prompt: PromptSpec::Argument("prompt"),
            },
        );
        plans.insert(
            "gemini_analyze_directories",
            ToolPlan {
                path_arg: Some("directories"),
                all_files: false,
                prompt: PromptSpec::Argument("prompt"),
            },
        );
        plans.insert(
            "gemini_analyze_all_files",
            ToolPlan {
                path_arg: None,
                all_files: true,
                prompt: PromptSpec::Argument("prompt"),
            },
        );
        plans.insert(
            "gemini_verify_implementation",
            ToolPlan {
                path_arg: Some("search_paths"),
                all_files: false,
                prompt: PromptSpec::Feature {
                    name_arg: "feature_name",
                    override_arg: "verification_prompt",
                },
            },
        );
        plans.insert(
            "gemini_security_audit",
            ToolPlan {
                path_arg: Some("paths"),
                all_files: false,
                prompt: PromptSpec::Templated {
                    table: &SECURITY_AUDIT,
                    key_arg: "audit_type",
                },
            },
        );
        plans.insert(
            "gemini_architecture_analysis",
            ToolPlan {
                path_arg: Some("paths"),
                all_files: false,
                prompt: PromptSpec::Templated {
                    table: &ARCHITECTURE_ANALYSIS,
                    key_arg: "analysis_type",
                },
            },
        );

        Self {
            catalog: ToolCatalog::builtin(),
            plans,
            runner,
            binary: binary.into(),
        }
    }

    /// The tool catalog exposed over `tools/list`.
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Dispatch one tool call, returning the text response for the caller.
    ///
    /// An unrecognized tool name is tolerated and reported as plain text;
    /// invalid arguments are hard errors raised before any command is built.
    pub async fn dispatch(&self, tool_name: &str, args: &Value) -> Result<String> {
        let Some(plan) = self.plans.get(tool_name) else {
            tracing::warn!(tool_name, "call for unregistered tool");
            return Ok(format!("Unknown tool: {}", tool_name));
        };

        self.catalog.validate_args(tool_name, args)?;

        let prompt = self.resolve_prompt(tool_name, plan, args)?;
        let full_prompt = match plan.path_arg {
            Some(arg) => {
                let paths = list_field(args, tool_name, arg)?;
                let tokens = annotate_all(&paths);
                if tokens.is_empty() {
                    prompt
                } else {
                    format!("{} {}", tokens, prompt)
                }
            }
            None => prompt,
        };

        let mut command = Vec::with_capacity(4);
        command.push(self.binary.clone());
        if plan.all_files {
            command.push("--all_files".to_string());
        }
        command.push("-p".to_string());
        command.push(full_prompt);

        let cwd = opt_str_field(args, "working_directory").map(PathBuf::from);

        tracing::info!(tool_name, "dispatching analysis command");
        let result = self.runner.run(&command, cwd.as_deref()).await;

        if result.success() {
            Ok(result.stdout)
        } else {
            tracing::warn!(tool_name, exit_code = result.exit_code, "command failed");
            Ok(format!("Error: {}", result.stderr))
        }
    }

    fn resolve_prompt(&self, tool_name: &str, plan: &ToolPlan, args: &Value) -> Result<String> {
        match plan.prompt {
            PromptSpec::Argument(arg) => str_field(args, tool_name, arg),
            PromptSpec::Templated { table, key_arg } => {
                let key = str_field(args, tool_name, key_arg)?;
                Ok(table.resolve(&key).to_string())
            }
            PromptSpec::Feature { name_arg, override_arg } => {
                if let Some(custom) = opt_str_field(args, override_arg) {
                    return Ok(custom);
                }
                let feature = str_field(args, tool_name, name_arg)?;
                Ok(format!(
                    "Has {} been implemented in this codebase? Show me the relevant files \
                     and functions if it exists, or confirm if it's missing.",
                    feature
                ))
            }
        }
    }
}

// =============================================================================
// Argument extraction helpers
// =============================================================================

fn str_field(args: &Value, tool: &str, key: &str) -> Result<String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::missing_argument(tool, key))
}

fn opt_str_field(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn list_field(args: &Value, tool: &str, key: &str) -> Result<Vec<String>> {
    args.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .ok_or_else(|| Error::missing_argument(tool, key))
}

// =============================================================================
// Tests
// =============================================================================
