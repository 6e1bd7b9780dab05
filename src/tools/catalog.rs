//! Tool catalog — typed metadata and dispatch-time argument validation.
//!
//! Six tools are exposed, all thin wrappers over one external binary. The
//! catalog holds their schemas so a missing or mistyped argument is rejected
//! before any command vector is assembled.

use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Parameter types
// =============================================================================

/// Parameter type for tool inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    StringList,
    Enum(Vec<String>),
    Optional(Box<ParamType>),
}

impl ParamType {
    /// Validate a JSON value against this parameter type.
    pub fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match self {
            ParamType::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            ParamType::StringList => {
                if let Some(arr) = value.as_array() {
                    for (i, item) in arr.iter().enumerate() {
                        if !item.is_string() {
                            return Err(format!(
                                "expected string at index {}, got {}",
                                i,
                                value_type_name(item)
                            ));
                        }
                    }
                    Ok(())
                } else {
                    Err(format!("expected array, got {}", value_type_name(value)))
                }
            }
            // Unrecognized variants fall back to a default template at
            // dispatch time instead of failing here; only the value's shape
            // is checked.
            ParamType::Enum(_) => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!(
                        "expected string for enum, got {}",
                        value_type_name(value)
                    ))
                }
            }
            ParamType::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate(value)
                }
            }
        }
    }

    /// JSON Schema fragment for this type.
    fn json_schema(&self, description: &str) -> Value {
        match self {
            ParamType::String => json!({
                "type": "string",
                "description": description,
            }),
            ParamType::StringList => json!({
                "type": "array",
                "items": {"type": "string"},
                "description": description,
            }),
            ParamType::Enum(variants) => json!({
                "type": "string",
                "enum": variants,
                "description": description,
            }),
            ParamType::Optional(inner) => inner.json_schema(description),
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Parameter definition
// =============================================================================

/// A single parameter definition for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
}

impl ParamDef {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
        }
    }

    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: ParamType::Optional(Box::new(param_type)),
            description: description.to_string(),
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self.param_type, ParamType::Optional(_))
    }
}

// =============================================================================
// Tool entry
// =============================================================================

/// Complete tool metadata entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamDef>,
}

impl ToolEntry {
    /// Render the MCP `inputSchema` object for this tool.
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &self.parameters {
            properties.insert(
                param.name.clone(),
                param.param_type.json_schema(&param.description),
            );
            if param.is_required() {
                required.push(Value::String(param.name.clone()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool catalog. Immutable after construction; iteration order is
/// declaration order.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    entries: Vec<ToolEntry>,
}

impl ToolCatalog {
    /// Catalog of the six built-in analysis tools.
    pub fn builtin() -> Self {
        let working_directory = || {
            ParamDef::optional(
                "working_directory",
                ParamType::String,
                "Working directory to run gemini command from (optional, defaults to current directory)",
            )
        };

        Self {
            entries: vec![
                ToolEntry {
                    name: "gemini_analyze_files".to_string(),
                    description: "Analyze specific files using Gemini CLI with @ syntax"
                        .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "files",
                            ParamType::StringList,
                            "List of file paths to analyze (relative to current working directory)",
                        ),
                        ParamDef::required(
                            "prompt",
                            ParamType::String,
                            "Analysis prompt to send to Gemini",
                        ),
                        working_directory(),
                    ],
                },
                ToolEntry {
                    name: "gemini_analyze_directories".to_string(),
                    description: "Analyze entire directories using Gemini CLI with @ syntax"
                        .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "directories",
                            ParamType::StringList,
                            "List of directory paths to analyze",
                        ),
                        ParamDef::required(
                            "prompt",
                            ParamType::String,
                            "Analysis prompt to send to Gemini",
                        ),
                        working_directory(),
                    ],
                },
                ToolEntry {
                    name: "gemini_analyze_all_files".to_string(),
                    description:
                        "Analyze all files in current directory using Gemini CLI --all_files flag"
                            .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "prompt",
                            ParamType::String,
                            "Analysis prompt to send to Gemini",
                        ),
                        working_directory(),
                    ],
                },
                ToolEntry {
                    name: "gemini_verify_implementation".to_string(),
                    description:
                        "Verify if specific features/patterns are implemented in the codebase"
                            .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "feature_name",
                            ParamType::String,
                            "Name of the feature to verify (e.g., 'dark mode', 'JWT authentication')",
                        ),
                        ParamDef::required(
                            "search_paths",
                            ParamType::StringList,
                            "List of directories/files to search in",
                        ),
                        ParamDef::optional(
                            "verification_prompt",
                            ParamType::String,
                            "Custom verification prompt (optional)",
                        ),
                        working_directory(),
                    ],
                },
                ToolEntry {
                    name: "gemini_security_audit".to_string(),
                    description: "Perform security analysis of the codebase using Gemini"
                        .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "audit_type",
                            ParamType::Enum(vec![
                                "sql_injection".to_string(),
                                "xss".to_string(),
                                "auth".to_string(),
                                "general".to_string(),
                                "input_validation".to_string(),
                            ]),
                            "Type of security audit to perform",
                        ),
                        ParamDef::required(
                            "paths",
                            ParamType::StringList,
                            "Paths to audit (files or directories)",
                        ),
                        working_directory(),
                    ],
                },
                ToolEntry {
                    name: "gemini_architecture_analysis".to_string(),
                    description: "Analyze codebase architecture and patterns using Gemini"
                        .to_string(),
                    parameters: vec![
                        ParamDef::required(
                            "analysis_type",
                            ParamType::Enum(vec![
                                "overview".to_string(),
                                "dependencies".to_string(),
                                "patterns".to_string(),
                                "structure".to_string(),
                                "coupling".to_string(),
                            ]),
                            "Type of architectural analysis",
                        ),
                        ParamDef::required(
                            "paths",
                            ParamType::StringList,
                            "Paths to analyze",
                        ),
                        working_directory(),
                    ],
                },
            ],
        }
    }

    /// Get a tool entry by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tool entries in declaration order.
    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a call's arguments against a tool's parameter definitions.
    ///
    /// A missing required argument and a mistyped value are both dispatch-time
    /// failures; no command is ever built from an invalid argument map.
    pub fn validate_args(&self, tool_name: &str, args: &Value) -> Result<()> {
        let entry = self
            .get(tool_name)
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", tool_name)))?;

        let map = args
            .as_object()
            .ok_or_else(|| Error::validation("arguments must be a JSON object"))?;

        for param in &entry.parameters {
            match map.get(&param.name) {
                Some(value) if !value.is_null() => {
                    param.param_type.validate(value).map_err(|e| {
                        Error::validation(format!("argument '{}': {}", param.name, e))
                    })?;
                }
                _ if param.is_required() => {
                    return Err(Error::missing_argument(&entry.name, &param.name));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
