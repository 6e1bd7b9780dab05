//! Canned analysis prompts selected by category key.
//!
//! Lookup misses fall back to the table's default entry instead of failing —
//! an unrecognized category must never block a call.

/// A static category → instruction table with a designated fallback key.
#[derive(Debug)]
pub struct TemplateTable {
    entries: &'static [(&'static str, &'static str)],
    default_key: &'static str,
}

impl TemplateTable {
    /// Resolve `key` to its instruction text, falling back to the default
    /// entry when the key is unrecognized.
    pub fn resolve(&self, key: &str) -> &'static str {
        self.lookup(key)
            .or_else(|| self.lookup(self.default_key))
            .unwrap_or("")
    }

    pub fn default_key(&self) -> &'static str {
        self.default_key
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

/// Security-audit categories.
pub static SECURITY_AUDIT: TemplateTable = TemplateTable {
    entries: &[
        (
            "sql_injection",
            "Analyze this code for SQL injection vulnerabilities. Show how user inputs are sanitized and whether prepared statements or ORMs are used properly.",
        ),
        (
            "xss",
            "Check for Cross-Site Scripting (XSS) vulnerabilities. Look for proper input sanitization and output encoding.",
        ),
        (
            "auth",
            "Analyze the authentication and authorization implementation. Check for JWT handling, session management, and access controls.",
        ),
        (
            "general",
            "Perform a general security audit. Look for common vulnerabilities like hardcoded secrets, insecure configurations, and improper error handling.",
        ),
        (
            "input_validation",
            "Analyze input validation throughout the codebase. Check how user inputs are validated and sanitized.",
        ),
    ],
    default_key: "general",
};

/// Architecture-analysis categories.
pub static ARCHITECTURE_ANALYSIS: TemplateTable = TemplateTable {
    entries: &[
        (
            "overview",
            "Provide a high-level overview of this codebase architecture. Describe the main components, layers, and how they interact.",
        ),
        (
            "dependencies",
            "Analyze the dependencies in this codebase. Show the dependency graph and identify any potential issues or circular dependencies.",
        ),
        (
            "patterns",
            "Identify the architectural patterns and design patterns used in this codebase. Explain how they're implemented.",
        ),
        (
            "structure",
            "Analyze the project structure and organization. Evaluate if it follows best practices and suggest improvements.",
        ),
        (
            "coupling",
            "Analyze the coupling between different modules and components. Identify tightly coupled areas that could be refactored.",
        ),
    ],
    default_key: "overview",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_categories() {
        assert!(SECURITY_AUDIT.resolve("xss").contains("Cross-Site Scripting"));
        assert!(ARCHITECTURE_ANALYSIS
            .resolve("coupling")
            .contains("tightly coupled"));
    }

    #[test]
    fn unknown_category_falls_back_to_default() {
        let fallback = SECURITY_AUDIT.resolve("quantum_hardening");
        assert_eq!(fallback, SECURITY_AUDIT.resolve("general"));
        assert!(fallback.contains("general security audit"));

        assert_eq!(
            ARCHITECTURE_ANALYSIS.resolve("nope"),
            ARCHITECTURE_ANALYSIS.resolve("overview")
        );
    }

    #[test]
    fn default_keys_are_present_in_tables() {
        assert!(!SECURITY_AUDIT.resolve(SECURITY_AUDIT.default_key()).is_empty());
        assert!(!ARCHITECTURE_ANALYSIS
            .resolve(ARCHITECTURE_ANALYSIS.default_key())
            .is_empty());
    }
}
