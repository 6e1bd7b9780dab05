//! Path annotation for the gemini CLI's `@` reference syntax.
//!
//! A prompt token `@src/main.rs` tells the CLI to inline that file's content;
//! `@src/` inlines a whole directory tree. The trailing separator is what
//! distinguishes the two, so each path is probed at call time — never cached,
//! a path may change kind between calls.

use std::path::Path;

/// Fixed prefix marking a token as a content reference rather than prose.
pub const REFERENCE_MARKER: char = '@';

/// Produce the CLI reference token for `path`.
///
/// Directories get a trailing `/` after the path; files (and paths that do
/// not currently exist) do not.
pub fn annotate(path: &str) -> String {
    if Path::new(path).is_dir() {
        format!("{}{}/", REFERENCE_MARKER, path)
    } else {
        format!("{}{}", REFERENCE_MARKER, path)
    }
}

/// Annotate every path and join the tokens with single spaces.
pub fn annotate_all(paths: &[String]) -> String {
    paths
        .iter()
        .map(|p| annotate(p))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_token_has_no_trailing_separator() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let token = annotate(&path);
        assert_eq!(token, format!("@{}", path));
        assert!(!token.ends_with('/'));
    }

    #[test]
    fn directory_token_ends_with_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        assert_eq!(annotate(&path), format!("@{}/", path));
    }

    #[test]
    fn missing_path_treated_as_file() {
        assert_eq!(annotate("no/such/path.rs"), "@no/such/path.rs");
    }

    #[test]
    fn reprobes_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        assert!(annotate(&path).ends_with('/'));
        drop(dir);
        assert!(!annotate(&path).ends_with('/'));
    }

    #[test]
    fn annotate_all_joins_with_single_spaces() {
        let paths = vec!["a.py".to_string(), "b.py".to_string()];
        assert_eq!(annotate_all(&paths), "@a.py @b.py");
        assert_eq!(annotate_all(&[]), "");
    }
}
