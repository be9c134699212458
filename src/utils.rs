use std::path::Path;

/// Display a path relative to `base`, or just the file name if outside it.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "[path]".to_string())
        })
}

/// Truncate a string safely by character count, not byte count.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// First non-blank line of a block of text, used for one-line summaries.
pub fn first_line(s: &str) -> &str {
    s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_path_within_base() {
        let base = PathBuf::from("/home/user/skills");
        let path = PathBuf::from("/home/user/skills/risk-eval/tools/score.py");
        assert_eq!(display_path(&path, &base), "risk-eval/tools/score.py");
    }

    #[test]
    fn test_display_path_outside_base() {
        let base = PathBuf::from("/home/user/skills");
        let path = PathBuf::from("/etc/passwd");
        assert_eq!(display_path(&path, &base), "passwd");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "...");
    }

    #[test]
    fn test_truncate_utf8() {
        let result = truncate("Hello 🦀 world", 10);
        assert_eq!(result, "Hello 🦀...");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("\n\n  Compute a score.\n\nMore."), "Compute a score.");
        assert_eq!(first_line("   \n"), "");
    }
}
