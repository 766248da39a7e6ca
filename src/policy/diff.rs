//! Human-readable patches between original and sanitized content.

use similar::TextDiff;
use std::fmt::Debug;

/// Renders a reviewable patch between two versions of a file.
pub trait PatchRenderer: Send + Sync + Debug {
    /// Returns the patch turning `original` into `modified`.
    fn render(&self, name: &str, original: &str, modified: &str) -> String;
}

/// Renders line-based unified diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifiedDiffRenderer {
    context_radius: usize,
}

impl UnifiedDiffRenderer {
    /// Creates a renderer with three lines of context.
    pub fn new() -> Self {
        Self { context_radius: 3 }
    }

    /// Sets the number of unchanged lines shown around each hunk.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }
}

impl Default for UnifiedDiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchRenderer for UnifiedDiffRenderer {
    fn render(&self, name: &str, original: &str, modified: &str) -> String {
        let diff = TextDiff::from_lines(original, modified);
        diff.unified_diff()
            .context_radius(self.context_radius)
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_removed_line() {
        let patch = UnifiedDiffRenderer::new().render(
            "chart/README.md",
            "# Title\n<script>alert(1)</script>\nbody\n",
            "# Title\n\nbody\n",
        );

        assert!(patch.starts_with("--- a/chart/README.md\n+++ b/chart/README.md\n"));
        assert!(patch.contains("@@"));
        assert!(patch.contains("-<script>alert(1)</script>\n"));
    }

    #[test]
    fn test_identical_input_renders_no_hunks() {
        let patch = UnifiedDiffRenderer::new().render("a.md", "same\n", "same\n");
        assert!(!patch.contains("@@"));
    }

    #[test]
    fn test_context_radius_limits_unchanged_lines() {
        let original = "1\n2\n3\n4\n5\nbad\n6\n7\n8\n9\n";
        let modified = "1\n2\n3\n4\n5\n\n6\n7\n8\n9\n";
        let patch = UnifiedDiffRenderer::new()
            .with_context_radius(1)
            .render("x.md", original, modified);
        assert!(patch.contains(" 5\n"));
        assert!(!patch.contains(" 4\n"));
    }
}
