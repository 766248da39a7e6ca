//! Sanitization-diff content check.
//!
//! Instead of matching known attack patterns, the check runs a documentation
//! file through an HTML sanitizer and flags the file if the sanitizer changed
//! anything. Whatever the sanitizer strips (scripts, event handlers,
//! disallowed tags and URL schemes) is by definition unsafe markup.

use crate::core::types::PolicyViolation;
use crate::policy::diff::{PatchRenderer, UnifiedDiffRenderer};

use std::fmt::Debug;
use std::sync::Arc;

/// Cleans untrusted text according to a fixed markup policy.
pub trait Sanitizer: Send + Sync + Debug {
    /// Returns the name of this sanitizer policy.
    fn name(&self) -> &str;

    /// Returns the sanitized form of `text`.
    fn sanitize(&self, text: &str) -> String;
}

/// Sanitizer using ammonia's default allow-list for user-generated content.
///
/// Keeps formatting markup (`<b>`, `<em>`, `<code>`, tables, links with safe
/// schemes) and removes `<script>`/`<style>` elements with their content,
/// event-handler attributes and `javascript:` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UgcSanitizer;

impl Sanitizer for UgcSanitizer {
    fn name(&self) -> &str {
        "ugc"
    }

    fn sanitize(&self, text: &str) -> String {
        ammonia::clean(text)
    }
}

/// Compares documentation content with its sanitized form.
#[derive(Debug, Clone)]
pub struct SanitizationCheck {
    sanitizer: Arc<dyn Sanitizer>,
    renderer: Arc<dyn PatchRenderer>,
}

impl SanitizationCheck {
    /// Creates a check from a sanitizer and a patch renderer.
    pub fn new(sanitizer: Arc<dyn Sanitizer>, renderer: Arc<dyn PatchRenderer>) -> Self {
        Self {
            sanitizer,
            renderer,
        }
    }

    /// Returns the sanitizer in use.
    pub fn sanitizer(&self) -> &dyn Sanitizer {
        self.sanitizer.as_ref()
    }

    /// Sanitizes `text` and decodes the HTML entities the sanitizer emits,
    /// so the result is comparable with the original.
    pub fn normalize(&self, text: &str) -> String {
        let sanitized = self.sanitizer.sanitize(text);
        html_escape::decode_html_entities(&sanitized).into_owned()
    }

    /// Checks one file's content.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD before
    /// sanitizing, and the sanitized text is compared with that decoded
    /// form. Legacy encodings without markup therefore pass.
    pub fn check(&self, name: &str, content: &[u8]) -> Result<(), PolicyViolation> {
        let original = String::from_utf8_lossy(content);
        let sanitized = self.normalize(&original);

        if sanitized == original {
            return Ok(());
        }

        let patch = self.renderer.render(name, &original, &sanitized);
        Err(PolicyViolation::malicious_content(name, patch))
    }
}

impl Default for SanitizationCheck {
    fn default() -> Self {
        Self::new(Arc::new(UgcSanitizer), Arc::new(UnifiedDiffRenderer::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Policy;

    /// Sanitizer that leaves everything untouched.
    #[derive(Debug)]
    struct Passthrough;

    impl Sanitizer for Passthrough {
        fn name(&self) -> &str {
            "passthrough"
        }

        fn sanitize(&self, text: &str) -> String {
            text.to_string()
        }
    }

    #[test]
    fn test_plain_markdown_passes() {
        let check = SanitizationCheck::default();
        let readme = "# nginx\n\nThis chart installs **nginx**.\n\n- one\n- two\n";
        assert!(check.check("chart/README.md", readme.as_bytes()).is_ok());
    }

    #[test]
    fn test_allow_listed_markup_passes() {
        let check = SanitizationCheck::default();
        let readme = "Some <b>bold</b> and <em>emphasis</em> and <code>code</code>.\n";
        assert!(check.check("chart/README.md", readme.as_bytes()).is_ok());
    }

    #[test]
    fn test_escaped_characters_survive_normalization() {
        let check = SanitizationCheck::default();
        let readme = "Use `a < b && c > d` in templates.\n";
        assert!(check.check("chart/README.md", readme.as_bytes()).is_ok());
    }

    #[test]
    fn test_script_injection_is_reported() {
        let check = SanitizationCheck::default();
        let readme = "# Chart\n\n<script>alert('xss')</script>\n";

        let violation = check
            .check("chart/README.md", readme.as_bytes())
            .unwrap_err();

        assert_eq!(violation.policy, Policy::MaliciousContent);
        assert_eq!(
            violation.violation,
            "chart contains malicious content in file: chart/README.md"
        );
        let context = violation.context.unwrap();
        assert!(context.contains("-<script>alert('xss')</script>"));
    }

    #[test]
    fn test_event_handler_is_reported() {
        let check = SanitizationCheck::default();
        let readme = "<img src=\"logo.png\" onerror=\"steal()\">\n";
        assert!(check.check("chart/README.md", readme.as_bytes()).is_err());
    }

    #[test]
    fn test_latin1_text_without_markup_passes() {
        let check = SanitizationCheck::default();
        assert!(check
            .check("chart/README.md", b"# Caf\xe9 chart\n\nPlain text only.\n")
            .is_ok());
    }

    #[test]
    fn test_invalid_utf8_does_not_hide_markup() {
        let check = SanitizationCheck::default();
        let violation = check
            .check("chart/README.md", b"\xff\xfe<script>alert(1)</script>\n")
            .unwrap_err();
        assert_eq!(violation.policy, Policy::MaliciousContent);
        assert!(violation.context.unwrap().contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_custom_sanitizer_is_used() {
        let check = SanitizationCheck::new(Arc::new(Passthrough), Arc::new(UnifiedDiffRenderer::new()));
        assert_eq!(check.sanitizer().name(), "passthrough");
        assert!(check
            .check("chart/README.md", b"<script>alert(1)</script>")
            .is_ok());
    }
}
