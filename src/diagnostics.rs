//! Diagnostic rendering.
//!
//! Turns a validation report into output lines for humans or CI. Line
//! numbers are a best-effort lookup of the offending key in the raw text:
//! the first line declaring that key wins, so keys that recur in a manifest
//! (`name` in metadata and in every container) always point at their first
//! occurrence.

use serde::Serialize;
use serde_json::json;

use crate::validation::{Report, RuleId};

/// A violation located in the source text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleId,
    pub path: String,
    pub line: Option<usize>,
    pub message: String,
}

/// 1-based line of the first line declaring `field` as a mapping key
pub fn line_of(text: &str, field: &str) -> Option<usize> {
    text.lines()
        .position(|line| {
            let key = line.trim_start();
            let key = key.strip_prefix("- ").map(str::trim_start).unwrap_or(key);
            key.strip_prefix(field)
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map(|idx| idx + 1)
}

/// Keys the loader also accepts under another name
const FIELD_ALIASES: &[(&str, &str)] = &[("apiVersion", "schemaVersion")];

/// Line of `field`, falling back to its alias when the manifest spells the
/// key that way
fn locate(text: &str, field: &str) -> Option<usize> {
    line_of(text, field).or_else(|| {
        FIELD_ALIASES
            .iter()
            .find(|(key, _)| *key == field)
            .and_then(|(_, alias)| line_of(text, alias))
    })
}

/// Attach line locators to every violation in `report`
pub fn diagnose(report: &Report, text: &str) -> Vec<Diagnostic> {
    report
        .violations()
        .iter()
        .map(|violation| Diagnostic {
            rule: violation.rule,
            path: violation.path.clone(),
            line: locate(text, violation.field),
            message: violation.message.clone(),
        })
        .collect()
}

/// Render one `<source>[:<line>]: <message>` line per violation
pub fn render_text(report: &Report, source_id: &str, text: &str) -> Vec<String> {
    diagnose(report, text)
        .into_iter()
        .map(|diagnostic| match diagnostic.line {
            Some(line) => format!("{}:{}: {}", source_id, line, diagnostic.message),
            None => format!("{}: {}", source_id, diagnostic.message),
        })
        .collect()
}

/// Render the whole report as a JSON object
pub fn render_json(report: &Report, source_id: &str, text: &str) -> serde_json::Value {
    json!({
        "source": source_id,
        "valid": report.is_valid(),
        "violations": diagnose(report, text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\n  namespace: prod\nspec:\n  os: macos\n  containers:\n    - name: api\n      image: nginx\n";

    #[test]
    fn test_line_of_finds_first_key() {
        assert_eq!(line_of(MANIFEST, "apiVersion"), Some(1));
        assert_eq!(line_of(MANIFEST, "os"), Some(7));
        assert_eq!(line_of(MANIFEST, "image"), Some(10));
        // `name` recurs; the metadata occurrence wins
        assert_eq!(line_of(MANIFEST, "name"), Some(4));
        assert_eq!(line_of(MANIFEST, "namespace"), Some(5));
        assert_eq!(line_of(MANIFEST, "resources"), None);
    }

    #[test]
    fn test_render_text_with_and_without_line() {
        let mut report = Report::new();
        report.add(
            RuleId::SpecOs,
            "spec.os",
            "os",
            "spec.os has unsupported value 'macos'".to_string(),
        );
        report.add(
            RuleId::ResourcesRequired,
            "spec.containers[0].resources",
            "resources",
            "spec.containers[0].resources is required".to_string(),
        );

        let lines = render_text(&report, "pod.yaml", MANIFEST);
        assert_eq!(
            lines,
            vec![
                "pod.yaml:7: spec.os has unsupported value 'macos'".to_string(),
                "pod.yaml: spec.containers[0].resources is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_api_version_located_under_alias() {
        let text = "schemaVersion: v2\nkind: Pod\n";
        let mut report = Report::new();
        report.add(
            RuleId::ApiVersion,
            "apiVersion",
            "apiVersion",
            "apiVersion has unsupported value 'v2'".to_string(),
        );

        let lines = render_text(&report, "pod.yaml", text);
        assert_eq!(
            lines,
            vec!["pod.yaml:1: apiVersion has unsupported value 'v2'".to_string()]
        );
    }

    #[test]
    fn test_render_json() {
        let mut report = Report::new();
        report.add(
            RuleId::Kind,
            "kind",
            "kind",
            "kind has unsupported value 'Job'".to_string(),
        );

        let value = render_json(&report, "pod.yaml", MANIFEST);
        assert_eq!(value["valid"], false);
        assert_eq!(value["violations"][0]["rule"], "kind");
        assert_eq!(value["violations"][0]["line"], 2);

        let value = render_json(&Report::new(), "pod.yaml", MANIFEST);
        assert_eq!(value["valid"], true);
        assert_eq!(value["violations"].as_array().map(Vec::len), Some(0));
    }
}
