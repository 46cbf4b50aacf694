//! Console output for catalog listings, batch results and config issues

use colored::Colorize;
use scholar_application::format_results;
use scholar_domain::core::string::truncate;
use scholar_domain::tool::{SensitivityLevel, ToolCall, ToolDefinition, ToolResult};
use scholar_domain::{ConfigIssue, Severity};
use std::collections::{HashMap, HashSet};

/// Longest summary or error shown on one result line
const MAX_LINE_TEXT: usize = 160;

/// Formats scholar-agent output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One block per tool, sorted by name.
    pub fn format_catalog(tools: &[&ToolDefinition]) -> String {
        let mut tools = tools.to_vec();
        tools.sort_by(|a, b| a.name.cmp(&b.name));

        let mut output = Self::header("Tool Catalog");
        output.push('\n');
        for tool in tools {
            let level = Self::level_label(tool.sensitivity);
            let name = if tool.deprecated.is_some() {
                tool.name.dimmed().to_string()
            } else {
                tool.name.bold().to_string()
            };
            output.push_str(&format!("\n{} {}\n", name, level));

            let description = tool.description.lines().next().unwrap_or_default();
            output.push_str(&format!("  {}\n", description));

            let actions = tool.schema.action_names();
            if !actions.is_empty() {
                output.push_str(&format!(
                    "  {} {}\n",
                    "actions:".cyan(),
                    actions.join(", ")
                ));
            }
        }
        output.push_str(&Self::footer());
        output
    }

    /// One line per call in submission order; repeated ids are shown once.
    pub fn format_batch(calls: &[ToolCall], results: &HashMap<String, ToolResult>) -> String {
        let mut output = String::new();
        let mut seen = HashSet::new();
        let mut failed = 0;

        for call in calls {
            if !seen.insert(call.id.as_str()) {
                continue;
            }
            let Some(result) = results.get(&call.id) else {
                continue;
            };
            if result.is_success() {
                let summary = result.summary().unwrap_or("ok");
                output.push_str(&format!(
                    "{} {} {} {}\n",
                    "✓".green(),
                    call.id.dimmed(),
                    call.name.bold(),
                    truncate(summary, MAX_LINE_TEXT)
                ));
            } else {
                failed += 1;
                let (code, message) = result
                    .error()
                    .map(|e| (e.code(), e.message.as_str()))
                    .unwrap_or(("ERROR", "unknown failure"));
                output.push_str(&format!(
                    "{} {} {} {} {}\n",
                    "✗".red(),
                    call.id.dimmed(),
                    call.name.bold(),
                    format!("[{}]", code).red(),
                    truncate(message, MAX_LINE_TEXT)
                ));
            }
        }

        let total = seen.len();
        let tally = format!("{} of {} calls succeeded", total - failed, total);
        if failed == 0 {
            output.push_str(&format!("\n{}\n", tally.green()));
        } else {
            output.push_str(&format!("\n{}\n", tally.yellow()));
        }
        output
    }

    /// Envelopes keyed by call id, exactly as the model receives them.
    pub fn format_batch_json(results: &HashMap<String, ToolResult>) -> String {
        serde_json::to_string_pretty(&format_results(results)).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn level_label(level: SensitivityLevel) -> String {
        let label = format!("[{}]", level);
        match level {
            SensitivityLevel::Read => label.green().to_string(),
            SensitivityLevel::Write => label.yellow().to_string(),
            SensitivityLevel::Destructive => label.red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_application::tools::catalog;
    use scholar_domain::tool::ToolError;
    use serde_json::json;

    #[test]
    fn test_catalog_lists_actions() {
        colored::control::set_override(false);
        let collection = catalog::collection();
        let delete = catalog::delete_item();
        let output = ConsoleFormatter::format_catalog(&[&delete, &collection]);
        assert!(output.contains("collection [write]"));
        assert!(output.contains("actions: find, create, list, add_item, remove_item"));
        assert!(output.find("collection").unwrap() < output.find("delete_item").unwrap());
    }

    #[test]
    fn test_catalog_includes_deprecated_tools() {
        colored::control::set_override(false);
        let collection = catalog::collection();
        let legacy = catalog::legacy("add_to_collection", &collection, "add_item").unwrap();
        let output = ConsoleFormatter::format_catalog(&[&legacy]);
        assert!(output.contains("add_to_collection [write]"));
        assert!(output.contains("Deprecated: use collection(action=add_item)."));
    }

    #[test]
    fn test_batch_in_call_order() {
        colored::control::set_override(false);
        let calls = vec![
            ToolCall::new("b", "get_item", "{}"),
            ToolCall::new("a", "delete_item", "{}"),
            ToolCall::new("b", "get_item", "{}"),
        ];
        let mut results = HashMap::new();
        results.insert(
            "b".to_string(),
            ToolResult::success(json!({})).with_summary("found it"),
        );
        results.insert(
            "a".to_string(),
            ToolResult::failure(ToolError::permission_denied("denied by rule")),
        );

        let output = ConsoleFormatter::format_batch(&calls, &results);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "✓ b get_item found it");
        assert_eq!(lines[1], "✗ a delete_item [PERMISSION_DENIED] denied by rule");
        assert!(output.contains("1 of 2 calls succeeded"));
    }

    #[test]
    fn test_issues() {
        colored::control::set_override(false);
        let issues = vec![ConfigIssue::warning(
            scholar_domain::ConfigIssueCode::UnknownRuleTarget,
            "permissions rule 'x': no tool with that name",
        )];
        assert_eq!(
            ConsoleFormatter::format_issues(&issues),
            "warning: permissions rule 'x': no tool with that name"
        );
    }
}
