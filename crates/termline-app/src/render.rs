//! Result and diagnostic rendering

use serde_json::json;
use termline_core::{ParseError, ParsedCommand};
use unicode_width::UnicodeWidthStr;

use crate::config::{OutputConfig, OutputFormat};

/// Render a parsed command in the configured format
pub fn render_command(
    command: &ParsedCommand,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(command)),
        OutputFormat::Json => serde_json::to_string(command),
    }
}

fn render_text(command: &ParsedCommand) -> String {
    if command.is_empty() {
        return "(no arguments or parameters)".to_string();
    }

    let mut lines = Vec::with_capacity(command.arguments.len() + command.parameters.len());
    for argument in &command.arguments {
        lines.push(format!("Arg: {}", argument));
    }
    for (name, value) in &command.parameters {
        lines.push(format!("Param: {} / Value: {}", name, value));
    }
    lines.join("\n")
}

/// Render a parse error
pub fn render_error(error: &ParseError, output: &OutputConfig) -> Result<String, serde_json::Error> {
    match output.format {
        OutputFormat::Text if output.show_context => Ok(diagnostic(error)),
        OutputFormat::Text => Ok(format!("error: {}", error)),
        OutputFormat::Json => serde_json::to_string(&json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
                "char": error.ch().to_string(),
                "index": error.index(),
                "context": error.context(),
            }
        })),
    }
}

/// Error message followed by the surrounding text and a caret under the
/// offending character
///
/// ```text
/// error: Unexpected '=' at position 4 near "--a==b"
///   --a==b
///       ^
/// ```
pub fn diagnostic(error: &ParseError) -> String {
    // Tabs and other whitespace would throw off the caret column
    let context: String = error
        .context()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let prefix: String = context.chars().take(error.context_offset()).collect();
    let indent = UnicodeWidthStr::width(prefix.as_str());

    format!(
        "error: {}\n  {}\n  {}^",
        error,
        context,
        " ".repeat(indent)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use termline_core::parse;

    #[test]
    fn test_text_rendering() {
        let command = parse("copy a b --force -o=out.txt").unwrap();
        let text = render_command(&command, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Arg: copy\nArg: a\nArg: b\nParam: --force / Value: true\nParam: -o / Value: out.txt"
        );
    }

    #[test]
    fn test_text_rendering_empty() {
        let text = render_command(&ParsedCommand::new(), OutputFormat::Text).unwrap();
        assert_eq!(text, "(no arguments or parameters)");
    }

    #[test]
    fn test_json_rendering() {
        let command = parse("run --msg=\"hi there\"").unwrap();
        let text = render_command(&command, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["arguments"], json!(["run"]));
        assert_eq!(value["parameters"]["--msg"], "hi there");
    }

    #[test]
    fn test_diagnostic_caret() {
        let err = parse("--a==b").unwrap_err();
        assert_eq!(
            diagnostic(&err),
            "error: Unexpected '=' at position 4 near \"--a==b\"\n  --a==b\n      ^"
        );
    }

    #[test]
    fn test_diagnostic_wide_characters() {
        // each CJK character takes two columns
        let err = parse("世界\"x").unwrap_err();
        let rendered = diagnostic(&err);
        let caret_line = rendered.lines().last().unwrap();
        assert_eq!(caret_line, "      ^");
    }

    #[test]
    fn test_diagnostic_replaces_tabs() {
        let err = parse("a\tb\"c").unwrap_err();
        let rendered = diagnostic(&err);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[1], "  a b\"c");
        assert_eq!(lines[2], "     ^");
    }

    #[test]
    fn test_error_without_context() {
        let err = parse("'open").unwrap_err();
        let output = OutputConfig {
            format: OutputFormat::Text,
            show_context: false,
        };
        let text = render_error(&err, &output).unwrap();
        assert!(text.starts_with("error: Quote ' opened at position 0"));
        assert!(!text.contains('^'));
    }

    #[test]
    fn test_json_error() {
        let err = parse("x \"y").unwrap_err();
        let output = OutputConfig {
            format: OutputFormat::Json,
            show_context: true,
        };
        let text = render_error(&err, &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"]["kind"], "unterminated_quote");
        assert_eq!(value["error"]["index"], 2);
        assert_eq!(value["error"]["char"], "\"");
    }
}
