#![allow(clippy::module_inception)]

use crate::{
    ast::ast::AstTree,
    errors::diagnostics::{Diagnostic, Diagnostics},
    lexer::lexer::tokenize,
    parser::{
        expr::{parse_expr, parse_range_expr},
        parser::{parse, parse_fragment},
        types::parse_type_ref,
    },
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Scans and parses a whole compilation unit.
pub fn parse_source(source: &str) -> (AstTree, Diagnostics) {
    parse(tokenize(source))
}

/// Parses `source` as a single expression.
pub fn parse_expression_source(source: &str) -> (AstTree, Diagnostics) {
    parse_fragment(tokenize(source), parse_expr)
}

/// Parses `source` as a single type reference, e.g. `Map<string, int>`.
pub fn parse_type_source(source: &str) -> (AstTree, Diagnostics) {
    parse_fragment(tokenize(source), parse_type_ref)
}

/// Parses `source` as a range, e.g. `0 ~ n, 2`.
pub fn parse_range_source(source: &str) -> (AstTree, Diagnostics) {
    parse_fragment(tokenize(source), parse_range_expr)
}

/// Returns the text of the 1-based `line` of `source`, without its line break.
pub fn get_source_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}

#[cfg(test)]
mod tests {
    use crate::errors::diagnostics::Diagnostic;

    #[test]
    fn test_get_source_line() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";

        assert_eq!(super::get_source_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_source_line(source, 2), Some("second"));
        assert_eq!(super::get_source_line(source, 3), Some(""));
        assert_eq!(super::get_source_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_source_line(source, 0), None);
        assert_eq!(super::get_source_line(source, 9), None);
    }

    #[test]
    fn test_render_diagnostic_points_at_context() {
        let source = "var a : int = 1;\n    var b : int = #;\n";
        let diagnostic = Diagnostic {
            line: 2,
            message: String::from("unrecognised character `#`"),
            context: String::from("#"),
            ..Diagnostic::default()
        };

        let rendered = super::render_diagnostic(&diagnostic, source, "final.ma");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: unrecognised character `#`");
        assert_eq!(lines[1], "-> final.ma:2");
        assert_eq!(lines[3], "2 | var b : int = #;");
        assert_eq!(lines[4], "  | --------------^");
    }

    #[test]
    fn test_render_diagnostic_without_source_line() {
        let diagnostic = Diagnostic {
            line: 7,
            message: String::from("unterminated string"),
            ..Diagnostic::default()
        };

        let rendered = super::render_diagnostic(&diagnostic, "", "final.ma");
        assert_eq!(rendered, "Error: unterminated string\n-> final.ma:7\n");
    }

    #[test]
    fn test_render_diagnostic_with_name_and_tip() {
        let source = "var s : string = \"open";
        let (_, diagnostics) = super::parse_source(source);

        let rendered = super::render_diagnostic(&diagnostics.list()[0], source, "a.ma");
        let first = rendered.lines().next().unwrap_or_default();

        assert_eq!(
            first,
            "Error: UnterminatedString: unterminated string (add a closing `\"` to the string)"
        );
    }

    #[test]
    fn test_render_diagnostic_uses_column_over_first_match() {
        let source = "func f() {} func f() {}";
        let (_, diagnostics) = super::parse_source(source);
        assert_eq!(diagnostics.list()[0].column, 18);

        let rendered = super::render_diagnostic(&diagnostics.list()[0], source, "a.ma");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[4], format!("  | {}^", "-".repeat(17)));
    }

    #[test]
    fn test_render_diagnostic_counts_characters() {
        let source = "f(\"h\u{e9}llo\", @);";
        let (_, diagnostics) = super::parse_source(source);
        assert_eq!(diagnostics.list()[0].message, "unrecognised character `@`");

        let rendered = super::render_diagnostic(&diagnostics.list()[0], source, "a.ma");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[4], format!("  | {}^", "-".repeat(11)));
    }

    #[test]
    fn test_render_fallback_counts_characters() {
        let source = "\u{e9} = #;";
        let diagnostic = Diagnostic {
            line: 1,
            message: String::from("unrecognised character `#`"),
            context: String::from("#"),
            ..Diagnostic::default()
        };

        let rendered = super::render_diagnostic(&diagnostic, source, "a.ma");
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[4], "  | ----^");
    }
}

/// Formats a diagnostic for a terminal, quoting the offending source line
/// and pointing at the context when it can be found on that line.
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str, file: &str) -> String {
    /*
        Error: message
        -> final.ma:20
           |
        20 | var a : int = #;
           | --------------^
    */

    let mut out = String::new();
    match (diagnostic.name.as_str(), &diagnostic.tip) {
        ("", _) => out.push_str(&format!("Error: {}\n", diagnostic.message)),
        (name, None) => out.push_str(&format!("Error: {}: {}\n", name, diagnostic.message)),
        (name, Some(tip)) => out.push_str(&format!(
            "Error: {}: {} ({})\n",
            name, diagnostic.message, tip
        )),
    }
    out.push_str(&format!("-> {}:{}\n", file, diagnostic.line));

    let Some(line_text) = get_source_line(source, diagnostic.line) else {
        return out;
    };

    let line_string = diagnostic.line.to_string();
    let padding = line_string.len() + 2;
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);

    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    if diagnostic.context.is_empty() {
        return out;
    }

    // Without a recorded column, fall back to the first occurrence of the context.
    let column = if diagnostic.column > 0 {
        Some(diagnostic.column as usize)
    } else {
        line_text
            .find(&diagnostic.context)
            .map(|byte| line_text[..byte].chars().count() + 1)
    };

    if let Some(column) = column {
        let arrows = column.saturating_sub(removed_whitespace).max(1);
        out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
