use std::fmt::Display;

use super::errors::{Error, ErrorTip};

/// One reported problem. Never mutated once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    /// 1-based character column of the offending token, 0 when unknown.
    pub column: u32,
    pub message: String,
    /// The offending lexeme, possibly empty.
    pub context: String,
    /// Error class name, empty for diagnostics not built from an [`Error`].
    pub name: String,
    pub tip: Option<String>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] {}", self.line, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (at `{}`)", self.context)?;
        }
        Ok(())
    }
}

/// Append-only list of diagnostics for one compilation unit, in report order.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn report(
        &mut self,
        line: u32,
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> &Diagnostic {
        self.push(Diagnostic {
            line,
            message: message.into(),
            context: context.into(),
            ..Diagnostic::default()
        })
    }

    /// Records `error` together with its position, class name and tip.
    pub fn report_error(&mut self, error: &Error) -> &Diagnostic {
        let tip = match error.get_tip() {
            ErrorTip::None => None,
            ErrorTip::Suggestion(tip) => Some(tip),
        };

        self.push(Diagnostic {
            line: error.get_line(),
            column: error.get_column(),
            message: error.message(),
            context: error.get_context().to_string(),
            name: error.get_error_name().to_string(),
            tip,
        })
    }

    fn push(&mut self, diagnostic: Diagnostic) -> &Diagnostic {
        self.entries.push(diagnostic);
        &self.entries[self.entries.len() - 1]
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn list(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
