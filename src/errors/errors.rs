use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind, UNTERMINATED_STRING};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
    /// 0 when the error is not tied to a single token.
    column: u32,
    context: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32, context: impl Into<String>) -> Self {
        Error {
            internal_error: error_impl,
            line,
            column: 0,
            context: context.into(),
        }
    }

    /// Builds an error located at `token`, using its lexeme as context.
    pub fn at_token(error_impl: ErrorImpl, token: &Token) -> Self {
        Error {
            column: token.column,
            ..Error::new(error_impl, token.line, token.lexeme.clone())
        }
    }

    /// Classifies a scanner error token.
    pub fn from_error_token(token: &Token) -> Self {
        if token.lexeme == UNTERMINATED_STRING {
            Error::at_token(ErrorImpl::UnterminatedString, token)
        } else {
            Error::at_token(
                ErrorImpl::UnrecognisedToken {
                    token: token.lexeme.clone(),
                },
                token,
            )
        }
    }

    /// "expected X" error at the token actually found.
    pub fn expected(expected: impl Into<String>, found: &Token) -> Self {
        if found.kind == TokenKind::Error {
            return Error::from_error_token(found);
        }

        let found_text = if found.kind == TokenKind::EOF {
            String::from("end of input")
        } else {
            format!("`{}`", found.lexeme)
        };

        Error::at_token(
            ErrorImpl::ExpectedToken {
                expected: expected.into(),
                found: found_text,
            },
            found,
        )
    }

    /// Error for a token that should not be there at all.
    pub fn unexpected(found: &Token) -> Self {
        if found.kind == TokenKind::Error {
            return Error::from_error_token(found);
        }

        Error::at_token(
            ErrorImpl::UnexpectedToken {
                token: found.lexeme.clone(),
            },
            found,
        )
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_column(&self) -> u32 {
        self.column
    }

    pub fn get_context(&self) -> &str {
        &self.context
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &'static str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::DuplicateIdentifier { .. } => "DuplicateIdentifier",
            ErrorImpl::UnclosedInterpolation => "UnclosedInterpolation",
            ErrorImpl::UnsupportedStatement { .. } => "UnsupportedStatement",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the string"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "remove `{}` or separate it with an operator",
                token
            )),
            ErrorImpl::ExpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert {} here", expected))
            }
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "only variables, members and indexed elements can be assigned to",
            )),
            ErrorImpl::DuplicateIdentifier { name, .. } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this scope; the latest declaration wins",
                name
            )),
            ErrorImpl::UnclosedInterpolation => {
                ErrorTip::Suggestion(String::from("close the interpolation with `}` or escape the brace as `\\{`"))
            }
            ErrorImpl::UnsupportedStatement { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character `{token}`")]
    UnrecognisedToken { token: String },
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected token `{token}`")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("duplicate identifier in scope `{scope}`: `{name}`")]
    DuplicateIdentifier { name: String, scope: String },
    #[error("unclosed interpolation")]
    UnclosedInterpolation,
    #[error("`{keyword}` statements are not supported yet")]
    UnsupportedStatement { keyword: String },
}
