use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

/// Lexeme carried by the error token produced for a string with no closing quote.
pub const UNTERMINATED_STRING: &str = "Unterminated string";

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("var", TokenKind::Var);
        map.insert("val", TokenKind::Val);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("constructor", TokenKind::Constructor);
        map.insert("struct", TokenKind::Struct);
        map.insert("interface", TokenKind::Interface);
        map.insert("impl", TokenKind::Impl);
        map.insert("func", TokenKind::Func);
        map.insert("module", TokenKind::Module);
        map.insert("import", TokenKind::Import);
        map.insert("operator", TokenKind::Operator);
        map.insert("this", TokenKind::This);
        map.insert("provider", TokenKind::Provider);
        map.insert("private", TokenKind::Private);
        map.insert("public", TokenKind::Public);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    /// Marker carried by the synthetic root of a compilation unit.
    Top,
    /// Unscannable input; the lexeme holds the offending text.
    Error,

    Number,
    String,
    Identifier,

    Tilde,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    If,
    Else,
    While,
    For,
    Return,
    Var,
    Val,
    True,
    False,
    Constructor,
    Struct,
    Interface,
    Impl,
    Func,
    Module,
    Import,
    Operator,
    This,
    Provider,
    Private,
    Public,
}

impl TokenKind {
    /// Delimiters and operators whose lexeme is implied by the kind.
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Tilde
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::OpenCurly
                | TokenKind::CloseCurly
                | TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::Dot
                | TokenKind::Semicolon
                | TokenKind::Colon
                | TokenKind::Comma
        )
    }

    /// Operators that may be overloaded by an `operator` declaration.
    pub fn is_overloadable(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::Not
                | TokenKind::OpenBracket
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    /// 1-based character column of the first character, 0 when unknown.
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}` (line {})", self.kind, self.lexeme, self.line)
    }
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column: 0,
        }
    }
}
