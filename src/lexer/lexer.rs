use lazy_static::lazy_static;
use regex::Regex;

use crate::{MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, UNTERMINATED_STRING};

/// Called with the text matched at the cursor; responsible for advancing past it.
pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: two-character operators must precede their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \t\r]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\n").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^/\\*(?s:.*?)\\*/").unwrap(), handler: block_comment_handler },
        // Unterminated block comment: swallowed up to end of input.
        RegexPattern { regex: Regex::new("^/\\*(?s:.*)").unwrap(), handler: block_comment_handler },
        RegexPattern { regex: Regex::new("^\"[^\"]*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\"(?s:.*)").unwrap(), handler: unterminated_string_handler },
        RegexPattern { regex: Regex::new("^[A-Za-z_][A-Za-z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    /// Byte offset at which the current line starts.
    line_start: usize,
}

impl Lexer {
    pub fn new(source: &str, line: u32) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.to_string(),
            pos: 0,
            line,
            line_start: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// The character under the cursor; `'\0'` once the input is exhausted.
    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// 1-based character column of the cursor.
    pub fn column(&self) -> u32 {
        self.source[self.line_start..self.pos].chars().count() as u32 + 1
    }

    /// Accounts for the line breaks inside `text`, which starts at the cursor.
    fn count_lines(&mut self, text: &str) {
        self.line += text.matches('\n').count() as u32;
        if let Some(last) = text.rfind('\n') {
            self.line_start = self.pos + last + 1;
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

fn newline_handler(lexer: &mut Lexer, matched: &str) {
    lexer.count_lines(matched);
    lexer.advance_n(matched.len());
}

fn block_comment_handler(lexer: &mut Lexer, matched: &str) {
    lexer.count_lines(matched);
    lexer.advance_n(matched.len());
}

/// Column of a string-like token spanning `matched`; unknown once the
/// token runs over several lines, as it is stamped with its last line.
fn string_column(lexer: &Lexer, matched: &str) -> u32 {
    if matched.contains('\n') {
        0
    } else {
        lexer.column()
    }
}

fn string_handler(lexer: &mut Lexer, matched: &str) {
    // Interpolation markers and escapes stay verbatim; the parser interprets them.
    let column = string_column(lexer, matched);
    lexer.count_lines(matched);

    let line = lexer.line;
    let literal = &matched[1..matched.len() - 1];
    lexer.push(MK_TOKEN!(TokenKind::String, literal.to_string(), line, column));
    lexer.advance_n(matched.len());
}

fn unterminated_string_handler(lexer: &mut Lexer, matched: &str) {
    let column = string_column(lexer, matched);
    lexer.count_lines(matched);

    let line = lexer.line;
    lexer.push(MK_TOKEN!(TokenKind::Error, UNTERMINATED_STRING.to_string(), line, column));
    lexer.advance_n(matched.len());
}

fn number_handler(lexer: &mut Lexer, matched: &str) {
    let (line, column) = (lexer.line, lexer.column());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched.to_string(), line, column));
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let (line, column) = (lexer.line, lexer.column());
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    lexer.push(MK_TOKEN!(kind, matched.to_string(), line, column));
    lexer.advance_n(matched.len());
}

/// Scans `source` into tokens, numbering lines from 1.
///
/// Scanning never fails: characters no pattern accepts become
/// [`TokenKind::Error`] tokens, and the result always ends with exactly
/// one [`TokenKind::EOF`].
pub fn tokenize(source: &str) -> Vec<Token> {
    tokenize_at_line(source, 1)
}

/// Same as [`tokenize`], but the first line of `source` is numbered `line`.
pub fn tokenize_at_line(source: &str, line: u32) -> Vec<Token> {
    let mut lex = Lexer::new(source, line);

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            let found = pattern
                .regex
                .find(lex.remainder())
                .map(|m| m.as_str().to_string());

            if let Some(text) = found {
                (pattern.handler)(&mut lex, &text);
                matched = true;
                break;
            }
        }

        if !matched {
            // Includes a lone `&` or `|`.
            let ch = lex.at();
            let (line, column) = (lex.line, lex.column());
            lex.push(MK_TOKEN!(TokenKind::Error, ch.to_string(), line, column));
            lex.advance_n(ch.len_utf8());
        }
    }

    let (line, column) = (lex.line, lex.column());
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), line, column));
    lex.tokens
}
