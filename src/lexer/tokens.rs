use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("_", TokenKind::Wildcard);
        map.insert("const", TokenKind::Const);
        map.insert("func", TokenKind::Func);
        map.insert("proc", TokenKind::Proc);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("__builtin", TokenKind::Builtin);
        map.insert("__builtin_array", TokenKind::BuiltinArray);
        map
    };

    pub static ref SYMBOL_LOOKUP: HashMap<char, TokenKind> = {
        let mut map = HashMap::new();
        map.insert('\n', TokenKind::Newline);
        map.insert('(', TokenKind::OpenParenthesis);
        map.insert(')', TokenKind::CloseParenthesis);
        map.insert('{', TokenKind::OpenBrace);
        map.insert('}', TokenKind::CloseBrace);
        map.insert('[', TokenKind::OpenSquareBracket);
        map.insert(']', TokenKind::CloseSquareBracket);
        map.insert(':', TokenKind::Colon);
        map.insert(',', TokenKind::Comma);
        map.insert('.', TokenKind::Period);
        map.insert('@', TokenKind::At);
        map.insert('+', TokenKind::Plus);
        map.insert('-', TokenKind::Minus);
        map.insert('*', TokenKind::Asterisk);
        map.insert('/', TokenKind::Slash);
        map.insert('%', TokenKind::Percent);
        map.insert('<', TokenKind::LessThan);
        map.insert('>', TokenKind::GreaterThan);
        map.insert('=', TokenKind::Equal);
        map.insert('!', TokenKind::ExclamationMark);
        map
    };

    pub static ref DOUBLE_SYMBOL_LOOKUP: HashMap<(char, char), TokenKind> = {
        let mut map = HashMap::new();
        map.insert(('<', '='), TokenKind::LessThanEqual);
        map.insert(('>', '='), TokenKind::GreaterThanEqual);
        map.insert(('=', '='), TokenKind::EqualEqual);
        map.insert(('!', '='), TokenKind::ExclamationMarkEqual);
        map.insert(('<', '-'), TokenKind::LeftArrow);
        map.insert(('-', '>'), TokenKind::RightArrow);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EndOfFile,
    Newline,
    Name,
    Integer,
    Float,
    String,
    Wildcard,

    // Reserved
    Const,
    Func,
    Proc,
    Return,
    If,
    Else,
    Builtin,
    BuiltinArray,

    OpenParenthesis,
    CloseParenthesis,
    OpenBrace,
    CloseBrace,
    OpenSquareBracket,
    CloseSquareBracket,

    Colon,
    Comma,
    Period,
    At,

    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    Equal,
    EqualEqual,
    ExclamationMark,
    ExclamationMarkEqual,
    LeftArrow,  // <-
    RightArrow, // ->
}

impl TokenKind {
    /// Looks up a word in the keyword table, defaulting to a plain name.
    pub fn from_word(word: &str) -> TokenKind {
        RESERVED_LOOKUP.get(word).copied().unwrap_or(TokenKind::Name)
    }

    pub fn from_char(chr: char) -> Option<TokenKind> {
        SYMBOL_LOOKUP.get(&chr).copied()
    }

    pub fn from_double_char(first: char, second: char) -> Option<TokenKind> {
        DOUBLE_SYMBOL_LOOKUP.get(&(first, second)).copied()
    }

    /// The spelling used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EndOfFile => "{EOF}",
            TokenKind::Newline => "{newline}",
            TokenKind::Name => "{name}",
            TokenKind::Integer => "{integer}",
            TokenKind::Float => "{float}",
            TokenKind::String => "{string}",
            TokenKind::Wildcard => "_",
            TokenKind::Const => "const",
            TokenKind::Func => "func",
            TokenKind::Proc => "proc",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Builtin => "__builtin",
            TokenKind::BuiltinArray => "__builtin_array",
            TokenKind::OpenParenthesis => "(",
            TokenKind::CloseParenthesis => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenSquareBracket => "[",
            TokenKind::CloseSquareBracket => "]",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Period => ".",
            TokenKind::At => "@",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::LessThan => "<",
            TokenKind::LessThanEqual => "<=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanEqual => ">=",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
            TokenKind::ExclamationMark => "!",
            TokenKind::ExclamationMarkEqual => "!=",
            TokenKind::LeftArrow => "<-",
            TokenKind::RightArrow => "->",
        }
    }

    /// Tokens that end an expression sequence without a newline.
    pub fn is_closing(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParenthesis
                | TokenKind::CloseBrace
                | TokenKind::CloseSquareBracket
                | TokenKind::EndOfFile
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Literal payload attached to a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Name(String),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    /// Length of the lexed source span in bytes.
    pub length: usize,
    pub value: TokenValue,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Token {
    /// The text of a name, wildcard or keyword token.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn debug(&self) -> String {
        match &self.value {
            TokenValue::None => format!("{} {}", self.position, self.kind),
            TokenValue::Name(name) => format!("{} {} ({})", self.position, self.kind, name),
            TokenValue::Integer(value) => format!("{} {} ({})", self.position, self.kind, value),
            TokenValue::Float(value) => format!("{} {} ({})", self.position, self.kind, value),
            TokenValue::String(value) => format!("{} {} ({:?})", self.position, self.kind, value),
        }
    }
}
