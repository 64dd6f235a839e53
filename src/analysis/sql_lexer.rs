use crate::analysis::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare keyword or identifier, case preserved
    Word(String),
    /// `"name"`, `` `name` `` or `[name]`
    QuotedIdent(String),
    StringLiteral(String),
    Number(String),
    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    /// Case-insensitive keyword comparison; quoted identifiers never match
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Identifier text for bare or quoted identifiers
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(w) | TokenKind::QuotedIdent(w) => Some(w),
            _ => None,
        }
    }
}

/// Split SQL text into tokens, dropping whitespace and comments
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // -- line comment
        if c == '-' && chars.get(i + 1) == Some(&'-') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        // /* block comment */
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start_line = line;
            i += 2;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(ParseError::Syntax {
                            line: start_line,
                            message: "unterminated block comment".to_string(),
                        })
                    }
                    Some('*') if chars.get(i + 1) == Some(&'/') => {
                        i += 2;
                        break;
                    }
                    Some('\n') => {
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            continue;
        }

        let token_line = line;
        let kind = match c {
            '(' => {
                i += 1;
                TokenKind::LParen
            }
            ')' => {
                i += 1;
                TokenKind::RParen
            }
            ',' => {
                i += 1;
                TokenKind::Comma
            }
            ';' => {
                i += 1;
                TokenKind::Semicolon
            }
            '.' => {
                i += 1;
                TokenKind::Dot
            }
            '\'' | '"' | '`' | '[' => {
                let close = match c {
                    '[' => ']',
                    other => other,
                };
                let (text, next, newlines) = read_delimited(&chars, i + 1, close).ok_or_else(|| {
                    ParseError::Syntax {
                        line: token_line,
                        message: format!("unterminated quoted text starting with {}", c),
                    }
                })?;
                i = next;
                line += newlines;
                if c == '\'' {
                    TokenKind::StringLiteral(text)
                } else {
                    TokenKind::QuotedIdent(text)
                }
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                TokenKind::Number(chars[start..i].iter().collect())
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$') {
                    i += 1;
                }
                TokenKind::Word(chars[start..i].iter().collect())
            }
            other => {
                i += 1;
                TokenKind::Symbol(other)
            }
        };

        tokens.push(Token {
            kind,
            line: token_line,
        });
    }

    Ok(tokens)
}

/// Read up to the closing delimiter; a doubled delimiter is an escaped one.
/// Returns the text, the index after the closing delimiter, and newlines consumed.
fn read_delimited(chars: &[char], mut i: usize, close: char) -> Option<(String, usize, usize)> {
    let mut text = String::new();
    let mut newlines = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == close {
            if close != ']' && chars.get(i + 1) == Some(&close) {
                text.push(close);
                i += 2;
                continue;
            }
            return Some((text, i + 1, newlines));
        }
        if c == '\n' {
            newlines += 1;
        }
        text.push(c);
        i += 1;
    }
    None
}
