use crate::analysis::naming;
use crate::analysis::sql_lexer::{tokenize, Token, TokenKind};
use crate::analysis::type_translator::TypeTranslator;
use crate::analysis::{ParseError, SchemaParser};
use crate::models::{Field, Model, Names};

/// SQL type spellings and the canonical token each one normalizes to
const SQL_TYPE_ALIASES: &[(&str, &str)] = &[
    ("uuid", "uuid"),
    ("uniqueidentifier", "uuid"),
    ("integer", "integer"),
    ("int", "integer"),
    ("int4", "integer"),
    ("mediumint", "integer"),
    ("smallint", "smallint"),
    ("int2", "smallint"),
    ("tinyint", "smallint"),
    ("bigint", "bigint"),
    ("int8", "bigint"),
    ("serial", "serial"),
    ("serial4", "serial"),
    ("bigserial", "bigserial"),
    ("serial8", "bigserial"),
    ("varchar", "varchar"),
    ("character varying", "varchar"),
    ("nvarchar", "varchar"),
    ("varchar2", "varchar"),
    ("char", "char"),
    ("character", "char"),
    ("nchar", "char"),
    ("bpchar", "char"),
    ("text", "text"),
    ("tinytext", "text"),
    ("mediumtext", "text"),
    ("longtext", "text"),
    ("citext", "text"),
    ("clob", "text"),
    ("boolean", "boolean"),
    ("bool", "boolean"),
    ("float", "float"),
    ("float4", "float"),
    ("real", "real"),
    ("double", "double"),
    ("double precision", "double"),
    ("float8", "double"),
    ("numeric", "numeric"),
    ("decimal", "decimal"),
    ("dec", "decimal"),
    ("date", "date"),
    ("time", "time"),
    ("timetz", "time"),
    ("time with time zone", "time"),
    ("time without time zone", "time"),
    ("timestamp", "timestamp"),
    ("timestamptz", "timestamp"),
    ("datetime", "timestamp"),
    ("timestamp with time zone", "timestamp"),
    ("timestamp without time zone", "timestamp"),
    ("json", "json"),
    ("jsonb", "jsonb"),
    ("bytea", "bytea"),
    ("binary", "bytea"),
    ("varbinary", "bytea"),
    ("blob", "blob"),
    ("longblob", "blob"),
];

/// Keywords that end the type clause of a column definition
const COLUMN_CONSTRAINT_KEYWORDS: &[&str] = &[
    "NOT",
    "NULL",
    "PRIMARY",
    "DEFAULT",
    "UNIQUE",
    "REFERENCES",
    "CHECK",
    "CONSTRAINT",
    "COLLATE",
    "GENERATED",
    "AUTO_INCREMENT",
    "AUTOINCREMENT",
    "IDENTITY",
    "ON",
    "COMMENT",
];

/// Numeric modifiers that do not change the canonical type
const TYPE_MODIFIERS: &[&str] = &["UNSIGNED", "SIGNED", "ZEROFILL"];

/// Words that open an index or check clause, but are also ordinary column names
const INDEX_KEYWORDS: &[&str] = &["UNIQUE", "CHECK", "KEY", "INDEX", "FULLTEXT", "SPATIAL"];

/// Canonical tokens this parser can put into a `FieldType`
pub fn emitted_tokens() -> impl Iterator<Item = &'static str> {
    SQL_TYPE_ALIASES.iter().map(|(_, canonical)| *canonical)
}

/// Normalize a lower-cased SQL type phrase to the canonical vocabulary
pub fn normalize_type(phrase: &str) -> Option<&'static str> {
    SQL_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == phrase)
        .map(|(_, canonical)| *canonical)
}

fn is_one_of(token: &Token, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| token.is_keyword(k))
}

/// Whether a bare word can start a column type, e.g. `double` in `DOUBLE PRECISION`
fn starts_type(token: &Token) -> bool {
    let TokenKind::Word(word) = &token.kind else {
        return false;
    };
    let word = word.to_ascii_lowercase();
    SQL_TYPE_ALIASES
        .iter()
        .any(|(alias, _)| alias.split(' ').next() == Some(word.as_str()))
}

/// Decide whether a table body item is a table-level constraint or a column.
///
/// `key`, `index` and friends are valid column names, so they only count as
/// constraints when followed by a column list, `KEY`/`INDEX`, or an index
/// name and a column list.
fn is_table_constraint(item: &[Token]) -> bool {
    let first = &item[0];
    let second = item.get(1);
    let opens_group = |token: Option<&Token>| token.is_some_and(|t| t.kind == TokenKind::LParen);

    if first.is_keyword("CONSTRAINT") {
        return true;
    }
    if first.is_keyword("PRIMARY") || first.is_keyword("FOREIGN") {
        return second.is_some_and(|t| t.is_keyword("KEY"));
    }
    if first.is_keyword("EXCLUDE") {
        return opens_group(second) || second.is_some_and(|t| t.is_keyword("USING"));
    }
    if !is_one_of(first, INDEX_KEYWORDS) {
        return false;
    }
    if opens_group(second) {
        return true;
    }
    if first.is_keyword("CHECK") {
        return false;
    }
    match second {
        Some(t) if t.is_keyword("KEY") || t.is_keyword("INDEX") => true,
        Some(t) => t.identifier().is_some() && !starts_type(t) && opens_group(item.get(2)),
        None => false,
    }
}

/// Parser for `CREATE TABLE` definitions
#[derive(Debug, Default)]
pub struct SqlSchemaParser {
    translator: TypeTranslator,
}

impl SqlSchemaParser {
    pub fn new() -> Self {
        Self {
            translator: TypeTranslator::new(),
        }
    }

    /// Parse one statement; anything other than `CREATE TABLE` yields `None`
    fn parse_statement(&self, tokens: &[Token]) -> Result<Option<Model>, ParseError> {
        let mut cursor = Cursor::new(tokens);

        if !cursor.eat_keyword("CREATE") {
            return Ok(None);
        }
        while cursor.eat_any_keyword(&["TEMP", "TEMPORARY", "UNLOGGED", "GLOBAL", "LOCAL"]) {}
        if !cursor.eat_keyword("TABLE") {
            return Ok(None);
        }
        if cursor.eat_keyword("IF") {
            cursor.expect_keyword("NOT")?;
            cursor.expect_keyword("EXISTS")?;
        }

        let mut table_name = cursor.expect_identifier("table name")?;
        while cursor.eat(&TokenKind::Dot) {
            table_name = cursor.expect_identifier("table name")?;
        }

        if !cursor.eat(&TokenKind::LParen) {
            return Err(cursor.syntax_error(format!(
                "expected '(' after table name '{}'",
                table_name
            )));
        }

        let items = cursor.split_table_body(&table_name)?;
        let mut fields: Vec<Field> = Vec::new();
        let mut table_primary_keys: Vec<String> = Vec::new();

        for item in items {
            if is_table_constraint(item) {
                table_primary_keys.extend(parse_table_primary_key(item));
            } else {
                fields.push(self.parse_column(&table_name, item)?);
            }
        }

        if fields.is_empty() {
            return Err(ParseError::EmptyEntity { entity: table_name });
        }

        for column in table_primary_keys {
            let field = fields
                .iter_mut()
                .find(|f| f.name.eq_ignore_ascii_case(&column))
                .ok_or_else(|| ParseError::UnknownColumn {
                    table: table_name.clone(),
                    column: column.clone(),
                })?;
            field.is_primary_key = true;
            field.is_nullable = false;
        }

        let names = Names::from_declared(&table_name)?;
        Ok(Some(Model::new(names, fields)))
    }

    fn parse_column(&self, table: &str, item: &[Token]) -> Result<Field, ParseError> {
        let first = &item[0];
        let name = first.identifier().ok_or_else(|| ParseError::Syntax {
            line: first.line,
            message: format!("expected column name in table '{}'", table),
        })?;
        naming::validate_field_name(name)?;

        let mut type_words: Vec<String> = Vec::new();
        let mut is_array = false;
        let mut i = 1;
        while i < item.len() {
            let token = &item[i];
            match &token.kind {
                TokenKind::Word(word) if !is_one_of(token, COLUMN_CONSTRAINT_KEYWORDS) => {
                    if !is_one_of(token, TYPE_MODIFIERS) {
                        type_words.push(word.to_ascii_lowercase());
                    }
                    i += 1;
                }
                // Length or precision arguments, e.g. VARCHAR(255)
                TokenKind::LParen if !type_words.is_empty() => {
                    i = skip_group(item, i);
                }
                // The lexer reads `[]` as an empty bracket-quoted identifier
                TokenKind::QuotedIdent(text) if text.is_empty() && !type_words.is_empty() => {
                    is_array = true;
                    i += 1;
                }
                _ => break,
            }
        }

        if type_words.is_empty() {
            return Err(ParseError::Syntax {
                line: first.line,
                message: format!("column '{}.{}' has no type", table, name),
            });
        }

        let phrase = type_words.join(" ");
        let canonical = normalize_type(&phrase)
            .filter(|_| !is_array)
            .filter(|token| self.translator.is_known(token))
            .ok_or_else(|| ParseError::UnknownType {
                entity: table.to_string(),
                field: name.to_string(),
                type_name: if is_array {
                    format!("{}[]", phrase)
                } else {
                    phrase.clone()
                },
            })?;

        let mut field = Field::new(name, canonical);
        let constraints = &item[i..];
        let mut j = 0;
        while j < constraints.len() {
            let token = &constraints[j];
            // CHECK and DEFAULT expressions say nothing about this column's keys
            if token.kind == TokenKind::LParen {
                j = skip_group(constraints, j);
                continue;
            }
            let next = constraints.get(j + 1);
            if token.is_keyword("PRIMARY") && next.is_some_and(|t| t.is_keyword("KEY")) {
                field = field.primary_key();
            }
            if token.is_keyword("NOT") && next.is_some_and(|t| t.is_keyword("NULL")) {
                field = field.not_null();
            }
            j += 1;
        }

        Ok(field)
    }
}

impl SchemaParser for SqlSchemaParser {
    fn parse(&self, source: &str) -> Result<Vec<Model>, ParseError> {
        let tokens = tokenize(source)?;
        let mut models = Vec::new();

        for statement in tokens.split(|t| t.kind == TokenKind::Semicolon) {
            if statement.is_empty() {
                continue;
            }
            match self.parse_statement(statement)? {
                Some(model) => models.push(model),
                None => {
                    // Indexes, inserts and other statements carry no entity
                }
            }
        }

        Ok(models)
    }
}

/// Column names listed by a table-level `PRIMARY KEY (...)`; other constraints yield nothing
fn parse_table_primary_key(item: &[Token]) -> Vec<String> {
    let mut rest = item;
    if rest[0].is_keyword("CONSTRAINT") {
        rest = rest.get(2..).unwrap_or(&[]);
    }
    let is_primary = rest.first().is_some_and(|t| t.is_keyword("PRIMARY"))
        && rest.get(1).is_some_and(|t| t.is_keyword("KEY"));
    if !is_primary {
        return Vec::new();
    }

    let Some(open) = rest.iter().position(|t| t.kind == TokenKind::LParen) else {
        return Vec::new();
    };
    rest[open + 1..]
        .iter()
        .take_while(|t| t.kind != TokenKind::RParen)
        .filter_map(|t| t.identifier().map(str::to_string))
        .collect()
}

/// Index just past the parenthesized group opening at `start`
fn skip_group(tokens: &[Token], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, token) in tokens[start..].iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    return start + offset + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn syntax_error(&self, message: String) -> ParseError {
        ParseError::Syntax {
            line: self.current_line(),
            message,
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_any_keyword(&mut self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.eat_keyword(k))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected {}", keyword)))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek().and_then(|t| t.identifier()) {
            Some(ident) => {
                self.pos += 1;
                Ok(ident.to_string())
            }
            None => Err(self.syntax_error(format!("expected {}", what))),
        }
    }

    /// Consume the table body up to its closing parenthesis and split it on
    /// top-level commas. The opening parenthesis must already be consumed.
    fn split_table_body(&mut self, table: &str) -> Result<Vec<&'a [Token]>, ParseError> {
        let mut items = Vec::new();
        let mut depth = 0usize;
        let mut item_start = self.pos;

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 => {
                    let item = &self.tokens[item_start..self.pos];
                    self.pos += 1;
                    if item.is_empty() {
                        if !items.is_empty() {
                            return Err(ParseError::Syntax {
                                line: token.line,
                                message: format!("trailing comma in table '{}'", table),
                            });
                        }
                    } else {
                        items.push(item);
                    }
                    return Ok(items);
                }
                TokenKind::RParen => depth -= 1,
                TokenKind::Comma if depth == 0 => {
                    let item = &self.tokens[item_start..self.pos];
                    if item.is_empty() {
                        return Err(ParseError::Syntax {
                            line: token.line,
                            message: format!("empty definition in table '{}'", table),
                        });
                    }
                    items.push(item);
                    item_start = self.pos + 1;
                }
                _ => {}
            }
            self.pos += 1;
        }

        Err(self.syntax_error(format!(
            "unbalanced parentheses in table '{}'",
            table
        )))
    }
}
