//! Pattern Compiler: prefix templates -> compiled matchers.
//!
//! Operators configure prefix templates as free text interleaved with the
//! placeholders `{{ year }}`, `{{ month }}`, `{{ day }}` (whitespace inside
//! the braces is insignificant). Compilation happens once per configuration
//! load and produces a structured token list - never a per-request regex
//! string. Matching is anchored at the start of the path: literal text is
//! matched verbatim, `year` consumes exactly 4 digits, `month` and `day`
//! exactly 2.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::utils::date::PartialDate;

/// Placeholder group: `{{` anything (lazy) `}}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").unwrap());

/// Template compilation errors. Fatal at configuration load; a malformed
/// template never reaches request handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("duplicate placeholder `{{{{ {0} }}}}` in prefix template")]
    DuplicatePlaceholder(&'static str),

    #[error("unknown placeholder `{{{{ {0} }}}}` in prefix template")]
    UnknownPlaceholder(String),

    #[error("unclosed `{{{{` in prefix template")]
    UnclosedPlaceholder,
}

/// One element of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Verbatim text, matched exactly.
    Literal(String),
    /// Exactly 4 digits.
    Year,
    /// Exactly 2 digits.
    Month,
    /// Exactly 2 digits.
    Day,
}

/// The date fields a compiled pattern can capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFieldSet {
    pub year: bool,
    pub month: bool,
    pub day: bool,
}

/// Compiled representation of one configured prefix template.
///
/// Immutable once compiled; rebuilt only when configuration changes. An
/// empty template compiles to a matcher that matches a zero-length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    tokens: Vec<Token>,
    fields: DateFieldSet,
}

impl PatternSpec {
    /// Compile a prefix template.
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let mut tokens = Vec::new();
        let mut fields = DateFieldSet::default();
        let mut last = 0;

        for m in PLACEHOLDER.find_iter(template) {
            push_literal(&mut tokens, &template[last..m.start()])?;

            // Whitespace inside the braces is insignificant
            let inner: String = m.as_str()[2..m.as_str().len() - 2]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();

            let (token, seen) = match inner.as_str() {
                "year" => (Token::Year, &mut fields.year),
                "month" => (Token::Month, &mut fields.month),
                "day" => (Token::Day, &mut fields.day),
                _ => return Err(TemplateError::UnknownPlaceholder(inner)),
            };
            if *seen {
                let name = match token {
                    Token::Year => "year",
                    Token::Month => "month",
                    _ => "day",
                };
                return Err(TemplateError::DuplicatePlaceholder(name));
            }
            *seen = true;
            tokens.push(token);
            last = m.end();
        }

        push_literal(&mut tokens, &template[last..])?;

        Ok(Self { tokens, fields })
    }

    /// Whether this pattern matches a zero-length prefix.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The date fields this pattern captures.
    pub const fn fields(&self) -> DateFieldSet {
        self.fields
    }

    /// Match the pattern against the start of a path.
    ///
    /// Returns the captured date parts (digit-shaped, not yet
    /// calendar-validated) and the unconsumed remainder. An empty pattern
    /// consumes nothing and returns the whole path.
    pub fn match_prefix<'a>(&self, path: &'a str) -> Option<(PartialDate, &'a str)> {
        let mut rest = path;
        let mut date = PartialDate::EMPTY;

        for token in &self.tokens {
            match token {
                Token::Literal(lit) => rest = rest.strip_prefix(lit.as_str())?,
                Token::Year => {
                    let (value, tail) = take_digits(rest, 4)?;
                    date.year = Some(value as u16);
                    rest = tail;
                }
                Token::Month => {
                    let (value, tail) = take_digits(rest, 2)?;
                    date.month = Some(value as u8);
                    rest = tail;
                }
                Token::Day => {
                    let (value, tail) = take_digits(rest, 2)?;
                    date.day = Some(value as u8);
                    rest = tail;
                }
            }
        }

        Some((date, rest))
    }
}

/// Append a literal span, rejecting stray `{{` (an unmatched open brace
/// means the template was malformed).
fn push_literal(tokens: &mut Vec<Token>, text: &str) -> Result<(), TemplateError> {
    if text.contains("{{") {
        return Err(TemplateError::UnclosedPlaceholder);
    }
    if !text.is_empty() {
        tokens.push(Token::Literal(text.to_string()));
    }
    Ok(())
}

/// Take exactly `n` ASCII digits from the front of `s`.
fn take_digits(s: &str, n: usize) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < n {
        return None;
    }
    let mut value = 0u32;
    for &b in &bytes[..n] {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Some((value, &s[n..]))
}
