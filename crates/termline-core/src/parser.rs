//! Command line tokenizer
//!
//! Splits one line of text into positional arguments and named parameters
//! in a single pass. Parameters are written as `-name`, `--name`,
//! `--name=value` or `--name = value`; arguments and values may be wrapped
//! in `'` or `"` to keep whitespace, and the active quote character can be
//! escaped inside the quotes with a backslash.
//!
//! A name followed by another `-` token is committed as a flag with the
//! value `"true"`. A bare name left open at the end of the line is dropped.

use serde::Serialize;
use thiserror::Error;

use crate::command::{ParsedCommand, FLAG_VALUE};

/// Characters of surrounding text kept on each side of an error position
const CONTEXT_RADIUS: usize = 10;

/// Category of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    MalformedStructure,
    UnterminatedEscape,
    UnterminatedQuote,
}

/// Errors that can occur while tokenizing a command line
///
/// Positions are character indices into the line, not byte offsets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected '{ch}' at position {index} near \"{context}\"")]
    MalformedStructure {
        ch: char,
        index: usize,
        context: String,
    },

    #[error("Escape '{ch}' at position {index} ends the line near \"{context}\"")]
    UnterminatedEscape {
        ch: char,
        index: usize,
        context: String,
    },

    #[error("Quote {quote} opened at position {index} is never closed near \"{context}\"")]
    UnterminatedQuote {
        quote: char,
        index: usize,
        context: String,
    },
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MalformedStructure { .. } => ParseErrorKind::MalformedStructure,
            ParseError::UnterminatedEscape { .. } => ParseErrorKind::UnterminatedEscape,
            ParseError::UnterminatedQuote { .. } => ParseErrorKind::UnterminatedQuote,
        }
    }

    /// The offending character (the opening quote for unterminated quotes)
    pub fn ch(&self) -> char {
        match self {
            ParseError::MalformedStructure { ch, .. } | ParseError::UnterminatedEscape { ch, .. } => {
                *ch
            }
            ParseError::UnterminatedQuote { quote, .. } => *quote,
        }
    }

    /// Character index of [`ParseError::ch`] in the input line
    pub fn index(&self) -> usize {
        match self {
            ParseError::MalformedStructure { index, .. }
            | ParseError::UnterminatedEscape { index, .. }
            | ParseError::UnterminatedQuote { index, .. } => *index,
        }
    }

    /// Text surrounding the error position
    pub fn context(&self) -> &str {
        match self {
            ParseError::MalformedStructure { context, .. }
            | ParseError::UnterminatedEscape { context, .. }
            | ParseError::UnterminatedQuote { context, .. } => context,
        }
    }

    /// Character index of [`ParseError::ch`] within [`ParseError::context`]
    pub fn context_offset(&self) -> usize {
        self.index().min(CONTEXT_RADIUS)
    }
}

/// Parse a command line into arguments and parameters.
///
/// Every structural violation aborts the parse; no partial result is
/// returned.
pub fn parse(line: &str) -> Result<ParsedCommand, ParseError> {
    let chars: Vec<char> = line.chars().collect();
    Scanner::new(&chars).run()
}

/// The token currently being collected
#[derive(Debug)]
enum Token {
    /// Between tokens. `pending` holds a parameter name that was ended by
    /// whitespace and has not been resolved to a flag or a value yet.
    Between { pending: Option<String> },
    /// Positional argument text
    Argument {
        text: String,
        pending: Option<String>,
    },
    /// Parameter name, starting with `-`
    Name(String),
    /// `=` seen for `name`, collecting its value (possibly still empty)
    Value { name: String, value: String },
}

impl Default for Token {
    fn default() -> Self {
        Token::Between { pending: None }
    }
}

impl Token {
    /// No argument, name or value text has been collected yet
    fn is_fresh(&self) -> bool {
        match self {
            Token::Between { .. } => true,
            Token::Value { value, .. } => value.is_empty(),
            Token::Argument { .. } | Token::Name(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Quote {
    delim: char,
    index: usize,
}

/// Per-call scanning state
struct Scanner<'a> {
    chars: &'a [char],
    token: Token,
    quote: Option<Quote>,
    command: ParsedCommand,
}

impl<'a> Scanner<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            token: Token::default(),
            quote: None,
            command: ParsedCommand::new(),
        }
    }

    fn run(mut self) -> Result<ParsedCommand, ParseError> {
        let mut index = 0;
        while index < self.chars.len() {
            let c = self.chars[index];
            index += match self.quote {
                Some(quote) => self.step_quoted(index, c, quote)?,
                None => {
                    self.step(index, c)?;
                    1
                }
            };
        }
        self.finish()
    }

    fn step(&mut self, index: usize, c: char) -> Result<(), ParseError> {
        match c {
            c if is_separator(c) => self.end_token(),
            '-' if self.token.is_fresh() => self.start_name(),
            '\'' | '"' => self.open_quote(index, c)?,
            '=' => self.assign(index)?,
            _ => self.push(c),
        }
        Ok(())
    }

    /// Handle one character inside quotes, returning how many were consumed
    fn step_quoted(&mut self, index: usize, c: char, quote: Quote) -> Result<usize, ParseError> {
        match c {
            '\\' => match self.chars.get(index + 1).copied() {
                None => Err(ParseError::UnterminatedEscape {
                    ch: c,
                    index,
                    context: self.context(index),
                }),
                Some(next) if next == quote.delim => {
                    self.push(next);
                    Ok(2)
                }
                // The backslash is dropped, the next character goes through
                // the normal rules
                Some(_) => Ok(1),
            },
            c if c == quote.delim => {
                if matches!(self.chars.get(index + 1), Some(&next) if !is_separator(next)) {
                    return Err(self.malformed(c, index));
                }
                self.quote = None;
                Ok(1)
            }
            _ => {
                self.push(c);
                Ok(1)
            }
        }
    }

    /// Whitespace outside quotes: close whatever is open
    fn end_token(&mut self) {
        self.token = match std::mem::take(&mut self.token) {
            Token::Argument { text, pending } => {
                self.command.push_argument(text);
                Token::Between { pending }
            }
            Token::Name(name) => Token::Between {
                pending: Some(name),
            },
            Token::Value { name, value } if !value.is_empty() => {
                self.command.set_parameter(name, value);
                Token::Between { pending: None }
            }
            other => other,
        };
    }

    /// First `-` of a fresh token. A name still waiting for resolution
    /// becomes a flag.
    fn start_name(&mut self) {
        match std::mem::take(&mut self.token) {
            Token::Between {
                pending: Some(name),
            }
            | Token::Value { name, .. } => {
                log::trace!("Committing flag {:?}", name);
                self.command.set_parameter(name, FLAG_VALUE.to_string());
            }
            _ => {}
        }
        self.token = Token::Name(String::from('-'));
    }

    fn open_quote(&mut self, index: usize, delim: char) -> Result<(), ParseError> {
        if !self.token.is_fresh() {
            return Err(self.malformed(delim, index));
        }
        self.quote = Some(Quote { delim, index });
        Ok(())
    }

    /// `=` outside quotes: the preceding name starts taking a value
    fn assign(&mut self, index: usize) -> Result<(), ParseError> {
        let name = match std::mem::take(&mut self.token) {
            Token::Name(name)
            | Token::Between {
                pending: Some(name),
            } => name,
            // The argument ends here, the value belongs to the pending name
            Token::Argument {
                text,
                pending: Some(name),
            } => {
                self.command.push_argument(text);
                name
            }
            // A second `=` or nothing to assign to
            _ => return Err(self.malformed('=', index)),
        };
        if !name.chars().any(is_word_char) {
            return Err(self.malformed('=', index));
        }
        self.token = Token::Value {
            name,
            value: String::new(),
        };
        Ok(())
    }

    /// Append a literal character to the open value, name or argument
    fn push(&mut self, c: char) {
        self.token = match std::mem::take(&mut self.token) {
            Token::Value { name, mut value } => {
                value.push(c);
                Token::Value { name, value }
            }
            Token::Name(mut name) => {
                name.push(c);
                Token::Name(name)
            }
            Token::Argument { mut text, pending } => {
                text.push(c);
                Token::Argument { text, pending }
            }
            Token::Between { pending } => Token::Argument {
                text: String::from(c),
                pending,
            },
        };
    }

    fn finish(mut self) -> Result<ParsedCommand, ParseError> {
        if let Some(quote) = self.quote {
            log::debug!("Unterminated quote opened at {}", quote.index);
            return Err(ParseError::UnterminatedQuote {
                quote: quote.delim,
                index: quote.index,
                context: self.context(quote.index),
            });
        }

        self.end_token();
        match &self.token {
            Token::Between {
                pending: Some(name),
            }
            | Token::Value { name, .. } => {
                log::trace!("Dropping unresolved parameter {:?} at end of line", name);
            }
            _ => {}
        }

        Ok(self.command)
    }

    fn malformed(&self, ch: char, index: usize) -> ParseError {
        log::debug!("Rejecting {:?} at position {}", ch, index);
        ParseError::MalformedStructure {
            ch,
            index,
            context: self.context(index),
        }
    }

    fn context(&self, index: usize) -> String {
        let start = index.saturating_sub(CONTEXT_RADIUS);
        let end = (index + CONTEXT_RADIUS + 1).min(self.chars.len());
        self.chars[start..end].iter().collect()
    }
}

/// Token separator: Unicode whitespace, except the no-break spaces and NEL,
/// plus the ASCII information separators U+001C..U+001F
fn is_separator(c: char) -> bool {
    match c {
        '\u{1c}'..='\u{1f}' => true,
        '\u{85}' | '\u{a0}' | '\u{2007}' | '\u{202f}' => false,
        _ => c.is_whitespace(),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
