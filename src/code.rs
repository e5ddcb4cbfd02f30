use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One candidate secret: an ordered sequence of digits.
///
/// Codes are plain values. They serialize as their digit string (`"1234"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(Vec<u8>);

impl Code {
    #[must_use]
    pub fn new(digits: Vec<u8>) -> Self {
        Self(digits)
    }

    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCodeError {
    #[error("a code needs at least one digit")]
    Empty,
    #[error("'{0}' is not a digit")]
    NotADigit(char),
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCodeError::Empty);
        }
        s.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(ParseCodeError::NotADigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Code)
    }
}

impl TryFrom<String> for Code {
    type Error = ParseCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

/// The answer to one guess: `a` digits in the right place, `b` right digits in the wrong place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback {
    pub a: usize,
    pub b: usize,
}

impl Feedback {
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Every position matched: the guess is the secret.
    #[must_use]
    pub fn is_solved(&self, code_length: usize) -> bool {
        self.a == code_length && self.b == 0
    }

    /// Whether this pair can be produced at all for codes of the given length.
    #[must_use]
    pub fn is_consistent_with(&self, code_length: usize) -> bool {
        self.a + self.b <= code_length
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A{}B", self.a, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot read feedback from '{0}', expected e.g. 1A2B or '1 2'")]
pub struct ParseFeedbackError(String);

impl FromStr for Feedback {
    type Err = ParseFeedbackError;

    /// Accepts `1A2B`, `1a2b`, `1 2` and `1,2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseFeedbackError(s.to_string());
        let upper = s.trim().to_uppercase();

        let (a, b) = if let Some(stripped) = upper.strip_suffix('B') {
            stripped.split_once('A').ok_or_else(err)?
        } else {
            let mut parts = upper
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty());
            let pair = (parts.next().ok_or_else(err)?, parts.next().ok_or_else(err)?);
            if parts.next().is_some() {
                return Err(err());
            }
            pair
        };

        Ok(Self {
            a: a.trim().parse().map_err(|_| err())?,
            b: b.trim().parse().map_err(|_| err())?,
        })
    }
}
