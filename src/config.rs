use crate::code::Code;
use crate::error::{Result, SolverError};
use serde::{Deserialize, Serialize};

/// Largest digit symbol supported; codes are written one character per digit.
pub const MAX_DIGIT: u8 = 9;

/// Longest code the interactive front-end will generate a universe for.
pub const MAX_CODE_LENGTH: usize = 7;

/// Rules that define the universe of possible secret codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(alias = "digitLength")]
    pub code_length: usize,
    pub digit_min: u8,
    pub digit_max: u8,
    pub allow_duplicates: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            code_length: 4,
            digit_min: 1,
            digit_max: 9,
            allow_duplicates: false,
        }
    }
}

/// A partial configuration. Absent fields keep their current value when merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub code_length: Option<usize>,
    pub digit_min: Option<u8>,
    pub digit_max: Option<u8>,
    pub allow_duplicates: Option<bool>,
}

impl ConfigUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<Configuration> for ConfigUpdate {
    fn from(config: Configuration) -> Self {
        Self {
            code_length: Some(config.code_length),
            digit_min: Some(config.digit_min),
            digit_max: Some(config.digit_max),
            allow_duplicates: Some(config.allow_duplicates),
        }
    }
}

impl Configuration {
    #[must_use]
    pub fn merged(&self, update: &ConfigUpdate) -> Self {
        Self {
            code_length: update.code_length.unwrap_or(self.code_length),
            digit_min: update.digit_min.unwrap_or(self.digit_min),
            digit_max: update.digit_max.unwrap_or(self.digit_max),
            allow_duplicates: update.allow_duplicates.unwrap_or(self.allow_duplicates),
        }
    }

    /// Checks the structural rules. A configuration that passes may still admit no code
    /// (more positions than distinct digits); that is reported as `NoValidCandidates` on reset.
    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 {
            return Err(SolverError::InvalidConfiguration(
                "code length must be at least 1".to_string(),
            ));
        }
        if self.digit_min > self.digit_max {
            return Err(SolverError::InvalidConfiguration(format!(
                "digit range {}..={} is empty",
                self.digit_min, self.digit_max
            )));
        }
        if self.digit_max > MAX_DIGIT {
            return Err(SolverError::InvalidConfiguration(format!(
                "digits above {MAX_DIGIT} are not supported (got {})",
                self.digit_max
            )));
        }
        Ok(())
    }

    /// Number of distinct digit symbols, zero for an empty range.
    #[must_use]
    pub fn alphabet_size(&self) -> usize {
        if self.digit_min > self.digit_max {
            return 0;
        }
        usize::from(self.digit_max - self.digit_min) + 1
    }

    /// Closed-form size of the candidate universe. Saturates at `u128::MAX`.
    #[must_use]
    pub fn universe_size(&self) -> u128 {
        let n = self.alphabet_size() as u128;
        let k = self.code_length;
        if self.allow_duplicates {
            return (0..k).fold(1u128, |acc, _| acc.saturating_mul(n));
        }
        if k as u128 > n {
            return 0;
        }
        (0..k as u128).fold(1u128, |acc, i| acc.saturating_mul(n - i))
    }

    /// Whether `code` has the configured length and only digits from the configured range.
    #[must_use]
    pub fn admits(&self, code: &Code) -> bool {
        code.len() == self.code_length
            && code
                .digits()
                .iter()
                .all(|d| (self.digit_min..=self.digit_max).contains(d))
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} digits from {} to {}, {}",
            self.code_length,
            self.digit_min,
            self.digit_max,
            if self.allow_duplicates {
                "duplicates allowed"
            } else {
                "no duplicates"
            }
        )
    }
}
