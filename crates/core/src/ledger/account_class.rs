//! Account-class derivation from chart-of-accounts codes.
//!
//! The class of an account is given by the leading character(s) of its code:
//! 1 capital, 2 fixed assets, 3 inventory, 4 third parties, 5 cash,
//! 6 expenses, 7 revenue.

use africanut_shared::LedgerConfig;

use super::error::LedgerError;

/// How many leading characters of an account code form its class key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassDigits {
    /// Single leading digit (the OHADA class).
    #[default]
    One,
    /// Two leading characters (class and sub-class).
    Two,
}

impl ClassDigits {
    /// Number of characters taken from the code.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Derives the class key of an account code.
    ///
    /// Returns `None` for blank codes. Codes shorter than the key length
    /// yield whatever characters they have.
    #[must_use]
    pub fn class_key(self, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(code.chars().take(self.width()).collect())
    }
}

impl TryFrom<u8> for ClassDigits {
    type Error = LedgerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(LedgerError::InvalidClassDigits(other)),
        }
    }
}

impl TryFrom<&LedgerConfig> for ClassDigits {
    type Error = LedgerError;

    fn try_from(config: &LedgerConfig) -> Result<Self, Self::Error> {
        Self::try_from(config.class_digits)
    }
}

/// Leading class digit of a class key, if it is one of 1 to 9.
#[must_use]
pub fn class_digit(key: &str) -> Option<u8> {
    key.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
        .filter(|d| *d > 0)
}
