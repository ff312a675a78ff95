//! `FROM:TO` walkway arguments for `--close` / `--open`.

use std::fmt;
use std::str::FromStr;

/// A walkway named by its two endpoint location ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkwayArg {
    pub from: String,
    pub to: String,
}

impl FromStr for WalkwayArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (from, to) = value
            .split_once(':')
            .ok_or_else(|| format!("expected FROM:TO, got '{}'", value))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(format!("expected FROM:TO, got '{}'", value));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

impl fmt::Display for WalkwayArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}
