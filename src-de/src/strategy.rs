//! Mutation/crossover variant, written `<selection>/<n_diffs>/<crossover>`.
//!
//! The variant is parsed and validated once, when the configuration is built,
//! and then carried around as plain enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DEError;

/// How the base vector of the mutant is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Individual with the lowest fitness in the current population
    Best,
    /// Uniformly random individual distinct from the target
    Rand,
}

/// Number of difference vectors added to the base vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffCount {
    One,
    Two,
}

impl DiffCount {
    /// Number of distinct donor individuals drawn besides base and target.
    pub fn donors(self) -> usize {
        match self {
            DiffCount::One => 2,
            DiffCount::Two => 4,
        }
    }
}

/// Crossover type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// Binomial (uniform) crossover
    #[default]
    Binomial,
    /// Exponential crossover
    Exponential,
}

/// Full DE variant, e.g. `best/1/bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Variant {
    pub selection: Selection,
    pub diff_count: DiffCount,
    pub crossover: Crossover,
}

impl Variant {
    pub fn new(selection: Selection, diff_count: DiffCount, crossover: Crossover) -> Self {
        Self { selection, diff_count, crossover }
    }

    /// Smallest population for which target, base and every donor can be distinct.
    pub fn min_population(&self) -> usize {
        2 + self.diff_count.donors()
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::new(Selection::Best, DiffCount::One, Crossover::default())
    }
}

fn parse_selection(token: &str) -> Result<Selection, DEError> {
    match token {
        "best" => Ok(Selection::Best),
        "rand" => Ok(Selection::Rand),
        _ => Err(DEError::invalid_config(format!(
            "unknown mutation selection '{token}', expected 'best' or 'rand'"
        ))),
    }
}

fn parse_diff_count(token: &str) -> Result<DiffCount, DEError> {
    match token {
        "1" => Ok(DiffCount::One),
        "2" => Ok(DiffCount::Two),
        _ => Err(DEError::invalid_config(format!(
            "unknown number of differences '{token}', expected '1' or '2'"
        ))),
    }
}

fn parse_crossover(token: &str) -> Result<Crossover, DEError> {
    match token {
        "bin" => Ok(Crossover::Binomial),
        "exp" => Ok(Crossover::Exponential),
        _ => Err(DEError::invalid_config(format!(
            "unknown crossover '{token}', expected 'bin' or 'exp'"
        ))),
    }
}

impl FromStr for Variant {
    type Err = DEError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_lowercase();
        let parts: Vec<&str> = t.split('/').collect();
        if parts.len() == 3 {
            return Ok(Variant::new(
                parse_selection(parts[0])?,
                parse_diff_count(parts[1])?,
                parse_crossover(parts[2])?,
            ));
        }
        // compact spelling: best1bin, rand2exp, ...
        if parts.len() == 1 && t.len() >= 8 && t.is_ascii() {
            let (sel, rest) = t.split_at(4);
            let (diffs, cross) = rest.split_at(1);
            return Ok(Variant::new(
                parse_selection(sel)?,
                parse_diff_count(diffs)?,
                parse_crossover(cross)?,
            ));
        }
        Err(DEError::invalid_config(format!(
            "malformed variant '{s}', expected '<best|rand>/<1|2>/<bin|exp>'"
        )))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sel = match self.selection {
            Selection::Best => "best",
            Selection::Rand => "rand",
        };
        let diffs = match self.diff_count {
            DiffCount::One => "1",
            DiffCount::Two => "2",
        };
        let cross = match self.crossover {
            Crossover::Binomial => "bin",
            Crossover::Exponential => "exp",
        };
        write!(f, "{sel}/{diffs}/{cross}")
    }
}

impl TryFrom<String> for Variant {
    type Error = DEError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Variant> for String {
    fn from(value: Variant) -> Self {
        value.to_string()
    }
}
