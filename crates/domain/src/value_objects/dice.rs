//! Dice formula value objects and parsing
//!
//! Supports the formulas the rules produce: "1d6", "2d20kh1", "2d20kl1".
//! Rolling is left to the caller, who supplies a die-rolling closure, so the
//! domain stays free of any RNG.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected XdY, XdYkhN or XdYklN
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    /// Cannot keep more dice than were rolled
    #[error("Cannot keep {keep} of {count} dice")]
    InvalidKeep { keep: u8, count: u8 },
}

/// Which dice survive after rolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeepRule {
    /// Keep the N highest dice ("khN")
    Highest(u8),
    /// Keep the N lowest dice ("klN")
    Lowest(u8),
}

impl KeepRule {
    fn count(&self) -> u8 {
        match self {
            KeepRule::Highest(n) | KeepRule::Lowest(n) => *n,
        }
    }
}

/// A parsed dice formula like "2d20kh1"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    /// Number of dice to roll (X in XdY)
    pub dice_count: u8,
    /// Size of each die (Y in XdY)
    pub die_size: u8,
    /// Optional keep-highest / keep-lowest rule
    pub keep: Option<KeepRule>,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(dice_count: u8, die_size: u8) -> Result<Self, DiceParseError> {
        if dice_count == 0 {
            return Err(DiceParseError::InvalidDiceCount);
        }
        if die_size < 2 {
            return Err(DiceParseError::InvalidDieSize);
        }
        Ok(Self {
            dice_count,
            die_size,
            keep: None,
        })
    }

    /// One die of the given size ("1dY").
    ///
    /// Sizes below 2 are raised to 2.
    pub fn single(die_size: u8) -> Self {
        Self {
            dice_count: 1,
            die_size: die_size.max(2),
            keep: None,
        }
    }

    /// Add a keep rule.
    pub fn keeping(mut self, keep: KeepRule) -> Result<Self, DiceParseError> {
        if keep.count() == 0 || keep.count() > self.dice_count {
            return Err(DiceParseError::InvalidKeep {
                keep: keep.count(),
                count: self.dice_count,
            });
        }
        self.keep = Some(keep);
        Ok(self)
    }

    /// Parse a dice formula string like "1d6", "d20", "2d20kh1", "2d20kl1"
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let d_pos = input.find('d').ok_or_else(|| {
            DiceParseError::InvalidFormat(format!("Missing 'd' separator in '{}'", input))
        })?;

        let dice_count_str = &input[..d_pos];
        let dice_count: u8 = if dice_count_str.is_empty() {
            1 // "d20" means "1d20"
        } else {
            dice_count_str.parse().map_err(|_| {
                DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", dice_count_str))
            })?
        };

        let after_d = &input[d_pos + 1..];
        let (die_size_str, keep) = match after_d.find('k') {
            Some(k_pos) => {
                let rule = &after_d[k_pos + 1..];
                let parse_keep = |digits: &str| -> Result<u8, DiceParseError> {
                    digits.parse().map_err(|_| {
                        DiceParseError::InvalidFormat(format!("Invalid keep count: '{}'", digits))
                    })
                };
                let keep = if let Some(n) = rule.strip_prefix('h') {
                    KeepRule::Highest(parse_keep(n)?)
                } else if let Some(n) = rule.strip_prefix('l') {
                    KeepRule::Lowest(parse_keep(n)?)
                } else {
                    return Err(DiceParseError::InvalidFormat(format!(
                        "Invalid keep rule: 'k{}'",
                        rule
                    )));
                };
                (&after_d[..k_pos], Some(keep))
            }
            None => (after_d, None),
        };

        let die_size: u8 = die_size_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", die_size_str))
        })?;

        let formula = Self::new(dice_count, die_size)?;
        match keep {
            Some(rule) => formula.keeping(rule),
            None => Ok(formula),
        }
    }

    /// Evaluate the formula using `roll_die` to produce each face (1..=size).
    ///
    /// Keep rules are applied before summing.
    pub fn evaluate_with(&self, mut roll_die: impl FnMut(u8) -> i32) -> i32 {
        let mut rolls: Vec<i32> = (0..self.dice_count)
            .map(|_| roll_die(self.die_size))
            .collect();

        match self.keep {
            Some(KeepRule::Highest(n)) => {
                rolls.sort_unstable_by(|a, b| b.cmp(a));
                rolls.iter().take(n as usize).sum()
            }
            Some(KeepRule::Lowest(n)) => {
                rolls.sort_unstable();
                rolls.iter().take(n as usize).sum()
            }
            None => rolls.iter().sum(),
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.dice_count, self.die_size)?;
        match self.keep {
            Some(KeepRule::Highest(n)) => write!(f, "kh{}", n),
            Some(KeepRule::Lowest(n)) => write!(f, "kl{}", n),
            None => Ok(()),
        }
    }
}

/// Shape of the d20 roll once edge and snag have been applied.
///
/// Edge and snag cancel each other out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum D20Shape {
    /// Roll one d20
    Single,
    /// Edge: roll two d20, keep the higher
    KeepHighest,
    /// Snag: roll two d20, keep the lower
    KeepLowest,
}

impl D20Shape {
    pub fn from_flags(edge: bool, snag: bool) -> Self {
        match (edge, snag) {
            (true, true) | (false, false) => D20Shape::Single,
            (true, false) => D20Shape::KeepHighest,
            (false, true) => D20Shape::KeepLowest,
        }
    }

    /// The formula handed to the die-roll evaluator.
    pub fn formula(&self) -> DiceFormula {
        match self {
            D20Shape::Single => DiceFormula {
                dice_count: 1,
                die_size: 20,
                keep: None,
            },
            D20Shape::KeepHighest => DiceFormula {
                dice_count: 2,
                die_size: 20,
                keep: Some(KeepRule::Highest(1)),
            },
            D20Shape::KeepLowest => DiceFormula {
                dice_count: 2,
                die_size: 20,
                keep: Some(KeepRule::Lowest(1)),
            },
        }
    }
}

impl fmt::Display for D20Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            D20Shape::Single => write!(f, "roll 1"),
            D20Shape::KeepHighest => write!(f, "roll 2 keep highest"),
            D20Shape::KeepLowest => write!(f, "roll 2 keep lowest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_d6() {
        let formula = DiceFormula::parse("1d6").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 6);
        assert_eq!(formula.keep, None);
    }

    #[test]
    fn test_parse_shorthand_d20() {
        let formula = DiceFormula::parse("d20").unwrap();
        assert_eq!(formula.dice_count, 1);
        assert_eq!(formula.die_size, 20);
    }

    #[test]
    fn test_parse_keep_highest() {
        let formula = DiceFormula::parse("2d20kh1").unwrap();
        assert_eq!(formula.dice_count, 2);
        assert_eq!(formula.die_size, 20);
        assert_eq!(formula.keep, Some(KeepRule::Highest(1)));
    }

    #[test]
    fn test_parse_keep_lowest_case_insensitive() {
        let formula = DiceFormula::parse(" 2D20KL1 ").unwrap();
        assert_eq!(formula.keep, Some(KeepRule::Lowest(1)));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DiceFormula::parse(""), Err(DiceParseError::Empty)));
    }

    #[test]
    fn test_parse_invalid_no_d() {
        assert!(matches!(
            DiceFormula::parse("20"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DiceFormula::parse("0d20"),
            Err(DiceParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_invalid_die_size() {
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
    }

    #[test]
    fn test_parse_keep_more_than_rolled() {
        assert!(matches!(
            DiceFormula::parse("1d20kh2"),
            Err(DiceParseError::InvalidKeep { keep: 2, count: 1 })
        ));
        assert!(matches!(
            DiceFormula::parse("2d20kx1"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceFormula::single(6).to_string(), "1d6");
        assert_eq!(D20Shape::KeepHighest.formula().to_string(), "2d20kh1");
        assert_eq!(D20Shape::KeepLowest.formula().to_string(), "2d20kl1");
        assert_eq!(D20Shape::Single.formula().to_string(), "1d20");
    }

    #[test]
    fn test_evaluate_keeps_highest_and_lowest() {
        let mut faces = vec![4, 17].into_iter();
        let high = D20Shape::KeepHighest
            .formula()
            .evaluate_with(|_| faces.next().unwrap_or(1));
        assert_eq!(high, 17);

        let mut faces = vec![4, 17].into_iter();
        let low = D20Shape::KeepLowest
            .formula()
            .evaluate_with(|_| faces.next().unwrap_or(1));
        assert_eq!(low, 4);
    }

    #[test]
    fn test_evaluate_passes_die_size() {
        let total = DiceFormula::new(3, 8).unwrap().evaluate_with(|size| size as i32);
        assert_eq!(total, 24);
    }

    #[test]
    fn test_d20_shape_from_flags() {
        assert_eq!(D20Shape::from_flags(true, false).to_string(), "roll 2 keep highest");
        assert_eq!(D20Shape::from_flags(false, true).to_string(), "roll 2 keep lowest");
        assert_eq!(D20Shape::from_flags(true, true).to_string(), "roll 1");
        assert_eq!(D20Shape::from_flags(false, false).to_string(), "roll 1");
    }
}
