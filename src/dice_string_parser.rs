use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::dice::{DiceExpression, Modifier, Operator};

/// the complete notation, anchored on both ends: `NdM`, optionally followed by `+K` or `-K`
const NOTATION_PATTERN: &str =
    r"^(?P<multiplier>[0-9]{0,3})d(?P<max>[0-9]{1,3})(?:(?P<operator>[+-])(?P<modifier>[0-9]{0,2}))?$";

static NOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(NOTATION_PATTERN).expect("dice notation pattern is valid"));

/// number of dice rolled when the notation leaves the multiplier out, like in `d20`
pub const DEFAULT_MULTIPLIER: u16 = 1;

/// Reasons a string is rejected as dice notation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// the input does not have the shape `NdM`, `NdM+K` or `NdM-K`. Holds the rejected input.
    Mismatch(String),
    /// the input has the right shape but describes a die without sides, like `1d0`
    ZeroSides,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Mismatch(input) => {
                write!(f, "dice string does not match requirements: {input:?}")
            }
            ParseError::ZeroSides => write!(f, "a die needs at least one side"),
        }
    }
}

impl std::error::Error for ParseError {}

pub fn string_to_dice_expression(input: &str) -> Result<DiceExpression, ParseError> {
    let result = NOTATION
        .captures(input)
        .ok_or_else(|| ParseError::Mismatch(input.to_owned()))
        .and_then(|captures| captures_to_dice_expression(&captures));
    if let Err(err) = &result {
        debug!(input, %err, "rejected dice notation");
    }
    result
}

fn captures_to_dice_expression(captures: &Captures) -> Result<DiceExpression, ParseError> {
    // an omitted multiplier and a written zero both mean a single die
    let multiplier = match digits(captures, "multiplier") {
        0 => DEFAULT_MULTIPLIER,
        n => n,
    };

    let max_side = digits(captures, "max");
    if max_side == 0 {
        return Err(ParseError::ZeroSides);
    }

    let modifier = match captures.name("operator") {
        None => None,
        Some(symbol) => {
            let operator = match symbol.as_str() {
                "+" => Operator::Plus,
                _ => Operator::Minus,
            };
            // `2d6+` carries an operator without digits, which counts as zero
            let amount = digits(captures, "modifier") as u8;
            Some(Modifier { operator, amount })
        }
    };

    Ok(DiceExpression::from_parts(multiplier, max_side, modifier))
}

/// value of a digit-only capture group, 0 for an empty or missing group.
///
/// The grammar caps every group at 3 ASCII digits, so the value always fits.
fn digits(captures: &Captures, group: &str) -> u16 {
    captures
        .name(group)
        .map(|m| {
            m.as_str()
                .bytes()
                .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'))
        })
        .unwrap_or(0)
}
