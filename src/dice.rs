use std::{fmt, str::FromStr};

use rand::Rng;
use tracing::trace;

use crate::{dice_string_parser, wasm_safe, ParseError};

/// Result of a roll. Never negative, subtraction is clamped at 0.
pub type Value = u32;

/// The sign in front of the flat modifier of a [`DiceExpression`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    /// `+`, the modifier is added to the dice sum
    Plus,
    /// `-`, the modifier is subtracted from the dice sum, the result never drops below 0
    Minus,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Operator::Plus),
            '-' => Ok(Operator::Minus),
            other => Err(other),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// operator and amount always come as a pair
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub(crate) struct Modifier {
    pub operator: Operator,
    pub amount: u8,
}

impl Modifier {
    fn apply(&self, sum: Value) -> Value {
        let amount = Value::from(self.amount);
        match self.operator {
            Operator::Plus => sum + amount,
            Operator::Minus => sum.saturating_sub(amount),
        }
    }
}

/// A parsed dice notation like `2d6+1`: roll `multiplier` dice with sides `1..=max_side`,
/// sum them up and apply the optional flat modifier.
///
/// A [`DiceExpression`] is always created from a string and cannot be changed afterwards:
/// ```
/// use dice_notation::DiceExpression;
///
/// let dice = DiceExpression::parse("3d8+2").unwrap();
/// let rolled = dice.roll();
/// assert!((5..=26).contains(&rolled));
/// assert_eq!(dice.serialize(), "3d8+2");
/// ```
///
/// The multiplier may be left out, `d20` rolls a single die.
///
/// Two expressions are equal when they roll the same way, so a zero modifier is the same as no
/// modifier: `2d6+0 == 2d6`.
#[derive(Debug, Clone, Copy)]
pub struct DiceExpression {
    multiplier: u16,
    max_side: u16,
    modifier: Option<Modifier>,
}

impl DiceExpression {
    /// parses `input` as dice notation.
    ///
    /// The whole string has to match `NdM`, `NdM+K` or `NdM-K`, where `N` has 0 to 3 digits,
    /// `M` 1 to 3 digits and `K` 0 to 2 digits. No whitespace is allowed.
    ///
    /// # Examples
    /// ```
    /// use dice_notation::{DiceExpression, ParseError};
    ///
    /// assert!(DiceExpression::parse("2d6").is_ok());
    /// assert!(DiceExpression::parse("d20").is_ok());
    /// assert!(matches!(DiceExpression::parse("2x6"), Err(ParseError::Mismatch(_))));
    /// assert_eq!(DiceExpression::parse("1d0"), Err(ParseError::ZeroSides));
    /// ```
    pub fn parse(input: &str) -> Result<DiceExpression, ParseError> {
        dice_string_parser::string_to_dice_expression(input)
    }

    pub(crate) fn from_parts(
        multiplier: u16,
        max_side: u16,
        modifier: Option<Modifier>,
    ) -> DiceExpression {
        DiceExpression {
            multiplier,
            max_side,
            modifier,
        }
    }

    /// number of dice that are rolled
    pub fn multiplier(&self) -> u16 {
        self.multiplier
    }

    /// highest value of a single die, the lowest is always 1
    pub fn max_side(&self) -> u16 {
        self.max_side
    }

    pub fn operator(&self) -> Option<Operator> {
        self.modifier.map(|m| m.operator)
    }

    /// the flat modifier as written, `Some(0)` for notation like `2d6+`
    pub fn modifier(&self) -> Option<u8> {
        self.modifier.map(|m| m.amount)
    }

    /// Rolls the dice with the default random source of this platform.
    ///
    /// Every die is sampled uniformly from `1..=max_side`, the dice are summed and the modifier is
    /// applied. A negative result is clamped to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use dice_notation::DiceExpression;
    ///
    /// let d = DiceExpression::parse("1d6-10").unwrap();
    /// assert_eq!(d.roll(), 0);
    /// ```
    pub fn roll(&self) -> Value {
        self.roll_with(&mut wasm_safe::default_rng())
    }

    /// same as [`roll`](DiceExpression::roll), but draws from `rng`
    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        let max_side = Value::from(self.max_side);
        let sum: Value = (0..self.multiplier)
            .map(|_| rng.gen_range(1..=max_side))
            .sum();
        let result = match &self.modifier {
            Some(modifier) => modifier.apply(sum),
            None => sum,
        };
        trace!(dice = %self, sum, result, "rolled");
        result
    }

    /// rolls the [`DiceExpression`] `n` times and returns the results as a vector
    pub fn roll_multiple(&self, n: usize) -> Vec<Value> {
        let mut rng = wasm_safe::default_rng();
        (0..n).map(|_| self.roll_with(&mut rng)).collect()
    }

    /// lowest value [`roll`](DiceExpression::roll) can return
    pub fn min_roll(&self) -> Value {
        self.bound(1)
    }

    /// highest value [`roll`](DiceExpression::roll) can return
    pub fn max_roll(&self) -> Value {
        self.bound(Value::from(self.max_side))
    }

    fn bound(&self, per_die: Value) -> Value {
        let sum = Value::from(self.multiplier) * per_die;
        match &self.modifier {
            Some(modifier) => modifier.apply(sum),
            None => sum,
        }
    }

    /// Canonical notation that parses back into an equal [`DiceExpression`].
    ///
    /// The multiplier is always written out. The modifier is only written when it is not zero,
    /// so `2d6+0` and `2d6+` both serialize to `2d6`. Consumers rely on that exact output.
    ///
    /// ```
    /// use dice_notation::DiceExpression;
    ///
    /// assert_eq!(DiceExpression::parse("d6").unwrap().serialize(), "1d6");
    /// assert_eq!(DiceExpression::parse("2d6+0").unwrap().serialize(), "2d6");
    /// assert_eq!(DiceExpression::parse("1d4-1").unwrap().serialize(), "1d4-1");
    /// ```
    pub fn serialize(&self) -> String {
        let mut string = format!("{}d{}", self.multiplier, self.max_side);
        if let Some(Modifier { operator, amount }) = self.modifier {
            if amount != 0 {
                string.push(operator.symbol());
                string.push_str(&amount.to_string());
            }
        }
        string
    }

    /// the modifier as it affects a roll, `None` when it is zero
    fn effective_modifier(&self) -> Option<Modifier> {
        self.modifier.filter(|m| m.amount != 0)
    }
}

impl PartialEq for DiceExpression {
    fn eq(&self, other: &Self) -> bool {
        self.multiplier == other.multiplier
            && self.max_side == other.max_side
            && self.effective_modifier() == other.effective_modifier()
    }
}

impl Eq for DiceExpression {}

impl std::hash::Hash for DiceExpression {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.multiplier.hash(state);
        self.max_side.hash(state);
        self.effective_modifier().hash(state);
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for DiceExpression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s)
    }
}

impl TryFrom<&str> for DiceExpression {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        DiceExpression::parse(value)
    }
}

impl TryFrom<String> for DiceExpression {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DiceExpression::parse(&value)
    }
}

impl From<DiceExpression> for String {
    fn from(value: DiceExpression) -> Self {
        value.serialize()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn dice(input: &str) -> DiceExpression {
        DiceExpression::parse(input).unwrap()
    }

    fn assert_rolls_within(input: &str, min: Value, max: Value) {
        let d = dice(input);
        for _ in 0..2000 {
            let rolled = d.roll();
            assert!(
                (min..=max).contains(&rolled),
                "{input} rolled {rolled}, expected {min}..={max}"
            );
        }
    }

    #[test]
    fn one_sided_die_always_rolls_one() {
        let d = dice("1d1");
        for _ in 0..100 {
            assert_eq!(d.roll(), 1);
        }
    }

    #[test]
    fn three_six_sided_dice() {
        assert_rolls_within("3d6", 3, 18);
    }

    #[test]
    fn positive_modifier_is_added() {
        assert_rolls_within("2d4+3", 5, 11);
    }

    #[test]
    fn negative_result_is_clamped_to_zero() {
        let d = dice("1d6-10");
        for _ in 0..1000 {
            assert_eq!(d.roll(), 0);
        }
    }

    #[test]
    fn subtraction_above_zero_is_not_clamped() {
        assert_rolls_within("4d1-1", 3, 3);
        assert_rolls_within("2d6-2", 0, 10);
    }

    #[test]
    fn zero_modifier_changes_nothing() {
        assert_rolls_within("2d1+", 2, 2);
        assert_rolls_within("2d1-0", 2, 2);
    }

    #[test]
    fn all_faces_of_a_d6_show_up() {
        let seen: HashSet<Value> = dice("1d6").roll_multiple(10_000).into_iter().collect();
        assert_eq!(seen, (1..=6).collect::<HashSet<Value>>());
    }

    #[test]
    fn d6_is_roughly_uniform() {
        let mut counts: HashMap<Value, usize> = HashMap::new();
        let mut rng = StdRng::seed_from_u64(7);
        let d = dice("d6");
        for _ in 0..60_000 {
            *counts.entry(d.roll_with(&mut rng)).or_default() += 1;
        }
        for face in 1..=6 {
            let count = counts[&face];
            assert!((9_000..11_000).contains(&count), "face {face} came up {count} times");
        }
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let d = dice("10d20+5");
        let first: Vec<Value> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| d.roll_with(&mut rng)).collect()
        };
        let second: Vec<Value> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| d.roll_with(&mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn largest_expression_stays_in_bounds() {
        let d = dice("999d999+99");
        let rolled = d.roll();
        assert!((1098..=998_100).contains(&rolled));
    }

    #[test]
    fn roll_multiple_returns_n_results() {
        assert_eq!(dice("2d6").roll_multiple(0).len(), 0);
        assert_eq!(dice("2d6").roll_multiple(25).len(), 25);
    }

    #[test]
    fn bounds() {
        assert_eq!((dice("3d6").min_roll(), dice("3d6").max_roll()), (3, 18));
        assert_eq!((dice("2d4+3").min_roll(), dice("2d4+3").max_roll()), (5, 11));
        assert_eq!((dice("1d6-10").min_roll(), dice("1d6-10").max_roll()), (0, 0));
        assert_eq!((dice("2d6-4").min_roll(), dice("2d6-4").max_roll()), (0, 8));
        assert_eq!((dice("d20").min_roll(), dice("d20").max_roll()), (1, 20));
    }

    #[test]
    fn serialize_canonical_form() {
        assert_eq!(dice("2d6").serialize(), "2d6");
        assert_eq!(dice("d20").serialize(), "1d20");
        assert_eq!(dice("3d8+2").serialize(), "3d8+2");
        assert_eq!(dice("1d4-1").serialize(), "1d4-1");
        assert_eq!(dice("002d010+07").serialize(), "2d10+7");
    }

    #[test]
    fn serialize_drops_zero_modifier() {
        assert_eq!(dice("2d6+0").serialize(), "2d6");
        assert_eq!(dice("2d6-00").serialize(), "2d6");
        assert_eq!(dice("2d6+").serialize(), "2d6");
        assert_eq!(dice("2d6-").serialize(), "2d6");
    }

    #[test]
    fn serialized_form_parses_back_to_an_equal_expression() {
        for input in [
            "2d6", "d20", "3d8+2", "1d4-1", "2d6+0", "2d6+", "0d6", "999d999-99", "d1", "07d7+7",
        ] {
            let expr = dice(input);
            let again = dice(&expr.serialize());
            assert_eq!(expr, again, "{input} did not survive a round trip");
            assert_eq!(again.serialize(), expr.serialize());
        }
    }

    #[test]
    fn equality_ignores_zero_modifier() {
        assert_eq!(dice("2d6+0"), dice("2d6"));
        assert_eq!(dice("2d6-"), dice("2d6+0"));
        assert_ne!(dice("2d6+1"), dice("2d6-1"));
        assert_ne!(dice("2d6"), dice("2d8"));
        assert_ne!(dice("2d6"), dice("3d6"));

        let set: HashSet<DiceExpression> = ["2d6", "2d6+0", "2d6+", "1d6"]
            .into_iter()
            .map(dice)
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn std_conversions() {
        let parsed: DiceExpression = "d8+1".parse().unwrap();
        assert_eq!(parsed.to_string(), "1d8+1");
        assert_eq!(DiceExpression::try_from("d8+1"), Ok(parsed));
        assert_eq!(DiceExpression::try_from("d8+1".to_owned()), Ok(parsed));
        assert_eq!(String::from(parsed), "1d8+1");
        assert!("nope".parse::<DiceExpression>().is_err());
    }

    #[test]
    fn operator_symbols() {
        assert_eq!(Operator::try_from('+'), Ok(Operator::Plus));
        assert_eq!(Operator::try_from('-'), Ok(Operator::Minus));
        assert_eq!(Operator::try_from('*'), Err('*'));
        assert_eq!(Operator::Minus.to_string(), "-");
    }

    #[test]
    fn expressions_are_shareable_across_threads() {
        let d = dice("4d6");
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || d.roll_multiple(500)))
            .collect();
        for handle in handles {
            for rolled in handle.join().unwrap() {
                assert!((4..=24).contains(&rolled));
            }
        }
    }
}
