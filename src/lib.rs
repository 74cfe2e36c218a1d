//! Parse, roll and serialize compact dice notation.
//!
//! A notation like `3d8+2` reads "roll three eight-sided dice, sum them up and add 2".
//! The multiplier may be left out (`d20`), the modifier is optional and may subtract (`1d4-1`),
//! but a roll never goes below 0.
//!
//! ```
//! use dice_notation::DiceExpression;
//!
//! let dice: DiceExpression = "2d4+3".parse().unwrap();
//! assert!((5..=11).contains(&dice.roll()));
//! assert_eq!(dice.to_string(), "2d4+3");
//! ```
//!
//! # Features
//! - `nowasm` (default): rolls use the per-thread generator of [`rand`]
//! - `serde`: [`DiceExpression`] (de)serializes as its notation string
//! - `wasm`: rolls use `Math.random()`, exports `DiceExpression` to JavaScript
//! - `console_error_panic_hook`: forwards panics to the browser console under `wasm`

mod dice;
mod dice_string_parser;
#[cfg(feature = "serde")]
mod serde_support;
#[cfg(feature = "wasm")]
mod wasm_bindings;
mod wasm_safe;

pub use dice::{DiceExpression, Operator, Value};
pub use dice_string_parser::{ParseError, DEFAULT_MULTIPLIER};
#[cfg(feature = "wasm")]
pub use wasm_bindings::WasmDiceExpression;
