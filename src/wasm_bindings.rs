use wasm_bindgen::prelude::*;

use crate::{DiceExpression, Value};

/// [`DiceExpression`] as seen from JavaScript
#[wasm_bindgen(js_name = DiceExpression)]
pub struct WasmDiceExpression {
    inner: DiceExpression,
}

#[wasm_bindgen(js_class = DiceExpression)]
impl WasmDiceExpression {
    /// throws with the parse error message if `notation` is not valid dice notation
    #[wasm_bindgen(constructor)]
    pub fn new(notation: &str) -> Result<WasmDiceExpression, JsError> {
        set_panic_hook();
        let inner = DiceExpression::parse(notation)?;
        Ok(WasmDiceExpression { inner })
    }

    pub fn roll(&self) -> Value {
        self.inner.roll()
    }

    pub fn serialize(&self) -> String {
        self.inner.serialize()
    }

    #[wasm_bindgen(js_name = minRoll)]
    pub fn min_roll(&self) -> Value {
        self.inner.min_roll()
    }

    #[wasm_bindgen(js_name = maxRoll)]
    pub fn max_roll(&self) -> Value {
        self.inner.max_roll()
    }
}

fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
