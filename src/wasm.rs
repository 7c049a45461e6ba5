//! Browser bindings.
//!
//! The request object mirrors [`ConfiguredRequest`]:
//!
//! ```text
//! { cells: [[0, "m * 2"], ["sqrt(2)", 0]], labels: ["A", "B"], variable: 3, config: {...} }
//! ```
//!
//! On failure the promise-less call throws `{ kind, location, message }`.

use wasm_bindgen::prelude::*;

use crate::expr::parse_variable_input;
use crate::solver::ConfiguredRequest;

/// Solves a tour request and returns the serialized [`Solution`](crate::Solution).
#[wasm_bindgen(js_name = solveRoute)]
pub fn solve_route(request: JsValue) -> Result<JsValue, JsValue> {
    let request: ConfiguredRequest = serde_wasm_bindgen::from_value(request)?;
    match request.solve() {
        Ok(solution) => Ok(serde_wasm_bindgen::to_value(&solution)?),
        Err(err) => {
            let report = err.report();
            Err(serde_wasm_bindgen::to_value(&report)
                .unwrap_or_else(|_| JsValue::from_str(&report.message)))
        }
    }
}

/// Converts the variable input box text into a value (blank or invalid → 0).
#[wasm_bindgen(js_name = parseVariable)]
pub fn parse_variable(text: &str) -> f64 {
    parse_variable_input(text)
}
