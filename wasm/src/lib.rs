//! Health Calculators WASM Module
//!
//! Browser bindings so calculator pages can evaluate formulas client-side
//! with exactly the numbers the API returns.

use health_calculators_shared::{
    calculate_body_surface_area, calculate_carb_intake, calculate_fat_intake, catalog,
    errors::CatalogError, InvalidInputError,
};
use wasm_bindgen::prelude::*;

fn invalid_input_message(err: InvalidInputError) -> String {
    err.user_message()
}

fn evaluate_json(slug: &str, input_json: &str) -> Result<String, String> {
    let input = serde_json::from_str(input_json).map_err(|e| format!("Malformed input: {e}"))?;
    let output = catalog::evaluate(slug, input).map_err(|err| match err {
        CatalogError::InvalidInput(e) => invalid_input_message(e),
        other => other.to_string(),
    })?;
    Ok(output.to_string())
}

fn catalog_json() -> Result<String, String> {
    serde_json::to_string(catalog::CALCULATORS).map_err(|e| e.to_string())
}

/// Run any calculator by slug on a JSON input, returning the JSON result
#[wasm_bindgen]
pub fn evaluate(slug: &str, input_json: &str) -> Result<String, JsError> {
    evaluate_json(slug, input_json).map_err(|msg| JsError::new(&msg))
}

/// JSON list of every calculator
#[wasm_bindgen(js_name = calculatorCatalog)]
pub fn calculator_catalog() -> Result<String, JsError> {
    catalog_json().map_err(|msg| JsError::new(&msg))
}

/// Mosteller body surface area in m², two decimals
#[wasm_bindgen]
pub fn body_surface_area(height_cm: f64, weight_kg: f64) -> Result<f64, JsError> {
    calculate_body_surface_area(height_cm, weight_kg)
        .map_err(|e| JsError::new(&invalid_input_message(e)))
}

/// Grams of carbohydrate for `percent` of `total_calories`
#[wasm_bindgen]
pub fn carb_intake_grams(total_calories: f64, percent: f64) -> Result<u32, JsError> {
    calculate_carb_intake(total_calories, percent)
        .map(|r| r.grams)
        .map_err(|e| JsError::new(&invalid_input_message(e)))
}

/// Grams of fat for `percent` of `total_calories`
#[wasm_bindgen]
pub fn fat_intake_grams(total_calories: f64, percent: f64) -> Result<u32, JsError> {
    calculate_fat_intake(total_calories, percent)
        .map(|r| r.grams)
        .map_err(|e| JsError::new(&invalid_input_message(e)))
}
