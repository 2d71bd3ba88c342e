use lulc_core::{build_document, LulcDocument, RawRow, Vocabulary};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn vocabulary_from(vocabulary_json: Option<String>) -> Result<Vocabulary, String> {
    match vocabulary_json {
        Some(json) => Vocabulary::from_json(&json).map_err(|e| e.to_string()),
        None => Ok(Vocabulary::default()),
    }
}

/// Rows JSON → document JSON, without the JS boundary types.
fn document_json(rows_json: &str, vocabulary_json: Option<String>) -> Result<String, String> {
    let vocab = vocabulary_from(vocabulary_json)?;
    let rows: Vec<RawRow> =
        serde_json::from_str(rows_json).map_err(|e| format!("Invalid rows: {e}"))?;
    build_document(&rows, &vocab).to_json_pretty().map_err(|e| e.to_string())
}

/// Build the aggregate document from a JSON array of `[label, area]` rows.
/// Header rows need not be stripped: they fail validation and are dropped.
#[wasm_bindgen(js_name = buildDocument)]
pub fn build_document_json(
    rows_json: &str,
    vocabulary_json: Option<String>,
) -> Result<String, JsValue> {
    document_json(rows_json, vocabulary_json).map_err(|e| JsValue::from_str(&e))
}

/// Same as `buildDocument`, taking the rows as a JS array and returning a
/// plain JS object.
#[wasm_bindgen(js_name = buildDocumentFromRows)]
pub fn build_document_from_rows(
    rows: js_sys::Array,
    vocabulary_json: Option<String>,
) -> Result<JsValue, JsValue> {
    let vocab = vocabulary_from(vocabulary_json).map_err(|e| JsValue::from_str(&e))?;
    let rows: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(rows.into())?;
    let rows: Vec<RawRow> = rows.iter().map(RawRow::from_value).collect();
    let doc: LulcDocument = build_document(&rows, &vocab);
    // Plain objects rather than JS `Map`s, matching the published JSON.
    Ok(doc.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}
