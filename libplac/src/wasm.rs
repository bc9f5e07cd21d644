use wasm_bindgen::prelude::*;

/// turn an error into js
fn to_js_err(e: crate::PlacError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// encode wav bytes to plac
#[wasm_bindgen]
pub fn encode_wav(wav_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    crate::encode(wav_bytes).map_err(to_js_err)
}

/// decode plac bytes to wav
#[wasm_bindgen]
pub fn decode_plac(plac_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    crate::decode(plac_bytes).map_err(to_js_err)
}

/// header info as a plain js object
#[wasm_bindgen]
pub fn plac_info(plac_bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = crate::info(plac_bytes).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}
