// Console helpers and JsValue conversions shared by the browser adapters.

use wasm_bindgen::{JsCast, JsValue};

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub fn cerror(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Human readable form of a thrown or rejected JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn js_error(value: JsValue) -> anyhow::Error {
    anyhow::anyhow!(describe_js(&value))
}
