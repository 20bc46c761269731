use wasm_bindgen::{JsCast, JsValue};

/// Errors raised by the browser layer
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("JS error: {0}")]
    Js(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Server error: {0}")]
    Server(String),
    #[error("No global `window` exists")]
    MissingWindow,
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(msg)
    }
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        Self::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UiError>;
