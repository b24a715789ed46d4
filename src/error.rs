use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring behaviors onto the page.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("no global window available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("required element not found: {0}")]
    MissingElement(String),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
