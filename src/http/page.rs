//! The page object sent to the client router.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire and template representation of a rendered page.
///
/// `props` always holds the filtered, resolved set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageObject {
    pub component: String,
    pub props: Map<String, Value>,
    pub url: String,
    pub version: String,
    pub host: String,
    pub path: String,
    pub scheme: String,
    pub method: String,
    pub status: u16,
}

impl PageObject {
    /// JSON value of the page, for embedding in view data or parent props.
    pub fn to_value(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(component = %self.component, error = %e, "Failed to serialize page object");
                Value::Null
            }
        }
    }
}
