//! Response envelope and per-command payloads

use crate::config::ClientOptions;
use crate::error::CommandError;
use crate::tree::node::NodeInfo;
use crate::views::RenderedView;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const API_VERSION: &str = "2.0";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Successful handler result
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Map<String, Value>),
    View(RenderedView),
}

impl Reply {
    pub fn empty() -> Self {
        Reply::Json(Map::new())
    }

    /// Serialize a payload struct into a JSON object reply.
    pub fn payload<T: Serialize>(payload: &T) -> Result<Self, CommandError> {
        match serde_json::to_value(payload).map_err(anyhow::Error::from)? {
            Value::Object(map) => Ok(Reply::Json(map)),
            other => Err(CommandError::Unhandled(anyhow::anyhow!(
                "payload serialized to non-object: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpenPayload {
    pub cwd: NodeInfo,
    pub files: Vec<NodeInfo>,
    #[serde(flatten)]
    pub init: Option<InitBlock>,
}

/// Client initialisation data sent with `open` when `init` is present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitBlock {
    pub api: String,
    pub disabled: Vec<String>,
    pub params: ClientParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParams {
    pub dot_files: bool,
    pub upl_max_size: String,
    pub archives: Vec<String>,
    pub extract: Vec<String>,
    pub url: String,
}

impl From<&ClientOptions> for InitBlock {
    fn from(options: &ClientOptions) -> Self {
        Self {
            api: API_VERSION.to_string(),
            disabled: options.disabled.clone(),
            params: ClientParams {
                dot_files: options.dot_files,
                upl_max_size: options.upload_max_size.clone(),
                archives: options.archives.clone(),
                extract: options.extract.clone(),
                url: options.url.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TreePayload {
    pub tree: Vec<NodeInfo>,
}

#[derive(Debug, Serialize)]
pub struct AddedPayload {
    pub added: Vec<NodeInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ListPayload {
    pub list: Vec<String>,
}

/// Response body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    View(RenderedView),
}

/// The single response produced for every request
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Body,
}

impl ConnectorResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::json(json!({ "error": message.into() }))
    }

    pub fn json(value: Value) -> Self {
        Self {
            status: 200,
            content_type: JSON_CONTENT_TYPE.to_string(),
            body: Body::Json(value),
        }
    }

    pub fn view(view: RenderedView) -> Self {
        Self {
            status: 200,
            content_type: view.content_type.clone(),
            body: Body::View(view),
        }
    }

    /// JSON body, if this is a JSON response
    pub fn as_json(&self) -> Option<&Value> {
        match &self.body {
            Body::Json(value) => Some(value),
            Body::View(_) => None,
        }
    }

    /// Error message carried by the envelope
    pub fn error_message(&self) -> Option<&str> {
        self.as_json()
            .and_then(|value| value.get("error"))
            .and_then(Value::as_str)
    }

    /// Serialized body as sent over the wire
    pub fn body_string(&self) -> String {
        match &self.body {
            Body::Json(value) => value.to_string(),
            Body::View(view) => view.body.clone(),
        }
    }
}

impl From<Reply> for ConnectorResponse {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Json(map) => ConnectorResponse::json(Value::Object(map)),
            Reply::View(view) => ConnectorResponse::view(view),
        }
    }
}
