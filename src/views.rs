//! File Views
//!
//! The `file` command hands a resolved file to a `FileView`, which renders it for
//! the browser. Hosts plug in their own view (templating, downloads); the
//! default renders the file as plain text.

use crate::connector::Request;
use crate::store::NodeRecord;
use crate::volume::Volume;
use serde::{Deserialize, Serialize};

/// Output of a file view, passed through to the client untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedView {
    pub content_type: String,
    pub body: String,
}

/// Render-file collaborator
pub trait FileView: Send + Sync {
    fn render(
        &self,
        request: &Request,
        file: &NodeRecord,
        volume: &dyn Volume,
    ) -> anyhow::Result<RenderedView>;
}

/// Default view: collection and file name header followed by the content
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextView;

impl FileView for PlainTextView {
    fn render(
        &self,
        _request: &Request,
        file: &NodeRecord,
        volume: &dyn Volume,
    ) -> anyhow::Result<RenderedView> {
        let content = file
            .content()
            .ok_or_else(|| anyhow::anyhow!("{} is not a file", file.name))?;
        Ok(RenderedView {
            content_type: "text/plain; charset=utf-8".to_string(),
            body: format!("{} / {}\n\n{}", volume.name(), file.name, content),
        })
    }
}
