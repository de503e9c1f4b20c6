//! Command connector
//!
//! Entry point for client requests. A request is validated against the
//! command's parameter contract, dispatched to its handler, and always answered
//! with exactly one response. Handler failures, including panics, never escape
//! `Connector::run`.

pub mod commands;
pub mod request;
pub mod response;

pub use commands::{Command, CommandContext, Contract};
pub use request::{Param, Request};
pub use response::{Body, ConnectorResponse, Reply};

use crate::config::ClientOptions;
use crate::error::CommandError;
use crate::views::{FileView, PlainTextView};
use crate::volume::Volume;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

static PLAIN_TEXT_VIEW: PlainTextView = PlainTextView;

/// Dispatcher bound to one volume for the lifetime of a request
pub struct Connector<'a> {
    volume: &'a dyn Volume,
    options: &'a ClientOptions,
    file_view: &'a dyn FileView,
}

impl<'a> Connector<'a> {
    pub fn new(volume: &'a dyn Volume, options: &'a ClientOptions) -> Self {
        Self {
            volume,
            options,
            file_view: &PLAIN_TEXT_VIEW,
        }
    }

    /// Replace the view used by the `file` command
    pub fn with_file_view(mut self, file_view: &'a dyn FileView) -> Self {
        self.file_view = file_view;
        self
    }

    /// Run one request to completion.
    pub fn run(&self, request: &Request) -> ConnectorResponse {
        match self.dispatch(request) {
            Ok(reply) => reply.into(),
            Err(e) => {
                match &e {
                    CommandError::MissingCommand
                    | CommandError::UnknownCommand(_)
                    | CommandError::InvalidArguments => {
                        warn!(command = ?request.command(), "Rejected request: {}", e)
                    }
                    CommandError::Volume(inner) => {
                        warn!(command = ?request.command(), error = ?inner, "Command failed")
                    }
                    _ => error!(command = ?request.command(), error = ?e, "Command failed"),
                }
                ConnectorResponse::error(e.to_string())
            }
        }
    }

    fn dispatch(&self, request: &Request) -> Result<Reply, CommandError> {
        let name = request.command().ok_or(CommandError::MissingCommand)?;
        let command =
            Command::from_name(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        if !command.contract().is_satisfied_by(request) {
            return Err(CommandError::InvalidArguments);
        }

        debug!(%command, volume = %self.volume.volume_id(), "Dispatching command");

        let context = CommandContext {
            volume: self.volume,
            request,
            options: self.options,
            file_view: self.file_view,
        };
        let handler = command.handler();
        panic::catch_unwind(AssertUnwindSafe(|| handler(&context))).unwrap_or_else(|payload| {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            error!(%command, detail, "Command handler panicked");
            Err(CommandError::Unhandled(anyhow::anyhow!("Command failed")))
        })
    }
}
