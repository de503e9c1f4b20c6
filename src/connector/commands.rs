//! Command registry
//!
//! Each command has a parameter contract and a handler. Contracts are checked by
//! the dispatcher before the handler runs, so handlers read required
//! parameters without re-checking them.

use super::request::{Param, Request};
use super::response::{AddedPayload, InitBlock, ListPayload, OpenPayload, Reply, TreePayload};
use crate::config::ClientOptions;
use crate::error::{CommandError, VolumeError};
use crate::tree::flatten::TreeScope;
use crate::tree::hash::ObjectKind;
use crate::views::FileView;
use crate::volume::Volume;
use std::fmt;

/// Everything a handler may touch for one request
pub struct CommandContext<'a> {
    pub volume: &'a dyn Volume,
    pub request: &'a Request,
    pub options: &'a ClientOptions,
    pub file_view: &'a dyn FileView,
}

impl CommandContext<'_> {
    /// Value of a parameter the contract marks as required
    fn required(&self, param: Param) -> Result<&str, CommandError> {
        self.request
            .get(param)
            .ok_or(CommandError::InvalidArguments)
    }
}

pub type Handler = fn(&CommandContext<'_>) -> Result<Reply, CommandError>;

/// Which parameters must be present and which must be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub required: &'static [Param],
    pub forbidden: &'static [Param],
}

impl Contract {
    pub const fn requires(required: &'static [Param]) -> Self {
        Self {
            required,
            forbidden: &[],
        }
    }

    pub fn is_satisfied_by(&self, request: &Request) -> bool {
        self.required.iter().all(|param| request.has(*param))
            && !self.forbidden.iter().any(|param| request.has(*param))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Open,
    Tree,
    Parents,
    File,
    Mkdir,
    Mkfile,
    Rename,
    Ls,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Open,
        Command::Tree,
        Command::Parents,
        Command::File,
        Command::Mkdir,
        Command::Mkfile,
        Command::Rename,
        Command::Ls,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Open => "open",
            Command::Tree => "tree",
            Command::Parents => "parents",
            Command::File => "file",
            Command::Mkdir => "mkdir",
            Command::Mkfile => "mkfile",
            Command::Rename => "rename",
            Command::Ls => "ls",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn contract(self) -> Contract {
        const TARGET: &[Param] = &[Param::Target];
        const TARGET_AND_NAME: &[Param] = &[Param::Target, Param::Name];
        match self {
            Command::Open | Command::Tree | Command::Parents | Command::File | Command::Ls => {
                Contract::requires(TARGET)
            }
            Command::Mkdir | Command::Mkfile | Command::Rename => {
                Contract::requires(TARGET_AND_NAME)
            }
        }
    }

    pub fn handler(self) -> Handler {
        match self {
            Command::Open => open,
            Command::Tree => tree,
            Command::Parents => parents,
            Command::File => file,
            Command::Mkdir => mkdir,
            Command::Mkfile => mkfile,
            Command::Rename => rename,
            Command::Ls => ls,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `cwd` plus children, or the full neighbourhood when `tree=1`.
fn open(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let node = ctx.volume.resolve(ctx.required(Param::Target)?)?;
    let scope = if ctx.request.get(Param::Tree) == Some("1") {
        TreeScope::FULL
    } else {
        TreeScope::CHILDREN
    };

    Reply::payload(&OpenPayload {
        cwd: ctx.volume.describe(&node)?,
        files: ctx.volume.flatten(&node, scope)?,
        init: ctx
            .request
            .has(Param::Init)
            .then(|| InitBlock::from(ctx.options)),
    })
}

fn tree(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let node = ctx.volume.resolve(ctx.required(Param::Target)?)?;
    Reply::payload(&TreePayload {
        tree: ctx.volume.flatten(&node, TreeScope::CHILDREN)?,
    })
}

fn parents(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let node = ctx.volume.resolve(ctx.required(Param::Target)?)?;
    Reply::payload(&TreePayload {
        tree: ctx.volume.flatten(&node, TreeScope::PARENTS)?,
    })
}

/// Render a file through the file view; directories are a no-op.
fn file(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let file = match ctx.volume.read(ctx.required(Param::Target)?) {
        Ok(Some(file)) => file,
        Ok(None) => return Ok(Reply::empty()),
        Err(VolumeError::ObjectNotFound(_)) => return Err(CommandError::CouldNotOpenTarget),
        Err(e) => return Err(e.into()),
    };
    let view = ctx.file_view.render(ctx.request, &file, ctx.volume)?;
    Ok(Reply::View(view))
}

fn create(ctx: &CommandContext<'_>, kind: ObjectKind) -> Result<Reply, CommandError> {
    let parent = ctx.required(Param::Target)?;
    let name = ctx.request.name().ok_or(CommandError::InvalidArguments)?;
    let added = ctx.volume.create(kind, &name, parent)?;
    Reply::payload(&AddedPayload {
        added: vec![added],
        removed: Vec::new(),
    })
}

fn mkdir(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    create(ctx, ObjectKind::Directory)
}

fn mkfile(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    create(ctx, ObjectKind::File)
}

fn rename(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let target = ctx.required(Param::Target)?;
    let name = ctx.request.name().ok_or(CommandError::InvalidArguments)?;
    let renamed = ctx.volume.rename(target, &name)?;
    Reply::payload(&AddedPayload {
        added: vec![renamed],
        removed: vec![target.to_string()],
    })
}

fn ls(ctx: &CommandContext<'_>) -> Result<Reply, CommandError> {
    let list = ctx.volume.list(ctx.required(Param::Target)?)?;
    Reply::payload(&ListPayload { list })
}
