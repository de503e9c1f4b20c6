//! Connector requests
//!
//! A request is the bag of client parameters the connector understands. Anything
//! outside the allowed set is dropped on construction.

use std::collections::BTreeMap;
use tracing::trace;

/// Parameters the connector accepts, besides the command name itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    Target,
    Targets,
    Current,
    Tree,
    Name,
    Content,
    Src,
    Dst,
    Cut,
    Init,
    Type,
    Width,
    Height,
    Upload,
}

impl Param {
    pub const ALL: [Param; 14] = [
        Param::Target,
        Param::Targets,
        Param::Current,
        Param::Tree,
        Param::Name,
        Param::Content,
        Param::Src,
        Param::Dst,
        Param::Cut,
        Param::Init,
        Param::Type,
        Param::Width,
        Param::Height,
        Param::Upload,
    ];

    /// Key as sent by the client
    pub fn key(self) -> &'static str {
        match self {
            Param::Target => "target",
            Param::Targets => "targets[]",
            Param::Current => "current",
            Param::Tree => "tree",
            Param::Name => "name",
            Param::Content => "content",
            Param::Src => "src",
            Param::Dst => "dst",
            Param::Cut => "cut",
            Param::Init => "init",
            Param::Type => "type",
            Param::Width => "width",
            Param::Height => "height",
            Param::Upload => "upload[]",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }

    /// List parameters collect every value; the rest keep the last one
    pub fn is_list(self) -> bool {
        matches!(self, Param::Targets | Param::Upload)
    }
}

pub const COMMAND_KEY: &str = "cmd";

/// One client request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    command: Option<String>,
    params: BTreeMap<Param, Vec<String>>,
}

impl Request {
    /// Request for `command` with no parameters
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            params: BTreeMap::new(),
        }
    }

    /// Build from raw key/value pairs, e.g. a decoded query string.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Request::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            if key == COMMAND_KEY {
                request.command = Some(value.into());
                continue;
            }
            match Param::from_key(key) {
                Some(param) => request.insert(param, value.into()),
                None => trace!(key, "Dropping unsupported request parameter"),
            }
        }
        request
    }

    /// Builder form of [`Request::insert`]
    pub fn with(mut self, param: Param, value: impl Into<String>) -> Self {
        self.insert(param, value.into());
        self
    }

    pub fn insert(&mut self, param: Param, value: String) {
        let values = self.params.entry(param).or_default();
        if !param.is_list() {
            values.clear();
        }
        values.push(value);
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn has(&self, param: Param) -> bool {
        self.params.contains_key(&param)
    }

    /// Value of a single-valued parameter
    pub fn get(&self, param: Param) -> Option<&str> {
        self.params
            .get(&param)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn get_all(&self, param: Param) -> &[String] {
        self.params.get(&param).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Client names arrive with `+` standing for a space
    pub fn name(&self) -> Option<String> {
        self.get(Param::Name).map(|name| name.replace('+', " "))
    }
}
