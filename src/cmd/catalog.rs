/*!
`catalog.rs`

Signature catalog: the immutable command table derived from a tool once at
startup.

For every public command (name not starting with `_`):
  - parameters without a default -> required, declaration order
  - parameters with a default    -> optional, declaration order, tagged with
                                    the `ParamKind` implied by the default

A synthetic `help` command (no required params, optional `command=null`) is
added unless disabled.
*/

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, warn};
use serde_json::Value;

use super::error::{DispatchError, DispatchResult};
use crate::tool::{CommandSpec, Tool};

pub const HELP_COMMAND: &str = "help";

const HELP_DOC: &str = "Prints the documentation associated with the given command.";

/// Coercion target for a `name=value` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Integer,
    Boolean,
    String,
}

impl ParamKind {
    /// Integer JSON numbers -> Integer, booleans -> Boolean, anything else
    /// (strings, null, floats, containers) -> String.
    pub fn of_default(default: &Value) -> Self {
        match default {
            Value::Bool(_) => ParamKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ParamKind::Integer,
            _ => ParamKind::String,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::String => "string",
        };
        f.write_str(s)
    }
}

/// How a command is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Forwarded to `Tool::call` under the command's name.
    Tool,
    /// The built-in help command.
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionalParam {
    pub name: String,
    pub default: Value,
    pub kind: ParamKind,
}

/// One invocable entry of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    doc: String,
    handle: Handle,
    required: Vec<String>,
    optional: Vec<OptionalParam>,
}

impl Command {
    fn from_spec(spec: CommandSpec) -> Self {
        let mut required: Vec<String> = Vec::new();
        let mut optional: Vec<OptionalParam> = Vec::new();

        for p in spec.params {
            let taken = required.iter().any(|r| *r == p.name)
                || optional.iter().any(|o| o.name == p.name);
            if taken {
                warn!(
                    "command '{}' declares parameter '{}' twice; ignoring the duplicate",
                    spec.name, p.name
                );
                continue;
            }
            match p.default {
                None => required.push(p.name),
                Some(default) => optional.push(OptionalParam {
                    name: p.name,
                    kind: ParamKind::of_default(&default),
                    default,
                }),
            }
        }

        Self {
            name: spec.name,
            doc: spec.doc,
            handle: Handle::Tool,
            required,
            optional,
        }
    }

    fn help() -> Self {
        Self {
            name: HELP_COMMAND.to_string(),
            doc: HELP_DOC.to_string(),
            handle: Handle::Help,
            required: Vec::new(),
            optional: vec![OptionalParam {
                name: "command".to_string(),
                default: Value::Null,
                kind: ParamKind::String,
            }],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn optional(&self) -> &[OptionalParam] {
        &self.optional
    }

    pub fn optional_param(&self, name: &str) -> Option<&OptionalParam> {
        self.optional.iter().find(|o| o.name == name)
    }

    /// Full positional order: required names, then optional names.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .map(String::as_str)
            .chain(self.optional.iter().map(|o| o.name.as_str()))
    }

    pub fn min_positional(&self) -> usize {
        self.required.len()
    }

    pub fn max_positional(&self) -> usize {
        self.required.len() + self.optional.len()
    }
}

/// Options controlling catalog construction and rendering.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Register the built-in `help` command.
    pub help: bool,
    /// Program name shown in usage. Defaults to the process's argv[0].
    pub program: Option<String>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            help: true,
            program: None,
        }
    }
}

impl ShellOptions {
    /// Defaults without the built-in `help` command.
    pub fn without_help() -> Self {
        Self {
            help: false,
            ..Self::default()
        }
    }
}

/// Immutable name -> command table (iteration is sorted by name).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    commands: BTreeMap<String, Command>,
}

impl Catalog {
    pub fn build<T: Tool + ?Sized>(tool: &T, options: &ShellOptions) -> Self {
        let include_help = options.help;
        let mut commands = BTreeMap::new();

        for spec in tool.commands() {
            if spec.is_private() {
                debug!("catalog: skipping private command '{}'", spec.name);
                continue;
            }
            if include_help && spec.name == HELP_COMMAND {
                debug!("catalog: tool command 'help' shadowed by built-in help");
                continue;
            }
            let command = Command::from_spec(spec);
            debug!(
                "catalog: {} required={:?} optional={:?}",
                command.name,
                command.required,
                command.optional.iter().map(|o| &o.name).collect::<Vec<_>>()
            );
            commands.insert(command.name.clone(), command);
        }

        if include_help {
            commands.insert(HELP_COMMAND.to_string(), Command::help());
        }

        Self { commands }
    }

    pub fn lookup(&self, name: &str) -> DispatchResult<&Command> {
        self.commands
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}
