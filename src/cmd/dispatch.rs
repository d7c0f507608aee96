/*!
`dispatch.rs`

Runs exactly one command per invocation:

  parse -> lookup -> validate arity -> coerce -> invoke (or render help)
        -> print result (one JSON line) when non-empty

Binding rules:
  - required parameters are filled positionally
  - optional parameters are filled positionally (after required ones) or by
    name, never both (DuplicateArgument)
  - named overrides never count toward the positional bound
  - optional parameters left unfilled receive their default
  - parameter-file values fill only what the command line left open

`Dispatcher::run` is the only place that converts a failure into error text
and a failing exit status. Streams are injected so the whole flow runs
against in-memory buffers in tests.
*/

use std::io::Write;

use log::debug;
use serde_json::{Map, Value};

use super::catalog::{Catalog, Command, Handle, ShellOptions};
use super::coerce::coerce;
use super::error::{DispatchError, DispatchResult};
use super::parse::{NamedOverrides, Request, parse_arguments};
use super::usage::{render_doc, render_usage};
use crate::tool::{Arguments, Tool};

const DEFAULT_PROGRAM: &str = "toshell";

/// Final status of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
        }
    }
}

impl From<Exit> for std::process::ExitCode {
    fn from(exit: Exit) -> Self {
        std::process::ExitCode::from(exit.code())
    }
}

/// What a successful dispatch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Command result to serialize.
    Value(Value),
    /// Pre-rendered text (usage / documentation).
    Text(String),
    /// Nothing to print.
    Silent,
}

pub struct Dispatcher<T: Tool> {
    tool: T,
    catalog: Catalog,
    program: String,
}

impl<T: Tool> Dispatcher<T> {
    pub fn new(tool: T) -> Self {
        Self::with_options(tool, ShellOptions::default())
    }

    pub fn with_options(tool: T, options: ShellOptions) -> Self {
        let catalog = Catalog::build(&tool, &options);
        let program = options
            .program
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());
        debug!("dispatcher ready: program={program} commands={}", catalog.len());
        Self {
            tool,
            catalog,
            program,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn parse_arguments<S: AsRef<str>>(tokens: &[S]) -> (Vec<String>, NamedOverrides) {
        parse_arguments(tokens)
    }

    pub fn lookup(&self, name: &str) -> DispatchResult<&Command> {
        self.catalog.lookup(name)
    }

    pub fn usage(&self) -> String {
        render_usage(&self.program, &self.catalog)
    }

    /// Usage when `command` is `None`, otherwise that command's documentation.
    pub fn print_help(&self, command: Option<&str>) -> DispatchResult<String> {
        match command {
            None => Ok(self.usage()),
            Some(name) => self.lookup(name).map(render_doc),
        }
    }

    /// Bind positional values and coerced overrides, then call the handle.
    pub fn invoke(
        &self,
        command: &Command,
        positional: &[String],
        coerced: Map<String, Value>,
    ) -> DispatchResult<Outcome> {
        let args = bind(command, positional, coerced)?;
        debug!(
            "invoke {}: {}",
            command.name(),
            Value::Object(args.as_map().clone())
        );

        match command.handle() {
            Handle::Help => {
                let target = args.opt_str("command").filter(|c| !c.is_empty());
                self.print_help(target.as_deref()).map(Outcome::Text)
            }
            Handle::Tool => {
                let value = self.tool.call(command.name(), &args).map_err(|e| {
                    DispatchError::CommandExecution {
                        command: command.name().to_string(),
                        message: format!("{e:#}"),
                    }
                })?;
                if is_empty(&value) {
                    Ok(Outcome::Silent)
                } else {
                    Ok(Outcome::Value(value))
                }
            }
        }
    }

    /// Everything after lookup: arity, coercion, invocation.
    pub fn dispatch(&self, request: &Request) -> DispatchResult<Outcome> {
        let command = self.lookup(&request.command)?;
        validate_arity(command, &request.positional)?;
        let named = effective_overrides(command, request);
        let coerced = coerce(command, &named)?;
        self.invoke(command, &request.positional, coerced)
    }

    /// Run one command line (`tokens[0]` is the command name).
    pub fn run<S: AsRef<str>>(
        &self,
        tokens: &[S],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Exit {
        self.run_request(Request::parse(tokens), out, err)
    }

    /// Run an already parsed request; `None` means no command was given.
    pub fn run_request(
        &self,
        request: Option<Request>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Exit {
        let Some(request) = request else {
            return emit(out, err, &self.usage());
        };
        debug!(
            "request: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        if !self.catalog.contains(&request.command) {
            let _ = writeln!(err, "{}", DispatchError::UnknownCommand(request.command));
            let _ = write!(out, "{}", self.usage());
            return Exit::Failure;
        }

        match self.dispatch(&request) {
            Ok(Outcome::Silent) => Exit::Success,
            Ok(Outcome::Text(text)) => emit(out, err, &text),
            Ok(Outcome::Value(value)) => match serde_json::to_string(&value) {
                Ok(line) => emit(out, err, &line),
                Err(e) => {
                    let _ = writeln!(err, "failed to serialize result: {e}");
                    Exit::Failure
                }
            },
            Err(e) => {
                let _ = writeln!(err, "{e}");
                Exit::Failure
            }
        }
    }
}

/// Write `text` (newline-terminated) to `out`. A failed write is a failed run.
fn emit(out: &mut dyn Write, err: &mut dyn Write, text: &str) -> Exit {
    let written = if text.ends_with('\n') {
        out.write_all(text.as_bytes())
    } else {
        writeln!(out, "{text}")
    }
    .and_then(|()| out.flush());

    match written {
        Ok(()) => Exit::Success,
        Err(e) => {
            let _ = writeln!(err, "failed to write output: {e}");
            Exit::Failure
        }
    }
}

/// Command-line overrides plus parameter-file values for names the command
/// line did not fill, either by name or positionally.
fn effective_overrides(command: &Command, request: &Request) -> NamedOverrides {
    let mut named = request.named.clone();
    let positional: Vec<&str> = command
        .param_names()
        .take(request.positional.len())
        .collect();
    for (name, value) in &request.fallback {
        if positional.contains(&name.as_str()) || named.contains_key(name) {
            continue;
        }
        named.insert(name.clone(), value.clone());
    }
    named
}

/// Positional count must lie within `[required, required + optional]`.
pub fn validate_arity(command: &Command, positional: &[String]) -> DispatchResult<()> {
    let (min, max) = (command.min_positional(), command.max_positional());
    let given = positional.len();
    if given < min || given > max {
        return Err(DispatchError::Arity {
            command: command.name().to_string(),
            min,
            max,
            given,
        });
    }
    Ok(())
}

fn bind(
    command: &Command,
    positional: &[String],
    coerced: Map<String, Value>,
) -> DispatchResult<Arguments> {
    let mut args = Arguments::new();
    for (name, value) in command.param_names().zip(positional) {
        args.insert(name, Value::String(value.clone()));
    }

    for (name, value) in coerced {
        if args.contains(&name) {
            return Err(DispatchError::DuplicateArgument {
                command: command.name().to_string(),
                param: name,
            });
        }
        args.insert(name, value);
    }

    for param in command.optional() {
        if !args.contains(&param.name) {
            args.insert(param.name.clone(), param.default.clone());
        }
    }
    Ok(args)
}

/// Falsy results produce no output line: `null`, `false`, zero, `""`, `[]`
/// and `{}`.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
