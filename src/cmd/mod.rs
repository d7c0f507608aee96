/*!
Command dispatch layer.

Turns a `Tool` into a command-line surface:

  <program> <command> [positional...] [name=value...]

Layout:
  src/cmd/
    mod.rs       (this file: module declarations + re-exports)
    catalog.rs   (Catalog / Command / ParamKind, built once per process)
    parse.rs     (token splitting + Request)
    coerce.rs    (named override coercion by ParamKind)
    dispatch.rs  (Dispatcher: arity, binding, invocation, output)
    usage.rs     (usage listing + command documentation)
    params.rs    (JSON / YAML parameter files)
    error.rs     (DispatchError)

Conventions:
  - Dispatch failures are `DispatchError`; only `Dispatcher::run` turns them
    into error-stream text and an exit status.
  - Helpers outside the dispatch taxonomy (parameter files) return
    `anyhow::Result`.
*/

pub mod catalog;
pub mod coerce;
pub mod dispatch;
pub mod error;
pub mod params;
pub mod parse;
pub mod usage;

pub use catalog::{Catalog, Command, Handle, OptionalParam, ParamKind, ShellOptions};
pub use coerce::{coerce, coerce_value};
pub use dispatch::{Dispatcher, Exit, Outcome, validate_arity};
pub use error::{DispatchError, DispatchResult};
pub use params::load_param_file;
pub use parse::{NamedOverrides, Request, parse_arguments};
