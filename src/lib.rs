//! toshell - expose a tool's commands as a command-line interface.
//!
//! Implement [`Tool`] for a type, then hand it to [`run`]:
//!
//! ```no_run
//! use serde_json::{Value, json};
//! use toshell::{Arguments, CommandSpec, Tool};
//!
//! struct Calc;
//!
//! impl Tool for Calc {
//!     fn commands(&self) -> Vec<CommandSpec> {
//!         vec![CommandSpec::new("add")
//!             .doc("Add two integers.")
//!             .required("a")
//!             .required("b")
//!             .optional("scale", 1)]
//!     }
//!
//!     fn call(&self, _command: &str, args: &Arguments) -> anyhow::Result<Value> {
//!         Ok(json!((args.int("a")? + args.int("b")?) * args.int("scale")?))
//!     }
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     toshell::run(Calc)
//! }
//! ```
//!
//! `calc add 2 3 scale=10` prints `50`.

pub mod cli;
pub mod cmd;
pub mod tool;
pub mod utils;

pub use cli::{run, run_with};
pub use cmd::{Catalog, DispatchError, Dispatcher, Exit, ShellOptions};
pub use tool::{Arguments, CommandSpec, ParamSpec, Tool};
