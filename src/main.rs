use std::process::ExitCode;

use anyhow::{Result, bail};
use serde_json::{Value, json};
use toshell::{Arguments, CommandSpec, Tool};

/// Demo tool exercising every parameter shape.
///
///   toshell method_with_no_args
///   toshell method_with_positional_args one two
///   toshell method_with_keyword_args kw_arg2=other
///   toshell method_with_positional_and_keyword_args a b c
///   toshell sum 2 40 negate=true
///   toshell help sum
struct Utils;

impl Tool for Utils {
    fn commands(&self) -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("method_with_no_args").doc("This method has no args."),
            CommandSpec::new("method_with_positional_args")
                .doc("This method has positional args (pos_arg1, pos_arg2).")
                .required("pos_arg1")
                .required("pos_arg2"),
            CommandSpec::new("method_with_keyword_args")
                .doc("This method has keyword args (kw_arg1, kw_arg2).")
                .optional("kw_arg1", "default1")
                .optional("kw_arg2", "default2"),
            CommandSpec::new("method_with_positional_and_keyword_args")
                .doc(
                    "This method has positional args (pos_arg1, pos_arg2) and keyword args\n\
                     (kw_arg1, kw_arg2).",
                )
                .required("pos_arg1")
                .required("pos_arg2")
                .optional("kw_arg1", "default1")
                .optional("kw_arg2", "default2"),
            CommandSpec::new("sum")
                .doc("Add two integers and return the result as JSON.")
                .required("a")
                .required("b")
                .optional("scale", 1)
                .optional("negate", false),
            CommandSpec::new("_banner"),
        ]
    }

    fn call(&self, command: &str, args: &Arguments) -> Result<Value> {
        match command {
            "method_with_no_args" => {
                println!("method_with_no_args");
            }
            "method_with_positional_args" => {
                println!("method_with_positional_args");
                println!(
                    "   pos_arg1: {}, pos_arg2: {}",
                    args.str("pos_arg1")?,
                    args.str("pos_arg2")?
                );
            }
            "method_with_keyword_args" => {
                println!("method_with_keyword_args");
                println!(
                    "   kw_arg1: {}, kw_arg2: {}",
                    args.str("kw_arg1")?,
                    args.str("kw_arg2")?
                );
            }
            "method_with_positional_and_keyword_args" => {
                println!("method_with_positional_and_keyword_args");
                println!(
                    "   pos_arg1: {}, pos_arg2: {}",
                    args.str("pos_arg1")?,
                    args.str("pos_arg2")?
                );
                println!(
                    "   kw_arg1: {}, kw_arg2: {}",
                    args.str("kw_arg1")?,
                    args.str("kw_arg2")?
                );
            }
            "sum" => {
                let a = args.int("a")?;
                let b = args.int("b")?;
                let scale = args.int("scale")?;
                let total = a
                    .checked_add(b)
                    .and_then(|s| s.checked_mul(scale))
                    .ok_or_else(|| anyhow::anyhow!("integer overflow"))?;
                let total = if args.bool("negate")? {
                    total
                        .checked_neg()
                        .ok_or_else(|| anyhow::anyhow!("integer overflow"))?
                } else {
                    total
                };
                return Ok(json!({ "a": a, "b": b, "sum": total }));
            }
            other => bail!("unsupported command: {other}"),
        }
        Ok(Value::Null)
    }
}

fn main() -> ExitCode {
    toshell::run(Utils)
}
