/*!
coerce.rs - named override coercion.

Each optional parameter carries a `ParamKind` fixed at catalog build time;
a raw `name=value` string is converted according to that tag:

  integer -> i64 literal          (else TypeMismatch)
  boolean -> "true" | "false"     (case-insensitive, else TypeMismatch)
  string  -> unchanged

Names that are not optional parameters of the command pass through as plain
strings.
*/

use serde_json::{Map, Value};

use super::catalog::{Command, ParamKind};
use super::error::{DispatchError, DispatchResult};
use super::parse::NamedOverrides;

/// Convert one raw value to the JSON value implied by `kind`.
pub fn coerce_value(param: &str, raw: &str, kind: ParamKind) -> DispatchResult<Value> {
    let mismatch = || DispatchError::TypeMismatch {
        param: param.to_string(),
        kind,
        value: raw.to_string(),
    };
    match kind {
        ParamKind::Integer => raw
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| mismatch()),
        ParamKind::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(mismatch())
            }
        }
        ParamKind::String => Ok(Value::String(raw.to_string())),
    }
}

/// Coerce every override against `command`'s optional parameters.
pub fn coerce(command: &Command, named: &NamedOverrides) -> DispatchResult<Map<String, Value>> {
    let mut out = Map::new();
    for (name, raw) in named {
        let value = match command.optional_param(name) {
            Some(param) => coerce_value(name, raw, param.kind)?,
            None => Value::String(raw.clone()),
        };
        out.insert(name.clone(), value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::catalog::{Catalog, ShellOptions};
    use crate::tool::{Arguments, CommandSpec, Tool};
    use serde_json::json;

    struct One;

    impl Tool for One {
        fn commands(&self) -> Vec<CommandSpec> {
            vec![
                CommandSpec::new("run")
                    .required("a")
                    .required("b")
                    .optional("c", 1)
                    .optional("d", true)
                    .optional("e", "text"),
            ]
        }

        fn call(&self, _command: &str, _args: &Arguments) -> anyhow::Result<Value> {
            Ok(Value::Null)
        }
    }

    fn overrides(pairs: &[(&str, &str)]) -> NamedOverrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn coerce_integer() {
        assert_eq!(coerce_value("c", "7", ParamKind::Integer), Ok(json!(7)));
        assert_eq!(coerce_value("c", "-12", ParamKind::Integer), Ok(json!(-12)));
        assert!(matches!(
            coerce_value("c", "foo", ParamKind::Integer),
            Err(DispatchError::TypeMismatch { .. })
        ));
        assert!(coerce_value("c", "1.5", ParamKind::Integer).is_err());
    }

    #[test]
    fn coerce_boolean() {
        assert_eq!(coerce_value("d", "TRUE", ParamKind::Boolean), Ok(json!(true)));
        assert_eq!(coerce_value("d", "False", ParamKind::Boolean), Ok(json!(false)));
        assert!(matches!(
            coerce_value("d", "maybe", ParamKind::Boolean),
            Err(DispatchError::TypeMismatch { .. })
        ));
        assert!(coerce_value("d", "yes", ParamKind::Boolean).is_err());
    }

    #[test]
    fn coerce_string_untouched() {
        assert_eq!(coerce_value("e", " 42 ", ParamKind::String), Ok(json!(" 42 ")));
    }

    #[test]
    fn coerce_against_command() {
        let catalog = Catalog::build(&One, &ShellOptions::default());
        let cmd = catalog.lookup("run").unwrap();
        let out = coerce(cmd, &overrides(&[("c", "7"), ("d", "TRUE"), ("zzz", "5")])).unwrap();
        assert_eq!(out["c"], json!(7));
        assert_eq!(out["d"], json!(true));
        assert_eq!(out["zzz"], json!("5"), "unknown names pass through as strings");
    }

    #[test]
    fn coerce_reports_first_failure() {
        let catalog = Catalog::build(&One, &ShellOptions::default());
        let cmd = catalog.lookup("run").unwrap();
        let err = coerce(cmd, &overrides(&[("d", "maybe")])).unwrap_err();
        assert_eq!(
            err,
            DispatchError::TypeMismatch {
                param: "d".into(),
                kind: ParamKind::Boolean,
                value: "maybe".into(),
            }
        );
    }
}
