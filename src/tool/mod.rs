/*!
Tool capability.

A *tool* is any type that can describe its commands and run one of them by
name. It replaces runtime reflection: instead of inspecting method
signatures, the catalog reads the `CommandSpec` list a tool declares.

Key items:
  - Tool          (the trait implemented by user types)
  - CommandSpec   (name + doc + ordered parameter list)
  - ParamSpec     (parameter name + optional default)
  - Arguments     (bound values handed to `Tool::call`)
*/

use anyhow::{Result, anyhow, bail};
use serde_json::{Map, Value};

/// A collection of named operations that can be exposed as commands.
pub trait Tool {
    /// Every command the tool declares, in declaration order.
    ///
    /// Names starting with `_` are treated as private and never exposed.
    fn commands(&self) -> Vec<CommandSpec>;

    /// Run `command` with fully bound arguments.
    ///
    /// Returning `Value::Null` (or an empty string/array/object) means the
    /// command has no output.
    fn call(&self, command: &str, args: &Arguments) -> Result<Value>;
}

/// Declared signature of one command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: String,
    pub doc: String,
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            params: Vec::new(),
        }
    }

    /// Attach documentation text (printed by `help <command>`).
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Append a parameter without a default.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Append a parameter with a default. The default's JSON type decides
    /// how `name=value` overrides are coerced.
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub default: Option<Value>,
}

/* ---- Bound Arguments ---- */

/// Argument values bound to parameter names for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// String form of an argument. Non-string values are rendered as JSON.
    pub fn str(&self, name: &str) -> Result<String> {
        match self.require(name)? {
            Value::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }

    /// Like `str`, but `null` and missing arguments yield `None`.
    pub fn opt_str(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Integer argument. Accepts JSON integers and integer literals in strings
    /// (positionally supplied values are never coerced).
    pub fn int(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| anyhow!("argument '{name}' is not an integer: {n}")),
            Value::String(s) => s
                .parse::<i64>()
                .map_err(|_| anyhow!("argument '{name}' is not an integer: {s}")),
            other => bail!("argument '{name}' is not an integer: {other}"),
        }
    }

    /// Boolean argument. Accepts JSON booleans and `true`/`false` strings
    /// (case-insensitive).
    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.require(name)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => bail!("argument '{name}' is not a boolean: {other}"),
        }
    }

    fn require(&self, name: &str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| anyhow!("missing argument: {name}"))
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_builder_keeps_declaration_order() {
        let spec = CommandSpec::new("copy")
            .doc("Copy things.")
            .required("src")
            .required("dst")
            .optional("count", 1)
            .optional("force", false);
        let names: Vec<&str> = spec.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["src", "dst", "count", "force"]);
        assert_eq!(spec.params[2].default, Some(json!(1)));
        assert_eq!(spec.params[0].default, None);
        assert_eq!(spec.doc, "Copy things.");
    }

    #[test]
    fn private_marker() {
        assert!(CommandSpec::new("_hidden").is_private());
        assert!(!CommandSpec::new("visible_").is_private());
    }

    #[test]
    fn accessors_accept_typed_and_string_values() {
        let args: Arguments = [
            ("n".to_string(), json!(7)),
            ("s".to_string(), json!("12")),
            ("b".to_string(), json!("TRUE")),
            ("f".to_string(), json!(false)),
            ("none".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(args.int("n").unwrap(), 7);
        assert_eq!(args.int("s").unwrap(), 12);
        assert!(args.bool("b").unwrap());
        assert!(!args.bool("f").unwrap());
        assert_eq!(args.str("n").unwrap(), "7");
        assert_eq!(args.opt_str("none"), None);
        assert_eq!(args.opt_str("absent"), None);
        assert_eq!(args.opt_str("s").as_deref(), Some("12"));
    }

    #[test]
    fn accessor_errors_name_the_argument() {
        let mut args = Arguments::new();
        args.insert("x", json!("abc"));
        let err = args.int("x").unwrap_err();
        assert!(err.to_string().contains("'x'"));
        let err = args.str("missing").unwrap_err();
        assert!(err.to_string().contains("missing argument: missing"));
    }
}
