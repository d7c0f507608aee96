/*!
`parse.rs`

Raw token handling for a single invocation.

  <command> [positional...] [name=value...]

Tokens without `=` are positional; tokens with `=` are split at the first
`=` into a named override (later occurrences of a name win). No quoting or
escaping rules apply.

A request may also carry fallback values (from a parameter file). They never
override the command line: a fallback entry is used only for a parameter the
command line left unfilled, by name or by position.
*/

use std::collections::BTreeMap;

use serde::Serialize;

/// Named overrides as raw strings, keyed by parameter name.
pub type NamedOverrides = BTreeMap<String, String>;

/// Split tokens into positional arguments and named overrides.
pub fn parse_arguments<S: AsRef<str>>(tokens: &[S]) -> (Vec<String>, NamedOverrides) {
    let mut positional = Vec::new();
    let mut named = NamedOverrides::new();
    for token in tokens {
        let token = token.as_ref();
        match token.split_once('=') {
            Some((name, value)) => {
                named.insert(name.to_string(), value.to_string());
            }
            None => positional.push(token.to_string()),
        }
    }
    (positional, named)
}

/// Parsed form of one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    pub command: String,
    pub positional: Vec<String>,
    pub named: NamedOverrides,
    /// Lower-priority overrides, applied at dispatch time.
    pub fallback: NamedOverrides,
}

impl Request {
    /// Parse `tokens` where the first token names the command.
    /// Returns `None` when no command was given.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Option<Self> {
        let (command, rest) = tokens.split_first()?;
        let (positional, named) = parse_arguments(rest);
        Some(Self {
            command: command.as_ref().to_string(),
            positional,
            named,
            fallback: NamedOverrides::new(),
        })
    }

    pub fn set_fallback(&mut self, fallback: NamedOverrides) {
        self.fallback = fallback;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_positional_and_named() {
        let (pos, named) = parse_arguments(&["a", "c=7", "b", "d=TRUE"]);
        assert_eq!(pos, ["a", "b"]);
        assert_eq!(named.get("c").map(String::as_str), Some("7"));
        assert_eq!(named.get("d").map(String::as_str), Some("TRUE"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let (pos, named) = parse_arguments(&["expr=a=b", "=lead", "trail="]);
        assert!(pos.is_empty());
        assert_eq!(named["expr"], "a=b");
        assert_eq!(named[""], "lead");
        assert_eq!(named["trail"], "");
    }

    #[test]
    fn later_override_wins() {
        let (_, named) = parse_arguments(&["c=1", "c=2"]);
        assert_eq!(named["c"], "2");
        assert_eq!(named.len(), 1);
    }

    #[test]
    fn request_requires_command() {
        let empty: [&str; 0] = [];
        assert_eq!(Request::parse(&empty), None);

        let req = Request::parse(&["run", "x", "-5", "k=v"]).unwrap();
        assert_eq!(req.command, "run");
        assert_eq!(req.positional, ["x", "-5"]);
        assert_eq!(req.named["k"], "v");
    }

    #[test]
    fn fallback_kept_apart_from_command_line() {
        let mut req = Request::parse(&["run", "c=cli"]).unwrap();
        assert!(req.fallback.is_empty());
        let mut file = NamedOverrides::new();
        file.insert("c".into(), "file".into());
        req.set_fallback(file);
        assert_eq!(req.named["c"], "cli");
        assert_eq!(req.fallback["c"], "file");
    }
}
