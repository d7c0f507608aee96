/*!
usage.rs

Plain-text rendering for the usage listing and per-command documentation.

Layout:

  Usage: <program> command [args...]

  Available commands and parameters:
    <name>  <required...> [<optional>=<default>]...

Names are padded to the widest command name so parameter columns line up.
Output carries no ANSI styling; it is written straight to stdout.
*/

use serde_json::Value;

use super::catalog::{Catalog, Command, OptionalParam};

pub fn render_usage(program: &str, catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("Usage: {program} command [args...]\n"));
    out.push('\n');
    out.push_str("Available commands and parameters:\n");

    let width = catalog.iter().map(|c| c.name().len()).max().unwrap_or(0);
    for command in catalog.iter() {
        let params = render_params(command);
        let line = if params.is_empty() {
            format!("  {}", command.name())
        } else {
            format!("  {}  {params}", pad(command.name(), width))
        };
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
    out
}

fn render_params(command: &Command) -> String {
    command
        .required()
        .iter()
        .cloned()
        .chain(command.optional().iter().map(render_optional))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_optional(param: &OptionalParam) -> String {
    match &param.default {
        Value::Null => format!("[{}]", param.name),
        Value::String(s) => format!("[{}={s}]", param.name),
        other => format!("[{}={other}]", param.name),
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - len))
}

/// Documentation text for `help <command>`: surrounding blank lines trimmed
/// and common indentation removed.
pub fn render_doc(command: &Command) -> String {
    let doc = clean_doc(command.doc());
    if doc.is_empty() {
        format!("{}: no documentation available", command.name())
    } else {
        doc
    }
}

pub fn clean_doc(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };
    let body = &lines[start..=end];

    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l[indent..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading ASCII spaces/tabs; each is one byte, so the count is a valid
/// slice boundary.
fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
