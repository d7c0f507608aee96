/*!
Parameter files.

A JSON or YAML object whose entries act as fallback `name=value` overrides.
They only fill parameters the command line leaves open (see
`Request::fallback`). Non-string values are stringified so they go through
the same coercion as command-line text.
*/

use std::path::Path;

use anyhow::{Context, Result, bail};
use log::debug;
use serde_json::Value;

use super::parse::NamedOverrides;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                FileFormat::Yaml
            }
            _ => FileFormat::Json,
        }
    }

    fn parse(self, raw: &str) -> Result<Value> {
        match self {
            FileFormat::Json => serde_json::from_str(raw).context("invalid JSON param file"),
            FileFormat::Yaml => serde_yaml::from_str(raw).context("invalid YAML param file"),
        }
    }
}

/// Read a parameter file into fallback overrides. `null` entries are left
/// out so the parameter keeps its declared default.
pub fn load_param_file(path: &Path) -> Result<NamedOverrides> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read param file: {}", path.display()))?;
    let Value::Object(entries) = FileFormat::of(path).parse(&raw)? else {
        bail!("param file root must be an object: {}", path.display());
    };

    let params: NamedOverrides = entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect();
    debug!("loaded {} parameter(s) from {}", params.len(), path.display());
    Ok(params)
}
