//! YAML reading and emitting helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Serializes a value to YAML, emitting multi-line strings as block scalars.
///
/// Check error texts are often several lines long; the plain `serde_yaml`
/// emitter would fold them into escaped single-line strings.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize to YAML value")?;
    let doc = to_emitter_yaml(&value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter.dump(&doc).context("Failed to emit YAML")?;
    output.push('\n');

    Ok(output)
}

fn to_emitter_yaml(value: &serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(*b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Yaml::Integer(i),
            None => Yaml::Real(n.to_string()),
        },
        serde_yaml::Value::String(s) => Yaml::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => Yaml::Array(seq.iter().map(to_emitter_yaml).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut hash = yaml_rust_davvid::yaml::Hash::new();
            for (k, v) in map {
                hash.insert(to_emitter_yaml(k), to_emitter_yaml(v));
            }
            Yaml::Hash(hash)
        }
        serde_yaml::Value::Tagged(tagged) => to_emitter_yaml(&tagged.value),
    }
}

/// Deserializes a YAML string.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    serde_yaml::from_str(yaml).context("Failed to deserialize YAML")
}

/// Reads and parses a YAML file.
pub fn read_yaml_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    from_yaml(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
}
