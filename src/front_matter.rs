//! YAML front-matter splitting.
//!
//! A document may open with a metadata block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Rain teams
//! date: 2024-03-01
//! format: VGC 2024 Reg F
//! ---
//! Body text starts here.
//! ```
//!
//! The block is parsed as YAML into a [`Metadata`] mapping. Documents that do
//! not start with `---` have no metadata and their whole text is the body.
//! An opening fence without a closing one turns the rest of the file into
//! metadata, leaving the body empty.

use crate::types::Metadata;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Split `content` into its metadata mapping and the remaining body.
pub fn parse(content: &str) -> Result<(Metadata, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((Metadata::new(), content));
    };
    if first.trim_end() != FENCE {
        return Ok((Metadata::new(), content));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FENCE {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok((parse_yaml(yaml)?, body));
        }
        offset += line.len();
    }

    Ok((parse_yaml(&content[yaml_start..])?, ""))
}

fn parse_yaml(yaml: &str) -> Result<Metadata, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }
    match serde_yaml::from_str::<YamlValue>(yaml)? {
        YamlValue::Null => Ok(Metadata::new()),
        YamlValue::Mapping(mapping) => Ok(mapping_to_metadata(mapping)),
        YamlValue::Sequence(_) => Err(FrontMatterError::NotAMapping("a sequence")),
        YamlValue::Tagged(_) => Err(FrontMatterError::NotAMapping("a tagged value")),
        _ => Err(FrontMatterError::NotAMapping("a scalar")),
    }
}

/// Convert a YAML mapping, turning every key into text: `~: x` gets the key `"null"`.
fn mapping_to_metadata(mapping: serde_yaml::Mapping) -> Metadata {
    mapping
        .into_iter()
        .map(|(key, value)| (key_text(key), yaml_to_json(value)))
        .collect()
}

fn key_text(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

fn yaml_to_json(value: YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                // NaN and infinities have no JSON form
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(JsonValue::Null, JsonValue::Number)
            }
        }
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(seq) => JsonValue::Array(seq.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => JsonValue::Object(mapping_to_metadata(mapping)),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_front_matter_keeps_whole_body() {
        let (meta, body) = parse("# Title\n\nText").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn splits_metadata_and_body() {
        let (meta, body) = parse("---\ntitle: Hello\nformat: Reg F\n---\nWorld\n").unwrap();
        assert_eq!(meta["title"], json!("Hello"));
        assert_eq!(meta["format"], json!("Reg F"));
        assert_eq!(body, "World\n");
    }

    #[test]
    fn preserves_key_order_and_unknown_keys() {
        let (meta, _) = parse("---\nzeta: 1\nalpha: [a, b]\ntitle: T\n---\n").unwrap();
        let keys: Vec<&str> = meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "title"]);
        assert_eq!(meta["alpha"], json!(["a", "b"]));
    }

    #[test]
    fn crlf_fences_are_recognized() {
        let (meta, body) = parse("---\r\ntitle: Hello\r\n---\r\nWorld").unwrap();
        assert_eq!(meta["title"], json!("Hello"));
        assert_eq!(body, "World");
    }

    #[test]
    fn leading_bom_is_ignored() {
        let (meta, body) = parse("\u{feff}---\ntitle: Hello\n---\nWorld").unwrap();
        assert_eq!(meta["title"], json!("Hello"));
        assert_eq!(body, "World");
    }

    #[test]
    fn empty_block_is_empty_mapping() {
        let (meta, body) = parse("---\n---\nBody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn comment_only_block_is_empty_mapping() {
        let (meta, _) = parse("---\n# nothing yet\n---\nBody").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn unclosed_block_consumes_rest() {
        let (meta, body) = parse("---\ntitle: Draft\n").unwrap();
        assert_eq!(meta["title"], json!("Draft"));
        assert_eq!(body, "");
    }

    #[test]
    fn dashes_later_in_file_are_not_front_matter() {
        let (meta, body) = parse("Intro\n---\nMore").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Intro\n---\nMore");
    }

    #[test]
    fn non_string_keys_become_text() {
        let (meta, body) =
            parse("---\ndate: 2024-01-01\n~: x\n2024: year\ntrue: yes\n---\nBody").unwrap();
        assert_eq!(meta["date"], json!("2024-01-01"));
        assert_eq!(meta["null"], json!("x"));
        assert_eq!(meta["2024"], json!("year"));
        assert_eq!(meta["true"], json!("yes"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn nested_values_keep_their_types() {
        let (meta, _) =
            parse("---\nteam:\n  size: 6\n  ratio: 0.5\n  1: lead\n  tags: [a, ~]\n---\n").unwrap();
        assert_eq!(
            serde_json::Value::Object(meta),
            json!({"team": {"size": 6, "ratio": 0.5, "1": "lead", "tags": ["a", null]}})
        );
    }

    #[test]
    fn sequence_is_rejected() {
        let result = parse("---\n- a\n- b\n---\nBody");
        assert!(matches!(result, Err(FrontMatterError::NotAMapping(_))));
    }

    #[test]
    fn invalid_yaml_is_error() {
        let result = parse("---\ntitle: [unclosed\n---\nBody");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }
}
