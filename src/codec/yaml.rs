//! YAML conversion
//!
//! Reading turns a YAML document into JSON data. Writing emits YAML from a
//! JSON value with block-style nesting, a fixed indent, condensed flow style
//! for empty collections, and long strings folded to the configured width.

use serde_json::{Map, Value};
use serde_yaml::Value as Yaml;

use crate::error::CodecError;

const FORMAT: &str = "yaml";

/// Longest key libyaml accepts in implicit `key: value` form.
const MAX_IMPLICIT_KEY: usize = 1024;

/// Output layout for emitted YAML.
#[derive(Debug, Clone, Copy)]
pub struct YamlStyle {
    pub line_width: usize,
    pub indent: usize,
}

impl Default for YamlStyle {
    fn default() -> Self {
        Self {
            line_width: 120,
            indent: 2,
        }
    }
}

/// Parses a YAML document into the equivalent JSON value.
pub fn parse_to_json(content: &str) -> Result<Value, CodecError> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    let doc: Yaml = serde_yaml::from_str(content).map_err(|e| CodecError::decode(FORMAT, e))?;
    yaml_to_json(doc)
}

fn yaml_to_json(value: Yaml) -> Result<Value, CodecError> {
    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => number_to_json(&n),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(
            seq.into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(key_to_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        // .nan and .inf have no JSON form
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// JSON object keys are strings, so scalar keys are stringified.
fn key_to_string(key: Yaml) -> Result<String, CodecError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(CodecError::decode(
            FORMAT,
            "mapping keys must be scalars",
        )),
    }
}

/// Serialises `value` as a YAML document.
pub fn to_yaml_string(value: &Value, style: &YamlStyle) -> Result<String, CodecError> {
    let mut emitter = Emitter {
        style: *style,
        out: String::new(),
    };
    match value {
        Value::Object(map) if !map.is_empty() => emitter.mapping(map, 0, false)?,
        Value::Array(items) if !items.is_empty() => emitter.sequence(items, 0, false)?,
        scalar => {
            let rendered = emitter.scalar(scalar, 0, style.indent)?;
            emitter.out.push_str(&rendered);
            emitter.out.push('\n');
        }
    }
    Ok(emitter.out)
}

struct Emitter {
    style: YamlStyle,
    out: String,
}

impl Emitter {
    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }

    /// Writes a non-empty mapping whose keys start at column `indent`. With
    /// `inline_first` the first key continues the current line (after `- `).
    fn mapping(
        &mut self,
        map: &Map<String, Value>,
        indent: usize,
        inline_first: bool,
    ) -> Result<(), CodecError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            let key = inline_string(key)?;
            if key.len() > MAX_IMPLICIT_KEY {
                self.out.push_str("? ");
                self.out.push_str(&key);
                self.out.push('\n');
                self.pad(indent);
                self.out.push(':');
                self.value_after_indicator(value, indent, indent + 1)?;
            } else {
                self.out.push_str(&key);
                self.out.push(':');
                let column = indent + key.len() + 1;
                self.value_after_indicator(value, indent, column)?;
            }
        }
        Ok(())
    }

    /// Writes a non-empty sequence whose dashes start at column `indent`.
    fn sequence(
        &mut self,
        items: &[Value],
        indent: usize,
        inline_first: bool,
    ) -> Result<(), CodecError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(indent);
            }
            self.out.push('-');
            match item {
                Value::Object(map) if !map.is_empty() => {
                    self.out.push(' ');
                    self.mapping(map, indent + self.style.indent, true)?;
                }
                Value::Array(nested) if !nested.is_empty() => {
                    self.out.push(' ');
                    self.sequence(nested, indent + self.style.indent, true)?;
                }
                scalar => {
                    self.out.push(' ');
                    let rendered = self.scalar(scalar, indent + 2, indent + self.style.indent)?;
                    self.out.push_str(&rendered);
                    self.out.push('\n');
                }
            }
        }
        Ok(())
    }

    /// Writes the value following a `key:` indicator. `parent` is the column
    /// of the key, `column` the current output column.
    fn value_after_indicator(
        &mut self,
        value: &Value,
        parent: usize,
        column: usize,
    ) -> Result<(), CodecError> {
        let child = parent + self.style.indent;
        match value {
            Value::Object(map) if !map.is_empty() => {
                self.out.push('\n');
                self.mapping(map, child, false)
            }
            Value::Array(items) if !items.is_empty() => {
                self.out.push('\n');
                self.sequence(items, child, false)
            }
            scalar => {
                self.out.push(' ');
                let rendered = self.scalar(scalar, column + 1, child)?;
                self.out.push_str(&rendered);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    /// Renders a scalar or empty collection starting at `column`. Strings too
    /// long for the line are folded into a `>-` block indented to `block_indent`.
    fn scalar(&self, value: &Value, column: usize, block_indent: usize) -> Result<String, CodecError> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
            Value::String(s) => {
                let inline = inline_string(s)?;
                if column + inline.len() <= self.style.line_width || !is_foldable(s) {
                    inline
                } else {
                    let width = self.style.line_width.saturating_sub(block_indent).max(20);
                    let mut block = String::from(">-");
                    for line in fold_lines(s, width) {
                        block.push('\n');
                        block.extend(std::iter::repeat_n(' ', block_indent));
                        block.push_str(line);
                    }
                    block
                }
            }
        })
    }
}

/// Single-line rendering of a string: plain or quoted as serde_yaml decides,
/// falling back to a double-quoted scalar when that would span lines.
fn inline_string(s: &str) -> Result<String, CodecError> {
    let rendered = serde_yaml::to_string(s).map_err(|e| CodecError::encode(FORMAT, e))?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
    if rendered.contains('\n') {
        // JSON string syntax is a valid YAML double-quoted scalar
        serde_json::to_string(s).map_err(|e| CodecError::encode(FORMAT, e))
    } else {
        Ok(rendered.to_string())
    }
}

/// Strings that survive a `>-` block scalar unchanged.
fn is_foldable(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(' ')
        && !s.ends_with(' ')
        && s.contains(' ')
        && s
            .chars()
            .all(|c| !c.is_control() && !matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}'))
}

/// Splits `s` at single spaces so each piece fits `width` where possible.
/// The break spaces are dropped; folding restores them on read.
fn fold_lines(s: &str, width: usize) -> Vec<&str> {
    let bytes = s.as_bytes();
    let breakable = |i: usize| {
        bytes[i] == b' ' && i > 0 && bytes[i - 1] != b' ' && bytes.get(i + 1).is_some_and(|b| *b != b' ')
    };

    let mut lines = Vec::new();
    let mut start = 0;
    while start < s.len() {
        if s.len() - start <= width {
            lines.push(&s[start..]);
            break;
        }
        let limit = start + width;
        let candidate = (start + 1..=limit.min(s.len() - 1))
            .rev()
            .find(|&i| breakable(i))
            .or_else(|| (limit + 1..s.len()).find(|&i| breakable(i)));
        match candidate {
            Some(i) => {
                lines.push(&s[start..i]);
                start = i + 1;
            }
            None => {
                lines.push(&s[start..]);
                break;
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn emit(value: &Value) -> String {
        to_yaml_string(value, &YamlStyle::default()).unwrap()
    }

    #[test]
    fn reads_yaml_as_json() {
        let value = parse_to_json("name: slime\nhp: 12\ntags: [green, small]\n").unwrap();
        assert_eq!(value, json!({"name": "slime", "hp": 12, "tags": ["green", "small"]}));
    }

    #[test]
    fn empty_document_is_null() {
        assert_eq!(parse_to_json("").unwrap(), Value::Null);
        assert_eq!(parse_to_json("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let value = parse_to_json("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn special_floats_become_null() {
        assert_eq!(parse_to_json("x: .nan\n").unwrap(), json!({"x": null}));
        assert_eq!(parse_to_json("x: 1.5\n").unwrap(), json!({"x": 1.5}));
    }

    #[test]
    fn tags_are_dropped() {
        assert_eq!(parse_to_json("x: !color red\n").unwrap(), json!({"x": "red"}));
    }

    #[test]
    fn complex_keys_fail() {
        let err = parse_to_json("? [a, b]\n: c\n").unwrap_err();
        assert!(!err.is_client_fault());
    }

    #[test]
    fn invalid_yaml_fails() {
        assert!(parse_to_json("a: [1, 2\n").is_err());
        assert!(parse_to_json("a: b\n  c: d\n").is_err());
    }

    #[test]
    fn emits_block_style_with_two_space_indent() {
        let value = json!({
            "name": "slime",
            "stats": {"hp": 12, "speed": 1.5},
            "tags": ["green", "small"],
            "drops": [{"item": "gel", "chance": 0.5}, {"item": "coin"}],
            "empty_list": [],
            "empty_map": {},
            "nothing": null,
            "grid": [[1, 2], [3]]
        });
        let expected = "\
name: slime
stats:
  hp: 12
  speed: 1.5
tags:
  - green
  - small
drops:
  - item: gel
    chance: 0.5
  - item: coin
empty_list: []
empty_map: {}
nothing: null
grid:
  - - 1
    - 2
  - - 3
";
        assert_eq!(emit(&value), expected);
        assert_eq!(parse_to_json(expected).unwrap(), value);
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        let value = json!({"a": "true", "b": "12", "c": "", "d": "null", "e": "x: y", "f": "line\nbreak"});
        let yaml = emit(&value);
        assert_eq!(parse_to_json(&yaml).unwrap(), value);
    }

    #[test]
    fn long_strings_fold_within_width() {
        let sentence = "the quick brown fox jumps over the lazy dog ".repeat(8);
        let sentence = sentence.trim_end().to_string();
        let value = json!({"description": sentence, "list": [sentence]});
        let yaml = emit(&value);

        assert!(yaml.contains("description: >-\n"));
        assert!(yaml.lines().all(|l| l.len() <= 120), "{}", yaml);
        assert_eq!(parse_to_json(&yaml).unwrap(), value);
    }

    #[test]
    fn unbreakable_strings_stay_on_one_line() {
        let token = "x".repeat(200);
        let value = json!({"token": token});
        let yaml = emit(&value);
        assert_eq!(parse_to_json(&yaml).unwrap(), value);
    }

    #[test]
    fn top_level_scalars_and_empty_collections() {
        assert_eq!(emit(&json!(null)), "null\n");
        assert_eq!(emit(&json!([])), "[]\n");
        assert_eq!(emit(&json!({})), "{}\n");
        assert_eq!(parse_to_json(&emit(&json!("hello"))).unwrap(), json!("hello"));
        assert_eq!(parse_to_json(&emit(&json!([1, "two"]))).unwrap(), json!([1, "two"]));
    }

    #[test]
    fn fold_lines_only_breaks_at_single_spaces() {
        assert_eq!(fold_lines("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(fold_lines("aaa  bbb ccc", 4), vec!["aaa  bbb", "ccc"]);
        assert_eq!(fold_lines("aaaaaaaa bb", 4), vec!["aaaaaaaa", "bb"]);
    }
}
