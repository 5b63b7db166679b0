//! Front-matter parsing

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::FrontMatterError;

/// Front-matter fields in declaration order. Values are kept untyped so the
/// rendering layer sees exactly what the author wrote.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// Block delimiters understood at the top of a content file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `---` ... `---`
    Yaml,
    /// `;;;` ... `;;;` (Hexo-style JSON front matter)
    Json,
}

impl Delimiter {
    fn marker(self) -> &'static str {
        match self {
            Delimiter::Yaml => "---",
            Delimiter::Json => ";;;",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Delimiter::Yaml),
            ";;;" => Some(Delimiter::Json),
            _ => None,
        }
    }
}

/// A content file split into metadata and body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedContent<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
}

/// Split front matter from `content`.
///
/// A file without an opening delimiter on its first line has no front matter:
/// the metadata is empty and the body is the whole input, untouched. Once a
/// block is opened it must be closed and parse as a mapping.
pub fn parse(content: &str) -> Result<ParsedContent<'_>, FrontMatterError> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first_line, rest) = match text.find('\n') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => (text, ""),
    };

    let Some(delimiter) = Delimiter::from_line(first_line) else {
        return Ok(ParsedContent {
            metadata: Metadata::new(),
            body: content,
        });
    };

    let (block, body) = split_block(rest, delimiter)
        .ok_or(FrontMatterError::Unterminated(delimiter.marker()))?;

    let metadata = match delimiter {
        Delimiter::Yaml => parse_yaml(block)?,
        Delimiter::Json => parse_json(block)?,
    };

    Ok(ParsedContent { metadata, body })
}

/// Find the closing delimiter line. Returns the block before it and the body
/// after it, with the closing line's line break consumed.
fn split_block(rest: &str, delimiter: Delimiter) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if Delimiter::from_line(line) == Some(delimiter) {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        // A block holding only comments
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(mapping) => mapping.into_iter().map(yaml_entry).collect(),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

fn yaml_entry(
    (key, value): (serde_yaml::Value, serde_yaml::Value),
) -> Result<(String, serde_json::Value), FrontMatterError> {
    Ok((yaml_key(key)?, yaml_to_json(value)?))
}

/// YAML allows any node as a key; scalars are spelled out as strings
/// (`2021: recap` gives `"2021"`), collections are refused.
fn yaml_key(key: serde_yaml::Value) -> Result<String, FrontMatterError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        Value::Sequence(_) => Err(FrontMatterError::CollectionKey("sequence")),
        Value::Mapping(_) => Err(FrontMatterError::CollectionKey("mapping")),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<serde_json::Value, FrontMatterError> {
    use serde_json::Value as Json;
    use serde_yaml::Value;

    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                // `.nan` and `.inf` have no JSON form
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Json::Null, Json::Number)
            }
        }
        Value::String(s) => Json::String(s),
        Value::Sequence(items) => Json::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(mapping) => Json::Object(
            mapping
                .into_iter()
                .map(yaml_entry)
                .collect::<Result<_, _>>()?,
        ),
        Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn parse_json(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_json::from_str::<serde_json::Value>(block)? {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}
