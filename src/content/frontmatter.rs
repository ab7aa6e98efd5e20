//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use super::ContentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                let text = scalar_to_string(&item).ok_or_else(|| {
                    <S::Error as de::Error>::custom("list items must be strings or numbers")
                })?;
                vec.push(text);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Accepts any YAML scalar (so `date: 2024-01-15` or `status: 3` still read as text)
fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => scalar_to_string(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a string, number or boolean")),
    }
}

/// Render a YAML scalar as text. Sequences and mappings have no text form.
pub(crate) fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "optional_scalar")]
    pub title: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub description: Option<String>,
    #[serde(rename = "type", deserialize_with = "optional_scalar")]
    pub content_type: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    #[serde(rename = "targetKeywords", deserialize_with = "string_or_vec")]
    pub target_keywords: Vec<String>,
    #[serde(rename = "ideaName", deserialize_with = "optional_scalar")]
    pub idea_name: Option<String>,
    #[serde(deserialize_with = "optional_scalar")]
    pub status: Option<String>,

    /// Any other front-matter keys, in file order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.trim_start_matches('\u{feff}');

        match split_yaml_block(content) {
            Some((yaml, body)) => {
                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }
                let fm: FrontMatter = serde_yaml::from_str(yaml)?;
                Ok((fm, body))
            }
            None => Ok((FrontMatter::default(), content)),
        }
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves.
/// The opening fence must be the first line; no closing fence means no front-matter.
/// Fence lines may carry trailing whitespace.
fn split_yaml_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_fence(opening) || !opening.ends_with('\n') {
        return None;
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line) {
            let yaml = content[yaml_start..offset].trim_end_matches(|c: char| c == '\r' || c == '\n');
            return Some((yaml, &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}
