//! Identifiers are opaque strings, but parts of the backend still emit
//! integer primary keys. Both shapes deserialize into a `String`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Int(n) => n.to_string(),
        }
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::optional_string_or_number")]
        parent: Option<String>,
    }

    #[test]
    fn accepts_text_and_integer_ids() {
        let text: Holder = serde_json::from_str(r#"{"id": "apt_9"}"#).unwrap();
        assert_eq!(text.id, "apt_9");
        assert_eq!(text.parent, None);

        let int: Holder = serde_json::from_str(r#"{"id": 42, "parent": 7}"#).unwrap();
        assert_eq!(int.id, "42");
        assert_eq!(int.parent.as_deref(), Some("7"));
    }

    #[test]
    fn null_parent_is_none() {
        let held: Holder = serde_json::from_str(r#"{"id": "a", "parent": null}"#).unwrap();
        assert_eq!(held.parent, None);
    }
}
