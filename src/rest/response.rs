//! Classification of decoded response bodies.
//!
//! Decoding happens in two phases. The transport turns the body text into a
//! [`serde_json::Value`]; [`Document::from_body`] then classifies the
//! top-level `data` member into one of three shapes:
//!
//! 1. an array becomes a [`ResourceSet`] (order and `links.next` kept)
//! 2. an object with `attributes` becomes a [`Resource`]
//! 3. any other object becomes a bare [`ResourceIdentifier`]
//!
//! A body without `data` is a [`ParseError::MissingData`], never an empty
//! result.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::Document;
//! use serde_json::json;
//!
//! let document = Document::from_body(json!({
//!     "data": {"type": "articles", "id": "1", "attributes": {"title": "Hi"}}
//! }))
//! .unwrap();
//!
//! let article = document.into_resource().unwrap();
//! assert_eq!(article.attribute("title"), Some(&json!("Hi")));
//! ```

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::clients::{next_link, ParseError};
use crate::rest::{Resource, ResourceIdentifier, ResourceSet};

/// A classified response document.
#[derive(Clone, Debug)]
pub enum Document {
    /// `data` was an object without `attributes`.
    Identifier(ResourceIdentifier),
    /// `data` was an object with `attributes`.
    Resource(Resource),
    /// `data` was an array.
    Set(ResourceSet),
}

impl Document {
    /// Classifies a decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingData`] if the body has no `data`
    /// member, or [`ParseError::InvalidResourceObject`] if `data` (or one of
    /// its elements) is `null` or lacks a string `type`.
    pub fn from_body(mut body: Value) -> Result<Self, ParseError> {
        let next = next_link(&body).map(ToString::to_string);
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or(ParseError::MissingData)?;

        match data {
            Value::Array(items) => {
                let resources = items
                    .into_iter()
                    .map(resource_from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Set(ResourceSet::new(resources, next)))
            }
            Value::Null => Err(ParseError::InvalidResourceObject {
                reason: "data is null".to_string(),
            }),
            object => {
                let raw = RawResourceObject::from_value(object)?;
                Ok(match raw.attributes {
                    Some(attributes) => Self::Resource(Resource::new(
                        ResourceIdentifier::from_parts(raw.resource_type, raw.id),
                        attributes,
                    )),
                    None => Self::Identifier(ResourceIdentifier::from_parts(
                        raw.resource_type,
                        raw.id,
                    )),
                })
            }
        }
    }

    /// Decodes and classifies a response body text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidJson`] for malformed JSON, otherwise
    /// the errors of [`from_body`](Self::from_body).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::from_body(serde_json::from_str(text)?)
    }

    /// Returns the identifier of a single-resource document.
    #[must_use]
    pub fn identifier(&self) -> Option<&ResourceIdentifier> {
        match self {
            Self::Identifier(identifier) => Some(identifier),
            Self::Resource(resource) => Some(&**resource),
            Self::Set(_) => None,
        }
    }

    /// Returns the resource, if this is a [`Document::Resource`].
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the set, if this is a [`Document::Set`].
    #[must_use]
    pub const fn as_set(&self) -> Option<&ResourceSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Converts into the resource, if this is a [`Document::Resource`].
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Converts into the set, if this is a [`Document::Set`].
    #[must_use]
    pub fn into_set(self) -> Option<ResourceSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Converts into the identifier of a single-resource document.
    #[must_use]
    pub fn into_identifier(self) -> Option<ResourceIdentifier> {
        match self {
            Self::Identifier(identifier) => Some(identifier),
            Self::Resource(resource) => Some(resource.into_identifier()),
            Self::Set(_) => None,
        }
    }
}

/// The typed intermediate form of one resource object.
#[derive(Debug, Deserialize)]
struct RawResourceObject {
    #[serde(rename = "type")]
    resource_type: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    id: Option<String>,
    #[serde(default)]
    attributes: Option<Map<String, Value>>,
}

impl RawResourceObject {
    fn from_value(value: Value) -> Result<Self, ParseError> {
        serde_json::from_value(value).map_err(|e| ParseError::InvalidResourceObject {
            reason: e.to_string(),
        })
    }
}

/// Parses a collection element; missing attributes become an empty map.
pub(crate) fn resource_from_value(value: Value) -> Result<Resource, ParseError> {
    let raw = RawResourceObject::from_value(value)?;
    Ok(Resource::new(
        ResourceIdentifier::from_parts(raw.resource_type, raw.id),
        raw.attributes.unwrap_or_default(),
    ))
}

/// Accepts string and numeric ids.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(de::Error::custom(format!("invalid id: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_becomes_set_in_order() {
        let document = Document::from_body(json!({
            "data": [
                {"type": "articles", "id": "1", "attributes": {"title": "First"}},
                {"type": "articles", "id": "2", "attributes": {"title": "Second"}}
            ],
            "links": {"next": "articles?page%5Bnumber%5D=2"}
        }))
        .unwrap();

        let set = document.into_set().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].id(), Some("1"));
        assert_eq!(set[1].id(), Some("2"));
        assert_eq!(set.next_link(), Some("articles?page%5Bnumber%5D=2"));
    }

    #[test]
    fn test_attributes_become_resource() {
        let attributes = json!({"title": "Hi", "tags": ["a"], "meta": {"x": 1}});
        let document = Document::from_body(json!({
            "data": {"type": "articles", "id": "1", "attributes": attributes}
        }))
        .unwrap();

        let resource = document.as_resource().unwrap();
        assert_eq!(Value::Object(resource.attributes().clone()), attributes);
    }

    #[test]
    fn test_type_and_id_only_becomes_identifier() {
        let document = Document::from_body(json!({"data": {"type": "people", "id": "9"}})).unwrap();

        assert!(matches!(document, Document::Identifier(_)));
        assert!(document.as_resource().is_none());
        assert_eq!(document.identifier().and_then(ResourceIdentifier::id), Some("9"));
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let document = Document::from_body(json!({"data": {"type": "people", "id": 9}})).unwrap();
        assert_eq!(document.identifier().and_then(ResourceIdentifier::id), Some("9"));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(matches!(
            Document::from_body(json!({"meta": {}})),
            Err(ParseError::MissingData)
        ));
        assert!(matches!(
            Document::from_body(Value::Null),
            Err(ParseError::MissingData)
        ));
    }

    #[test]
    fn test_invalid_resource_objects() {
        for body in [
            json!({"data": null}),
            json!({"data": {"id": "1"}}),
            json!({"data": [{"type": "a", "id": true}]}),
            json!({"data": 5}),
        ] {
            assert!(
                matches!(
                    Document::from_body(body.clone()),
                    Err(ParseError::InvalidResourceObject { .. })
                ),
                "{body}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            Document::parse("{\"data\": "),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(Document::parse(r#"{"data": []}"#).unwrap().as_set().is_some());
    }

    #[test]
    fn test_into_identifier_from_resource() {
        let document = Document::from_body(json!({
            "data": {"type": "articles", "id": "1", "attributes": {}}
        }))
        .unwrap();
        let identifier = document.into_identifier().unwrap();
        assert_eq!(identifier.resource_type(), "articles");
    }
}
