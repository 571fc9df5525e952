//! Query-string filters for list routes.
//!
//! List routes filter by any subset of an entity's own fields
//! (`GET /usuarios?nome=Fulano&administrador=true`). A [`Filter`] keeps the
//! pairs in insertion order so logged URLs match what fixtures declare.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;

/// Ordered query pairs appended to a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pairs: Vec<(String, String)>,
}

impl Filter {
    /// An empty filter (lists the whole collection).
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Add one `key=value` pair.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Flatten a JSON value into query pairs.
    ///
    /// Scalars become `key=value`; nested objects and arrays use bracket
    /// paths (`produtos[0][idProduto]=...`); `null` becomes an empty value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut filter = Self::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                flatten_into(&mut filter.pairs, key.clone(), value);
            }
        }
        filter
    }

    /// Build a filter from any serializable entity, e.g. a fixture payload.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` if `entity` does not serialize to JSON.
    pub fn from_entity<T: Serialize>(entity: &T) -> Result<Self, ClientError> {
        serde_json::to_value(entity)
            .map(|value| Self::from_value(&value))
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Whether no pairs are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `application/x-www-form-urlencoded` rendering of the pairs.
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }

    /// Append the pairs to `url`, leaving it untouched when empty.
    pub fn apply(&self, url: &mut Url) {
        if !self.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.pairs);
        }
    }
}

fn flatten_into(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (child, item) in map {
                flatten_into(pairs, format!("{key}[{child}]"), item);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flat_object() {
        let filter = Filter::from_value(&json!({"preco": 470, "nome": "Logitech MX Vertical"}));
        assert_eq!(filter.pairs().len(), 2);
        assert!(filter
            .pairs()
            .contains(&("nome".to_string(), "Logitech MX Vertical".to_string())));
        assert!(filter.encode().contains("preco=470"));
    }

    #[test]
    fn test_nested_values_use_brackets() {
        let filter = Filter::from_value(&json!({"produtos": [{"quantidade": 2}], "vazio": null}));
        assert_eq!(
            filter.pairs(),
            &[
                ("produtos[0][quantidade]".to_string(), "2".to_string()),
                ("vazio".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_apply_leaves_empty_filter_untouched() {
        let mut url = Url::parse("http://localhost:3000/usuarios").unwrap();
        Filter::new().apply(&mut url);
        assert_eq!(url.as_str(), "http://localhost:3000/usuarios");

        Filter::new()
            .with("email", "fulano@qa.com")
            .apply(&mut url);
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/usuarios?email=fulano%40qa.com"
        );
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(Filter::from_value(&json!([1, 2])).is_empty());
    }
}
