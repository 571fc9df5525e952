//! Equality filters on list routes.

use serde::Serialize;
use serde_json::Value;

/// Query pairs as received, in order.
pub type Params = Vec<(String, String)>;

/// Entities whose fields equal every query value, as JSON.
#[must_use]
pub fn select<T: Serialize>(items: &[T], params: &[(String, String)]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .filter(|item| {
            params
                .iter()
                .all(|(key, expected)| field_matches(item.get(key), expected))
        })
        .collect()
}

fn field_matches(field: Option<&Value>, expected: &str) -> bool {
    match field {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n
            .as_u64()
            .is_some_and(|n| expected.parse::<u64>().is_ok_and(|e| e == n)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_numbers_match_their_text() {
        let items = [json!({"precoTotal": 300, "idUsuario": "a"}), json!({"precoTotal": 900})];
        assert_eq!(select(&items, &params(&[("precoTotal", "300")])).len(), 1);
        assert_eq!(select(&items, &params(&[("precoTotal", "300.5")])).len(), 0);
        assert_eq!(select(&items, &[]).len(), 2);
    }

    #[test]
    fn test_missing_field_never_matches() {
        let items = [json!({"nome": "Fulano"})];
        assert!(select(&items, &params(&[("email", "fulano@qa.com")])).is_empty());
    }
}
