/*
[INPUT]:  Optional filter/pagination values from resource calls
[OUTPUT]: Ordered query-string pairs with absent values omitted
[POS]:    HTTP layer - query construction shared by all resources
[UPDATE]: When query encoding rules change
*/

use serde::Serialize;

use super::error::Result;

/// Ordered query pairs; `None` values are never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Wire name of a serde-serialized value, e.g. `UserRole::Provider` -> `provider`.
pub(crate) fn wire_value<T: Serialize>(value: &T) -> Result<String> {
    Ok(match serde_json::to_value(value)? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_omitted() {
        let mut query = QueryParams::new();
        query
            .push("page", 2)
            .push("limit", 50)
            .push_opt("search", None::<&str>)
            .push_opt("isActive", Some(true));

        assert_eq!(
            query.pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("isActive".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(query.get("search"), None);
        assert_eq!(query.get("limit"), Some("50"));
    }

    #[test]
    fn test_wire_value() {
        #[derive(Serialize)]
        #[serde(rename_all = "lowercase")]
        enum Kind {
            Therapist,
        }

        assert_eq!(wire_value(&Kind::Therapist).unwrap(), "therapist");
        assert_eq!(wire_value(&7).unwrap(), "7");
    }
}
