use std::fmt;

use super::QueryParams;

/// Cache identity of a query: the caller's key plus its parameters.
///
/// Two queries sharing a key but not parameters are different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    key: String,
    params: Option<String>,
}

impl QueryKey {
    /// Build the identity for `key` and optional parameters.
    pub fn new(key: impl Into<String>, params: Option<&QueryParams>) -> Self {
        Self {
            key: key.into(),
            // BTreeMap and serde_json's default Map are both ordered, so equal
            // parameter sets always serialize identically.
            params: params.map(|p| serde_json::to_string(p).unwrap_or_default()),
        }
    }

    /// The caller-supplied key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Canonical JSON of the parameters, if any were given.
    pub fn params(&self) -> Option<&str> {
        self.params.as_deref()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.params {
            Some(params) => write!(f, "{}{}", self.key, params),
            None => write!(f, "{}", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, serde_json::Value)]) -> QueryParams {
        pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
    }

    #[test]
    fn params_are_part_of_identity() {
        let a = QueryKey::new("events", Some(&params(&[("today", json!("2024-01-01"))])));
        let b = QueryKey::new("events", Some(&params(&[("today", json!("2024-01-02"))])));
        let c = QueryKey::new("events", None);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, QueryKey::new("events", Some(&params(&[("today", json!("2024-01-01"))]))));
    }

    #[test]
    fn parameter_order_does_not_matter() {
        let a = QueryKey::new("q", Some(&params(&[("a", json!(1)), ("b", json!(2))])));
        let b = QueryKey::new("q", Some(&params(&[("b", json!(2)), ("a", json!(1))])));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), r#"q{"a":1,"b":2}"#);
    }
}
