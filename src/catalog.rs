use serde::{Deserialize, Serialize};

/// What kind of value input a field accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDomain {
    Text,
    Number,
    Date,
    /// Enumerated select with its legal values.
    Select(Vec<String>),
}

/// Everything the catalog knows about one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Human-facing label.
    pub label: String,
    /// The comparison operators legal for this field.
    pub operators: Vec<String>,
    pub domain: ValueDomain,
}

/// Source of truth for which fields, operators, and value domains are legal.
///
/// Consumed, never implemented here: the store assumes any mutation that
/// reaches it has already been vetted against a catalog. The other direction
/// of the contract is [`crate::store::QueryState::fields_in_use`], which a
/// catalog reads to exclude already-used fields from further selection.
pub trait FieldCatalog {
    fn field(&self, name: &str) -> Option<&FieldSpec>;

    fn label(&self, name: &str) -> Option<&str> {
        self.field(name).map(|spec| spec.label.as_str())
    }

    fn operators(&self, name: &str) -> Option<&[String]> {
        self.field(name).map(|spec| spec.operators.as_slice())
    }

    fn domain(&self, name: &str) -> Option<&ValueDomain> {
        self.field(name).map(|spec| &spec.domain)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::comparison;
    use std::collections::BTreeMap;

    struct MapCatalog(BTreeMap<String, FieldSpec>);

    impl FieldCatalog for MapCatalog {
        fn field(&self, name: &str) -> Option<&FieldSpec> {
            self.0.get(name)
        }
    }

    #[test]
    fn test_catalog_lookups() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "status".to_string(),
            FieldSpec {
                label: "Status".to_string(),
                operators: vec![
                    comparison::EQUAL_TO.to_string(),
                    comparison::NOT_EQUAL_TO.to_string(),
                    comparison::IN.to_string(),
                ],
                domain: ValueDomain::Select(vec!["active".to_string(), "pending".to_string()]),
            },
        );
        let catalog = MapCatalog(fields);

        assert_eq!(catalog.label("status"), Some("Status"));
        assert_eq!(catalog.operators("status").map(|ops| ops.len()), Some(3));
        assert!(matches!(catalog.domain("status"), Some(ValueDomain::Select(_))));
        assert!(catalog.field("nope").is_none());
    }
}
