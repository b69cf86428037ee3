use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::query::{ChainKind, LogicalOperator, QueryChains, comparison, direction};

/// Case handling for the general text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchCase {
    #[serde(rename = "case-sensitive")]
    CaseSensitive,
    #[default]
    #[serde(rename = "case-insensitive")]
    CaseInsensitive,
}

impl SearchCase {
    pub fn is_sensitive(&self) -> bool {
        matches!(self, SearchCase::CaseSensitive)
    }
}

/// The aggregate query state for one builder session.
///
/// Holds the six chains, the single-valued projection/search/limit sections,
/// and the transient edit buffer for the link currently being composed. The
/// store performs no validation beyond structural shape; whether an operator
/// or value is legal for a field is the catalog's concern and is assumed
/// settled before a mutation reaches the store.
///
/// Chains are only ever written through [`crate::engine::apply`]; a field
/// may appear both here and in `projection_fields` if the catalog feeding
/// the caller lets it through — that cross-section constraint is advisory
/// and is not re-checked at mutation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub query_chains: QueryChains,
    /// Field names excluded from the response, in selection order.
    pub projection_fields: Vec<String>,
    pub general_search_inclusion_value: String,
    pub general_search_exclusion_value: String,
    pub general_search_case: SearchCase,
    /// Kept stringly: the wire contract parses it at serialization time and
    /// falls back to 10 when unparsable.
    pub limit_per_page: String,

    // Transient edit buffer: the link being composed before it is committed.
    pub filter_field: String,
    pub filter_comparison_operator: String,
    pub filter_value: String,
    pub filter_logical_operator: LogicalOperator,
    pub sort_field: String,
    pub sort_direction: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query_chains: QueryChains::default(),
            projection_fields: Vec::new(),
            general_search_inclusion_value: String::new(),
            general_search_exclusion_value: String::new(),
            general_search_case: SearchCase::CaseInsensitive,
            limit_per_page: "10".to_string(),
            filter_field: "createdAt".to_string(),
            filter_comparison_operator: comparison::EQUAL_TO.to_string(),
            filter_value: String::new(),
            filter_logical_operator: LogicalOperator::And,
            sort_field: "createdAt".to_string(),
            sort_direction: direction::DESCENDING.to_string(),
        }
    }
}

impl QueryState {
    /// The initial snapshot a session starts from and that `reset` restores.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Restores the exact initial snapshot.
    pub fn reset(&mut self) {
        *self = Self::initial();
    }

    /// Every field referenced anywhere across the six chains.
    ///
    /// One-directional query for the catalog, so it can exclude already-used
    /// fields from further selection. Never a mutation.
    pub fn fields_in_use(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::new();
        for kind in ChainKind::ALL {
            for (_, chain) in self.query_chains.section(kind).iter() {
                for link in chain {
                    fields.insert(link.field.clone());
                }
            }
        }
        fields
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::QueryLink;

    #[test]
    fn test_initial_snapshot() {
        let state = QueryState::initial();
        assert!(state.query_chains.filter.is_empty());
        assert!(state.query_chains.sort.is_empty());
        assert!(state.projection_fields.is_empty());
        assert_eq!(state.limit_per_page, "10");
        assert_eq!(state.filter_comparison_operator, comparison::EQUAL_TO);
        assert_eq!(state.sort_direction, direction::DESCENDING);
        assert_eq!(state.general_search_case, SearchCase::CaseInsensitive);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut state = QueryState::initial();
        state
            .query_chains
            .filter
            .or
            .push(QueryLink::new("status", comparison::EQUAL_TO, "active"));
        state.projection_fields.push("password".to_string());
        state.limit_per_page = "50".to_string();
        state.filter_field = "status".to_string();

        state.reset();
        assert_eq!(state, QueryState::initial());
    }

    #[test]
    fn test_fields_in_use_unions_all_chains() {
        let mut state = QueryState::initial();
        state
            .query_chains
            .filter
            .and
            .push(QueryLink::new("age", comparison::GREATER_THAN, "30"));
        state
            .query_chains
            .filter
            .or
            .push(QueryLink::new("status", comparison::EQUAL_TO, "active"));
        state
            .query_chains
            .sort
            .and
            .push(QueryLink::sort("createdAt", direction::DESCENDING));
        // Duplicate reference collapses in the set.
        state
            .query_chains
            .filter
            .nor
            .push(QueryLink::new("status", comparison::EQUAL_TO, "banned"));

        let fields = state.fields_in_use();
        assert_eq!(
            fields.into_iter().collect::<Vec<_>>(),
            vec!["age", "createdAt", "status"]
        );
    }

    #[test]
    fn test_search_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&SearchCase::CaseSensitive).unwrap(),
            "\"case-sensitive\""
        );
        assert!(!SearchCase::CaseInsensitive.is_sensitive());
    }
}
