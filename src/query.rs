use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a link combines with its siblings inside the same section.
///
/// Iteration order over a [`ChainSet`] is fixed: `and`, `nor`, `or`. The
/// serialized wire string depends on that order, so it never changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    #[default]
    And,
    Nor,
    Or,
}

impl LogicalOperator {
    pub const ALL: [LogicalOperator; 3] =
        [LogicalOperator::And, LogicalOperator::Nor, LogicalOperator::Or];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Nor => "nor",
            LogicalOperator::Or => "or",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two structurally identical link-bearing sections.
///
/// `search` and `projection` are single-valued and live directly on the
/// store; only `filter` and `sort` carry chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    Filter,
    Sort,
}

impl ChainKind {
    pub const ALL: [ChainKind; 2] = [ChainKind::Filter, ChainKind::Sort];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainKind::Filter => "filter",
            ChainKind::Sort => "sort",
        }
    }
}

/// One `(field, operator, value)` condition.
///
/// For filter links `operator` is a comparison operator from
/// [`comparison`]. Sort links reuse the same shape with `operator` fixed to
/// `"equal to"` and `value` carrying the direction (`ascending`/`descending`).
/// The repurposed tuple shape is wire behavior; do not split it into two
/// types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLink {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl QueryLink {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Sort links always carry `"equal to"` in the operator slot.
    pub fn sort(field: impl Into<String>, direction: impl Into<String>) -> Self {
        Self::new(field, comparison::EQUAL_TO, direction)
    }
}

/// An insertion-ordered sequence of links under one logical operator.
pub type QueryChain = Vec<QueryLink>;

/// The three chains of one section, keyed by logical operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSet {
    pub and: QueryChain,
    pub nor: QueryChain,
    pub or: QueryChain,
}

impl ChainSet {
    pub fn chain(&self, op: LogicalOperator) -> &QueryChain {
        match op {
            LogicalOperator::And => &self.and,
            LogicalOperator::Nor => &self.nor,
            LogicalOperator::Or => &self.or,
        }
    }

    pub fn chain_mut(&mut self, op: LogicalOperator) -> &mut QueryChain {
        match op {
            LogicalOperator::And => &mut self.and,
            LogicalOperator::Nor => &mut self.nor,
            LogicalOperator::Or => &mut self.or,
        }
    }

    /// Fixed-order iteration: `and`, `nor`, `or`.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalOperator, &QueryChain)> {
        LogicalOperator::ALL.iter().map(|op| (*op, self.chain(*op)))
    }

    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.nor.is_empty() && self.or.is_empty()
    }
}

/// All six chains: filter×3, sort×3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryChains {
    pub filter: ChainSet,
    pub sort: ChainSet,
}

impl QueryChains {
    pub fn section(&self, kind: ChainKind) -> &ChainSet {
        match kind {
            ChainKind::Filter => &self.filter,
            ChainKind::Sort => &self.sort,
        }
    }

    pub fn section_mut(&mut self, kind: ChainKind) -> &mut ChainSet {
        match kind {
            ChainKind::Filter => &mut self.filter,
            ChainKind::Sort => &mut self.sort,
        }
    }
}

/// Comparison-operator vocabulary as it appears in link operator slots.
pub mod comparison {
    pub const EQUAL_TO: &str = "equal to";
    pub const NOT_EQUAL_TO: &str = "not equal to";
    pub const GREATER_THAN: &str = "greater than";
    pub const GREATER_THAN_OR_EQUAL_TO: &str = "greater than or equal to";
    pub const LESS_THAN: &str = "less than";
    pub const LESS_THAN_OR_EQUAL_TO: &str = "less than or equal to";
    pub const IN: &str = "in";
}

/// Sort direction vocabulary carried in sort link value slots.
pub mod direction {
    pub const ASCENDING: &str = "ascending";
    pub const DESCENDING: &str = "descending";
}

static COMPARISON_TO_MONGO: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (comparison::EQUAL_TO, "$eq"),
        (comparison::NOT_EQUAL_TO, "$ne"),
        (comparison::GREATER_THAN, "$gt"),
        (comparison::GREATER_THAN_OR_EQUAL_TO, "$gte"),
        (comparison::LESS_THAN, "$lt"),
        (comparison::LESS_THAN_OR_EQUAL_TO, "$lte"),
        (comparison::IN, "$in"),
    ])
});

/// Maps a comparison operator to its wire-level Mongo operator.
///
/// Unrecognized operators fall back to `$in`. That fallback is existing wire
/// behavior, not a validated contract — catalog-sourced multi-value operators
/// arrive here without a table entry and are expected to land on `$in`.
pub fn mongo_operator(comparison: &str) -> &'static str {
    COMPARISON_TO_MONGO.get(comparison).copied().unwrap_or("$in")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mongo_operator_table() {
        assert_eq!(mongo_operator(comparison::EQUAL_TO), "$eq");
        assert_eq!(mongo_operator(comparison::NOT_EQUAL_TO), "$ne");
        assert_eq!(mongo_operator(comparison::GREATER_THAN), "$gt");
        assert_eq!(mongo_operator(comparison::GREATER_THAN_OR_EQUAL_TO), "$gte");
        assert_eq!(mongo_operator(comparison::LESS_THAN), "$lt");
        assert_eq!(mongo_operator(comparison::LESS_THAN_OR_EQUAL_TO), "$lte");
        assert_eq!(mongo_operator(comparison::IN), "$in");
    }

    #[test]
    fn test_mongo_operator_falls_back_to_in() {
        assert_eq!(mongo_operator("between"), "$in");
        assert_eq!(mongo_operator(""), "$in");
    }

    #[test]
    fn test_chain_set_iteration_order() {
        let set = ChainSet::default();
        let order: Vec<LogicalOperator> = set.iter().map(|(op, _)| op).collect();
        assert_eq!(
            order,
            vec![LogicalOperator::And, LogicalOperator::Nor, LogicalOperator::Or]
        );
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&LogicalOperator::Nor).unwrap(),
            "\"nor\""
        );
        assert_eq!(serde_json::to_string(&ChainKind::Filter).unwrap(), "\"filter\"");
    }
}
