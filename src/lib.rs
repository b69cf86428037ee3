//! # Seira
//!
//! *σειρά — Ancient Greek for "chain" or "series".*
//!
//! Seira is the query-composition core of an administrative dashboard: it
//! lets a caller incrementally compose filter, sort, text-search, and
//! projection directives into one structured query, and serializes that
//! structure into the wire-level query string the backend API consumes.
//!
//! ## What's inside
//!
//! ### Query chains
//! Conditions live in six ordered chains — filter and sort, each split by
//! logical operator (`and`, `nor`, `or`). An `and` chain names each field at
//! most once; `or` and `nor` chains may repeat a field to express
//! alternatives ("status = active OR status = pending").
//!
//! ### Live single-link editing
//! The mutation engine never asks the caller to distinguish "add" from
//! "edit". Each committed `(field, operator, value)` triple is classified
//! against the target chain: refining an already-committed `and` condition
//! updates it in place, everything else appends. Malformed attempts — empty
//! values, out-of-range deletes — are silent no-ops, because in an
//! interactive builder every keystroke can trigger a mutation.
//!
//! ### Deterministic wire strings
//! [`QueryBuilder::query_string`] re-derives the full query string from the
//! current state on every call, in a fixed segment order, so structurally
//! equal states always serialize identically:
//!
//! ```text
//! ?&$and[age][$gt]=30&$or[status][$eq]=active&sort[createdAt]=-1&limit=10
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use seira::{ChainKind, LogicalOperator, MutationRequest, QueryBuilder, QueryLink};
//!
//! let mut builder = QueryBuilder::new();
//! builder.apply(&MutationRequest::insert(
//!     ChainKind::Filter,
//!     LogicalOperator::And,
//!     QueryLink::new("status", "equal to", "active"),
//! ));
//!
//! assert_eq!(builder.query_string(), "?&$and[status][$eq]=active&limit=10");
//! ```
//!
//! The catalog of legal fields, operators, and value domains is an external
//! collaborator behind [`FieldCatalog`]; Seira reads from it and hands back
//! the set of fields already in use, nothing more.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod query;
pub mod serializer;
pub mod store;

use std::collections::BTreeSet;
use std::time::Instant;

use metrics::histogram;

pub use crate::catalog::{FieldCatalog, FieldSpec, ValueDomain};
pub use crate::engine::{MutationKind, MutationRequest};
pub use crate::error::Error;
pub use crate::query::{
    ChainKind, ChainSet, LogicalOperator, QueryChain, QueryChains, QueryLink, comparison,
    direction, mongo_operator,
};
pub use crate::store::{QueryState, SearchCase};

/// One query-builder session: a [`QueryState`] plus the operations that
/// mutate and serialize it.
///
/// Created once per session with a fixed initial state, mutated exclusively
/// through the engine, discarded or [`reset`](Self::reset) — never partially
/// torn down. Single-writer by design; a shared builder must serialize its
/// mutations externally.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    state: QueryState,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            state: QueryState::initial(),
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Applies one mutation through the engine.
    pub fn apply(&mut self, request: &MutationRequest) {
        let start = Instant::now();
        self.state = engine::apply(&self.state, request);
        histogram!("seira.mutation.duration_ms").record(start.elapsed().as_millis() as f64);
    }

    /// Applies a wire-shaped mutation request.
    ///
    /// Schema-level rejection surfaces as [`Error::MalformedRequest`]; a
    /// well-shaped request that changes nothing succeeds silently.
    pub fn apply_value(&mut self, value: serde_json::Value) -> Result<(), Error> {
        let request = MutationRequest::from_value(value)?;
        self.apply(&request);
        Ok(())
    }

    /// Serializes the current state to the wire query string.
    pub fn query_string(&self) -> String {
        let start = Instant::now();
        let out = serializer::query_string(&self.state);
        histogram!("seira.serialize.duration_ms").record(start.elapsed().as_millis() as f64);
        out
    }

    /// Restores the exact initial snapshot.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Fields referenced anywhere across the six chains, for the catalog.
    pub fn fields_in_use(&self) -> BTreeSet<String> {
        self.state.fields_in_use()
    }

    // ==================== Edit buffer ====================

    pub fn set_filter_field(&mut self, field: impl Into<String>) {
        self.state.filter_field = field.into();
    }

    pub fn set_filter_comparison_operator(&mut self, operator: impl Into<String>) {
        self.state.filter_comparison_operator = operator.into();
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.state.filter_value = value.into();
    }

    pub fn set_filter_logical_operator(&mut self, operator: LogicalOperator) {
        self.state.filter_logical_operator = operator;
    }

    pub fn set_sort_field(&mut self, field: impl Into<String>) {
        self.state.sort_field = field.into();
    }

    pub fn set_sort_direction(&mut self, direction: impl Into<String>) {
        self.state.sort_direction = direction.into();
    }

    /// Commits the filter edit buffer into its target chain.
    ///
    /// The engine reclassifies on every commit, so repeated commits while a
    /// user refines one condition update rather than duplicate it.
    pub fn commit_filter(&mut self) {
        let request = MutationRequest::insert(
            ChainKind::Filter,
            self.state.filter_logical_operator,
            QueryLink::new(
                self.state.filter_field.clone(),
                self.state.filter_comparison_operator.clone(),
                self.state.filter_value.clone(),
            ),
        );
        self.apply(&request);
    }

    /// Commits the sort edit buffer into the sort `and` chain.
    pub fn commit_sort(&mut self) {
        let request = MutationRequest::insert(
            ChainKind::Sort,
            LogicalOperator::And,
            QueryLink::sort(
                self.state.sort_field.clone(),
                self.state.sort_direction.clone(),
            ),
        );
        self.apply(&request);
    }

    // ==================== Single-valued sections ====================

    pub fn set_projection_fields(&mut self, fields: Vec<String>) {
        self.state.projection_fields = fields;
    }

    pub fn set_general_search_inclusion_value(&mut self, value: impl Into<String>) {
        self.state.general_search_inclusion_value = value.into();
    }

    pub fn set_general_search_exclusion_value(&mut self, value: impl Into<String>) {
        self.state.general_search_exclusion_value = value.into();
    }

    pub fn set_general_search_case(&mut self, case: SearchCase) {
        self.state.general_search_case = case;
    }

    pub fn set_limit_per_page(&mut self, limit: impl Into<String>) {
        self.state.limit_per_page = limit.into();
    }
}
