use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::query::{ChainKind, LogicalOperator, QueryChain, QueryLink};
use crate::store::QueryState;

/// What a mutation request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Insert,
    Delete,
}

/// One mutation against a single chain.
///
/// Wire shape (camelCase JSON):
/// `{"section": "filter", "logicalOperator": "and", "action": "insert",
///   "index": 0, "link": {"field": ..., "operator": ..., "value": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRequest {
    pub section: ChainKind,
    pub logical_operator: LogicalOperator,
    pub action: MutationKind,
    /// Only meaningful for delete; insert positions itself.
    #[serde(default)]
    pub index: usize,
    pub link: QueryLink,
}

impl MutationRequest {
    pub fn insert(section: ChainKind, operator: LogicalOperator, link: QueryLink) -> Self {
        Self {
            section,
            logical_operator: operator,
            action: MutationKind::Insert,
            index: 0,
            link,
        }
    }

    pub fn delete(section: ChainKind, operator: LogicalOperator, index: usize) -> Self {
        Self {
            section,
            logical_operator: operator,
            action: MutationKind::Delete,
            index,
            link: QueryLink::new("", "", ""),
        }
    }

    /// Parses a wire-shaped request, surfacing shape errors as
    /// [`Error::MalformedRequest`] so callers can tell "input was invalid"
    /// from "nothing needed to change".
    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|err| Error::MalformedRequest(err.to_string()))
    }
}

/// The insert-vs-update decision made for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    Insert,
    Update,
}

/// Applies one mutation, returning the next state.
///
/// Pure function of `(state, request)`; malformed requests (empty value on
/// insert, out-of-range index on delete) degrade to no-ops rather than
/// errors. Every keystroke in an interactive builder can trigger a mutation
/// attempt, so the permissive path is the normal path.
pub fn apply(state: &QueryState, request: &MutationRequest) -> QueryState {
    let mut next = state.clone();
    let chain = next
        .query_chains
        .section_mut(request.section)
        .chain_mut(request.logical_operator);

    match request.action {
        MutationKind::Delete => {
            if request.index < chain.len() {
                chain.remove(request.index);
                debug!(
                    section = request.section.as_str(),
                    operator = request.logical_operator.as_str(),
                    index = request.index,
                    "deleted chain link"
                );
            }
            // Out of range: idempotent no-op.
        }
        MutationKind::Insert => {
            if request.link.value.is_empty() {
                return next;
            }
            let class = classify(chain, request.logical_operator, &request.link);
            debug!(
                section = request.section.as_str(),
                operator = request.logical_operator.as_str(),
                field = %request.link.field,
                ?class,
                "classified chain mutation"
            );
            match class {
                Classification::Update => {
                    // First link with the matching field is the committed
                    // condition; rebuild it in place rather than rewriting
                    // slots of the existing link.
                    if let Some(pos) = chain.iter().position(|l| l.field == request.link.field) {
                        chain[pos] = request.link.clone();
                    }
                }
                Classification::Insert => chain.push(request.link.clone()),
            }
        }
    }

    next
}

/// Scans the target chain and decides insert vs update.
///
/// The result of the *last* scanned link wins: a matching field under `and`
/// classifies as update (a conjunction names each field at most once), a
/// matching field under `or`/`nor` as insert (alternatives may repeat a
/// field), a non-matching field as insert. An empty chain is an insert.
///
/// A mixed `and` chain — matching field followed by a non-matching one —
/// therefore classifies as insert. That is reproduced wire behavior; do not
/// short-circuit on the first match without confirming the backend expects
/// it.
fn classify(chain: &QueryChain, operator: LogicalOperator, incoming: &QueryLink) -> Classification {
    let mut class = Classification::Insert;
    for existing in chain {
        class = if existing.field == incoming.field && operator == LogicalOperator::And {
            Classification::Update
        } else {
            Classification::Insert
        };
    }
    class
}
