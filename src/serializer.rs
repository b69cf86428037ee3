use std::fmt::Write;

use crate::query::{ChainKind, direction, mongo_operator};
use crate::store::QueryState;

/// Renders the entire query state into one wire-format query string.
///
/// Segment order is fixed: filter chains, sort chains, projection, search,
/// limit. Within a section the chains serialize in `and`, `nor`, `or` order
/// and links in insertion order, so structurally equal states always yield
/// identical strings.
///
/// The seed is `"?"` and every segment carries its own `&` prefix, which
/// produces a leading `?&`. The consuming backend expects exactly that;
/// preserved verbatim.
///
/// Never fails: unknown comparison operators fall back to `$in` and an
/// unparsable page limit falls back to 10.
pub fn query_string(state: &QueryState) -> String {
    let mut out = String::from("?");

    for kind in ChainKind::ALL {
        for (op, chain) in state.query_chains.section(kind).iter() {
            for link in chain {
                match kind {
                    ChainKind::Filter => {
                        let _ = write!(
                            out,
                            "&${}[{}][{}]={}",
                            op.as_str(),
                            link.field,
                            mongo_operator(&link.operator),
                            link.value
                        );
                    }
                    ChainKind::Sort => {
                        // The operator slot of a sort link is ignored; the
                        // value slot carries the direction.
                        let dir = if link.value == direction::ASCENDING { 1 } else { -1 };
                        let _ = write!(out, "&sort[{}]={}", link.field, dir);
                    }
                }
            }
        }
    }

    if !state.projection_fields.is_empty() {
        let _ = write!(out, "&projection={}", state.projection_fields.join(","));
    }

    let inclusion = &state.general_search_inclusion_value;
    let exclusion = &state.general_search_exclusion_value;
    if !inclusion.is_empty() || !exclusion.is_empty() {
        let _ = write!(out, "&$text[$search]={inclusion}");
        if !exclusion.is_empty() {
            let _ = write!(out, "-{exclusion}");
        }
        let _ = write!(
            out,
            "&$text[$caseSensitive]={}",
            state.general_search_case.is_sensitive()
        );
    }

    let limit = state.limit_per_page.parse::<u32>().unwrap_or(10);
    let _ = write!(out, "&limit={limit}");

    out
}
