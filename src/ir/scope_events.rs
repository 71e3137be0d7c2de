//! Scope-event synthesis.
//!
//! Derives synthetic `enterScope`/`leaveScope` boundary markers from
//! rule-level scope-tree metadata. The two events per node are emitted
//! back-to-back as a flat balanced pair, not a nesting derived from tree
//! depth. Consumers that need real nesting must derive it from the node
//! tree (`parentId`/`children`) independently.
//!
//! All functions here are pure: fresh output per call, no shared state.

use std::collections::HashMap;

use super::document::{ScopeEvent, ScopeEventKind, ScopeMode, Span};
use super::error::IrError;
use super::value::{Value, ValueMap};

/// Emits balanced scope events from node-id keyed scope modes.
///
/// Iterates `nodes` in order; entries that are not objects, lack a string
/// `id`, have a blank `id`, or are absent from the mapping are skipped
/// without error. A mapped node whose mode is outside `lexical`/`dynamic`
/// fails the whole call; modes never downgrade to a default silently.
pub fn emit_synthetic_enter_leave_events(
    scope_mode_by_node_id: &HashMap<String, String>,
    nodes: &[Value],
) -> Result<Vec<ScopeEvent>, IrError> {
    if scope_mode_by_node_id.is_empty() || nodes.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for item in nodes {
        let Some(node) = item.as_object() else {
            continue;
        };
        let Some(node_id) = node.get("id").and_then(Value::as_str) else {
            continue;
        };
        if node_id.trim().is_empty() {
            continue;
        }
        let Some(mode_text) = scope_mode_by_node_id.get(node_id) else {
            continue;
        };
        let mode = ScopeMode::parse(mode_text)?;
        let span = extract_span(node);
        let scope_id = format!("scope:{node_id}");
        out.push(ScopeEvent::new(ScopeEventKind::Enter, scope_id.clone(), mode, span));
        out.push(ScopeEvent::new(ScopeEventKind::Leave, scope_id, mode, span));
    }
    Ok(out)
}

/// Emits balanced scope events from grammar rule metadata.
///
/// Rule names are turned into node ids as `{grammar_name}::{rule_name}`
/// (trimmed); blank rule-name keys are skipped.
pub fn emit_synthetic_enter_leave_events_for_rules(
    grammar_name: &str,
    scope_mode_by_rule_name: &HashMap<String, String>,
    nodes: &[Value],
) -> Result<Vec<ScopeEvent>, IrError> {
    if grammar_name.trim().is_empty() {
        return Err(IrError::input_contract("grammar name must not be blank"));
    }
    if scope_mode_by_rule_name.is_empty() {
        return Ok(Vec::new());
    }

    let mut scope_mode_by_node_id = HashMap::new();
    for (rule_name, mode) in scope_mode_by_rule_name {
        if rule_name.trim().is_empty() {
            continue;
        }
        let node_id = format!("{}::{}", grammar_name, rule_name.trim());
        scope_mode_by_node_id.insert(node_id, mode.clone());
    }
    emit_synthetic_enter_leave_events(&scope_mode_by_node_id, nodes)
}

/// Like [`emit_synthetic_enter_leave_events_for_rules`], but accepts mode
/// values expressed either as free text or as [`ScopeMode`] enumerants.
pub fn emit_synthetic_enter_leave_events_for_rules_any_mode<S: AsRef<str>>(
    grammar_name: &str,
    scope_mode_by_rule_name: &HashMap<String, S>,
    nodes: &[Value],
) -> Result<Vec<ScopeEvent>, IrError> {
    let normalized = to_scope_mode_by_rule_name(scope_mode_by_rule_name)?;
    emit_synthetic_enter_leave_events_for_rules(grammar_name, &normalized, nodes)
}

/// Normalizes mixed mode values (text or enumerant) into a canonical
/// lowercase rule->mode map, skipping blank rule-name keys.
pub fn to_scope_mode_by_rule_name<S: AsRef<str>>(
    scope_mode_by_rule_name: &HashMap<String, S>,
) -> Result<HashMap<String, String>, IrError> {
    let mut out = HashMap::new();
    for (rule_name, mode) in scope_mode_by_rule_name {
        if rule_name.trim().is_empty() {
            continue;
        }
        let mode = ScopeMode::parse(mode.as_ref())?;
        out.insert(rule_name.trim().to_string(), mode.as_str().to_string());
    }
    Ok(out)
}

fn extract_span(node: &ValueMap) -> Span {
    let Some(span) = node.get("span").and_then(Value::as_object) else {
        return Span::zero();
    };
    let Some(start) = span.get("start").and_then(Value::as_int) else {
        return Span::zero();
    };
    let Some(end) = span.get("end").and_then(Value::as_int) else {
        return Span::zero();
    };
    if start < 0 || end < 0 || start > end {
        return Span::zero();
    }
    Span::new(start as u64, end as u64).unwrap_or_else(|_| Span::zero())
}
