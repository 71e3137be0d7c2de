//! Grammar-to-IR export.
//!
//! Walks grammar declarations, emits one node per rule plus one annotation
//! record per rule annotation, and synthesizes scope events from scope-tree
//! metadata. Node ids are `{grammar}::{rule}`, so two grammars may reuse
//! rule names without collision.

use std::collections::HashMap;

use super::document::{Annotation, Document, Node, Span, IR_VERSION};
use super::error::IrError;
use super::grammar::{GrammarDecl, RuleAnnotation};
use super::scope_events;
use super::value::Value;

/// Exports a single grammar declaration. Sugar for a one-element
/// [`export_all`].
pub fn export(grammar: &GrammarDecl, source_id: &str) -> Result<Document, IrError> {
    export_all(std::slice::from_ref(grammar), source_id)
}

/// Exports grammar declarations into one IR document.
///
/// Rule nodes carry the placeholder zero span: this layer does not track
/// source offsets for rule declarations, and producers that have them must
/// supply position data themselves.
pub fn export_all(grammars: &[GrammarDecl], source_id: &str) -> Result<Document, IrError> {
    if grammars.is_empty() {
        return Err(IrError::input_contract("grammars must not be empty"));
    }
    if source_id.trim().is_empty() {
        return Err(IrError::input_contract("sourceId must not be blank"));
    }

    let mut nodes = Vec::new();
    let mut annotations = Vec::new();
    let mut events = Vec::new();

    for grammar in grammars {
        let mut grammar_nodes = Vec::new();
        let mut scope_mode_by_rule_name: HashMap<String, String> = HashMap::new();

        for rule in &grammar.rules {
            let node_id = format!("{}::{}", grammar.name, rule.name);
            grammar_nodes.push(Node::new(node_id.clone(), "RuleDecl", Span::zero()));

            for annotation in &rule.annotations {
                if let RuleAnnotation::ScopeTree { mode } = annotation {
                    // last scope-tree annotation wins when a rule repeats it
                    scope_mode_by_rule_name.insert(rule.name.clone(), mode.trim().to_string());
                }
                annotations.push(Annotation::new(node_id.clone(), annotation.clone()));
            }
        }

        if !scope_mode_by_rule_name.is_empty() {
            let node_values: Vec<Value> = grammar_nodes.iter().map(Node::to_value).collect();
            events.extend(scope_events::emit_synthetic_enter_leave_events_for_rules(
                &grammar.name,
                &scope_mode_by_rule_name,
                &node_values,
            )?);
        }
        nodes.append(&mut grammar_nodes);
    }

    Ok(Document::new(IR_VERSION, source_id, nodes)?
        .with_scope_events(events)
        .with_annotations(annotations))
}
