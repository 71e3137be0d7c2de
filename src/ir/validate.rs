//! Conformance validation.
//!
//! The gate every document passes before downstream consumption. Validation
//! parses the untyped wire form into the typed model, so a success returns a
//! [`Document`] whose shape is already proven. Fail-fast: the first broken
//! invariant aborts the whole call, since malformed IR signals a producer
//! bug to be fixed rather than a runtime condition to tolerate.
//!
//! Check order for the wire form: document object; `irVersion`; `source`;
//! `nodes` non-empty; `diagnostics`; per-node structure and id uniqueness;
//! parent/child referential integrity once the full id set is known;
//! `annotations` (target resolution, then the closed name/payload
//! vocabulary); `scopeEvents`.

use std::collections::{HashMap, HashSet};

use super::document::{
    Annotation, Document, Node, ScopeEvent, ScopeEventKind, ScopeMode, Span,
};
use super::error::IrError;
use super::grammar::RuleAnnotation;
use super::value::{Value, ValueMap};

/// Validates a JSON payload and returns the typed document.
pub fn validate_json(payload: &str) -> Result<Document, IrError> {
    let parsed: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| IrError::structural(format!("invalid json payload: {e}")))?;
    validate_value(&Value::from(parsed))
}

/// Validates a wire-form document and returns the typed document.
pub fn validate_value(value: &Value) -> Result<Document, IrError> {
    let payload = value
        .as_object()
        .ok_or_else(|| IrError::structural("document must be an object"))?;

    let ir_version = require_string(payload, "irVersion")?;
    if ir_version.trim().is_empty() {
        return Err(IrError::input_contract("irVersion must not be blank"));
    }
    let source = require_string(payload, "source")?;
    if source.trim().is_empty() {
        return Err(IrError::input_contract("source must not be blank"));
    }
    let raw_nodes = require_array(payload, "nodes")?;
    if raw_nodes.is_empty() {
        return Err(IrError::input_contract("nodes must not be empty"));
    }
    let diagnostics = require_array(payload, "diagnostics")?.to_vec();

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    let mut node_ids = HashSet::new();
    for item in raw_nodes {
        let node = parse_node(item)?;
        if !node_ids.insert(node.id().to_string()) {
            return Err(IrError::referential(format!(
                "duplicate node id: {}",
                node.id()
            )));
        }
        nodes.push(node);
    }

    check_node_links(&nodes)?;

    let mut annotations = Vec::new();
    if let Some(raw) = payload.get("annotations") {
        let list = raw
            .as_array()
            .ok_or_else(|| IrError::structural("invalid array key: annotations"))?;
        for item in list {
            annotations.push(parse_annotation(item, &node_ids)?);
        }
    }

    let mut scope_events = Vec::new();
    if let Some(raw) = payload.get("scopeEvents") {
        let list = raw
            .as_array()
            .ok_or_else(|| IrError::structural("invalid array key: scopeEvents"))?;
        for item in list {
            scope_events.push(parse_scope_event(item)?);
        }
    }

    Ok(Document::new(ir_version, source, nodes)?
        .with_diagnostics(diagnostics)
        .with_scope_events(scope_events)
        .with_annotations(annotations))
}

/// Re-checks the referential invariants of an already-typed document:
/// node-id uniqueness, bidirectional parent/child links, children
/// uniqueness, and annotation targets. Structural and vocabulary checks are
/// discharged by the types. Side-effect free and idempotent.
pub fn validate(document: &Document) -> Result<(), IrError> {
    let mut node_ids = HashSet::new();
    for node in document.nodes() {
        if !node_ids.insert(node.id().to_string()) {
            return Err(IrError::referential(format!(
                "duplicate node id: {}",
                node.id()
            )));
        }
    }

    check_node_links(document.nodes())?;

    for annotation in document.annotations() {
        if !node_ids.contains(annotation.target_id()) {
            return Err(IrError::referential(format!(
                "annotation targetId does not reference a node: {}",
                annotation.target_id()
            )));
        }
    }
    Ok(())
}

fn check_node_links(nodes: &[Node]) -> Result<(), IrError> {
    let by_id: HashMap<&str, &Node> = nodes.iter().map(|n| (n.id(), n)).collect();

    for node in nodes {
        if let Some(parent_id) = node.parent_id() {
            let parent = by_id.get(parent_id).ok_or_else(|| {
                IrError::referential(format!(
                    "parentId does not reference a node: {} (node {})",
                    parent_id,
                    node.id()
                ))
            })?;
            if !parent.children().iter().any(|c| c.as_str() == node.id()) {
                return Err(IrError::referential(format!(
                    "parent {} does not list {} in children",
                    parent_id,
                    node.id()
                )));
            }
        }

        let mut seen_children = HashSet::new();
        for child_id in node.children() {
            if child_id.trim().is_empty() {
                return Err(IrError::structural(format!(
                    "children entries must be non-blank strings (node {})",
                    node.id()
                )));
            }
            if !seen_children.insert(child_id.as_str()) {
                return Err(IrError::referential(format!(
                    "duplicate child id: {} (node {})",
                    child_id,
                    node.id()
                )));
            }
            if !by_id.contains_key(child_id.as_str()) {
                return Err(IrError::referential(format!(
                    "child id does not reference a node: {} (node {})",
                    child_id,
                    node.id()
                )));
            }
        }
    }
    Ok(())
}

fn parse_node(item: &Value) -> Result<Node, IrError> {
    let obj = item
        .as_object()
        .ok_or_else(|| IrError::structural("node must be an object"))?;

    let id = require_string(obj, "id")?;
    let kind = require_string(obj, "kind")?;
    let span = parse_span(require_object(obj, "span")?)?;

    let mut node = Node::new(id, kind, span);
    if let Some(raw) = obj.get("parentId") {
        let parent_id = raw
            .as_str()
            .ok_or_else(|| IrError::structural("invalid string key: parentId"))?;
        node = node.with_parent_id(parent_id);
    }
    if let Some(raw) = obj.get("children") {
        let list = raw
            .as_array()
            .ok_or_else(|| IrError::structural("invalid array key: children"))?;
        let mut children = Vec::with_capacity(list.len());
        for entry in list {
            let child = entry
                .as_str()
                .ok_or_else(|| IrError::structural("children entries must be strings"))?;
            children.push(child.to_string());
        }
        node = node.with_children(children);
    }
    Ok(node)
}

fn parse_span(obj: &ValueMap) -> Result<Span, IrError> {
    let start = require_span_offset(obj, "start")?;
    let end = require_span_offset(obj, "end")?;
    Span::new(start, end)
}

fn require_span_offset(obj: &ValueMap, key: &str) -> Result<u64, IrError> {
    let value = obj
        .get(key)
        .and_then(Value::as_int)
        .ok_or_else(|| IrError::structural(format!("missing or invalid number key: {key}")))?;
    if value < 0 {
        return Err(IrError::structural(format!(
            "span.{key} must be a non-negative integer"
        )));
    }
    Ok(value as u64)
}

fn parse_annotation(item: &Value, node_ids: &HashSet<String>) -> Result<Annotation, IrError> {
    let obj = item
        .as_object()
        .ok_or_else(|| IrError::structural("annotation must be an object"))?;

    let target_id = require_string(obj, "targetId")?;
    if !node_ids.contains(target_id) {
        return Err(IrError::referential(format!(
            "annotation targetId does not reference a node: {target_id}"
        )));
    }

    let name = require_string(obj, "name")?;
    let payload = require_object(obj, "payload")?;
    let fact = match name {
        "root" => RuleAnnotation::Root,
        "mapping" => RuleAnnotation::Mapping {
            class_name: require_string(payload, "className")?.to_string(),
            params: require_string_list(payload, "params")?,
        },
        "whitespace" => RuleAnnotation::Whitespace {
            style: Some(require_string(payload, "style")?.to_string()),
        },
        "interleave" => RuleAnnotation::Interleave {
            profile: require_string(payload, "profile")?.to_string(),
        },
        "backref" => RuleAnnotation::Backref {
            name: require_string(payload, "name")?.to_string(),
        },
        "scope-tree" => RuleAnnotation::ScopeTree {
            mode: require_string(payload, "mode")?.to_string(),
        },
        "left-assoc" => RuleAnnotation::LeftAssoc,
        "right-assoc" => RuleAnnotation::RightAssoc,
        "precedence" => RuleAnnotation::Precedence {
            level: payload
                .get("level")
                .and_then(Value::as_int)
                .ok_or_else(|| IrError::structural("missing or invalid number key: level"))?,
        },
        "simple" => RuleAnnotation::Simple {
            name: require_string(payload, "name")?.to_string(),
        },
        other => {
            return Err(IrError::domain(format!(
                "unsupported annotation name: {other}"
            )))
        }
    };
    Ok(Annotation::new(target_id, fact))
}

fn parse_scope_event(item: &Value) -> Result<ScopeEvent, IrError> {
    let obj = item
        .as_object()
        .ok_or_else(|| IrError::structural("scope event must be an object"))?;

    let kind = ScopeEventKind::parse(require_string(obj, "event")?)?;
    let scope_id = require_string(obj, "scopeId")?;
    let mode = ScopeMode::parse(require_string(obj, "scopeMode")?)?;
    let span = parse_span(require_object(obj, "span")?)?;
    Ok(ScopeEvent::new(kind, scope_id, mode, span))
}

fn require_string<'a>(obj: &'a ValueMap, key: &str) -> Result<&'a str, IrError> {
    match obj.get(key) {
        None => Err(IrError::input_contract(format!(
            "missing required key: {key}"
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(IrError::structural(format!("invalid string key: {key}"))),
    }
}

fn require_array<'a>(obj: &'a ValueMap, key: &str) -> Result<&'a [Value], IrError> {
    match obj.get(key) {
        None => Err(IrError::input_contract(format!(
            "missing required key: {key}"
        ))),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(IrError::structural(format!("invalid array key: {key}"))),
    }
}

fn require_object<'a>(obj: &'a ValueMap, key: &str) -> Result<&'a ValueMap, IrError> {
    match obj.get(key) {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(IrError::structural(format!(
            "missing or invalid object key: {key}"
        ))),
    }
}

fn require_string_list(obj: &ValueMap, key: &str) -> Result<Vec<String>, IrError> {
    let list = require_array(obj, key)?;
    let mut out = Vec::with_capacity(list.len());
    for entry in list {
        let text = entry.as_str().ok_or_else(|| {
            IrError::structural(format!("entries of {key} must be strings"))
        })?;
        out.push(text.to_string());
    }
    Ok(out)
}
