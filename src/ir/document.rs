//! Typed document model.
//!
//! Value objects constructed once per export or adapter call and never
//! mutated afterwards: fields are private, constructors take ownership of
//! their inputs, and no accessor hands out anything mutable. The same
//! document may therefore be read concurrently without coordination.
//!
//! The wire form is produced by the `to_value` methods; the reverse
//! direction, wire form into this model, is the validator's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::IrError;
use super::grammar::RuleAnnotation;
use super::value::{Value, ValueMap};

/// Version string stamped into documents produced by this crate.
pub const IR_VERSION: &str = "1.0";

/// An integer offset pair into source text, `start <= end`.
///
/// Rule nodes emitted by the exporter carry the zero span: true offsets are
/// a producer responsibility and are passed through untouched when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: u64,
    end: u64,
}

impl Span {
    pub fn new(start: u64, end: u64) -> Result<Self, IrError> {
        if start > end {
            return Err(IrError::structural(format!(
                "span.start <= span.end required, got {start}..{end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The placeholder span `{0, 0}`.
    pub fn zero() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn to_value(&self) -> Value {
        let mut out = ValueMap::new();
        out.insert("start", self.start as i64);
        out.insert("end", self.end as i64);
        Value::Object(out)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One grammar rule's entry in the IR.
///
/// Node ids are unique across a whole document. That uniqueness, like the
/// bidirectionality of parent/child links, is a contract checked by the
/// validator, not derived at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    kind: String,
    span: Span,
    parent_id: Option<String>,
    children: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, span: Span) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            span,
            parent_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn to_value(&self) -> Value {
        let mut out = ValueMap::new();
        out.insert("id", self.id.as_str());
        out.insert("kind", self.kind.as_str());
        out.insert("span", self.span.to_value());
        if let Some(parent_id) = &self.parent_id {
            out.insert("parentId", parent_id.as_str());
        }
        if !self.children.is_empty() {
            let children: Vec<Value> = self
                .children
                .iter()
                .map(|c| Value::string(c.as_str()))
                .collect();
            out.insert("children", children);
        }
        Value::Object(out)
    }
}

/// A rule-scoped metadata fact, attached to a node by id reference.
///
/// Annotations are not nested inside nodes; they reference them, so one
/// node can carry many facts and facts can be attached late.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    target_id: String,
    fact: RuleAnnotation,
}

impl Annotation {
    pub fn new(target_id: impl Into<String>, fact: RuleAnnotation) -> Self {
        Self {
            target_id: target_id.into(),
            fact,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn fact(&self) -> &RuleAnnotation {
        &self.fact
    }

    pub fn name(&self) -> &'static str {
        self.fact.name()
    }

    pub fn to_value(&self) -> Value {
        let mut payload = ValueMap::new();
        match &self.fact {
            RuleAnnotation::Root => {
                payload.insert("enabled", true);
            }
            RuleAnnotation::Mapping { class_name, params } => {
                payload.insert("className", class_name.as_str());
                let params: Vec<Value> =
                    params.iter().map(|p| Value::string(p.as_str())).collect();
                payload.insert("params", params);
            }
            RuleAnnotation::Whitespace { style } => {
                payload.insert("style", style.as_deref().unwrap_or("javaStyle"));
            }
            RuleAnnotation::Interleave { profile } => {
                payload.insert("profile", profile.as_str());
            }
            RuleAnnotation::Backref { name } => {
                payload.insert("name", name.as_str());
            }
            RuleAnnotation::ScopeTree { mode } => {
                payload.insert("mode", mode.as_str());
            }
            RuleAnnotation::LeftAssoc => {
                payload.insert("assoc", "left");
            }
            RuleAnnotation::RightAssoc => {
                payload.insert("assoc", "right");
            }
            RuleAnnotation::Precedence { level } => {
                payload.insert("level", *level);
            }
            RuleAnnotation::Simple { name } => {
                payload.insert("name", name.as_str());
            }
        }

        let mut out = ValueMap::new();
        out.insert("targetId", self.target_id.as_str());
        out.insert("name", self.fact.name());
        out.insert("payload", payload);
        Value::Object(out)
    }
}

/// Scoping discipline of a rule's bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    Lexical,
    Dynamic,
}

impl ScopeMode {
    /// Parses a producer-supplied mode, trimming and lowercasing first.
    /// Anything outside `lexical`/`dynamic` fails; there is no default.
    pub fn parse(text: &str) -> Result<Self, IrError> {
        match text.trim().to_lowercase().as_str() {
            "lexical" => Ok(ScopeMode::Lexical),
            "dynamic" => Ok(ScopeMode::Dynamic),
            _ => Err(IrError::domain(format!("unsupported scope mode: {text}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeMode::Lexical => "lexical",
            ScopeMode::Dynamic => "dynamic",
        }
    }
}

impl AsRef<str> for ScopeMode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a scope event opens or closes a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeEventKind {
    Enter,
    Leave,
}

impl ScopeEventKind {
    pub fn parse(text: &str) -> Result<Self, IrError> {
        match text {
            "enterScope" => Ok(ScopeEventKind::Enter),
            "leaveScope" => Ok(ScopeEventKind::Leave),
            _ => Err(IrError::domain(format!("unsupported scope event: {text}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeEventKind::Enter => "enterScope",
            ScopeEventKind::Leave => "leaveScope",
        }
    }
}

impl fmt::Display for ScopeEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic scope boundary marker derived from rule metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeEvent {
    kind: ScopeEventKind,
    scope_id: String,
    mode: ScopeMode,
    span: Span,
}

impl ScopeEvent {
    pub fn new(
        kind: ScopeEventKind,
        scope_id: impl Into<String>,
        mode: ScopeMode,
        span: Span,
    ) -> Self {
        Self {
            kind,
            scope_id: scope_id.into(),
            mode,
            span,
        }
    }

    pub fn kind(&self) -> ScopeEventKind {
        self.kind
    }

    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn to_value(&self) -> Value {
        let mut out = ValueMap::new();
        out.insert("event", self.kind.as_str());
        out.insert("scopeId", self.scope_id.as_str());
        out.insert("scopeMode", self.mode.as_str());
        out.insert("span", self.span.to_value());
        Value::Object(out)
    }
}

/// A versioned IR document.
///
/// Construction enforces the basic input contract (non-blank version and
/// source, at least one node); referential consistency across nodes and
/// annotations is the validator's gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    ir_version: String,
    source: String,
    nodes: Vec<Node>,
    diagnostics: Vec<Value>,
    scope_events: Vec<ScopeEvent>,
    annotations: Vec<Annotation>,
}

impl Document {
    pub fn new(
        ir_version: impl Into<String>,
        source: impl Into<String>,
        nodes: Vec<Node>,
    ) -> Result<Self, IrError> {
        let ir_version = ir_version.into();
        if ir_version.trim().is_empty() {
            return Err(IrError::input_contract("irVersion must not be blank"));
        }
        let source = source.into();
        if source.trim().is_empty() {
            return Err(IrError::input_contract("source must not be blank"));
        }
        if nodes.is_empty() {
            return Err(IrError::input_contract("nodes must not be empty"));
        }
        Ok(Self {
            ir_version,
            source,
            nodes,
            diagnostics: Vec::new(),
            scope_events: Vec::new(),
            annotations: Vec::new(),
        })
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Value>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_scope_events(mut self, scope_events: Vec<ScopeEvent>) -> Self {
        self.scope_events = scope_events;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn ir_version(&self) -> &str {
        &self.ir_version
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn diagnostics(&self) -> &[Value] {
        &self.diagnostics
    }

    pub fn scope_events(&self) -> &[ScopeEvent] {
        &self.scope_events
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Wire form of the document. `scopeEvents` and `annotations` are
    /// omitted entirely when empty; `diagnostics` is always present.
    pub fn to_value(&self) -> Value {
        let mut out = ValueMap::new();
        out.insert("irVersion", self.ir_version.as_str());
        out.insert("source", self.source.as_str());
        let nodes: Vec<Value> = self.nodes.iter().map(Node::to_value).collect();
        out.insert("nodes", nodes);
        out.insert("diagnostics", self.diagnostics.clone());
        if !self.scope_events.is_empty() {
            let events: Vec<Value> = self.scope_events.iter().map(ScopeEvent::to_value).collect();
            out.insert("scopeEvents", events);
        }
        if !self.annotations.is_empty() {
            let annotations: Vec<Value> =
                self.annotations.iter().map(Annotation::to_value).collect();
            out.insert("annotations", annotations);
        }
        Value::Object(out)
    }

    /// Minimal-JSON text of the wire form.
    pub fn to_json(&self) -> String {
        super::json::to_json(&self.to_value())
    }
}
