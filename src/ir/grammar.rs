//! Grammar-declaration source model.
//!
//! The IR layer consumes the *results* of a grammar front-end: rule names
//! and the annotation literals attached to them. This module is that input
//! shape; it carries no rule bodies and no parsing logic. Declarations also
//! deserialize from YAML or JSON via serde's external tagging:
//!
//! ```yaml
//! - name: Tiny
//!   rules:
//!     - name: Start
//!       annotations:
//!         - root
//!         - mapping: { className: RootNode, params: [v] }
//!         - scope-tree: { mode: lexical }
//! ```

use serde::{Deserialize, Serialize};

/// One grammar declaration: a name and its rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarDecl {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleDecl>,
}

impl GrammarDecl {
    pub fn new(name: impl Into<String>, rules: Vec<RuleDecl>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// One rule declaration: a name and its annotation literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDecl {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<RuleAnnotation>,
}

impl RuleDecl {
    pub fn new(name: impl Into<String>, annotations: Vec<RuleAnnotation>) -> Self {
        Self {
            name: name.into(),
            annotations,
        }
    }
}

/// The closed annotation vocabulary.
///
/// Exhaustive matching over this union replaces a run-time
/// check-and-reject chain: adding a variant is a compile-time-enforced
/// change everywhere annotations are consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleAnnotation {
    Root,
    #[serde(rename_all = "camelCase")]
    Mapping {
        class_name: String,
        #[serde(default)]
        params: Vec<String>,
    },
    Whitespace {
        #[serde(default)]
        style: Option<String>,
    },
    Interleave {
        profile: String,
    },
    Backref {
        name: String,
    },
    ScopeTree {
        mode: String,
    },
    LeftAssoc,
    RightAssoc,
    Precedence {
        level: i64,
    },
    Simple {
        name: String,
    },
}

impl RuleAnnotation {
    /// Wire name of this annotation variant.
    pub fn name(&self) -> &'static str {
        match self {
            RuleAnnotation::Root => "root",
            RuleAnnotation::Mapping { .. } => "mapping",
            RuleAnnotation::Whitespace { .. } => "whitespace",
            RuleAnnotation::Interleave { .. } => "interleave",
            RuleAnnotation::Backref { .. } => "backref",
            RuleAnnotation::ScopeTree { .. } => "scope-tree",
            RuleAnnotation::LeftAssoc => "left-assoc",
            RuleAnnotation::RightAssoc => "right-assoc",
            RuleAnnotation::Precedence { .. } => "precedence",
            RuleAnnotation::Simple { .. } => "simple",
        }
    }
}
