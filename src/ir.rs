//! Parser Intermediate Representation (IR).
//!
//! This module defines a producer-neutral representation of parser output,
//! designed so that heterogeneous grammar front-ends can feed one downstream
//! toolchain (code generators, analyzers, visualizers) through a single
//! contract.
//!
//! # Design Philosophy
//!
//! The IR keeps two faces of the same document:
//!
//! - **Untyped wire form** ([`Value`]): open maps and arrays, so producers
//!   this project does not control can participate without sharing types.
//! - **Typed model** ([`Document`] and friends): immutable value objects
//!   whose invariants hold by construction.
//!
//! Parsing the wire form into the typed model *is* the validation step: the
//! conformance gate in [`validate`] returns a typed, proven document on
//! success and a classified error on the first violation. Downstream
//! consumers must treat any document that has not passed that gate as
//! untrusted.
//!
//! # Modules
//!
//! - [`document`]: typed value objects (`Document`, `Node`, `Span`, ...)
//! - [`grammar`]: the grammar-declaration source model consumed by the exporter
//! - [`export`]: grammar declarations → IR documents
//! - [`scope_events`]: synthetic `enterScope`/`leaveScope` event synthesis
//! - [`validate`]: the structural conformance gate
//! - [`adapter`]: the contract for external parser adapters
//! - [`value`], [`json`]: the wire value tree and its deterministic writer

pub mod adapter;
pub mod document;
pub mod error;
pub mod export;
pub mod grammar;
pub mod json;
pub mod scope_events;
pub mod validate;
pub mod value;

pub use self::document::{
    Annotation, Document, Node, ScopeEvent, ScopeEventKind, ScopeMode, Span, IR_VERSION,
};
pub use self::error::{IrError, IrErrorKind};
pub use self::value::{Value, ValueMap};
