//! # parser-ir
//!
//! A producer-neutral intermediate representation for grammar front-ends.
//!
//! Heterogeneous parsers, generated or hand-written, describe their output
//! through one document shape (rule nodes, spans, annotations, scope events)
//! so a single downstream toolchain can consume all of them. See the [`ir`]
//! module for the document model, the grammar exporter, the scope-event
//! synthesizer, and the conformance validator.

pub mod ir;
