//! Pluggable parser adapters.
//!
//! Parsers not generated from grammar declarations participate in the same
//! pipeline by implementing [`IrAdapter`]: describe capabilities, then turn
//! a parse request into an IR document. The crate does not run the
//! conformance gate on adapter output automatically; callers pass the
//! returned document through [`super::validate`] before trusting it.

use std::collections::{BTreeSet, HashMap};

use super::document::Document;
use super::error::IrError;
use super::value::Value;

/// Declared capability flags for parser IR adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdapterFeature {
    Interleave,
    Backreference,
    ScopeTree,
    Tokens,
    Trivia,
    ScopeEvents,
    Annotations,
    Diagnostics,
}

/// Capability descriptor for an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterMetadata {
    adapter_id: String,
    supported_ir_versions: BTreeSet<String>,
    supported_features: BTreeSet<AdapterFeature>,
}

impl AdapterMetadata {
    pub fn new(
        adapter_id: impl Into<String>,
        supported_ir_versions: BTreeSet<String>,
        supported_features: BTreeSet<AdapterFeature>,
    ) -> Result<Self, IrError> {
        let adapter_id = adapter_id.into();
        if adapter_id.trim().is_empty() {
            return Err(IrError::input_contract("adapterId must not be blank"));
        }
        if supported_ir_versions.is_empty() {
            return Err(IrError::input_contract(
                "supportedIrVersions must not be empty",
            ));
        }
        Ok(Self {
            adapter_id,
            supported_ir_versions,
            supported_features,
        })
    }

    pub fn adapter_id(&self) -> &str {
        &self.adapter_id
    }

    pub fn supported_ir_versions(&self) -> &BTreeSet<String> {
        &self.supported_ir_versions
    }

    pub fn supported_features(&self) -> &BTreeSet<AdapterFeature> {
        &self.supported_features
    }

    pub fn supports_ir_version(&self, version: &str) -> bool {
        self.supported_ir_versions.contains(version)
    }

    pub fn supports_feature(&self, feature: AdapterFeature) -> bool {
        self.supported_features.contains(&feature)
    }
}

/// Input contract for adapters.
///
/// `content` is required but may be empty text; `options` is owned by the
/// request, so no caller alias survives construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseRequest {
    source_id: String,
    content: String,
    options: HashMap<String, Value>,
}

impl ParseRequest {
    pub fn new(source_id: impl Into<String>, content: impl Into<String>) -> Result<Self, IrError> {
        let source_id = source_id.into();
        if source_id.trim().is_empty() {
            return Err(IrError::input_contract("sourceId must not be blank"));
        }
        Ok(Self {
            source_id,
            content: content.into(),
            options: HashMap::new(),
        })
    }

    pub fn with_options(mut self, options: HashMap<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }
}

/// Contract for integrating parsers not generated from grammar declarations
/// into the same IR pipeline.
pub trait IrAdapter {
    /// Static capability description.
    fn metadata(&self) -> AdapterMetadata;

    /// Parses the request into an IR document.
    fn parse_to_ir(&self, request: &ParseRequest) -> Result<Document, IrError>;
}
