//! Error types for IR construction and validation.

use std::fmt;

/// Classifies a violation so callers can branch without matching on message
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrErrorKind {
    /// A required input was absent, blank, or empty.
    InputContract,
    /// A field was present but had the wrong shape.
    StructuralType,
    /// An id reference was dangling, duplicated, or one-directional.
    Referential,
    /// A value fell outside a closed vocabulary.
    Domain,
}

/// A single fail-fast violation.
///
/// Every operation in this crate aborts at the first violation; there is no
/// accumulation and no warning channel. The message names the offending
/// field or id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrError {
    kind: IrErrorKind,
    message: String,
}

impl IrError {
    pub fn new(kind: IrErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn input_contract(message: impl Into<String>) -> Self {
        Self::new(IrErrorKind::InputContract, message)
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(IrErrorKind::StructuralType, message)
    }

    pub fn referential(message: impl Into<String>) -> Self {
        Self::new(IrErrorKind::Referential, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(IrErrorKind::Domain, message)
    }

    pub fn kind(&self) -> IrErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for IrError {}
