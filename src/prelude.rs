//! # apicompat Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the apicompat library. Import this module to get quick access to the essential
//! types for comparing assemblies.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all apicompat operations
pub use crate::Error;

/// The result type used throughout apicompat
pub use crate::Result;

/// Configuration of a validation run
pub use crate::ValidationConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// One-call validation and its summary
pub use crate::{validate_assemblies, ValidationOutcome};

/// Work-item runner and its parts
pub use crate::runner::{
    ApiCompatRunner, ApiCompatRunnerOptions, ApiCompatRunnerWorkItem, AssemblyLoader, RunResult,
};

/// Mapper plus rules in one call
pub use crate::comparer::ApiComparer;

// ================================================================================================
// Symbol Model
// ================================================================================================

/// Assemblies, namespaces, types and members
pub use crate::symbols::{
    Accessibility, AssemblyIdentity, AssemblySymbol, AssemblySymbolRc, AssemblyVersion,
    MemberFlags, MemberKind, MemberSymbol, NamespaceSymbol, ParameterSymbol, TypeFlags,
    TypeForward, TypeKind, TypeSymbol,
};

/// Inputs and how their symbols are produced
pub use crate::symbols::{
    ElementContainer, MetadataInformation, PreloadedSymbolProvider, SymbolProvider,
};

/// Byte sources
pub use crate::source::{FileSystemSource, InMemorySource, ModuleSource};

// ================================================================================================
// Mapping and Rules
// ================================================================================================

/// Mapper configuration
pub use crate::mapping::MapperSettings;

/// Differences and rule configuration
pub use crate::rules::{
    CompatDifference, ComparisonOptions, DiagnosticId, DifferenceType, Rule, RuleSettings,
};

// ================================================================================================
// Suppressions and Reporting
// ================================================================================================

/// Suppression records and the store
pub use crate::suppression::{Suppression, SuppressionEngine};

/// Report sinks
pub use crate::runner::{
    CollectingLog, CompatLog, LogEntry, LogFacade, SuppressionGeneratingLog,
};
