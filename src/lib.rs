// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'source/physical.rs' uses mmap to map a file into memory

//! # apicompat
//!
//! An engine for checking that a new version of a .NET library stays compatible with the
//! API surface of a previous version (or of another build of the same version).
//!
//! Callers hand in symbol trees for a *left* input (the contract) and any number of
//! *right* inputs (the implementations). The engine aligns the trees level by level,
//! runs a set of compatibility rules on every aligned node, filters the resulting
//! differences through a store of known suppressions, and reports what remains.
//!
//! ## Features
//!
//! - **N-way comparison** - One left against many rights in a single mapper tree
//! - **Rule set** - Removed types and members, identity changes, sealed types, reduced
//!   visibility, dropped base types and interfaces, new abstract members
//! - **Suppression files** - XML records with wildcard fields, unused-entry tracking and
//!   regeneration
//! - **Parallel loading** - The inputs of a work item load in parallel and are cached
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use apicompat::prelude::*;
//!
//! let v1 = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)))
//!     .with_namespace(NamespaceSymbol::new("Lib").with_type(TypeSymbol::new("", "Widget", TypeKind::Class)));
//! let v2 = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)));
//!
//! let source = Arc::new(InMemorySource::new());
//! let provider = Arc::new(PreloadedSymbolProvider::new());
//! for (id, symbols) in [("v1", v1), ("v2", v2)] {
//!     source.insert(id, id.as_bytes().to_vec());
//!     provider.insert(id, Arc::new(symbols));
//! }
//!
//! let log = Arc::new(CollectingLog::new());
//! let outcome = validate_assemblies(
//!     &ValidationConfig::default(),
//!     vec![MetadataInformation::new("Lib", "/v1/Lib.dll").with_assembly_id("v1")],
//!     vec![MetadataInformation::new("Lib", "/v2/Lib.dll").with_assembly_id("v2")],
//!     source,
//!     provider,
//!     log.clone(),
//! )?;
//!
//! assert_eq!(outcome.run.reported_count, 1);
//! assert_eq!(log.differences()[0].diagnostic_id, DiagnosticId::TypeMustExist);
//! # Ok::<(), apicompat::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`symbols`] - The symbol model handed in by a [`symbols::SymbolProvider`]
//! - [`source`] - Where the bytes of an input come from
//! - [`mapping`] - Aligns one left tree with many right trees
//! - [`rules`] - Compatibility rules and the [`rules::RuleRunner`]
//! - [`comparer`] - Mapper plus rules in one call
//! - [`suppression`] - The suppression store and its file format
//! - [`runner`] - Work items, loading, filtering and reporting
//! - [`validate_assemblies`] and [`ValidationConfig`] - The one-call driver
//! - [`Error`] and [`Result`] - Error handling
//!
//! The library logs through the [`log`](https://docs.rs/log) facade and never installs a
//! logger itself.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use apicompat::prelude::*;
///
/// let engine = SuppressionEngine::new().with_no_warn("CP0001");
/// assert!(engine.is_suppressed(&Suppression::new("CP0001")));
/// ```
pub mod prelude;

/// Symbol model: assemblies, namespaces, types, members and their identities
///
/// Symbol trees are produced by a [`symbols::SymbolProvider`] from the bytes of an input
/// and are immutable afterwards. Every type and member has a documentation-comment id
/// (`T:Lib.Widget`, `M:Lib.Widget.Foo(System.Int32)`) that is used as the target of
/// differences and suppressions.
pub mod symbols;

/// Byte sources for inputs: memory-mapped files and in-memory buffers
pub mod source;

/// N-way alignment of symbol trees
pub mod mapping;

/// Compatibility rules
pub mod rules;

pub mod comparer;

/// Suppression records, the suppression store and the suppression file format
pub mod suppression;

pub mod runner;

mod config;
mod validate;

pub use config::ValidationConfig;
pub use validate::{validate_assemblies, ValidationOutcome};

/// `apicompat` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `apicompat` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust
/// use apicompat::{runner::{ApiCompatRunnerOptions, ApiCompatRunnerWorkItem}, Error};
///
/// match ApiCompatRunnerWorkItem::new(Vec::new(), Vec::new(), ApiCompatRunnerOptions::default()) {
///     Err(Error::InvalidWorkItem(message)) => println!("Rejected: {}", message),
///     Err(e) => println!("Error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
pub use error::Error;
