//! N-way symbol tree mapping.
//!
//! A comparison aligns one left assembly with any number of right assemblies. The mapper
//! tree mirrors the symbol hierarchy (assembly → namespace → type → member, with nested
//! types below their declaring type) and every node holds one left slot plus exactly one
//! slot per right input. A node exists only where at least one side has a symbol at that
//! position.
//!
//! # Construction
//!
//! The root is created eagerly by [`AssemblyMapper::new`]. Each level below is built on
//! first access and cached in the parent node:
//!
//! 1. The left assembly's namespaces are visited breadth-first from the global namespace,
//!    then those of every right assembly in order. Namespaces that declare types, or that
//!    receive forwarded types, get a node.
//! 2. Type forwards are grouped by destination namespace before the walk. A physical
//!    namespace with the same name claims its group; unclaimed groups produce nodes whose
//!    slot for that side is forwards-only, so types of the destination assembly that were
//!    not forwarded never appear as part of the forwarding assembly.
//! 3. Types and members are aligned by the [`crate::symbols::SymbolKey`] computed by the
//!    configured [`crate::symbols::SymbolEqualityComparer`], using the same left-then-rights
//!    order.
//!
//! # Key Components
//!
//! - [`ElementMapper`] - The slots of a single node
//! - [`AssemblyMapper`], [`NamespaceMapper`], [`TypeMapper`], [`MemberMapper`] - Tree levels
//! - [`MapperSettings`] - Comparer and visibility settings
//!
//! # Thread Safety
//!
//! Lazily built levels use [`std::cell::OnceCell`], so a mapper tree is `Send` but not
//! `Sync`. A tree belongs to one comparison pass.

mod assembly;
mod element;
mod index;
mod member;
mod namespace;
mod settings;
mod types;

pub use assembly::AssemblyMapper;
pub use element::{ElementMapper, ElementPair, ElementSide};
pub use member::MemberMapper;
pub use namespace::NamespaceMapper;
pub use settings::MapperSettings;
pub use types::TypeMapper;
