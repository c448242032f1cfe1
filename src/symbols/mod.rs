//! Symbol model consumed by the mapper and the comparison rules.
//!
//! The engine never parses binaries. A [`SymbolProvider`] turns module bytes into an owned
//! tree of [`AssemblySymbol`] → [`NamespaceSymbol`] → [`TypeSymbol`] → [`MemberSymbol`], plus
//! the assembly's [`TypeForward`] records. Everything a rule needs to judge compatibility
//! (accessibility, modifiers, inheritance chain, signatures) is materialized on the symbols,
//! so comparisons never reach back into a provider.
//!
//! # Key Components
//!
//! - [`MetadataInformation`] - Where an input came from; its `assembly_id` is what
//!   suppressions refer to
//! - [`ElementContainer`] - A borrowed symbol paired with its input
//! - [`SymbolEqualityComparer`] - Computes the [`SymbolKey`] that aligns left and right symbols
//! - [`AssemblyIdentity`] - Binding identity with display-name parsing
//! - [`SymbolProvider`] / [`PreloadedSymbolProvider`] - The loading seam
//!
//! # Documentation ids
//!
//! Types and members are identified in diagnostics by documentation-comment ids, which also
//! serve as the `Target` of suppressions:
//!
//! | Kind | Example |
//! |------|---------|
//! | Type | `T:Lib.Widget` |
//! | Method | `M:Lib.Widget.Foo(System.Int32)` |
//! | Constructor | `M:Lib.Widget.#ctor` |
//! | Property | `P:Lib.Widget.Item(System.Int32)` |
//! | Field | `F:Lib.Widget.Count` |
//! | Event | `E:Lib.Widget.Changed` |
//!
//! # Examples
//!
//! ```rust
//! use apicompat::symbols::*;
//!
//! let assembly = AssemblySymbol::new(AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)))
//!     .with_namespace(
//!         NamespaceSymbol::new("Lib").with_type(
//!             TypeSymbol::new("Lib", "Widget", TypeKind::Class)
//!                 .with_member(MemberSymbol::method("Foo").with_parameter("value", "System.Int32")),
//!         ),
//!     );
//!
//! let widget = &assembly.global_namespace.namespaces[0].types[0];
//! assert_eq!(widget.members[0].doc_id(widget), "M:Lib.Widget.Foo(System.Int32)");
//! ```

mod accessibility;
mod assembly;
mod comparer;
mod identity;
mod member;
mod metadata;
mod namespace;
mod provider;
mod typedef;

pub use accessibility::Accessibility;
pub use assembly::{AssemblySymbol, AssemblySymbolRc, TypeForward};
pub use comparer::{SymbolEqualityComparer, SymbolKey};
pub use identity::{AssemblyIdentity, AssemblyVersion};
pub use member::{MemberFlags, MemberKind, MemberSymbol, ParameterSymbol};
pub use metadata::{ElementContainer, MetadataInformation};
pub use namespace::NamespaceSymbol;
pub use provider::{PreloadedSymbolProvider, SymbolProvider};
pub use typedef::{TypeFlags, TypeKind, TypeSymbol};
