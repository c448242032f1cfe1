//! Persistent, thread-safe diagnostic suppressions.
//!
//! Compatibility runs over long-lived libraries accumulate accepted breaking changes. A
//! [`Suppression`] records one such decision (diagnostic id plus optional target, left and
//! right input); the [`SuppressionEngine`] holds the set of decisions for a run, answers
//! "is this difference suppressed?" from many threads at once, and persists the set to an
//! XML file.
//!
//! # Matching
//!
//! A stored suppression covers an observed difference when the diagnostic ids and the
//! baseline flag are equal and each of `target`, `left` and `right` is either absent on the
//! stored suppression or equal to the observed value. Text comparison is trimmed and ASCII
//! case-insensitive.
//!
//! | Stored | Observed | Suppressed |
//! |--------|----------|------------|
//! | `CP0002` | `CP0002`, `M:A.Foo`, `l.dll`, `r.dll` | yes |
//! | `CP0002`, `M:A.Foo` | `CP0002`, `M:A.Foo`, `l.dll`, `r.dll` | yes |
//! | `CP0002`, `M:A.Bar` | `CP0002`, `M:A.Foo`, `l.dll`, `r.dll` | no |
//! | `CP0002`, `M:A.Foo` | `CP0002` (no target) | no |
//!
//! # Bookkeeping
//!
//! Every lookup marks the suppressions it matched. After a run,
//! [`SuppressionEngine::unmatched_suppressions`] lists the suppressions that no longer
//! correspond to any difference, and [`SuppressionEngine::write_to_file`] can drop them.
//!
//! # File format
//!
//! An XML document with one `Suppression` element per record:
//!
//! ```xml
//! <Suppressions>
//!   <Suppression>
//!     <DiagnosticId>CP0002</DiagnosticId>
//!     <Target>M:Lib.Widget.Foo(System.Int32)</Target>
//!   </Suppression>
//! </Suppressions>
//! ```
//!
//! Absent fields are omitted, so a file read and written back with `preserve_unused` yields
//! the same set of suppressions.

mod engine;
mod file;
mod record;

pub use engine::SuppressionEngine;
pub use record::Suppression;
