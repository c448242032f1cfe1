use strum::{AsRefStr, Display, EnumIter};

/// Declared accessibility of a type or member.
///
/// Variants are ordered from least to most visible for consumers outside the assembly, so
/// the derived ordering detects reductions of the public surface. `Internal` sorts below
/// `Protected`: outside the assembly `protected` members are reachable through inheritance
/// while `internal` members are not. When friend assemblies are in scope the two are not
/// comparable; use [`Accessibility::is_reduced_to`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter,
)]
pub enum Accessibility {
    /// `private`
    #[strum(serialize = "private")]
    Private,
    /// `private protected`
    #[strum(serialize = "private protected")]
    PrivateProtected,
    /// `internal`
    #[strum(serialize = "internal")]
    Internal,
    /// `protected`
    #[strum(serialize = "protected")]
    Protected,
    /// `protected internal`
    #[strum(serialize = "protected internal")]
    ProtectedInternal,
    /// `public`
    #[default]
    #[strum(serialize = "public")]
    Public,
}

const OUTSIDE_DERIVED: u8 = 0x01;
const OUTSIDE: u8 = 0x02;
const FRIEND_DERIVED: u8 = 0x04;
const FRIEND: u8 = 0x08;

impl Accessibility {
    /// Returns `true` if code outside the declaring assembly can reach the symbol.
    #[must_use]
    pub fn is_externally_visible(self) -> bool {
        matches!(
            self,
            Accessibility::Public | Accessibility::Protected | Accessibility::ProtectedInternal
        )
    }

    /// Returns `true` if the symbol is visible to friend assemblies (`InternalsVisibleTo`).
    #[must_use]
    pub fn is_internally_visible(self) -> bool {
        self.is_externally_visible()
            || matches!(
                self,
                Accessibility::Internal | Accessibility::PrivateProtected
            )
    }

    /// Returns `true` if going from `self` to `other` takes access away from some consumer.
    ///
    /// Without friend assemblies this is the derived ordering. With them, consumers are
    /// split into derived and non-derived code outside the assembly and in friend
    /// assemblies, and any consumer that loses access counts; `internal` to `protected` is
    /// then a reduction for non-derived friend code.
    #[must_use]
    pub fn is_reduced_to(self, other: Accessibility, include_internals: bool) -> bool {
        if include_internals {
            self.consumers() & !other.consumers() != 0
        } else {
            other < self
        }
    }

    fn consumers(self) -> u8 {
        match self {
            Accessibility::Private => 0,
            Accessibility::PrivateProtected => FRIEND_DERIVED,
            Accessibility::Internal => FRIEND_DERIVED | FRIEND,
            Accessibility::Protected => OUTSIDE_DERIVED | FRIEND_DERIVED,
            Accessibility::ProtectedInternal => OUTSIDE_DERIVED | FRIEND_DERIVED | FRIEND,
            Accessibility::Public => OUTSIDE_DERIVED | OUTSIDE | FRIEND_DERIVED | FRIEND,
        }
    }
}
