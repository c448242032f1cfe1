use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumIter};

use crate::symbols::{Accessibility, TypeSymbol};

/// The kind of a type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum MemberKind {
    /// A method, including operators and accessors.
    Method,
    /// An instance or static constructor.
    Constructor,
    /// A property or indexer.
    Property,
    /// A field or enum value.
    Field,
    /// An event.
    Event,
}

impl MemberKind {
    /// The documentation-comment id prefix for this kind.
    #[must_use]
    pub fn doc_id_prefix(self) -> &'static str {
        match self {
            MemberKind::Method | MemberKind::Constructor => "M:",
            MemberKind::Property => "P:",
            MemberKind::Field => "F:",
            MemberKind::Event => "E:",
        }
    }
}

bitflags! {
    /// Modifiers of a member that matter for compatibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u16 {
        /// `static`
        const STATIC = 0x0001;
        /// `abstract`, also set for interface members without a default implementation
        const ABSTRACT = 0x0002;
        /// `virtual`
        const VIRTUAL = 0x0004;
        /// `sealed` override
        const SEALED = 0x0008;
        /// `override`
        const OVERRIDE = 0x0010;
        /// `readonly` field or member
        const READONLY = 0x0020;
        /// Explicit interface implementation
        const EXPLICIT_IMPLEMENTATION = 0x0040;
    }
}

/// A parameter of a method, constructor or indexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterSymbol {
    /// Parameter name as declared.
    pub name: String,
    /// Fully qualified parameter type in documentation-id form (e.g. `System.Int32`).
    pub type_name: String,
}

impl ParameterSymbol {
    /// Create a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A member of a type.
///
/// Constructors use the metadata names `.ctor` and `.cctor`; the documentation id replaces
/// the dots with `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    /// Metadata name of the member.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
    /// Declared accessibility.
    pub accessibility: Accessibility,
    /// Modifier flags.
    pub flags: MemberFlags,
    /// Parameters, in declaration order.
    pub parameters: Vec<ParameterSymbol>,
    /// Return, field, property or event type; `None` for `void` and constructors.
    pub return_type: Option<String>,
    /// Number of generic method parameters.
    pub generic_arity: u32,
}

impl MemberSymbol {
    /// Create a public member without parameters.
    ///
    /// # Arguments
    ///
    /// * `name` - Metadata name of the member
    /// * `kind` - Kind of the member
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            accessibility: Accessibility::Public,
            flags: MemberFlags::empty(),
            parameters: Vec::new(),
            return_type: None,
            generic_arity: 0,
        }
    }

    /// Shorthand for [`MemberSymbol::new`] with [`MemberKind::Method`].
    #[must_use]
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Method)
    }

    /// Shorthand for an instance constructor.
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(".ctor", MemberKind::Constructor)
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Adds modifier flags.
    #[must_use]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterSymbol::new(name, type_name));
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Sets the generic arity.
    #[must_use]
    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    /// Returns `true` for `static` members.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    /// Returns `true` for `abstract` members.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MemberFlags::ABSTRACT)
    }

    /// The member part of the documentation id, without the kind prefix or containing type.
    ///
    /// Overloads differ in this string, so it doubles as the member's identity within a type.
    ///
    /// # Returns
    ///
    /// For example `Foo``1(System.Int32,System.String)` or `#ctor`.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut signature = self.name.replace('.', "#");
        if self.generic_arity > 0 {
            signature.push_str("``");
            signature.push_str(&self.generic_arity.to_string());
        }

        let takes_parameters = matches!(
            self.kind,
            MemberKind::Method | MemberKind::Constructor | MemberKind::Property
        );
        if takes_parameters && !self.parameters.is_empty() {
            signature.push('(');
            for (index, parameter) in self.parameters.iter().enumerate() {
                if index > 0 {
                    signature.push(',');
                }
                signature.push_str(&parameter.type_name);
            }
            signature.push(')');
        }

        signature
    }

    /// The documentation-comment id of this member in the given containing type.
    ///
    /// # Arguments
    ///
    /// * `containing` - The type that declares this member
    #[must_use]
    pub fn doc_id(&self, containing: &TypeSymbol) -> String {
        format!(
            "{}{}.{}",
            self.kind.doc_id_prefix(),
            containing.full_name(),
            self.signature()
        )
    }
}
