use std::{
    fmt,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

/// Describes where an input binary came from.
///
/// `assembly_id` is an opaque string chosen by the caller (typically a package-relative path
/// such as `lib/net8.0/Lib.dll`); it is what suppressions refer to in their `Left` and
/// `Right` fields. Equality and hashing use the name, id and path; references and the
/// display string are descriptive only.
#[derive(Debug, Clone)]
pub struct MetadataInformation {
    /// Simple assembly name.
    pub assembly_name: String,
    /// Opaque identifier used for suppressions and reporting.
    pub assembly_id: String,
    /// Absolute path of the binary.
    pub full_path: PathBuf,
    /// Paths of reference assemblies used when resolving references.
    pub references: Vec<PathBuf>,
    display_string: Option<String>,
}

impl MetadataInformation {
    /// Create metadata for a binary; the assembly id defaults to the path.
    ///
    /// # Arguments
    ///
    /// * `assembly_name` - Simple name of the assembly
    /// * `full_path` - Location of the binary
    #[must_use]
    pub fn new(assembly_name: impl Into<String>, full_path: impl AsRef<Path>) -> Self {
        let full_path = full_path.as_ref().to_path_buf();
        Self {
            assembly_name: assembly_name.into(),
            assembly_id: full_path.display().to_string(),
            full_path,
            references: Vec::new(),
            display_string: None,
        }
    }

    /// Sets the assembly id.
    #[must_use]
    pub fn with_assembly_id(mut self, assembly_id: impl Into<String>) -> Self {
        self.assembly_id = assembly_id.into();
        self
    }

    /// Sets the reference assembly paths.
    #[must_use]
    pub fn with_references(mut self, references: Vec<PathBuf>) -> Self {
        self.references = references;
        self
    }

    /// Overrides the string used when this input is named in messages.
    #[must_use]
    pub fn with_display_string(mut self, display: impl Into<String>) -> Self {
        self.display_string = Some(display.into());
        self
    }

    /// The string used when this input is named in messages; defaults to the assembly id.
    #[must_use]
    pub fn display_string(&self) -> &str {
        self.display_string.as_deref().unwrap_or(&self.assembly_id)
    }
}

impl PartialEq for MetadataInformation {
    fn eq(&self, other: &Self) -> bool {
        self.assembly_name == other.assembly_name
            && self.assembly_id == other.assembly_id
            && self.full_path == other.full_path
    }
}

impl Eq for MetadataInformation {}

impl Hash for MetadataInformation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.assembly_name.hash(state);
        self.assembly_id.hash(state);
        self.full_path.hash(state);
    }
}

impl fmt::Display for MetadataInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

/// A resolved symbol-tree element paired with the input it was loaded from.
#[derive(Debug)]
pub struct ElementContainer<'a, T> {
    /// The symbol.
    pub element: &'a T,
    /// The input the symbol belongs to.
    pub metadata: &'a MetadataInformation,
}

impl<'a, T> ElementContainer<'a, T> {
    /// Pair `element` with `metadata`.
    #[must_use]
    pub fn new(element: &'a T, metadata: &'a MetadataInformation) -> Self {
        Self { element, metadata }
    }
}

impl<T> Clone for ElementContainer<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElementContainer<'_, T> {}
