use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants map onto the failure classes of a compatibility run: input problems that only
/// affect a single work item (symbol loading), problems with persisted suppression data, and
/// failures that abort the whole run (I/O while writing a suppression file, a reporting sink
/// that rejects output).
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - Corrupted suppression file or unparsable identity string
/// - [`Error::Empty`] - A module source produced zero bytes
/// - [`Error::AssemblyNotFound`] - A module source could not locate the requested input
/// - [`Error::SymbolLoad`] - The symbol provider rejected a module
/// - [`Error::ReferenceNotFound`] - A reference of an input could not be resolved
///
/// ## Run Errors
/// - [`Error::InvalidWorkItem`] - A work item or driver configuration is inconsistent
/// - [`Error::LogFailure`] - The reporting sink failed; the run cannot continue
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Xml`] - Failure while producing suppression XML
///
/// # Examples
///
/// ```rust,no_run
/// use apicompat::{Error, suppression::SuppressionEngine};
///
/// let engine = SuppressionEngine::new();
/// match engine.write_to_file("CompatibilitySuppressions.xml", false) {
///     Ok(true) => println!("suppression file written"),
///     Ok(false) => println!("nothing to write"),
///     Err(Error::FileError(io_err)) => eprintln!("I/O error: {}", io_err),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input is damaged and could not be parsed.
    ///
    /// Raised for suppression files that are not well-formed and for identity strings
    /// that do not follow the display-name grammar. The error includes the source
    /// location where the malformation was detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Provided input was empty.
    ///
    /// A module source returned a zero-length buffer where assembly bytes were expected.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur during file operations
    /// such as reading from disk, permission issues, or filesystem errors.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// The requested input could not be located by its module source.
    ///
    /// Reported with diagnostic code `CP1001`.
    #[error("Could not find assembly '{0}'")]
    AssemblyNotFound(String),

    /// The symbol provider failed to produce a symbol tree for an input.
    #[error("Failed to load symbols for '{assembly}': {message}")]
    SymbolLoad {
        /// AssemblyId of the input that failed
        assembly: String,
        /// Provider supplied failure description
        message: String,
    },

    /// An input loaded, but one of its references could not be resolved.
    #[error("Could not resolve reference '{reference}' of '{assembly}'")]
    ReferenceNotFound {
        /// AssemblyId of the input being loaded
        assembly: String,
        /// Name of the unresolved reference
        reference: String,
    },

    /// A work item or driver configuration is inconsistent.
    ///
    /// Examples are a work item without any left input, or a per-assembly run whose
    /// left and right input counts differ.
    #[error("Invalid work item - {0}")]
    InvalidWorkItem(String),

    /// Producing suppression XML failed.
    #[error("Xml - {0}")]
    Xml(String),

    /// The reporting sink rejected a message.
    ///
    /// This is fatal for the whole run, as further differences could not be delivered.
    #[error("Log failure - {0}")]
    LogFailure(String),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
