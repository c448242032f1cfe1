//! Assembly identity and version handling.
//!
//! An [`AssemblyIdentity`] is the binding identity of a compiled assembly: simple name,
//! four-part [`AssemblyVersion`], culture and public key token. The compatibility rules
//! compare identities of the left and right side of each pair (`CP0003`), so the types here
//! focus on exact component access and the .NET display-name grammar:
//!
//! ```text
//! AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
//! ```
//!
//! # Examples
//!
//! ```rust
//! use apicompat::symbols::{AssemblyIdentity, AssemblyVersion};
//!
//! let identity = AssemblyIdentity::parse(
//!     "System.Runtime, Version=8.0.0.0, Culture=neutral, PublicKeyToken=b03f5f7f11d50a3a",
//! )?;
//! assert_eq!(identity.name, "System.Runtime");
//! assert_eq!(identity.version, AssemblyVersion::new(8, 0, 0, 0));
//! assert!(identity.is_strong_named());
//! # Ok::<(), apicompat::Error>(())
//! ```

use std::{fmt, fmt::Write, str::FromStr};

use crate::{Error, Result};

/// Binding identity of an assembly.
///
/// Equality compares every component, the public key token included, because a token change
/// is itself a breaking change for consumers that bind by strong name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "System.Runtime").
    pub name: String,

    /// Four-part version number.
    pub version: AssemblyVersion,

    /// Culture of a satellite assembly; `None` for culture-neutral assemblies.
    pub culture: Option<String>,

    /// Eight byte public key token, in display order.
    pub public_key_token: Option<[u8; 8]>,
}

impl AssemblyIdentity {
    /// Create a culture-neutral identity without a strong name.
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name
    /// * `version` - Assembly version
    #[must_use]
    pub fn new(name: impl Into<String>, version: AssemblyVersion) -> Self {
        Self {
            name: name.into(),
            version,
            culture: None,
            public_key_token: None,
        }
    }

    /// Sets the culture of this identity.
    #[must_use]
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Sets the public key token of this identity.
    #[must_use]
    pub fn with_public_key_token(mut self, token: [u8; 8]) -> Self {
        self.public_key_token = Some(token);
        self
    }

    /// Parse an assembly display name.
    ///
    /// Unknown components (e.g. `ProcessorArchitecture`) are ignored. `Culture=neutral` and
    /// `PublicKeyToken=null` map to `None`.
    ///
    /// # Arguments
    ///
    /// * `display_name` - Display name in the standard .NET format
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the name is empty, the version is not a valid
    /// one to four part version, or the token is not exactly 16 hex characters.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default().to_string();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut identity = Self::new(name, AssemblyVersion::default());
        for part in parts {
            if let Some(value) = part.strip_prefix("Version=") {
                identity.version = AssemblyVersion::parse(value)?;
            } else if let Some(value) = part.strip_prefix("Culture=") {
                if !value.eq_ignore_ascii_case("neutral") && !value.is_empty() {
                    identity.culture = Some(value.to_string());
                }
            } else if let Some(value) = part.strip_prefix("PublicKeyToken=") {
                if !value.eq_ignore_ascii_case("null") && !value.is_empty() {
                    identity.public_key_token = Some(parse_token(value)?);
                }
            }
        }

        Ok(identity)
    }

    /// Generate the display name string for this identity.
    ///
    /// # Returns
    ///
    /// A string such as `"Lib, Version=1.2.3.4, Culture=neutral, PublicKeyToken=null"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 80);
        result.push_str(&self.name);

        let _ = write!(result, ", Version={}", self.version);
        let _ = write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        );

        result.push_str(", PublicKeyToken=");
        match &self.public_key_token {
            Some(token) => {
                for byte in token {
                    let _ = write!(result, "{:02x}", byte);
                }
            }
            None => result.push_str("null"),
        }

        result
    }

    /// Returns the public key token formatted as lowercase hex, or `"null"`.
    #[must_use]
    pub fn public_key_token_string(&self) -> String {
        match &self.public_key_token {
            Some(token) => token.iter().fold(String::with_capacity(16), |mut acc, b| {
                let _ = write!(acc, "{:02x}", b);
                acc
            }),
            None => "null".to_string(),
        }
    }

    /// Returns `true` if this identity carries a public key token.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.public_key_token.is_some()
    }

    /// Returns `true` if this identity has no culture.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }
}

fn parse_token(value: &str) -> Result<[u8; 8]> {
    if value.len() != 16 || !value.is_ascii() {
        return Err(malformed_error!(
            "PublicKeyToken must be exactly 16 hex characters, got '{}'",
            value
        ));
    }

    let mut token = [0u8; 8];
    for (i, byte) in token.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&value[i * 2..i * 2 + 2], 16)
            .map_err(|e| malformed_error!("Invalid hex in PublicKeyToken '{}': {}", value, e))?;
    }
    Ok(token)
}

/// Four-part version numbering for .NET assemblies.
///
/// Versions are compared component-wise in order: major, minor, build, revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyVersion {
    /// Create a new version from its four components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a dotted version string with one to four components.
    ///
    /// Missing trailing components default to zero.
    ///
    /// # Errors
    /// Returns an error if the version string has an invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.is_empty() || parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];
        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .trim()
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
