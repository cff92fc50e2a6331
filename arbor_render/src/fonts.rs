// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide typeface registry.
//!
//! The host installs its typefaces once at startup. Until then, and if it
//! never does, text is emitted with a generic fallback family.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use log::debug;

/// A font family and weight, resolved by the host's text stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Typeface {
    /// Family name.
    pub family: Cow<'static, str>,
    /// CSS-style weight, 100 to 900.
    pub weight: u16,
}

impl Typeface {
    /// Typeface for a static family name.
    pub const fn new_static(family: &'static str, weight: u16) -> Self {
        Self {
            family: Cow::Borrowed(family),
            weight,
        }
    }

    /// Typeface for a family name.
    pub fn new(family: impl Into<Cow<'static, str>>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
        }
    }
}

/// The faces the renderer draws with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypefaceSet {
    /// Body text: pill names, chip counts, overlay.
    pub regular: Typeface,
    /// Emphasized text: card names, badges, chip names.
    pub bold: Typeface,
}

static FALLBACK: TypefaceSet = TypefaceSet {
    regular: Typeface::new_static("sans-serif", 400),
    bold: Typeface::new_static("sans-serif", 700),
};

impl Default for TypefaceSet {
    fn default() -> Self {
        FALLBACK.clone()
    }
}

/// Misuse of a [`TypefaceRegistry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A set was already installed; the registry is write-once.
    AlreadyInstalled,
    /// A face in the set has an empty family name.
    EmptyFamily,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled => f.write_str("typefaces were already installed"),
            Self::EmptyFamily => f.write_str("typeface family name is empty"),
        }
    }
}

impl core::error::Error for RegistryError {}

/// Write-once holder for the [`TypefaceSet`].
#[derive(Debug)]
pub struct TypefaceRegistry {
    installed: OnceLock<TypefaceSet>,
}

impl Default for TypefaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypefaceRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            installed: OnceLock::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static Self {
        static GLOBAL: TypefaceRegistry = TypefaceRegistry::new();
        &GLOBAL
    }

    /// Install `set`. Fails if a set is already installed or a family is empty.
    pub fn install(&self, set: TypefaceSet) -> Result<(), RegistryError> {
        if set.regular.family.is_empty() || set.bold.family.is_empty() {
            return Err(RegistryError::EmptyFamily);
        }
        let family = set.regular.family.clone();
        self.installed
            .set(set)
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        debug!(target: "arbor::render", "installed typefaces ({family})");
        Ok(())
    }

    /// Whether a set has been installed.
    pub fn is_installed(&self) -> bool {
        self.installed.get().is_some()
    }

    /// The installed set, or the fallback.
    pub fn typefaces(&self) -> &TypefaceSet {
        self.installed.get().unwrap_or(&FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_until_installed() {
        let reg = TypefaceRegistry::new();
        assert!(!reg.is_installed());
        assert_eq!(reg.typefaces().regular.family, "sans-serif");

        let set = TypefaceSet {
            regular: Typeface::new("Inter", 400),
            bold: Typeface::new("Inter", 700),
        };
        assert_eq!(reg.install(set.clone()), Ok(()));
        assert_eq!(reg.typefaces(), &set);
        assert_eq!(reg.install(set), Err(RegistryError::AlreadyInstalled));
    }

    #[test]
    fn rejects_empty_family() {
        let reg = TypefaceRegistry::new();
        let set = TypefaceSet {
            regular: Typeface::new("", 400),
            bold: Typeface::new("Inter", 700),
        };
        assert_eq!(reg.install(set), Err(RegistryError::EmptyFamily));
        assert!(!reg.is_installed());
        assert_eq!(
            RegistryError::AlreadyInstalled.to_string(),
            "typefaces were already installed"
        );
    }
}
