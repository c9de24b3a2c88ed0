//! Material identifiers and the catalog that validates them

use ahash::AHashSet;
use std::fmt;

/// A resolved material, stored in canonical uppercase form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Material(String);

impl Material {
    pub fn new(name: &str) -> Self {
        Material(name.to_ascii_uppercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw identifier
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stack of items: material plus a positive amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(material: Material, amount: u32) -> Self {
        Self { material, amount }
    }

    /// Convenience for hosts and tests holding raw identifiers
    pub fn of(name: &str, amount: u32) -> Self {
        Self::new(Material::new(name), amount)
    }
}

/// Resolves identifiers to materials. Unknown identifiers yield `None`.
pub trait MaterialCatalog {
    fn resolve(&self, name: &str) -> Option<Material>;
}

/// Catalog backed by a fixed set of known material names
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    known: AHashSet<String>,
}

impl StaticCatalog {
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            known: names
                .into_iter()
                .map(|name| name.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }

    pub fn insert(&mut self, name: &str) {
        self.known.insert(name.to_ascii_uppercase());
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl MaterialCatalog for StaticCatalog {
    fn resolve(&self, name: &str) -> Option<Material> {
        let canonical = name.to_ascii_uppercase();
        if self.known.contains(&canonical) {
            Some(Material(canonical))
        } else {
            None
        }
    }
}

/// Accepts every non-blank identifier, for hosts that validate elsewhere
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyMaterial;

impl MaterialCatalog for AnyMaterial {
    fn resolve(&self, name: &str) -> Option<Material> {
        if name.trim().is_empty() {
            None
        } else {
            Some(Material::new(name))
        }
    }
}
