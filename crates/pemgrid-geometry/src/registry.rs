//! Name-to-prototype registry of grid generators.
//!
//! Prototypes are registered once, in an explicit order, during start-up.
//! After that the registry is only read: [`GeometryRegistry::create`] hands
//! out fresh, exclusively owned instances cloned from a prototype.
//!
//! Custom names can map onto any geometry, e.g. a cathode stack without an
//! MPL registered as its own kind.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use pemgrid_types::{PemgridError, PemgridResult};

use crate::generator::GridGenerator;

/// Mapping from geometry-kind name to prototype generator.
///
/// Names are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct GeometryRegistry {
    prototypes: BTreeMap<String, GridGenerator>,
}

impl GeometryRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in geometry.
    ///
    /// # Panics
    /// If two built-ins share a name.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for prototype in GridGenerator::builtins() {
            let name = prototype.name().to_string();
            if let Err(e) = registry.register(name, prototype) {
                panic!("built-in geometry registration failed: {e}");
            }
        }
        registry
    }

    /// Registers `prototype` under `name`.
    ///
    /// # Errors
    /// `DuplicateRegistration` if `name` is taken; the existing prototype is kept.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        prototype: GridGenerator,
    ) -> PemgridResult<()> {
        let name = name.into();
        if self.prototypes.contains_key(&name) {
            return Err(PemgridError::DuplicateRegistration(name));
        }
        tracing::debug!(name = %name, "registered geometry");
        self.prototypes
            .insert(name.clone(), prototype.clone_by_name(&name));
        Ok(())
    }

    /// Creates a fresh generator for the geometry registered as `name`.
    ///
    /// # Errors
    /// `UnknownGeometryKind` listing the registered names.
    pub fn create(&self, name: &str) -> PemgridResult<GridGenerator> {
        let prototype =
            self.prototypes
                .get(name)
                .ok_or_else(|| PemgridError::UnknownGeometryKind {
                    requested: name.to_string(),
                    known: self.names().into_iter().map(String::from).collect(),
                })?;
        tracing::debug!(name, "created generator");
        Ok(prototype.clone_by_name(name))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.prototypes.keys().map(|s| s.as_str()).collect()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Returns the number of registered geometries.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

/// The process-wide registry of built-in geometries, built on first use.
pub fn global() -> &'static GeometryRegistry {
    static REGISTRY: OnceLock<GeometryRegistry> = OnceLock::new();
    REGISTRY.get_or_init(GeometryRegistry::with_builtins)
}
