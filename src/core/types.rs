//! Deklarierte Werte-Typen und deren Zuweisbarkeit.

use std::collections::HashMap;
use std::fmt;

/// Name eines deklarierten Werte-Typs (z.B. "Number", "Curve").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Einfach-Vererbungs-Hierarchie der Werte-Typen.
///
/// Speichert pro Typ den direkten Basistyp. Ein Typ ist einem anderen
/// zuweisbar, wenn dieser in seiner Basistyp-Kette vorkommt (kovariant).
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    parents: HashMap<TypeName, TypeName>,
}

impl TypeHierarchy {
    /// Obergrenze für die Kettenlänge, schützt vor zyklischen Einträgen.
    const MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert `child` als Untertyp von `parent`.
    pub fn register(&mut self, child: impl Into<TypeName>, parent: impl Into<TypeName>) {
        let child = child.into();
        let parent = parent.into();
        if child == parent {
            log::warn!("Typ {} kann nicht von sich selbst erben", child);
            return;
        }
        self.parents.insert(child, parent);
    }

    /// Direkter Basistyp, falls registriert.
    pub fn parent_of(&self, ty: &TypeName) -> Option<&TypeName> {
        self.parents.get(ty)
    }

    /// Prüft ob ein Wert vom Typ `from` an einen Port vom Typ `to` zugewiesen werden darf.
    pub fn is_assignable(&self, from: &TypeName, to: &TypeName) -> bool {
        let mut current = from;
        for _ in 0..Self::MAX_DEPTH {
            if current == to {
                return true;
            }
            match self.parents.get(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }
}
