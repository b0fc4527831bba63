//! Native engine API catalog.
//!
//! Static member tables for engine types plus their inheritance chain. The
//! resolver consults it when a variable is known to hold an engine object.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::warn;

use super::symbols::{HirSymbol, Scope, SymbolKind};

const BUNDLED_CATALOG: &str = include_str!("../../data/native_catalog.json");

/// Member tables of engine types, keyed by fully qualified type name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NativeCatalog {
    #[serde(default, rename = "functions")]
    types: FxHashMap<String, NativeType>,
    /// Type → parent type.
    #[serde(default)]
    inherits: FxHashMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NativeType {
    #[serde(default)]
    pub variables: Vec<NativeVariable>,
    #[serde(default)]
    pub functions: Vec<String>,
}

/// A property: name, has getter, has setter.
#[derive(Clone, Debug, Deserialize)]
pub struct NativeVariable(pub String, pub bool, pub bool);

impl NativeVariable {
    /// Accessor summary such as `{ get , set }`.
    pub fn detail(&self) -> String {
        let mut detail = String::from("{ ");
        if self.1 {
            detail.push_str("get");
            if self.2 {
                detail.push_str(" , ");
            }
        }
        if self.2 {
            detail.push_str("set");
        }
        detail.push_str(" }");
        detail
    }
}

impl NativeCatalog {
    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CATALOG).unwrap_or_else(|err| {
            warn!(error = %err, "bundled native catalog is invalid");
            Self::default()
        })
    }

    pub fn contains(&self, ty: &str) -> bool {
        self.types.contains_key(ty)
    }

    pub fn parent(&self, ty: &str) -> Option<&str> {
        self.inherits.get(ty).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Members of `ty` and all its ancestors.
    ///
    /// Properties are returned for a `.` trigger, methods otherwise. A sign
    /// declared at several levels appears once (the most derived wins).
    pub fn members(&self, ty: &str, properties: bool) -> Vec<HirSymbol> {
        let mut result = Vec::new();
        let mut seen_signs = FxHashSet::default();
        let mut visited = FxHashSet::default();

        let mut current = Some(ty);
        while let Some(name) = current {
            if !visited.insert(name) {
                warn!(ty = name, "inheritance cycle in native catalog");
                break;
            }
            if let Some(native) = self.types.get(name) {
                if properties {
                    for variable in &native.variables {
                        if seen_signs.insert(variable.0.as_str()) {
                            result.push(
                                HirSymbol::new(variable.0.as_str(), name, SymbolKind::Variable)
                                    .with_scope(Scope::Member)
                                    .with_detail(variable.detail()),
                            );
                        }
                    }
                } else {
                    for function in &native.functions {
                        if seen_signs.insert(function.as_str()) {
                            result.push(
                                HirSymbol::new(function.as_str(), name, SymbolKind::Function)
                                    .with_scope(Scope::Member)
                                    .with_detail("Native"),
                            );
                        }
                    }
                }
            }
            current = self.parent(name);
        }

        result
    }
}
