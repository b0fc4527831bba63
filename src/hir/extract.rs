//! Per-file symbol extraction.
//!
//! Runs the line classifier over a whole document and decides which bucket
//! each record lands in. The result is a pure value; the index applies it.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::classify::{Classified, DeclForm, Declaration, TagComment, classify_line};
use super::symbols::{HirSymbol, is_self_name};
use crate::base::Document;

/// Bucket holding global functions and variables.
pub const GLOBAL_BUCKET: &str = "_G";

/// A record and the bucket it belongs in.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketedSymbol {
    pub bucket: Arc<str>,
    pub symbol: HirSymbol,
}

/// Relation facts a file declares through tag comments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileRelations {
    /// `@alias` names that refer to this file.
    pub aliases: Vec<String>,
    /// `@belong` module, if any (the last one wins).
    pub belong: Option<String>,
    /// Variable name → referenced module, from `@type`.
    pub refs: Vec<(String, String)>,
    /// `base.reference` pairs (or bare references), from `@type`.
    pub ref_chains: Vec<String>,
    /// `module.variable` → engine type, from `@unity.type` and args tables.
    pub var_types: Vec<(String, String)>,
}

/// Everything one document contributes to the index.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionResult {
    /// Module name of the document.
    pub module: Arc<str>,
    pub symbols: Vec<BucketedSymbol>,
    pub relations: FileRelations,
}

/// Mutable state of the extraction pass.
struct ExtractionContext {
    module: Arc<str>,
    /// Owning module: the last `@belong` of the file, else the file's module.
    owner: Arc<str>,
    aliases: FxHashSet<String>,
}

impl ExtractionContext {
    /// `M`, `_M`, `self` and aliases of this file all name the owner.
    fn names_owner(&self, base: &str) -> bool {
        is_self_name(base) || self.aliases.contains(base)
    }

    fn bucket_for_base(&self, base: &str) -> Arc<str> {
        if self.names_owner(base) {
            self.owner.clone()
        } else {
            Arc::from(base)
        }
    }

    fn bucket_for(&self, decl: &Declaration) -> Arc<str> {
        match (decl.form, decl.symbol.base.as_deref()) {
            (_, Some(base)) => self.bucket_for_base(base),
            (DeclForm::Global, None) => Arc::from(GLOBAL_BUCKET),
            (_, None) => self.module.clone(),
        }
    }
}

/// Extract all records and relation facts from `document`.
pub fn extract_document(document: &Document) -> ExtractionResult {
    let classified: Vec<Classified> = (0..document.line_count())
        .map(|line| classify_line(document, line))
        .collect();

    // Aliases and `@belong` apply to the whole file regardless of where they
    // are declared.
    let aliases = classified
        .iter()
        .filter_map(|c| match c {
            Classified::Tag(TagComment::Alias(name)) => Some(name.clone()),
            _ => None,
        })
        .collect();
    let owner: Arc<str> = classified
        .iter()
        .rev()
        .find_map(|c| match c {
            Classified::Tag(TagComment::Belong(name)) => Some(Arc::from(name.as_str())),
            _ => None,
        })
        .unwrap_or_else(|| document.module().clone());

    let context = ExtractionContext {
        module: document.module().clone(),
        owner,
        aliases,
    };
    let mut result = ExtractionResult {
        module: document.module().clone(),
        symbols: Vec::new(),
        relations: FileRelations::default(),
    };

    for item in classified {
        match item {
            Classified::NoMatch => {}
            Classified::Function(decl) | Classified::Variable(decl) => {
                let bucket = context.bucket_for(&decl);
                result.symbols.push(BucketedSymbol {
                    bucket,
                    symbol: decl.symbol,
                });
            }
            Classified::Args(fields) => {
                for field in fields {
                    result.relations.var_types.push((
                        format!("{}.{}", context.owner, field.symbol.sign),
                        field.native_type.to_string(),
                    ));
                    result.symbols.push(BucketedSymbol {
                        bucket: context.owner.clone(),
                        symbol: field.symbol,
                    });
                }
            }
            Classified::Tag(TagComment::Belong(name)) => {
                result.relations.belong = Some(name);
            }
            Classified::Tag(TagComment::Alias(name)) => {
                result.relations.aliases.push(name);
            }
            Classified::Tag(TagComment::Type { reference, target }) => {
                let chain = match target.base.as_deref() {
                    Some(base) => format!("{}.{}", context.bucket_for_base(base), reference),
                    None => reference.clone(),
                };
                result.relations.ref_chains.push(chain);
                result.relations.refs.push((target.key, reference));
            }
            Classified::Tag(TagComment::UnityType {
                engine_type,
                target,
            }) => {
                result
                    .relations
                    .var_types
                    .push((format!("{}.{}", context.owner, target.key), engine_type));
            }
        }
    }

    debug!(
        module = %result.module,
        symbols = result.symbols.len(),
        "extracted document"
    );
    result
}
