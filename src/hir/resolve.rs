//! Symbol index and chain resolution.
//!
//! The index keeps one ordered bucket of records per module name plus the
//! relation maps collected from tag comments. Queries arrive as access
//! chains written outermost first (`self.view.btn` → `["self", "view",
//! "btn"]`), in two forms:
//!
//! - the **raw** chain, exactly as written
//! - the **mapped** chain, with `self`/`M`/`_M`, `@type` references and
//!   `@alias` names rewritten to module names (see [`Resolver::map_chain`])
//!
//! ## Key Data Structures
//!
//! - [`RelationMaps`] - alias, belong, reference and native type facts, each
//!   entry tagged with the file that declared it
//! - [`SymbolIndex`] - buckets plus relations, rebuilt per file
//! - [`Resolver`] - completion and definition queries against an index

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::extract::{ExtractionResult, FileRelations, GLOBAL_BUCKET};
use super::native::NativeCatalog;
use super::symbols::{HirSymbol, is_self_name};

// ============================================================================
// RELATION MAPS
// ============================================================================

/// A variable known to hold an instance of a module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefEntry {
    pub reference: Arc<str>,
    /// File whose `@type` tag declared the entry.
    pub site: Arc<str>,
}

/// Facts declared by tag comments, keyed by name.
///
/// Later declarations overwrite earlier ones. Every entry remembers the file
/// that declared it so a reparse can drop what the file no longer says.
#[derive(Clone, Debug, Default)]
pub struct RelationMaps {
    /// Alias name → file the alias refers to.
    alias_map: FxHashMap<String, Arc<str>>,
    /// File → module it belongs to.
    belong_map: FxHashMap<Arc<str>, String>,
    /// Variable name → referenced module.
    ref_map: FxHashMap<String, RefEntry>,
    /// `base.reference` chains → files declaring them.
    ref_list: IndexMap<String, Vec<Arc<str>>>,
    /// `module.variable` → (engine type, declaring file).
    var_type_map: FxHashMap<String, (String, Arc<str>)>,
}

impl RelationMaps {
    /// Record the facts `module` declares.
    pub fn apply(&mut self, module: &Arc<str>, relations: &FileRelations) {
        for alias in &relations.aliases {
            self.alias_map.insert(alias.clone(), module.clone());
        }
        if let Some(belong) = &relations.belong {
            self.belong_map.insert(module.clone(), belong.clone());
        }
        for (key, reference) in &relations.refs {
            self.ref_map.insert(
                key.clone(),
                RefEntry {
                    reference: Arc::from(reference.as_str()),
                    site: module.clone(),
                },
            );
        }
        for chain in &relations.ref_chains {
            let sites = self.ref_list.entry(chain.clone()).or_default();
            if !sites.contains(module) {
                sites.push(module.clone());
            }
        }
        for (key, engine_type) in &relations.var_types {
            self.var_type_map
                .insert(key.clone(), (engine_type.clone(), module.clone()));
        }
    }

    /// Drop every fact declared by `module`.
    pub fn remove_file(&mut self, module: &str) {
        self.alias_map.retain(|_, file| &**file != module);
        self.belong_map.remove(module);
        self.ref_map.retain(|_, entry| &*entry.site != module);
        self.ref_list.retain(|_, sites| {
            sites.retain(|site| &**site != module);
            !sites.is_empty()
        });
        self.var_type_map.retain(|_, (_, site)| &**site != module);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// File an alias refers to.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.alias_map.get(name).map(|file| &**file)
    }

    /// Module a file belongs to.
    pub fn belong(&self, file: &str) -> Option<&str> {
        self.belong_map.get(file).map(String::as_str)
    }

    pub fn reference(&self, name: &str) -> Option<&RefEntry> {
        self.ref_map.get(name)
    }

    pub fn is_ref_chain(&self, chain: &str) -> bool {
        self.ref_list.contains_key(chain)
    }

    /// Engine type of `module.variable`.
    pub fn var_type(&self, key: &str) -> Option<&str> {
        self.var_type_map.get(key).map(|(ty, _)| ty.as_str())
    }
}

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Module buckets and relation maps for a whole workspace.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// Bucket name → records in insertion order.
    buckets: IndexMap<Arc<str>, Vec<HirSymbol>>,
    /// Module → buckets it has contributed records to.
    contributions: FxHashMap<Arc<str>, Vec<Arc<str>>>,
    relations: RelationMaps,
    /// Module → extra modules searched by definition lookups.
    alias_modules: FxHashMap<String, Vec<String>>,
    native: NativeCatalog,
}

impl SymbolIndex {
    /// Create an empty index using the bundled native catalog.
    pub fn new() -> Self {
        Self {
            native: NativeCatalog::bundled(),
            ..Self::default()
        }
    }

    /// Insert `symbol` into `bucket` unless a record with the same sign and
    /// site is already there. Returns whether it was inserted.
    pub fn append(&mut self, bucket: impl Into<Arc<str>>, symbol: HirSymbol) -> bool {
        let records = self.buckets.entry(bucket.into()).or_default();
        if records
            .iter()
            .any(|r| r.sign == symbol.sign && r.site == symbol.site)
        {
            return false;
        }
        records.push(symbol);
        true
    }

    /// Replace everything `result.module` contributed with `result`.
    pub fn add_extraction_result(&mut self, result: ExtractionResult) {
        let module = result.module.clone();
        self.remove_file(&module);

        let mut touched: Vec<Arc<str>> = Vec::new();
        for item in result.symbols {
            if !touched.contains(&item.bucket) {
                touched.push(item.bucket.clone());
            }
            self.append(item.bucket, item.symbol);
        }
        self.relations.apply(&module, &result.relations);

        debug!(module = %module, buckets = touched.len(), "indexed module");
        self.contributions.insert(module, touched);
    }

    /// Remove all records and relation facts contributed by `module`.
    pub fn remove_file(&mut self, module: &str) {
        if let Some(touched) = self.contributions.remove(module) {
            for bucket in touched {
                if let Some(records) = self.buckets.get_mut(&bucket) {
                    records.retain(|r| &*r.site != module);
                }
            }
        }
        self.relations.remove_file(module);
    }

    /// Forget every indexed file. Configuration and the catalog are kept.
    pub fn reset(&mut self) {
        self.buckets.clear();
        self.contributions.clear();
        self.relations.clear();
    }

    /// Records of a bucket; empty when the bucket does not exist.
    pub fn bucket(&self, name: &str) -> &[HirSymbol] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_bucket(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Every record with the bucket it lives in.
    pub fn all_symbols(&self) -> impl Iterator<Item = (&str, &HirSymbol)> {
        self.buckets
            .iter()
            .flat_map(|(name, records)| records.iter().map(move |r| (&**name, r)))
    }

    pub fn symbol_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn relations(&self) -> &RelationMaps {
        &self.relations
    }

    pub fn set_alias_modules(&mut self, alias_modules: FxHashMap<String, Vec<String>>) {
        self.alias_modules = alias_modules;
    }

    pub fn alias_modules(&self, module: &str) -> &[String] {
        self.alias_modules
            .get(module)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn native(&self) -> &NativeCatalog {
        &self.native
    }

    pub fn set_native_catalog(&mut self, catalog: NativeCatalog) {
        self.native = catalog;
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Result of a definition lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    Found(HirSymbol),
    NotFound,
}

impl ResolveResult {
    pub fn symbol(&self) -> Option<&HirSymbol> {
        match self {
            ResolveResult::Found(s) => Some(s),
            ResolveResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }
}

/// Answers chain queries from the point of view of the active file.
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
    /// Module name of the file being edited.
    active_file: Arc<str>,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self {
            index,
            active_file: Arc::from(""),
        }
    }

    pub fn with_active_file(mut self, file: impl Into<Arc<str>>) -> Self {
        self.active_file = file.into();
        self
    }

    /// The module a file's `M`/`self` refers to.
    pub fn owner_of<'s>(&'s self, file: &'s str) -> &'s str {
        self.index.relations.belong(file).unwrap_or(file)
    }

    fn map_segment(&self, raw: &str) -> String {
        let relations = &self.index.relations;
        let mut segment = raw;
        if is_self_name(segment) {
            segment = self.owner_of(&self.active_file);
        }
        if let Some(entry) = relations.reference(segment) {
            segment = &*entry.reference;
        }
        if let Some(file) = relations.alias(segment) {
            segment = self.owner_of(file);
        }
        segment.to_string()
    }

    /// Rewrite a raw chain into module names.
    ///
    /// Each segment goes through three substitutions in order: `self`, `M`
    /// and `_M` become the active file's owner, a variable with a `@type`
    /// reference becomes the referenced module, and an alias becomes the
    /// owner of the aliased file.
    pub fn map_chain(&self, raw: &[String]) -> Vec<String> {
        raw.iter().map(|segment| self.map_segment(segment)).collect()
    }

    // ------------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------------

    /// Candidates reachable from `chain`.
    ///
    /// `trigger` is the character before the completed word (`.` or `:`
    /// for member access). `word` is the partial word for invoked
    /// completion. The first strategy that finds anything wins.
    pub fn resolve_for_completion(
        &self,
        chain: &[String],
        raw: &[String],
        trigger: Option<char>,
        word: Option<&str>,
    ) -> Vec<HirSymbol> {
        let native = self.native_members(chain, raw, trigger);
        if !native.is_empty() {
            trace!(chain = ?chain, "completion from native catalog");
            return native;
        }

        let raw_base = raw.first().map(String::as_str);

        if let Some(last) = chain.last() {
            if self.index.relations.is_ref_chain(&chain.join(".")) && self.index.has_bucket(last) {
                trace!(chain = ?chain, "completion from reference chain");
                return self
                    .index
                    .bucket(last)
                    .iter()
                    .filter(|s| s.is_visible_member(raw_base) && Some(s.indexer.as_char()) == trigger)
                    .cloned()
                    .collect();
            }
        }

        if chain.is_empty() {
            return match word {
                Some(word) if !word.is_empty() => self.match_word(word),
                _ => Vec::new(),
            };
        }

        let mut found = descend(self.index.bucket(&self.active_file), chain, raw);
        found.extend(descend(self.index.bucket(GLOBAL_BUCKET), chain, raw));
        if !found.is_empty() {
            trace!(chain = ?chain, "completion from local or global table");
            return found;
        }

        if chain.len() == 1 {
            let mut found = Vec::new();
            for symbol in self.index.bucket(&chain[0]) {
                if matches!(&*symbol.sign, "M" | "_M") {
                    found.extend(symbol.children.iter().cloned());
                } else if symbol.is_visible_member(raw_base) {
                    found.push(symbol.clone());
                }
            }
            if !found.is_empty() {
                trace!(module = %chain[0], "completion from module bucket");
                return found;
            }
        }

        self.member_of_module(chain, raw)
    }

    fn native_members(&self, chain: &[String], raw: &[String], trigger: Option<char>) -> Vec<HirSymbol> {
        let key = match (chain, raw) {
            ([first, _, ..], [_, second, ..]) => format!("{first}.{second}"),
            ([_], [only, ..]) => format!("{}.{only}", self.owner_of(&self.active_file)),
            _ => return Vec::new(),
        };
        match self.index.relations.var_type(&key) {
            Some(ty) => self.index.native.members(ty, trigger == Some('.')),
            None => Vec::new(),
        }
    }

    /// Locals of the active file and globals whose sign starts with `word`.
    fn match_word(&self, word: &str) -> Vec<HirSymbol> {
        let locals = self
            .index
            .bucket(&self.active_file)
            .iter()
            .filter(|s| s.is_local() && s.sign.starts_with(word));
        let globals = self
            .index
            .bucket(GLOBAL_BUCKET)
            .iter()
            .filter(|s| s.sign.starts_with(word));
        locals.chain(globals).cloned().collect()
    }

    /// Children of `chain[1..]` inside the bucket named by `chain[0]`.
    fn member_of_module(&self, chain: &[String], raw: &[String]) -> Vec<HirSymbol> {
        if chain.len() < 2 {
            return Vec::new();
        }
        descend(self.index.bucket(&chain[0]), &chain[1..], raw.get(1..).unwrap_or(&[]))
    }

    // ------------------------------------------------------------------------
    // Definition
    // ------------------------------------------------------------------------

    /// The record named `name` reached through `chain`.
    pub fn resolve_definition(&self, chain: &[String], raw: &[String], name: &str) -> ResolveResult {
        let raw_base = raw.first().map(String::as_str);

        let mut candidates: Vec<&HirSymbol> = match chain.first() {
            None => self
                .index
                .bucket(&self.active_file)
                .iter()
                .filter(|s| s.is_local())
                .chain(self.index.bucket(GLOBAL_BUCKET))
                .collect(),
            Some(_) if self.index.relations.is_ref_chain(&chain.join(".")) => chain
                .last()
                .map(|last| self.index.bucket(last).iter().collect())
                .unwrap_or_default(),
            Some(first) => {
                let mut candidates: Vec<&HirSymbol> = self
                    .index
                    .bucket(first)
                    .iter()
                    .filter(|s| !s.is_private() || raw_base.is_some_and(is_self_name))
                    .collect();
                for segment in &chain[1..] {
                    candidates = candidates
                        .into_iter()
                        .filter(|s| &*s.sign == segment)
                        .flat_map(|s| s.children.iter())
                        .collect();
                }
                candidates
            }
        };

        if candidates.is_empty() && !chain.is_empty() {
            candidates = [self.index.bucket(&self.active_file), self.index.bucket(GLOBAL_BUCKET)]
                .into_iter()
                .filter_map(|records| find_path(records, chain, raw))
                .flat_map(|table| table.children.iter())
                .collect();
        }

        if candidates.is_empty() {
            candidates = self
                .index
                .bucket(GLOBAL_BUCKET)
                .iter()
                .filter(|s| s.sign.starts_with(name))
                .collect();
        }

        if let Some(found) = candidates.into_iter().find(|s| &*s.sign == name) {
            return ResolveResult::Found(found.clone());
        }

        if let Some(first) = chain.first() {
            for module in self.index.alias_modules(first) {
                if let Some(found) = self.index.bucket(module).iter().find(|s| &*s.sign == name) {
                    trace!(module = %module, "definition from alias module");
                    return ResolveResult::Found(found.clone());
                }
            }
        }

        ResolveResult::NotFound
    }
}

/// The record reached by `chain` inside `records`: the first segment
/// matches a record by mapped or raw name, the rest walk its children.
fn find_path<'r>(records: &'r [HirSymbol], chain: &[String], raw: &[String]) -> Option<&'r HirSymbol> {
    let first = chain.first()?;
    let raw_first = raw.first();
    let mut current = records
        .iter()
        .find(|s| &*s.sign == first || raw_first.is_some_and(|r| &*s.sign == r))?;
    for segment in &chain[1..] {
        current = current.child(segment)?;
    }
    Some(current)
}

/// Children of the record reached by `chain`.
fn descend(records: &[HirSymbol], chain: &[String], raw: &[String]) -> Vec<HirSymbol> {
    find_path(records, chain, raw)
        .map(|symbol| symbol.children.clone())
        .unwrap_or_default()
}
