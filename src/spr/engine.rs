//! Recursive reference compiler
//!
//! Each recursion level works on its own copy of the text:
//! 1. apply every cached substitution
//! 2. find the next reference at or after the scan offset
//! 3. resolve it to a target entry and wanted field, or skip past it
//! 4. compile the target field one level deeper and cache the result
//!
//! A level stops after `MAX_ITERATIONS` passes; a level at
//! `MAX_RECURSION_DEPTH` compiles to the empty string.

use serde::Serialize;
use tracing::{debug, trace};

use crate::database::{Database, Entry, EntryTree};
use crate::search::search_entries;
use crate::{MAX_ITERATIONS, MAX_RECURSION_DEPTH};
use super::cache::RefCache;
use super::context::SprContext;
use super::reference::{find_reference, EntryField, Reference};

/// Counters collected during one compilation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    /// References resolved to an entry whose field was then compiled
    pub resolutions: usize,
    /// References left in place (malformed, unknown selector, no target)
    pub skipped: usize,
    /// Expansions cut off at the recursion depth limit
    pub depth_limit_hits: usize,
    /// Distinct references in the substitution cache at the end
    pub cached_references: usize,
}

/// Compiled text with its counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compilation {
    pub text: String,
    pub stats: CompileStats,
}

/// Field reference compiler
///
/// Stateless: every call builds its own context and cache, so one engine can
/// be shared between threads reading the same snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprEngine;

impl SprEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every reference in `text`, a field value of `entry`
    ///
    /// Returns an empty string for empty text or a database without a root
    /// group. Unresolvable references are left as they are.
    pub fn compile(&self, text: &str, entry: &Entry, database: &Database) -> String {
        self.compile_with_stats(text, entry, database).text
    }

    /// Same as `compile`, also returning the counters
    pub fn compile_with_stats(
        &self,
        text: &str,
        entry: &Entry,
        database: &Database,
    ) -> Compilation {
        match database.root_group() {
            Some(root) => self.compile_in_with_stats(text, entry, root),
            None => {
                debug!(database = %database.name, "no root group, nothing to compile against");
                Compilation::default()
            }
        }
    }

    /// Resolve references against any record tree
    pub fn compile_in<T>(&self, text: &str, entry: &Entry, tree: &T) -> String
    where
        T: EntryTree + ?Sized,
    {
        self.compile_in_with_stats(text, entry, tree).text
    }

    pub fn compile_in_with_stats<T>(&self, text: &str, entry: &Entry, tree: &T) -> Compilation
    where
        T: EntryTree + ?Sized,
    {
        if text.is_empty() {
            return Compilation::default();
        }

        let mut compiler = Compiler::default();
        let text = compiler.compile_internal(text, SprContext::new(tree, entry));
        compiler.stats.cached_references = compiler.cache.len();

        Compilation {
            text,
            stats: compiler.stats,
        }
    }
}

/// State shared by all recursion levels of one compilation
#[derive(Default)]
struct Compiler {
    cache: RefCache,
    stats: CompileStats,
}

impl Compiler {
    fn compile_internal<T>(&mut self, text: &str, ctx: SprContext<'_, T>) -> String
    where
        T: EntryTree + ?Sized,
    {
        if ctx.recursion_level >= MAX_RECURSION_DEPTH {
            self.stats.depth_limit_hits += 1;
            debug!(level = ctx.recursion_level, "recursion depth limit reached");
            return String::new();
        }

        self.fill_ref_placeholders(text, ctx)
    }

    fn fill_ref_placeholders<T>(&mut self, text: &str, ctx: SprContext<'_, T>) -> String
    where
        T: EntryTree + ?Sized,
    {
        let mut text = text.to_string();
        let mut offset = 0;

        for _ in 0..MAX_ITERATIONS {
            text = self.cache.apply(&text);

            let Some(span) = find_reference(&text, offset) else {
                break;
            };
            let raw = span.raw(&text).to_string();

            let Some((target, field)) = self.find_target(&raw, ctx) else {
                self.stats.skipped += 1;
                offset = span.start + 1;
                continue;
            };

            self.stats.resolutions += 1;
            trace!(reference = %raw, level = ctx.recursion_level, "reference resolved");

            let data = field.value(target);
            let inner = self.compile_internal(&data, ctx.derive(target));
            match self.cache.insert(&raw, inner) {
                Ok(true) => {}
                Ok(false) => trace!(reference = %raw, "reference already cached"),
                Err(err) => {
                    debug!(reference = %raw, %err, "reference cannot be cached");
                    offset = span.start + 1;
                    continue;
                }
            }
            text = self.cache.apply(&text);
        }

        text
    }

    /// First entry matching the reference, with the field to read from it
    fn find_target<'a, T>(
        &self,
        raw: &str,
        ctx: SprContext<'a, T>,
    ) -> Option<(&'a Entry, EntryField)>
    where
        T: EntryTree + ?Sized,
    {
        let reference = match Reference::parse(raw) {
            Ok(reference) => reference,
            Err(err) => {
                debug!(%err, "skipping reference");
                return None;
            }
        };

        let found = match search_entries(ctx.tree, &reference.search_parameters()) {
            Ok(found) => found,
            Err(err) => {
                debug!(reference = %raw, %err, "reference search failed");
                return None;
            }
        };

        let Some(target) = found.first().copied() else {
            debug!(reference = %raw, "no entry matches reference");
            return None;
        };

        let Some(field) = reference.wanted_field() else {
            debug!(reference = %raw, wanted = %reference.wanted, "unknown wanted field");
            return None;
        };

        Some((target, field))
    }
}
