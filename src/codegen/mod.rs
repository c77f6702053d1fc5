//! Source emission.
//!
//! Every node type implements [`Emit`]: it appends its Go rendering to a
//! [`CodeWriter`] in source order, recursing into children where they
//! textually appear. All state an emission pass accumulates (the literal
//! pool, the wrapper table, the collected imports) lives in the
//! [`GenContext`] threaded through every call, so independent units can be
//! compiled side by side without sharing anything.

use std::collections::{HashMap, HashSet};

use crate::ast::*;
use crate::error::{GenError, GenResult};
use crate::imports::ImportSet;
use crate::pool::StringPool;

mod compose;
mod expr;
mod options;
mod stmt;
mod writer;

pub use compose::WRAPPED_BODY_FN;
pub use options::{
    DEFAULT_FILTER_MODULE, DEFAULT_TEMPLATE_PREFIX, DEFAULT_WRAPPER_PREFIX, GenOptions,
};
pub use writer::CodeWriter;

pub(crate) use stmt::emit_block;

/// Parameter names taken by the generated routine signatures.
pub(crate) const RESERVED_PARAMS: &[&str] = &["ctx", "w"];

/// Append a node's source text to `w`.
pub trait Emit {
    fn emit(&self, w: &mut CodeWriter, cx: &mut GenContext<'_>) -> GenResult<()>;
}

/// Per-unit emission state.
///
/// Created fresh for each compilation unit and dropped when it is done.
#[derive(Debug)]
pub struct GenContext<'a> {
    pub(crate) opts: &'a GenOptions,
    pub(crate) pool: StringPool,
    /// Wrappers defined in the unit, by name, with their parameter count.
    pub(crate) wrappers: HashMap<String, usize>,
    /// Imports for the header, filled in before the header is written.
    pub(crate) imports: ImportSet,
    /// Set while a wrapper body is being emitted.
    pub(crate) in_wrapper: bool,
    /// Placeholders seen in the current wrapper body.
    pub(crate) wrapped_body_count: usize,
}

impl<'a> GenContext<'a> {
    pub fn new(opts: &'a GenOptions) -> Self {
        Self {
            opts,
            pool: StringPool::new(opts.unit_id.as_deref()),
            wrappers: HashMap::new(),
            imports: ImportSet::new(),
            in_wrapper: false,
            wrapped_body_count: 0,
        }
    }

    /// Build a context for `file`, registering its definitions.
    ///
    /// Fails on duplicate template or wrapper names, which would otherwise
    /// surface as redeclarations in the generated package.
    pub fn for_file(file: &File, opts: &'a GenOptions) -> GenResult<Self> {
        let mut cx = Self::new(opts);
        let mut templates = HashSet::new();

        for item in &file.items {
            match &item.node {
                ItemKind::Template(def) => {
                    if !templates.insert(def.name.as_str()) {
                        return Err(GenError::duplicate_definition("template", &def.name)
                            .with_span(item.span));
                    }
                }
                ItemKind::Wrapper(def) => {
                    if cx.wrappers.insert(def.name.clone(), def.params.len()).is_some() {
                        return Err(GenError::duplicate_definition("wrapper", &def.name)
                            .with_span(item.span));
                    }
                }
            }
        }

        Ok(cx)
    }

    pub fn options(&self) -> &GenOptions {
        self.opts
    }

    pub fn pool(&self) -> &StringPool {
        &self.pool
    }

    /// Pool `literal` and return the constant name to reference it by.
    pub(crate) fn intern(&mut self, literal: &str, span: Span) -> GenResult<String> {
        self.pool.intern(literal).map_err(|e| e.with_span(span))
    }
}

/// Reject an empty identifier.
pub(crate) fn require_name(name: &str, what: &str, span: Span) -> GenResult<()> {
    if name.trim().is_empty() {
        return Err(GenError::empty_name(what).with_span(span));
    }
    Ok(())
}

/// Write `items` separated by `", "`.
pub(crate) fn emit_comma_list<T: Emit>(
    items: &[T],
    w: &mut CodeWriter,
    cx: &mut GenContext<'_>,
) -> GenResult<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            w.write(", ");
        }
        item.emit(w, cx)?;
    }
    Ok(())
}
