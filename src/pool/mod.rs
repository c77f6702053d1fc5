//! Content-addressed pool of string literals.
//!
//! Every string literal in a unit is emitted once, as a named constant in
//! the file header, and referenced by that name at each use site. Names are
//! derived from a BLAKE3 digest of the literal's bytes, so identical
//! literals share one constant and names stay stable across rebuilds as
//! long as the content does not change.

use std::collections::BTreeMap;

use crate::error::{GenError, GenResult};

/// Number of digest bytes rendered into a constant name.
const NAME_DIGEST_BYTES: usize = 16;

/// Generated constant name for `literal`.
///
/// Without a unit id the name is `s` followed by 32 hex digits. With one,
/// the sanitized id is folded in (`s_index_gtt_<hex>`) so that units
/// compiled into the same package cannot declare the same constant twice.
///
/// ```rust
/// use tplgen::pool_name;
///
/// assert_eq!(pool_name("X", None), pool_name("X", None));
/// assert_ne!(pool_name("X", None), pool_name("Y", None));
/// assert!(pool_name("X", Some("index.gtt")).starts_with("s_index_gtt_"));
/// ```
pub fn pool_name(literal: &str, unit_id: Option<&str>) -> String {
    let digest = blake3::hash(literal.as_bytes()).to_hex();
    let hex = &digest.as_str()[..NAME_DIGEST_BYTES * 2];

    match unit_id.map(sanitize_ident).filter(|id| !id.is_empty()) {
        Some(id) => format!("s_{id}_{hex}"),
        None => format!("s{hex}"),
    }
}

fn sanitize_ident(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Render `value` as a Go interpreted string literal, quotes included.
///
/// ```rust
/// use tplgen::escape_go_string;
///
/// assert_eq!(escape_go_string("a\"b\n"), r#""a\"b\n""#);
/// ```
pub fn escape_go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // The Go scanner rejects a BOM anywhere but the start of a file.
            '\u{feff}' => out.push_str("\\ufeff"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The literals of one unit, keyed by generated constant name.
#[derive(Debug, Default)]
pub struct StringPool {
    unit_id: Option<String>,
    entries: BTreeMap<String, String>,
}

impl StringPool {
    pub fn new(unit_id: Option<&str>) -> Self {
        Self {
            unit_id: unit_id.map(str::to_string),
            entries: BTreeMap::new(),
        }
    }

    /// Add `literal` to the pool and return its constant name.
    ///
    /// A name hit is checked against the stored content; two different
    /// literals sharing a name is reported instead of silently merged.
    pub fn intern(&mut self, literal: &str) -> GenResult<String> {
        let name = self.name_for(literal);
        match self.entries.get(&name) {
            Some(existing) if existing != literal => Err(GenError::literal_collision(&name)),
            Some(_) => Ok(name),
            None => {
                self.entries.insert(name.clone(), literal.to_string());
                Ok(name)
            }
        }
    }

    /// Constant name `literal` would get, without adding it.
    pub fn name_for(&self, literal: &str) -> String {
        pool_name(literal, self.unit_id.as_deref())
    }

    /// `(name, literal)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
