//! Abstract syntax tree consumed by the code generator.
//!
//! The tree has three layers:
//!
//! - **Items** ([`item`]): the [`File`] and its top-level template and
//!   wrapper definitions.
//! - **Statements** ([`stmt`]): the lines of a definition body. Writes,
//!   loops, conditionals, nested template calls.
//! - **Expressions** ([`expr`]): values used inside statements.
//!
//! The tree is produced by an external parser and never mutated here.

pub mod expr;
pub mod item;
pub mod span;
pub mod stmt;

// Convenience re-exports
pub use expr::*;
pub use item::*;
pub use span::{Span, Spanned};
pub use stmt::*;
