//! # tplgen
//!
//! The backend of a template compiler. It takes an already-parsed template
//! tree and emits an equivalent Go source file, so that rendering at run
//! time is a sequence of direct `io.WriteString` calls instead of
//! interpretation of a template document.
//!
//! The crate is split into layers:
//!
//! - **The tree** ([`ast`]) is produced by an external parser and is only
//!   read here.
//! - **Emission** ([`Emit`]) turns every node into Go text, threading a
//!   per-unit [`GenContext`] that pools string literals.
//! - **Collection** ([`RequiredImports`]) computes the modules the emitted
//!   code needs.
//! - **Assembly** ([`compile`]) renders the definitions, then prepends the
//!   package line, import block and literal constants.
//!
//! ## Quick start
//!
//! ```rust
//! use tplgen::{compile, Expr, File, GenOptions, Item, Stmt, TemplateDef, VariableDecl};
//!
//! let file = File::new(vec![Item::template(TemplateDef::new(
//!     "Report",
//!     vec![VariableDecl::new("Name", "string")],
//!     vec![
//!         Stmt::text("Hello, "),
//!         Stmt::write_value(Expr::value_ref("Name")),
//!         Stmt::text("!"),
//!     ],
//! ))]);
//!
//! let source = compile(&file, &GenOptions::new("views")).unwrap();
//! assert!(source.contains("io.WriteString(w, fmt.Sprint(Name))"));
//! assert!(source.contains("\t\"fmt\"\n"));
//! ```
//!
//! ## Wrappers
//!
//! A template can render inside a wrapper, a layout routine that receives
//! the template body as a callback:
//!
//! ```rust
//! use tplgen::*;
//!
//! let layout = WrapperDef::new(
//!     "Layout",
//!     vec![VariableDecl::new("Title", "string")],
//!     vec![
//!         Stmt::text("<title>"),
//!         Stmt::write_string(Expr::value_ref("Title")),
//!         Stmt::text("</title>"),
//!         Stmt::wrapped_body(),
//!     ],
//! );
//! let page = TemplateDef::new("Page", vec![], vec![Stmt::text("<p>body</p>")])
//!     .wrapped_by(UseWrapper::new("Layout", vec![Expr::string("Home")]));
//!
//! let file = File::new(vec![Item::wrapper(layout), Item::template(page)]);
//! let source = compile(&file, &GenOptions::new("views")).unwrap();
//! assert!(source.contains("\tWrapperLayout(ctx, w, func() {\n"));
//! assert!(source.contains("\trenderBody()\n"));
//! ```

pub mod assemble;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod imports;
pub mod pool;

pub use assemble::{GENERATED_NOTICE, compile, compile_to};
pub use ast::*;
pub use codegen::{
    CodeWriter, DEFAULT_FILTER_MODULE, DEFAULT_TEMPLATE_PREFIX, DEFAULT_WRAPPER_PREFIX, Emit,
    GenContext, GenOptions, WRAPPED_BODY_FN,
};
pub use error::{GenError, GenErrorKind, GenResult};
pub use imports::{ImportSet, RequiredImports, required_imports};
pub use pool::{StringPool, escape_go_string, pool_name};
