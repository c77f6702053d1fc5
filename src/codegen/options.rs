use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Module providing the runtime filter functions.
pub const DEFAULT_FILTER_MODULE: &str = "github.com/go-qbit/template/filter";

/// Prefix of every generated template routine (`ProcessReport`).
pub const DEFAULT_TEMPLATE_PREFIX: &str = "Process";

/// Prefix of every generated wrapper routine (`WrapperLayout`).
pub const DEFAULT_WRAPPER_PREFIX: &str = "Wrapper";

/// Configuration for one compilation unit.
///
/// Create with [`GenOptions::new()`] and chain builder methods:
///
/// ```rust
/// use tplgen::GenOptions;
///
/// let opts = GenOptions::new("views")
///     .extra_import("strings")
///     .unit_id("index.gtt")
///     .external_wrapper("Layout");
/// assert_eq!(opts.package_name, "views");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GenOptions {
    /// Package the generated file declares.
    pub package_name: String,

    /// Imports added to the header whether or not the tree needs them.
    pub extra_imports: BTreeSet<String>,

    /// Identifier of the compilation unit. When set, it is folded into
    /// pooled constant names so units sharing a package cannot clash.
    pub unit_id: Option<String>,

    /// Import path of the filter module. Unless `filter_qualifier` is set,
    /// the package qualifier at call sites is derived from the last path
    /// segment, ignoring a major-version suffix (`/v2`, `.v1`).
    pub filter_module: String,

    /// Package name the filter module declares, when it differs from what
    /// the import path suggests.
    pub filter_qualifier: Option<String>,

    pub template_prefix: String,

    pub wrapper_prefix: String,

    /// Wrappers defined in other units of the same package. Unqualified
    /// wrapper uses must name one of these or a wrapper in the unit.
    pub external_wrappers: BTreeSet<String>,

    /// Emit the `// Code generated ... DO NOT EDIT.` line.
    pub generated_notice: bool,
}

impl GenOptions {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn extra_import(mut self, module: impl Into<String>) -> Self {
        self.extra_imports.insert(module.into());
        self
    }

    pub fn unit_id(mut self, id: impl Into<String>) -> Self {
        self.unit_id = Some(id.into());
        self
    }

    pub fn filter_module(mut self, module: impl Into<String>) -> Self {
        self.filter_module = module.into();
        self
    }

    pub fn filter_qualifier(mut self, name: impl Into<String>) -> Self {
        self.filter_qualifier = Some(name.into());
        self
    }

    pub fn template_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.template_prefix = prefix.into();
        self
    }

    pub fn wrapper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wrapper_prefix = prefix.into();
        self
    }

    pub fn external_wrapper(mut self, name: impl Into<String>) -> Self {
        self.external_wrappers.insert(name.into());
        self
    }

    pub fn generated_notice(mut self, enabled: bool) -> Self {
        self.generated_notice = enabled;
        self
    }

    /// Package qualifier for filter calls: `filter` for
    /// `github.com/go-qbit/template/filter`, `yaml` for `gopkg.in/yaml.v3`.
    ///
    /// `None` when the result is not a Go identifier.
    pub fn filter_package(&self) -> Option<&str> {
        let qualifier = match &self.filter_qualifier {
            Some(name) => name.as_str(),
            None => qualifier_from_path(&self.filter_module),
        };
        is_go_identifier(qualifier).then_some(qualifier)
    }
}

fn qualifier_from_path(module: &str) -> &str {
    let mut segments = module.trim_end_matches('/').rsplit('/');
    let mut last = segments.next().unwrap_or(module);
    if is_major_version(last) {
        last = segments.next().unwrap_or(last);
    }
    match last.rsplit_once('.') {
        Some((base, version)) if is_major_version(version) => base,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            extra_imports: BTreeSet::new(),
            unit_id: None,
            filter_module: DEFAULT_FILTER_MODULE.to_string(),
            filter_qualifier: None,
            template_prefix: DEFAULT_TEMPLATE_PREFIX.to_string(),
            wrapper_prefix: DEFAULT_WRAPPER_PREFIX.to_string(),
            external_wrappers: BTreeSet::new(),
            generated_notice: true,
        }
    }
}
