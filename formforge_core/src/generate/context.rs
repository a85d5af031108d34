//! Builder context shared by all source generators: line delimiter policy
//! and import resolution for one target compilation unit.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Line delimiter of the produced text, supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDelimiter {
    #[default]
    Lf,
    CrLf,
}

impl LineDelimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineDelimiter::Lf => "\n",
            LineDelimiter::CrLf => "\r\n",
        }
    }

    /// Delimiter of an existing file, for incremental regeneration.
    pub fn detect(existing: &str) -> LineDelimiter {
        if existing.contains("\r\n") {
            LineDelimiter::CrLf
        } else {
            LineDelimiter::Lf
        }
    }
}

/// Collects imports while generators reference types, resolving each
/// referenced name to the shortest unambiguous form.
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    package: String,
    by_simple: IndexMap<String, String>,
}

impl ImportCollector {
    pub fn new(package: impl Into<String>) -> Self {
        ImportCollector {
            package: package.into(),
            by_simple: IndexMap::new(),
        }
    }

    /// Register a possibly-generic type reference and return the form to
    /// write in source: simple names where the import is unambiguous, the
    /// fully qualified name on a simple-name conflict.
    pub fn use_type(&mut self, reference: &str) -> String {
        let mut out = String::with_capacity(reference.len());
        let mut name = String::new();
        for c in reference.chars() {
            if c.is_alphanumeric() || c == '.' || c == '_' || c == '$' {
                name.push(c);
            } else {
                if !name.is_empty() {
                    out.push_str(&self.use_single(&name));
                    name.clear();
                }
                out.push(c);
            }
        }
        if !name.is_empty() {
            out.push_str(&self.use_single(&name));
        }
        out
    }

    fn use_single(&mut self, name: &str) -> String {
        let Some((_, simple)) = name.rsplit_once('.') else {
            return name.to_string();
        };
        // a lowercase trailing segment is a package-like token inside a
        // wildcard expression; leave it alone
        if !simple.chars().next().is_some_and(char::is_uppercase) {
            return name.to_string();
        }
        match self.by_simple.get(simple) {
            Some(known) if known == name => simple.to_string(),
            Some(_) => name.to_string(),
            None => {
                self.by_simple.insert(simple.to_string(), name.to_string());
                simple.to_string()
            }
        }
    }

    /// Import statements to emit, alphabetically sorted. Same-package and
    /// `java.lang` types need no import.
    pub fn imports(&self) -> Vec<String> {
        let mut list: Vec<String> = self
            .by_simple
            .values()
            .filter(|fqn| {
                let pkg = fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("");
                !pkg.is_empty() && pkg != self.package && pkg != "java.lang"
            })
            .cloned()
            .collect();
        list.sort();
        list
    }
}

/// Context threaded through all builders of one compilation unit.
#[derive(Debug, Clone)]
pub struct GeneratorContext {
    pub line_delimiter: LineDelimiter,
    /// User tag rendered into TODO comments, when configured.
    pub todo_user: Option<String>,
    pub imports: ImportCollector,
}

impl GeneratorContext {
    pub fn new(package: impl Into<String>) -> Self {
        GeneratorContext {
            line_delimiter: LineDelimiter::Lf,
            todo_user: None,
            imports: ImportCollector::new(package),
        }
    }

    pub fn with_line_delimiter(mut self, delimiter: LineDelimiter) -> Self {
        self.line_delimiter = delimiter;
        self
    }

    pub fn with_todo_user(mut self, user: impl Into<String>) -> Self {
        self.todo_user = Some(user.into());
        self
    }

    /// Shorthand for [`ImportCollector::use_type`].
    pub fn use_type(&mut self, reference: &str) -> String {
        self.imports.use_type(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_type_resolves_generics() {
        let mut imports = ImportCollector::new("com.acme.shared");
        let written =
            imports.use_type("java.util.HashMap<String, java.util.List<com.acme.IService>>");
        assert_eq!(written, "HashMap<String, List<IService>>");
        assert_eq!(
            imports.imports(),
            vec![
                "com.acme.IService".to_string(),
                "java.util.HashMap".to_string(),
                "java.util.List".to_string(),
            ]
        );
    }

    #[test]
    fn test_conflicting_simple_names_stay_qualified() {
        let mut imports = ImportCollector::new("a");
        assert_eq!(imports.use_type("x.Date"), "Date");
        assert_eq!(imports.use_type("y.Date"), "y.Date");
        assert_eq!(imports.imports(), vec!["x.Date".to_string()]);
    }

    #[test]
    fn test_same_package_and_java_lang_skip_imports() {
        let mut imports = ImportCollector::new("com.acme");
        imports.use_type("com.acme.PersonFormData");
        imports.use_type("java.lang.Long");
        imports.use_type("String");
        assert!(imports.imports().is_empty());
    }

    #[test]
    fn test_detect_line_delimiter() {
        assert_eq!(LineDelimiter::detect("a\r\nb"), LineDelimiter::CrLf);
        assert_eq!(LineDelimiter::detect("a\nb"), LineDelimiter::Lf);
        assert_eq!(LineDelimiter::detect(""), LineDelimiter::Lf);
    }
}
