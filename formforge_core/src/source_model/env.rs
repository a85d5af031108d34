//! The Java environment: a session-scoped registry of parsed compilation
//! units with explicit reload semantics.
//!
//! The environment is the only owner of derived structural state. There are
//! no global caches; callers that need a consistent view across related
//! lookups hold one `&JavaEnvironment` for the whole operation. Re-parsing
//! follows a two-phase protocol: `register_override` stages new text,
//! `reload` re-parses staged units whose content hash actually changed.
//! Until `reload` is called, structural queries keep answering from the
//! stale snapshot.

use super::ast::{
    AnnotationUse, CompilationUnit, ElementId, FieldDecl, MethodDecl, SourceRange, TypeDecl,
    TypeRef, simple_name_of,
};
use super::parser::parse_compilation_unit;
use crate::error::{FormforgeError, Result};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Simple names resolvable through the implicit `java.lang` import. These
/// stay unqualified so rendered types read like the source they came from.
const JAVA_LANG_TYPES: &[&str] = &[
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "Throwable",
    "Void",
];

struct UnitEntry {
    /// `None` marks a binary stub: structure without attached source.
    source: Option<String>,
    content_hash: Option<blake3::Hash>,
    unit: CompilationUnit,
    parse_epoch: u64,
}

/// Session-scoped snapshot of all known compilation units.
#[derive(Default)]
pub struct JavaEnvironment {
    units: HashMap<String, UnitEntry>,
    pending: HashMap<String, String>,
    epoch: u64,
}

impl JavaEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reload epoch. Bumps once per effective [`reload`](Self::reload).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Parse and register a source-backed compilation unit. Returns the
    /// fully qualified name of its primary type.
    pub fn register_source(&mut self, source: impl Into<String>) -> Result<String> {
        let source = source.into();
        let unit = parse_compilation_unit(&source)
            .map_err(|e| FormforgeError::parse("<registered source>", e.to_string()))?;
        let fqn = unit
            .primary_fqn()
            .ok_or_else(|| FormforgeError::parse("<registered source>", "No type declaration"))?;

        trace!(fqn = %fqn, "Registering source compilation unit");
        self.units.insert(
            fqn.clone(),
            UnitEntry {
                content_hash: Some(blake3::hash(source.as_bytes())),
                source: Some(source),
                unit,
                parse_epoch: self.epoch,
            },
        );
        Ok(fqn)
    }

    /// Parse stub source and register the result as a binary stub. The text
    /// is discarded after parsing; only the structure is kept.
    pub fn register_binary_source(&mut self, source: &str) -> Result<String> {
        let unit = parse_compilation_unit(source)
            .map_err(|e| FormforgeError::parse("<binary stub>", e.to_string()))?;
        self.register_binary(unit)
    }

    /// Register a binary stub: declaration structure without source text.
    /// Every source range query against it answers `None`.
    pub fn register_binary(&mut self, unit: CompilationUnit) -> Result<String> {
        let fqn = unit
            .primary_fqn()
            .ok_or_else(|| FormforgeError::parse("<binary stub>", "No type declaration"))?;
        trace!(fqn = %fqn, "Registering binary stub");
        self.units.insert(
            fqn.clone(),
            UnitEntry {
                source: None,
                content_hash: None,
                unit,
                parse_epoch: self.epoch,
            },
        );
        Ok(fqn)
    }

    /// Stage new text for a compilation unit. Structural queries are NOT
    /// affected until [`reload`](Self::reload) is called.
    pub fn register_override(&mut self, fqn: impl Into<String>, new_source: impl Into<String>) {
        self.pending.insert(fqn.into(), new_source.into());
    }

    /// Re-parse every staged unit whose content actually changed, bump the
    /// epoch once if anything did, and return the affected names. Staged
    /// units with unchanged content are dropped without re-parsing.
    pub fn reload(&mut self) -> Result<Vec<String>> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let mut changed = Vec::new();
        let next_epoch = self.epoch + 1;

        for (fqn, source) in pending {
            let hash = blake3::hash(source.as_bytes());
            if let Some(entry) = self.units.get(&fqn) {
                if entry.content_hash == Some(hash) {
                    trace!(fqn = %fqn, "Override content unchanged, keeping snapshot");
                    continue;
                }
            }
            let unit = parse_compilation_unit(&source)
                .map_err(|e| FormforgeError::parse(&fqn, e.to_string()))?;
            self.units.insert(
                fqn.clone(),
                UnitEntry {
                    content_hash: Some(hash),
                    source: Some(source),
                    unit,
                    parse_epoch: next_epoch,
                },
            );
            changed.push(fqn);
        }

        if !changed.is_empty() {
            self.epoch = next_epoch;
            debug!(epoch = self.epoch, changed = changed.len(), "Environment reloaded");
        }
        Ok(changed)
    }

    /// Walk a source folder and register every `.java` file found. Files
    /// that fail to parse are reported and skipped; one bad unit never
    /// aborts the scan.
    pub fn load_source_folder(&mut self, root: impl AsRef<Path>) -> Result<usize> {
        let root = root.as_ref();
        debug!(root = %root.display(), "Loading source folder");
        let mut count = 0usize;

        for entry in walkdir::WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                FormforgeError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walkdir loop")),
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("java") {
                continue;
            }
            let source = std::fs::read_to_string(entry.path())?;
            match self.register_source(source) {
                Ok(_) => count += 1,
                Err(e) => {
                    warn!(file = %entry.path().display(), error = %e, "Skipping unparsable unit");
                }
            }
        }

        debug!(count, "Source folder loaded");
        Ok(count)
    }

    /// Parse epoch of one unit, for cache invalidation checks.
    pub fn unit_epoch(&self, fqn: &str) -> Option<u64> {
        self.units.get(fqn).map(|e| e.parse_epoch)
    }

    /// Names of all registered source-backed primary types. Binary stubs
    /// are not listed; they are never generation targets.
    pub fn source_type_names(&self) -> impl Iterator<Item = &str> {
        self.units
            .iter()
            .filter(|(_, entry)| entry.source.is_some())
            .map(|(fqn, _)| fqn.as_str())
    }

    /// Find a type by fully qualified name. Nested types are addressed with
    /// dots (`com.acme.PersonForm.MainBox`).
    pub fn find_type(&self, fqn: &str) -> Option<JavaType<'_>> {
        // direct hit on a primary type
        if let Some(entry) = self.units.get(fqn) {
            let decl = entry.unit.primary_type()?;
            return Some(JavaType {
                env: self,
                entry,
                decl,
                fqn: fqn.to_string(),
            });
        }

        // strip trailing segments until a registered unit is found, then
        // descend into nested types
        let mut boundary = fqn.len();
        while let Some(dot) = fqn[..boundary].rfind('.') {
            boundary = dot;
            if let Some(entry) = self.units.get(&fqn[..boundary]) {
                let mut decl = entry.unit.primary_type()?;
                for segment in fqn[boundary + 1..].split('.') {
                    decl = decl.nested_type(segment)?;
                }
                return Some(JavaType {
                    env: self,
                    entry,
                    decl,
                    fqn: fqn.to_string(),
                });
            }
        }
        None
    }

    /// Like [`find_type`](Self::find_type) but failing with
    /// [`FormforgeError::MissingType`] for callers that require resolution.
    pub fn require_type(&self, fqn: &str) -> Result<JavaType<'_>> {
        self.find_type(fqn)
            .ok_or_else(|| FormforgeError::missing_type(fqn))
    }

    /// Best-effort resolution of a written type name against a unit's
    /// imports and package. Implicitly imported `java.lang` names are kept
    /// simple; anything else unqualified resolves into the unit's package,
    /// which is what the absence of an import means in source.
    fn resolve_written_name(&self, unit: &CompilationUnit, written: &str) -> String {
        if let Some((first, rest)) = written.split_once('.') {
            // "Outer.Inner" is relative to the unit's scope; a lowercase
            // first segment is a package and therefore already absolute
            if first.chars().next().is_some_and(char::is_uppercase) {
                return format!("{}.{}", self.resolve_written_name(unit, first), rest);
            }
            return written.to_string();
        }
        // primitives, void and type-variable-like lowercase names never
        // resolve into a package
        if !written.chars().next().is_some_and(char::is_uppercase) {
            return written.to_string();
        }
        for import in &unit.imports {
            if import.is_wildcard || import.is_static {
                continue;
            }
            if simple_name_of(&import.path) == written {
                return import.path.clone();
            }
        }
        if JAVA_LANG_TYPES.contains(&written) {
            return written.to_string();
        }
        if let Some(pkg) = &unit.package {
            return format!("{}.{}", pkg, written);
        }
        written.to_string()
    }
}

/// A read-only view of one type declaration inside an environment.
#[derive(Clone)]
pub struct JavaType<'e> {
    env: &'e JavaEnvironment,
    entry: &'e UnitEntry,
    decl: &'e TypeDecl,
    fqn: String,
}

impl<'e> JavaType<'e> {
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn decl(&self) -> &'e TypeDecl {
        self.decl
    }

    pub fn env(&self) -> &'e JavaEnvironment {
        self.env
    }

    pub fn element_id(&self) -> ElementId {
        ElementId::of_type(self.fqn.clone())
    }

    /// `true` for binary stubs without attached source.
    pub fn is_binary(&self) -> bool {
        self.entry.source.is_none()
    }

    /// Full unit source, when attached.
    pub fn unit_source(&self) -> Option<&'e str> {
        self.entry.source.as_deref()
    }

    /// Slice of the unit source for a range, `None` on binary stubs.
    pub fn source_of(&self, range: &SourceRange) -> Option<&'e str> {
        self.unit_source().map(|s| &s[range.clone()])
    }

    /// Javadoc text of the declaration, `None` when absent or binary.
    pub fn javadoc_text(&self) -> Option<&'e str> {
        let range = self.decl.javadoc.as_ref()?;
        self.source_of(range)
    }

    pub fn package(&self) -> Option<&'e str> {
        self.entry.unit.package.as_deref()
    }

    /// The raw superclass reference as declared, with type arguments.
    pub fn superclass_ref(&self) -> Option<&'e TypeRef> {
        self.decl.superclass.as_ref()
    }

    /// The resolved superclass, `None` at the hierarchy root or when the
    /// supertype is not registered in the environment.
    pub fn superclass(&self) -> Option<JavaType<'e>> {
        let super_ref = self.decl.superclass.as_ref()?;
        let fqn = self.resolve(&super_ref.name);
        let found = self.env.find_type(&fqn);
        if found.is_none() {
            trace!(fqn = %fqn, "Superclass not registered in environment");
        }
        found
    }

    /// Lazy superclass chain, optionally including the receiver, root-most
    /// last. Short-circuits as soon as the caller stops pulling.
    pub fn superclass_chain(&self, include_self: bool) -> impl Iterator<Item = JavaType<'e>> {
        let start = if include_self {
            Some(self.clone())
        } else {
            self.superclass()
        };
        std::iter::successors(start, |t| t.superclass())
    }

    /// Lazy super-first hierarchy walk over classes and interfaces.
    /// Visits the receiver first (when requested), then superclasses before
    /// superinterfaces, each type at most once.
    pub fn super_types(
        &self,
        include_self: bool,
        interfaces_only: bool,
    ) -> SuperTypeIter<'e> {
        let mut queue = VecDeque::new();
        if include_self {
            queue.push_back(self.clone());
        } else {
            if let Some(s) = self.superclass() {
                queue.push_back(s);
            }
            for i in self.interfaces() {
                queue.push_back(i);
            }
        }
        SuperTypeIter {
            queue,
            seen: HashSet::new(),
            interfaces_only,
        }
    }

    /// Resolved directly declared superinterfaces.
    pub fn interfaces(&self) -> Vec<JavaType<'e>> {
        self.decl
            .interfaces
            .iter()
            .filter_map(|r| self.env.find_type(&self.resolve(&r.name)))
            .collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'e FieldDecl> {
        self.decl.fields()
    }

    pub fn methods(&self) -> impl Iterator<Item = &'e MethodDecl> {
        self.decl.methods()
    }

    /// Methods of this type and all its supertypes, sub-most first.
    pub fn methods_with_super(&self) -> impl Iterator<Item = (JavaType<'e>, &'e MethodDecl)> {
        self.super_types(true, false)
            .flat_map(|t| t.decl.methods().map(move |m| (t.clone(), m)))
    }

    pub fn nested_types(&self) -> impl Iterator<Item = JavaType<'e>> {
        let env = self.env;
        let entry = self.entry;
        let fqn = self.fqn.clone();
        self.decl.nested_types().map(move |decl| JavaType {
            env,
            entry,
            decl,
            fqn: format!("{}.{}", fqn, decl.name),
        })
    }

    /// Annotation on this type matching the given fully qualified name.
    /// Falls back to a simple-name match when imports cannot prove the
    /// qualified identity (wildcard import or same package).
    pub fn annotation(&self, fqn: &str) -> Option<&'e AnnotationUse> {
        find_annotation(self.env, &self.entry.unit, &self.decl.annotations, fqn)
    }

    /// Annotation lookup for a member of this type, with the same
    /// resolution rules as [`annotation`](Self::annotation).
    pub fn member_annotation<'a>(
        &self,
        annotations: &'a [AnnotationUse],
        fqn: &str,
    ) -> Option<&'a AnnotationUse> {
        find_annotation(self.env, &self.entry.unit, annotations, fqn)
    }

    /// Whether any type in the super hierarchy (self included) carries the
    /// given name. Used for marker supertype checks.
    pub fn is_instance_of(&self, fqn: &str) -> bool {
        self.super_types(true, false).any(|t| {
            t.fqn() == fqn || t.name() == simple_name_of(fqn)
        })
    }

    /// Resolve a written name in this type's scope. Type parameters and
    /// nested types shadow imports and package resolution.
    pub fn resolve(&self, written: &str) -> String {
        if !written.contains('.') {
            if self.decl.type_params.iter().any(|p| p.name == written) {
                return written.to_string();
            }
            if self.decl.nested_type(written).is_some() {
                return format!("{}.{}", self.fqn, written);
            }
        }
        self.env.resolve_written_name(&self.entry.unit, written)
    }
}

/// Annotation lookup shared by type and member queries.
pub(crate) fn find_annotation<'a>(
    env: &JavaEnvironment,
    unit: &CompilationUnit,
    annotations: &'a [AnnotationUse],
    fqn: &str,
) -> Option<&'a AnnotationUse> {
    annotations.iter().find(|a| {
        env.resolve_written_name(unit, &a.name) == fqn
            || simple_name_of(&a.name) == simple_name_of(fqn)
    })
}

/// Lazy, de-duplicated super-hierarchy iterator (super-first order).
pub struct SuperTypeIter<'e> {
    queue: VecDeque<JavaType<'e>>,
    seen: HashSet<String>,
    interfaces_only: bool,
}

impl<'e> Iterator for SuperTypeIter<'e> {
    type Item = JavaType<'e>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(t) = self.queue.pop_front() {
            if !self.seen.insert(t.fqn().to_string()) {
                continue;
            }
            if let Some(s) = t.superclass() {
                self.queue.push_back(s);
            }
            for i in t.interfaces() {
                self.queue.push_back(i);
            }
            if self.interfaces_only && !matches!(t.decl.kind, super::ast::TypeKind::Interface) {
                continue;
            }
            return Some(t);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::ast::{Member, Modifiers, TypeKind};

    fn binary_stub(pkg: &str, name: &str, superclass: Option<&str>) -> CompilationUnit {
        CompilationUnit {
            package: Some(pkg.to_string()),
            imports: Vec::new(),
            types: vec![TypeDecl {
                name: name.to_string(),
                kind: TypeKind::Class,
                modifiers: Modifiers::default(),
                annotations: Vec::new(),
                type_params: Vec::new(),
                superclass: superclass.map(TypeRef::named),
                interfaces: Vec::new(),
                members: Vec::new(),
                javadoc: None,
                range: 0..0,
                body_range: 0..0,
                enum_header_range: None,
            }],
        }
    }

    #[test]
    fn test_register_and_find_nested() {
        let mut env = JavaEnvironment::new();
        env.register_source(
            "package a.b;\npublic class Outer {\n  public class Inner {\n    public class Leaf {}\n  }\n}\n",
        )
        .unwrap();

        assert!(env.find_type("a.b.Outer").is_some());
        assert!(env.find_type("a.b.Outer.Inner.Leaf").is_some());
        assert!(env.find_type("a.b.Outer.Missing").is_none());
        assert!(matches!(
            env.require_type("a.b.Nope"),
            Err(FormforgeError::MissingType { .. })
        ));
    }

    #[test]
    fn test_two_phase_reload_protocol() {
        let mut env = JavaEnvironment::new();
        let fqn = env
            .register_source("package a;\npublic class C {\n  public void one() {}\n}\n")
            .unwrap();
        assert_eq!(env.find_type(&fqn).unwrap().methods().count(), 1);

        env.register_override(&fqn, "package a;\npublic class C {\n  public void one() {}\n  public void two() {}\n}\n");
        // still the stale snapshot before reload
        assert_eq!(env.find_type(&fqn).unwrap().methods().count(), 1);

        let changed = env.reload().unwrap();
        assert_eq!(changed, vec![fqn.clone()]);
        assert_eq!(env.find_type(&fqn).unwrap().methods().count(), 2);
    }

    #[test]
    fn test_reload_skips_unchanged_content() {
        let mut env = JavaEnvironment::new();
        let src = "package a;\npublic class C {}\n";
        let fqn = env.register_source(src).unwrap();
        let epoch_before = env.unit_epoch(&fqn).unwrap();

        env.register_override(&fqn, src);
        let changed = env.reload().unwrap();
        assert!(changed.is_empty());
        assert_eq!(env.unit_epoch(&fqn).unwrap(), epoch_before);

        // reload with nothing staged is a no-op
        assert!(env.reload().unwrap().is_empty());
    }

    #[test]
    fn test_binary_stub_has_no_source() {
        let mut env = JavaEnvironment::new();
        env.register_binary(binary_stub("x", "Base", None)).unwrap();
        let t = env.find_type("x.Base").unwrap();
        assert!(t.is_binary());
        assert!(t.unit_source().is_none());
        assert!(t.javadoc_text().is_none());
    }

    #[test]
    fn test_super_first_hierarchy_walk() {
        let mut env = JavaEnvironment::new();
        env.register_binary(binary_stub("x", "Root", None)).unwrap();
        env.register_binary(binary_stub("x", "Mid", Some("x.Root")))
            .unwrap();
        env.register_source(
            "package x;\npublic class Leaf extends Mid {}\n",
        )
        .unwrap();

        let leaf = env.find_type("x.Leaf").unwrap();
        let names: Vec<String> = leaf
            .super_types(true, false)
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Leaf", "Mid", "Root"]);

        // short-circuit: findAny-style consumption stops the walk early
        assert!(leaf.superclass_chain(true).any(|t| t.name() == "Mid"));
        assert!(leaf.is_instance_of("x.Root"));
    }
}
