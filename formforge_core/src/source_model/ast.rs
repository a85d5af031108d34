//! Java declaration structure definitions.
//!
//! This is the read-only object graph produced by the structural parser.
//! Statement-level syntax is never modeled: bodies, initializers and
//! annotation element expressions are kept as spans into the original
//! source text.

use serde::{Deserialize, Serialize};

/// Byte span into the compilation unit source.
pub type SourceRange = std::ops::Range<usize>;

/// A parsed compilation unit.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first top-level type, which gives the unit its file name.
    pub fn primary_type(&self) -> Option<&TypeDecl> {
        self.types.first()
    }

    /// Fully qualified name of the primary type.
    pub fn primary_fqn(&self) -> Option<String> {
        let name = &self.primary_type()?.name;
        Some(match &self.package {
            Some(pkg) => format!("{}.{}", pkg, name),
            None => name.clone(),
        })
    }
}

/// A single import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A class, interface or enum declaration.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub type_params: Vec<TypeParam>,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    /// Members in original declaration order, all kinds interleaved.
    pub members: Vec<Member>,
    pub javadoc: Option<SourceRange>,
    /// Full declaration span, annotations and body included.
    pub range: SourceRange,
    /// Span between the braces of the type body.
    pub body_range: SourceRange,
    /// For enums: span of the constant list up to and including the
    /// separating semicolon (or the whole body when there is none).
    pub enum_header_range: Option<SourceRange>,
}

/// A member of a type body, preserving declaration order across kinds.
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Type(TypeDecl),
    Initializer(InitializerBlock),
}

/// A static or instance initializer block, kept opaque.
#[derive(Debug, Clone)]
pub struct InitializerBlock {
    pub is_static: bool,
    pub range: SourceRange,
}

impl TypeDecl {
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(f) => Some(f),
            _ => None,
        })
    }

    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Type(t) => Some(t),
            _ => None,
        })
    }

    pub fn nested_type(&self, simple_name: &str) -> Option<&TypeDecl> {
        self.nested_types().find(|t| t.name == simple_name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods().find(|m| m.name == name)
    }

    /// Annotation whose written name matches the given simple or qualified
    /// name. Resolution against imports happens in the environment layer.
    pub fn annotation(&self, name: &str) -> Option<&AnnotationUse> {
        self.annotations.iter().find(|a| a.matches(name))
    }
}

/// A method or constructor declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub type_params: Vec<TypeParam>,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub params: Vec<ParamDecl>,
    pub throws: Vec<TypeRef>,
    pub javadoc: Option<SourceRange>,
    /// Span between the body braces; `None` for abstract/native members.
    pub body: Option<SourceRange>,
    pub range: SourceRange,
}

impl MethodDecl {
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationUse> {
        self.annotations.iter().find(|a| a.matches(name))
    }

    /// Identity descriptor: parameter type names, comma separated.
    pub fn descriptor(&self) -> String {
        self.params
            .iter()
            .map(|p| p.param_type.render())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A field declaration. One declarator per statement; the structural
/// parser rejects multi-declarator field statements.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUse>,
    pub field_type: TypeRef,
    pub initializer: Option<SourceRange>,
    pub javadoc: Option<SourceRange>,
    pub range: SourceRange,
}

/// A formal method parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub param_type: TypeRef,
    pub is_final: bool,
    pub is_varargs: bool,
}

/// Declaration modifiers. Synthetic/bridge flags can only come from binary
/// stubs; source never produces them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    pub is_default: bool,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    PackagePrivate,
    Private,
}

/// An annotation use site.
#[derive(Debug, Clone)]
pub struct AnnotationUse {
    /// Name as written: simple (`FormData`) or qualified.
    pub name: String,
    pub elements: Vec<AnnotationElementUse>,
    pub range: SourceRange,
}

impl AnnotationUse {
    /// Matches either the written name or its trailing simple name, so
    /// callers can probe with a fully qualified name.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
            || simple_name_of(name) == simple_name_of(&self.name)
    }

    pub fn element(&self, name: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value_text.as_str())
    }
}

/// One `name = expression` pair; the expression is raw source text.
#[derive(Debug, Clone)]
pub struct AnnotationElementUse {
    pub name: String,
    pub value_text: String,
}

/// A reference to a type, including generic arguments and array dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// Dotted name as written (`String`, `java.util.List`).
    pub name: String,
    pub type_args: Vec<TypeRef>,
    pub array_dims: usize,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            type_args: Vec::new(),
            array_dims: 0,
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0
            && matches!(
                self.name.as_str(),
                "boolean" | "byte" | "short" | "int" | "long" | "char" | "float" | "double"
                    | "void"
            )
    }

    /// Renders the reference back to source form.
    pub fn render(&self) -> String {
        let mut out = self.name.clone();
        if !self.type_args.is_empty() {
            out.push('<');
            let args = self
                .type_args
                .iter()
                .map(TypeRef::render)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&args);
            out.push('>');
        }
        for _ in 0..self.array_dims {
            out.push_str("[]");
        }
        out
    }
}

/// A declared type parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

/// Stable identity of an element within one environment session, usable as
/// a map key across re-parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId {
    pub declaring_type: String,
    pub name: String,
    pub descriptor: String,
}

impl ElementId {
    pub fn of_type(fqn: impl Into<String>) -> Self {
        let fqn = fqn.into();
        ElementId {
            name: simple_name_of(&fqn).to_string(),
            declaring_type: fqn,
            descriptor: String::new(),
        }
    }

    pub fn of_member(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        ElementId {
            declaring_type: declaring_type.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

pub(crate) fn simple_name_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
