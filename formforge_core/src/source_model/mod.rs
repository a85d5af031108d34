//! Source model abstraction: a read-only structural view over Java
//! compilation units, decoupled from any particular compiler frontend.
//!
//! The bundled frontend is the logos lexer plus the structural parser in
//! this module; everything downstream (model parsers, generators, the
//! wellformer) consumes only the [`ast`] graph and [`env`] queries.

pub mod ast;
pub mod env;
pub mod lexer;
pub mod parser;
pub mod stubs;

pub use ast::{
    AnnotationElementUse, AnnotationUse, CompilationUnit, ElementId, FieldDecl, ImportDecl,
    InitializerBlock, Member, MethodDecl, Modifiers, ParamDecl, SourceRange, TypeDecl, TypeKind,
    TypeParam, TypeRef, Visibility,
};
pub use env::{JavaEnvironment, JavaType};
pub use parser::{ParseError, parse_compilation_unit};

pub(crate) use ast::simple_name_of;
