//! Type, method and field source builders.
//!
//! Builders compose into a member tree and render with a shared context;
//! the produced text uses simple names wherever the import collector can
//! claim them.

use super::annotation::AnnotationGenerator;
use super::comment::javadoc_comment;
use super::context::GeneratorContext;

const INDENT: &str = "    ";

/// A field declaration builder.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    visibility: Option<&'static str>,
    is_static: bool,
    is_final: bool,
    field_type: String,
    name: String,
    initializer: Option<String>,
}

impl FieldGenerator {
    pub fn new(field_type: impl Into<String>, name: impl Into<String>) -> Self {
        FieldGenerator {
            visibility: Some("private"),
            is_static: false,
            is_final: false,
            field_type: field_type.into(),
            name: name.into(),
            initializer: None,
        }
    }

    /// The conventional serialization marker of generated DTO classes.
    pub fn serial_version_uid() -> Self {
        FieldGenerator::new("long", "serialVersionUID")
            .with_static()
            .with_final()
            .with_initializer("1L")
    }

    pub fn with_visibility(mut self, visibility: &'static str) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_initializer(mut self, expr: impl Into<String>) -> Self {
        self.initializer = Some(expr.into());
        self
    }

    pub fn generate(&self, ctx: &mut GeneratorContext, indent: usize) -> String {
        let mut line = INDENT.repeat(indent);
        if let Some(v) = self.visibility {
            line.push_str(v);
            line.push(' ');
        }
        if self.is_static {
            line.push_str("static ");
        }
        if self.is_final {
            line.push_str("final ");
        }
        line.push_str(&ctx.use_type(&self.field_type));
        line.push(' ');
        line.push_str(&self.name);
        if let Some(init) = &self.initializer {
            line.push_str(" = ");
            line.push_str(init);
        }
        line.push(';');
        line
    }
}

/// A method or constructor declaration builder.
#[derive(Debug, Clone)]
pub struct MethodGenerator {
    javadoc: Option<String>,
    annotations: Vec<AnnotationGenerator>,
    visibility: Option<&'static str>,
    is_static: bool,
    /// `None` marks a constructor.
    return_type: Option<String>,
    name: String,
    params: Vec<(String, String)>,
    body: Option<Vec<String>>,
}

impl MethodGenerator {
    pub fn new(return_type: impl Into<String>, name: impl Into<String>) -> Self {
        MethodGenerator {
            javadoc: None,
            annotations: Vec::new(),
            visibility: Some("public"),
            is_static: false,
            return_type: Some(return_type.into()),
            name: name.into(),
            params: Vec::new(),
            body: Some(Vec::new()),
        }
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        MethodGenerator {
            return_type: None,
            ..MethodGenerator::new("", name)
        }
    }

    pub fn with_javadoc(mut self, text: impl Into<String>) -> Self {
        self.javadoc = Some(text.into());
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationGenerator) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_visibility(mut self, visibility: &'static str) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_param(mut self, param_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push((param_type.into(), name.into()));
        self
    }

    pub fn with_body_line(mut self, line: impl Into<String>) -> Self {
        self.body.get_or_insert_with(Vec::new).push(line.into());
        self
    }

    pub fn with_body(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.body = Some(lines.into_iter().collect());
        self
    }

    /// No body at all: an abstract or interface member.
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn generate(&self, ctx: &mut GeneratorContext, indent: usize) -> String {
        let nl = ctx.line_delimiter.as_str();
        let pad = INDENT.repeat(indent);
        let mut out = String::new();

        if let Some(doc) = &self.javadoc {
            for line in javadoc_comment(doc, ctx).lines() {
                out.push_str(&pad);
                out.push_str(line);
                out.push_str(nl);
            }
        }
        for annotation in &self.annotations {
            out.push_str(&pad);
            out.push_str(&annotation.generate(ctx));
            out.push_str(nl);
        }

        out.push_str(&pad);
        if let Some(v) = self.visibility {
            out.push_str(v);
            out.push(' ');
        }
        if self.is_static {
            out.push_str("static ");
        }
        if let Some(ret) = &self.return_type {
            out.push_str(&ctx.use_type(ret));
            out.push(' ');
        }
        out.push_str(&self.name);
        out.push('(');
        let params = self
            .params
            .iter()
            .map(|(t, n)| format!("{} {}", ctx.use_type(t), n))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&params);
        out.push(')');

        match &self.body {
            None => out.push(';'),
            Some(lines) => {
                out.push_str(" {");
                out.push_str(nl);
                for line in lines {
                    out.push_str(&pad);
                    out.push_str(INDENT);
                    out.push_str(line);
                    out.push_str(nl);
                }
                out.push_str(&pad);
                out.push('}');
            }
        }
        out
    }
}

/// A class declaration builder with nested members.
#[derive(Debug, Clone)]
pub struct TypeGenerator {
    javadoc: Option<String>,
    annotations: Vec<AnnotationGenerator>,
    visibility: Option<&'static str>,
    is_static: bool,
    name: String,
    super_type: Option<String>,
    interfaces: Vec<String>,
    members: Vec<TypeMemberGenerator>,
}

#[derive(Debug, Clone)]
enum TypeMemberGenerator {
    Field(FieldGenerator),
    Method(MethodGenerator),
    Type(TypeGenerator),
}

impl TypeGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        TypeGenerator {
            javadoc: None,
            annotations: Vec::new(),
            visibility: Some("public"),
            is_static: false,
            name: name.into(),
            super_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_javadoc(mut self, text: impl Into<String>) -> Self {
        self.javadoc = Some(text.into());
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationGenerator) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_super_type(mut self, super_type: impl Into<String>) -> Self {
        self.super_type = Some(super_type.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_field(mut self, field: FieldGenerator) -> Self {
        self.members.push(TypeMemberGenerator::Field(field));
        self
    }

    pub fn with_method(mut self, method: MethodGenerator) -> Self {
        self.members.push(TypeMemberGenerator::Method(method));
        self
    }

    pub fn with_nested_type(mut self, nested: TypeGenerator) -> Self {
        self.members.push(TypeMemberGenerator::Type(nested));
        self
    }

    pub fn generate(&self, ctx: &mut GeneratorContext, indent: usize) -> String {
        let nl = ctx.line_delimiter.as_str();
        let pad = INDENT.repeat(indent);
        let mut out = String::new();

        if let Some(doc) = &self.javadoc {
            for line in javadoc_comment(doc, ctx).lines() {
                out.push_str(&pad);
                out.push_str(line);
                out.push_str(nl);
            }
        }
        for annotation in &self.annotations {
            out.push_str(&pad);
            out.push_str(&annotation.generate(ctx));
            out.push_str(nl);
        }

        out.push_str(&pad);
        if let Some(v) = self.visibility {
            out.push_str(v);
            out.push(' ');
        }
        if self.is_static {
            out.push_str("static ");
        }
        out.push_str("class ");
        out.push_str(&self.name);
        if let Some(sup) = &self.super_type {
            out.push_str(" extends ");
            out.push_str(&ctx.use_type(sup));
        }
        if !self.interfaces.is_empty() {
            out.push_str(" implements ");
            let list = self
                .interfaces
                .iter()
                .map(|i| ctx.use_type(i))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&list);
        }
        out.push_str(" {");
        out.push_str(nl);

        for member in &self.members {
            out.push_str(nl);
            let text = match member {
                TypeMemberGenerator::Field(f) => f.generate(ctx, indent + 1),
                TypeMemberGenerator::Method(m) => m.generate(ctx, indent + 1),
                TypeMemberGenerator::Type(t) => t.generate(ctx, indent + 1),
            };
            out.push_str(&text);
            out.push_str(nl);
        }

        out.push_str(&pad);
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_rendering() {
        let mut ctx = GeneratorContext::new("t");
        assert_eq!(
            FieldGenerator::serial_version_uid().generate(&mut ctx, 1),
            "    private static final long serialVersionUID = 1L;"
        );
    }

    #[test]
    fn test_method_rendering() {
        let mut ctx = GeneratorContext::new("t");
        let method = MethodGenerator::new("String", "getName")
            .with_body_line("return m_name;");
        assert_eq!(
            method.generate(&mut ctx, 1),
            "    public String getName() {\n        return m_name;\n    }"
        );
    }

    #[test]
    fn test_type_with_members() {
        let mut ctx = GeneratorContext::new("t");
        let t = TypeGenerator::new("Name")
            .with_static()
            .with_super_type("x.AbstractPropertyData<String>")
            .with_field(FieldGenerator::serial_version_uid());
        assert_eq!(
            t.generate(&mut ctx, 0),
            "public static class Name extends AbstractPropertyData<String> {\n\
             \n\
             \x20   private static final long serialVersionUID = 1L;\n\
             }"
        );
        assert_eq!(ctx.imports.imports(), vec!["x.AbstractPropertyData".to_string()]);
    }
}
