//! Annotation source builders.
//!
//! Elements are value objects collected into an insertion-ordered,
//! name-keyed structure supporting removal by name before the final
//! render. The conventional `value` element renders as a bare expression.

use super::context::GeneratorContext;
use derive_more::From;
use indexmap::IndexMap;

/// Default comment of the generated-class marker annotation.
pub const GENERATED_COMMENT: &str =
    "This class is auto generated. No manual modifications recommended.";

/// A lazily-rendered annotation element expression.
///
/// Numeric values render without literal suffixes: the declared element
/// type already fixes the width, so `4` is a valid `long`/`double` literal
/// in the annotation position and a suffix would only add noise.
#[derive(Debug, Clone, From)]
pub enum ElementValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Pre-rendered expression, emitted verbatim (class literals, enum
    /// constants, arrays).
    #[from(skip)]
    Raw(String),
}

impl From<i32> for ElementValue {
    fn from(value: i32) -> Self {
        ElementValue::Int(value as i64)
    }
}

impl From<&str> for ElementValue {
    fn from(value: &str) -> Self {
        ElementValue::Str(value.to_string())
    }
}

impl ElementValue {
    pub fn raw(expr: impl Into<String>) -> Self {
        ElementValue::Raw(expr.into())
    }

    fn render(&self) -> String {
        match self {
            ElementValue::Int(v) => v.to_string(),
            ElementValue::Float(v) => {
                if v.fract() == 0.0 {
                    format!("{:.1}", v)
                } else {
                    v.to_string()
                }
            }
            ElementValue::Bool(v) => v.to_string(),
            ElementValue::Str(v) => format!("\"{}\"", escape_java_string(v)),
            ElementValue::Raw(v) => v.clone(),
        }
    }
}

/// Escapes a string for a Java string literal.
pub fn escape_java_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Builder for one annotation use.
#[derive(Debug, Clone)]
pub struct AnnotationGenerator {
    name: String,
    elements: IndexMap<String, ElementValue>,
}

impl AnnotationGenerator {
    pub fn new(fqn: impl Into<String>) -> Self {
        AnnotationGenerator {
            name: fqn.into(),
            elements: IndexMap::new(),
        }
    }

    /// The canonical generated-class marker with the default comment.
    pub fn generated(annotation_fqn: impl Into<String>, generator: &str) -> Self {
        Self::generated_with_comment(annotation_fqn, generator, GENERATED_COMMENT)
    }

    pub fn generated_with_comment(
        annotation_fqn: impl Into<String>,
        generator: &str,
        comment: &str,
    ) -> Self {
        AnnotationGenerator::new(annotation_fqn)
            .with_element("value", generator)
            .with_element("comments", comment)
    }

    pub fn with_element(mut self, name: impl Into<String>, value: impl Into<ElementValue>) -> Self {
        self.elements.insert(name.into(), value.into());
        self
    }

    /// Removes an element by name; a removed element is fully absent from
    /// the rendered output.
    pub fn without_element(mut self, name: &str) -> Self {
        self.elements.shift_remove(name);
        self
    }

    pub fn generate(&self, ctx: &mut GeneratorContext) -> String {
        let name = ctx.use_type(&self.name);
        match self.elements.len() {
            0 => format!("@{}", name),
            1 if self.elements.keys().next().map(String::as_str) == Some("value") => {
                // the conventional single element renders as a bare expression
                format!("@{}({})", name, self.elements[0].render())
            }
            _ => {
                let pairs = self
                    .elements
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v.render()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("@{}({})", name, pairs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GeneratorContext {
        GeneratorContext::new("test")
    }

    #[test]
    fn test_single_value_element_renders_bare() {
        let anno = AnnotationGenerator::new("TestAnnotation").with_element("value", 4);
        assert_eq!(anno.generate(&mut ctx()), "@TestAnnotation(4)");
    }

    #[test]
    fn test_named_element_keeps_name() {
        let anno = AnnotationGenerator::new("TestAnnotation").with_element("special", 4);
        assert_eq!(anno.generate(&mut ctx()), "@TestAnnotation(special = 4)");
    }

    #[test]
    fn test_no_elements_renders_without_parens() {
        let anno = AnnotationGenerator::new("TestAnnotation")
            .with_element("value", 4)
            .without_element("value");
        assert_eq!(anno.generate(&mut ctx()), "@TestAnnotation");
    }

    #[test]
    fn test_removed_element_is_fully_absent() {
        let anno = AnnotationGenerator::new("TestAnnotation")
            .with_element("a", 1)
            .with_element("b", 2)
            .without_element("a");
        assert_eq!(anno.generate(&mut ctx()), "@TestAnnotation(b = 2)");
    }

    #[test]
    fn test_generated_canonical_form() {
        let anno = AnnotationGenerator::generated("Generated", "Generator");
        assert_eq!(
            anno.generate(&mut ctx()),
            "@Generated(value = \"Generator\", comments = \"This class is auto generated. No manual modifications recommended.\")"
        );
    }

    #[test]
    fn test_generated_comment_escapes_quotes() {
        let anno =
            AnnotationGenerator::generated_with_comment("Generated", "G", "Test\"Comment");
        assert_eq!(
            anno.generate(&mut ctx()),
            "@Generated(value = \"G\", comments = \"Test\\\"Comment\")"
        );
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let anno = AnnotationGenerator::new("Order")
            .with_element("z", 1)
            .with_element("a", 2);
        assert_eq!(anno.generate(&mut ctx()), "@Order(z = 1, a = 2)");
    }

    #[test]
    fn test_float_rendering_without_suffix() {
        let anno = AnnotationGenerator::new("Order").with_element("value", 10.0);
        assert_eq!(anno.generate(&mut ctx()), "@Order(10.0)");

        let anno = AnnotationGenerator::new("Order").with_element("value", 10.5);
        assert_eq!(anno.generate(&mut ctx()), "@Order(10.5)");
    }
}
