//! Structural re-ordering of compilation units.
//!
//! Wellforming re-emits a unit's members grouped by category in the fixed
//! category order, preserving relative source order within each category
//! and keeping member bodies byte-identical. Javadoc travels with its
//! member; a javadoc block without narrative text is stripped instead of
//! preserved. Applying the pass twice produces byte-identical output.

use super::category::{Category, of_member};
use crate::error::{FormforgeError, Result};
use crate::generate::comment::is_empty_comment;
use crate::generate::context::LineDelimiter;
use crate::source_model::{Member, SourceRange, TypeDecl, parse_compilation_unit};
use tracing::trace;

/// A categorized view over one type declaration, supporting sibling
/// queries for incremental insertion.
pub struct StructuredType<'a> {
    source: &'a str,
    decl: &'a TypeDecl,
    /// Members with their categories, stable-sorted into canonical order.
    ordered: Vec<(Category, &'a Member)>,
}

impl<'a> StructuredType<'a> {
    pub fn categorize(decl: &'a TypeDecl, source: &'a str) -> Self {
        let mut ordered: Vec<(Category, &'a Member)> = decl
            .members
            .iter()
            .map(|m| (of_member(m, decl), m))
            .collect();
        // stable: relative source order survives within each category
        ordered.sort_by_key(|(category, _)| *category);
        StructuredType {
            source,
            decl,
            ordered,
        }
    }

    pub fn decl(&self) -> &'a TypeDecl {
        self.decl
    }

    pub fn members(&self) -> impl Iterator<Item = (Category, &'a Member)> {
        self.ordered.iter().map(|(category, member)| (*category, *member))
    }

    /// The existing member a new member of `category` belongs directly
    /// after: the last member whose category does not exceed it.
    pub fn sibling_before(&self, category: Category) -> Option<&'a Member> {
        self.ordered
            .iter()
            .take_while(|(c, _)| *c <= category)
            .last()
            .map(|(_, m)| *m)
    }

    /// The existing member a new member of `category` belongs directly
    /// before: the first member of a later category.
    pub fn sibling_after(&self, category: Category) -> Option<&'a Member> {
        self.ordered
            .iter()
            .find(|(c, _)| *c > category)
            .map(|(_, m)| *m)
    }

    /// Byte offset inside the unit where a new member of `category` should
    /// be inserted.
    pub fn insertion_offset(&self, category: Category) -> usize {
        match self.sibling_after(category) {
            Some(member) => line_start(self.source, chunk_start_of(member)),
            None => self.decl.body_range.end,
        }
    }
}

/// Re-apply canonical member ordering to a whole compilation unit.
pub fn wellform(source: &str) -> Result<String> {
    let unit = parse_compilation_unit(source)
        .map_err(|e| FormforgeError::wellform(e.to_string()))?;
    if unit.types.is_empty() {
        return Ok(source.to_string());
    }

    let nl = LineDelimiter::detect(source).as_str();
    let mut out = String::with_capacity(source.len());

    // header: everything before the first type's chunk
    let first_chunk = type_chunk_start(source, &unit.types[0]);
    let header = source[..first_chunk].trim_end();
    if !header.is_empty() {
        out.push_str(header);
        out.push_str(nl);
        out.push_str(nl);
    }

    for (idx, decl) in unit.types.iter().enumerate() {
        if idx > 0 {
            out.push_str(nl);
        }
        out.push_str(&wellform_type(source, decl, nl));
        out.push_str(nl);
    }
    Ok(out)
}

fn wellform_type(source: &str, decl: &TypeDecl, nl: &str) -> String {
    let structured = StructuredType::categorize(decl, source);
    let mut out = String::new();

    // signature chunk: javadoc (unless empty), annotations, declaration
    // header up to and including the opening brace
    let sig_start = type_chunk_start(source, decl);
    out.push_str(source[sig_start..decl.body_range.start].trim_end());

    if let Some(enum_header) = &decl.enum_header_range {
        out.push_str(nl);
        out.push_str(source[enum_header.clone()].trim_end().trim_start_matches(['\n', '\r']));
    }

    for (category, member) in structured.members() {
        trace!(category = ?category, "Emitting member");
        out.push_str(nl);
        out.push_str(nl);
        match member {
            Member::Type(nested) => {
                out.push_str(&wellform_type(source, nested, nl));
            }
            other => {
                let range = member_chunk_range(source, other);
                out.push_str(source[range].trim_end());
            }
        }
    }

    // closing brace line keeps its original indentation
    out.push_str(nl);
    let close_start = line_start(source, decl.range.end.saturating_sub(1));
    out.push_str(source[close_start..decl.range.end].trim_end_matches([' ', '\t']));
    out
}

/// Start offset of a member's emission chunk: its javadoc when present and
/// non-empty, its declaration otherwise, extended to the line start.
fn member_chunk_range(source: &str, member: &Member) -> SourceRange {
    line_start(source, chunk_start_of_with(source, member))..member_end_of(member)
}

fn chunk_start_of(member: &Member) -> usize {
    match member {
        Member::Field(f) => f.javadoc.as_ref().map(|j| j.start).unwrap_or(f.range.start),
        Member::Method(m) => m.javadoc.as_ref().map(|j| j.start).unwrap_or(m.range.start),
        Member::Type(t) => t.javadoc.as_ref().map(|j| j.start).unwrap_or(t.range.start),
        Member::Initializer(b) => b.range.start,
    }
}

/// Like [`chunk_start_of`], but an empty javadoc is skipped so it gets
/// stripped from the output.
fn chunk_start_of_with(source: &str, member: &Member) -> usize {
    let (javadoc, decl_start) = match member {
        Member::Field(f) => (f.javadoc.as_ref(), f.range.start),
        Member::Method(m) => (m.javadoc.as_ref(), m.range.start),
        Member::Type(t) => (t.javadoc.as_ref(), t.range.start),
        Member::Initializer(b) => (None, b.range.start),
    };
    match javadoc {
        Some(range) if !is_empty_comment(&source[range.clone()]) => range.start,
        _ => decl_start,
    }
}

fn member_end_of(member: &Member) -> usize {
    match member {
        Member::Field(f) => f.range.end,
        Member::Method(m) => m.range.end,
        Member::Type(t) => t.range.end,
        Member::Initializer(b) => b.range.end,
    }
}

fn type_chunk_start(source: &str, decl: &TypeDecl) -> usize {
    let start = match &decl.javadoc {
        Some(range) if !is_empty_comment(&source[range.clone()]) => range.start,
        _ => decl.range.start,
    };
    line_start(source, start)
}

fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNORDERED: &str = r#"package a;

import java.util.List;

public class Sample {

    public void run() {
    }

    /** Name member. */
    private String m_name;

    public Sample() {
    }

    private static final long serialVersionUID = 1L;
}
"#;

    #[test]
    fn test_wellform_reorders_by_category() {
        let out = wellform(UNORDERED).unwrap();
        let expected = r#"package a;

import java.util.List;

public class Sample {

    private static final long serialVersionUID = 1L;

    /** Name member. */
    private String m_name;

    public Sample() {
    }

    public void run() {
    }
}
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_wellform_is_idempotent() {
        let once = wellform(UNORDERED).unwrap();
        let twice = wellform(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relative_order_within_category_is_preserved() {
        let src = "class A {\n    void zeta() {\n    }\n\n    void alpha() {\n    }\n}\n";
        let out = wellform(src).unwrap();
        let zeta = out.find("zeta").unwrap();
        let alpha = out.find("alpha").unwrap();
        assert!(zeta < alpha, "same-category members keep source order");
    }

    #[test]
    fn test_empty_javadoc_is_stripped() {
        let src = "class A {\n    /**\n     *\n     */\n    private String m_x;\n}\n";
        let out = wellform(src).unwrap();
        assert!(!out.contains("/**"));
        assert!(out.contains("private String m_x;"));

        let kept = "class A {\n    /** Real docs. */\n    private String m_x;\n}\n";
        let out = wellform(kept).unwrap();
        assert!(out.contains("/** Real docs. */"));
    }

    #[test]
    fn test_sibling_queries() {
        let unit = parse_compilation_unit(UNORDERED).unwrap();
        let decl = unit.primary_type().unwrap();
        let structured = StructuredType::categorize(decl, UNORDERED);

        // a new member field belongs after the existing member field and
        // before the constructor
        let after = structured.sibling_after(Category::FieldMember).unwrap();
        assert!(matches!(after, Member::Method(m) if m.is_constructor()));

        let before = structured.sibling_before(Category::FieldMember).unwrap();
        assert!(matches!(before, Member::Field(f) if f.name == "m_name"));

        // nothing follows the last category: insertion lands at body end
        assert_eq!(
            structured.insertion_offset(Category::TypeUncategorized),
            decl.body_range.end
        );
    }

    #[test]
    fn test_nested_types_are_wellformed_recursively() {
        let src = r#"class Outer {
    public class Inner {
        public void run() {
        }

        private String m_x;
    }
}
"#;
        let out = wellform(src).unwrap();
        let m_x = out.find("m_x").unwrap();
        let run = out.find("void run").unwrap();
        assert!(m_x < run, "nested members are reordered too");
    }
}
