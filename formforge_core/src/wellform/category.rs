//! Canonical member categories and their fixed total order.

use crate::source_model::{FieldDecl, Member, MethodDecl, TypeDecl};
use strum::EnumIter;

/// The ordering key of structured-type layout. Every member of a
/// compilation unit classifies into exactly one category; emission follows
/// the declaration order of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Category {
    FieldLogger,
    FieldStatic,
    FieldMember,
    FieldUncategorized,
    MethodConstructor,
    MethodConfigProperty,
    MethodConfigExec,
    MethodFormDataBean,
    MethodInnerTypeGetter,
    MethodUncategorized,
    TypeFormField,
    TypeColumn,
    TypeTable,
    TypeUncategorized,
}

/// Classify one member of `enclosing`. Classification is purely syntactic
/// so it stays deterministic across environments and re-parses.
pub fn of_member(member: &Member, enclosing: &TypeDecl) -> Category {
    match member {
        Member::Field(field) => of_field(field),
        Member::Method(method) => of_method(method, enclosing),
        Member::Type(nested) => of_type(nested),
        Member::Initializer(block) => {
            if block.is_static {
                Category::FieldStatic
            } else {
                Category::FieldUncategorized
            }
        }
    }
}

fn of_field(field: &FieldDecl) -> Category {
    if field.name == "LOG" || field.field_type.simple_name().ends_with("Logger") {
        return Category::FieldLogger;
    }
    if field.modifiers.is_static {
        return Category::FieldStatic;
    }
    if field.name.starts_with("m_") {
        return Category::FieldMember;
    }
    Category::FieldUncategorized
}

fn of_method(method: &MethodDecl, enclosing: &TypeDecl) -> Category {
    if method.is_constructor() {
        return Category::MethodConstructor;
    }
    if method.name.starts_with("getConfigured") {
        return Category::MethodConfigProperty;
    }
    if method.name.starts_with("exec")
        && method.name.chars().nth(4).is_some_and(char::is_uppercase)
    {
        return Category::MethodConfigExec;
    }
    if let Some(rest) = method.name.strip_prefix("get") {
        if enclosing.nested_type(rest).is_some() {
            return Category::MethodInnerTypeGetter;
        }
    }
    if is_bean_accessor(method) {
        return Category::MethodFormDataBean;
    }
    Category::MethodUncategorized
}

fn is_bean_accessor(method: &MethodDecl) -> bool {
    let rest = method
        .name
        .strip_prefix("get")
        .or_else(|| method.name.strip_prefix("set"))
        .or_else(|| method.name.strip_prefix("is"));
    match rest {
        Some(rest) => rest.chars().next().is_some_and(char::is_uppercase),
        None => false,
    }
}

fn of_type(nested: &TypeDecl) -> Category {
    let super_name = nested
        .superclass
        .as_ref()
        .map(|s| s.simple_name())
        .unwrap_or("");
    if super_name.ends_with("Column") {
        return Category::TypeColumn;
    }
    if nested.name == "Table" || super_name.ends_with("Table") {
        return Category::TypeTable;
    }
    if super_name.ends_with("Field")
        || super_name.ends_with("Box")
        || super_name.ends_with("Button")
        || super_name.ends_with("FieldData")
        || super_name.ends_with("PropertyData")
    {
        return Category::TypeFormField;
    }
    Category::TypeUncategorized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::parse_compilation_unit;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_member_gets_exactly_one_category() {
        let src = r#"
public class Sample {
    private static final Logger LOG = LoggerFactory.getLogger(Sample.class);
    private static final long serialVersionUID = 1L;
    private String m_name;
    int unusual;

    public Sample() {
    }

    protected String getConfiguredLabel() {
        return "x";
    }

    protected void execInitField() {
    }

    public String getName() {
        return m_name;
    }

    public MainBox getMainBox() {
        return null;
    }

    public void run() {
    }

    public class MainBox extends AbstractGroupBox {
    }

    public class Table extends AbstractTable {
    }
}
"#;
        let unit = parse_compilation_unit(src).unwrap();
        let decl = unit.primary_type().unwrap();
        let categories: Vec<Category> = decl
            .members
            .iter()
            .map(|m| of_member(m, decl))
            .collect();
        assert_eq!(
            categories,
            vec![
                Category::FieldLogger,
                Category::FieldStatic,
                Category::FieldMember,
                Category::FieldUncategorized,
                Category::MethodConstructor,
                Category::MethodConfigProperty,
                Category::MethodConfigExec,
                Category::MethodFormDataBean,
                Category::MethodInnerTypeGetter,
                Category::MethodUncategorized,
                Category::TypeFormField,
                Category::TypeTable,
            ]
        );
    }

    #[test]
    fn test_category_order_is_total_and_fixed() {
        let all: Vec<Category> = Category::iter().collect();
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted, "declaration order is the canonical order");
        assert!(Category::FieldLogger < Category::MethodConstructor);
        assert!(Category::MethodUncategorized < Category::TypeFormField);
    }
}
