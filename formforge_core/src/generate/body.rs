//! Method body builders: auto-generated stubs, super-call forwarding and
//! recursive-call construction.

use super::comment::todo_comment;
use super::context::GeneratorContext;
use crate::source_model::ParamDecl;

/// Source-level default value for a declared return type, `None` when the
/// method needs no return statement.
pub fn default_value_of(return_type: &str) -> Option<&'static str> {
    match return_type {
        "void" => None,
        "boolean" => Some("false"),
        "byte" | "short" | "int" | "long" | "char" | "float" | "double" => Some("0"),
        _ => Some("null"),
    }
}

/// An auto-generated stub body: a TODO marker plus a type-appropriate
/// default return when one is required.
pub fn auto_generated(return_type: &str, ctx: &GeneratorContext) -> String {
    let nl = ctx.line_delimiter.as_str();
    let mut out = todo_comment("implement", ctx);
    if let Some(value) = default_value_of(return_type) {
        out.push_str(nl);
        out.push_str(&format!("return {};", value));
    }
    out
}

/// Forward to the super implementation, passing all declared parameters
/// positionally. Constructors omit the call target.
pub fn super_call(
    method_name: Option<&str>,
    params: &[ParamDecl],
    returns_value: bool,
) -> String {
    let args = params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match method_name {
        None => format!("super({});", args),
        Some(name) if returns_value => format!("return super.{}({});", name, args),
        Some(name) => format!("super.{}({});", name, args),
    }
}

/// A same-signature recursive call through a caller-supplied prefix
/// expression.
pub fn recursive_call(prefix: &str, method_name: &str, params: &[ParamDecl]) -> String {
    let args = params
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("return {}.{}({});", prefix, method_name, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::TypeRef;

    fn param(name: &str, ty: &str) -> ParamDecl {
        ParamDecl {
            name: name.to_string(),
            param_type: TypeRef::named(ty),
            is_final: false,
            is_varargs: false,
        }
    }

    #[test]
    fn test_auto_generated_stub() {
        let ctx = GeneratorContext::new("t").with_todo_user("anna");
        assert_eq!(
            auto_generated("boolean", &ctx),
            "// TODO [anna] implement\nreturn false;"
        );
        assert_eq!(auto_generated("void", &ctx), "// TODO [anna] implement");
        assert_eq!(
            auto_generated("String", &ctx),
            "// TODO [anna] implement\nreturn null;"
        );
    }

    #[test]
    fn test_super_call_forwarding() {
        let params = [param("name", "String"), param("age", "int")];
        assert_eq!(super_call(None, &params, false), "super(name, age);");
        assert_eq!(
            super_call(Some("store"), &params, false),
            "super.store(name, age);"
        );
        assert_eq!(
            super_call(Some("load"), &params, true),
            "return super.load(name, age);"
        );
    }

    #[test]
    fn test_recursive_call_with_prefix() {
        let params = [param("key", "String")];
        assert_eq!(
            recursive_call("getDelegate()", "lookup", &params),
            "return getDelegate().lookup(key);"
        );
    }
}
