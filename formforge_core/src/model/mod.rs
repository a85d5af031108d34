//! Model parsers: normalized descriptions of what must be generated,
//! derived from the source model plus the resolved API binding.

pub mod data_object;
pub mod dto;
pub mod form_data_annotation;

pub use data_object::{DataObjectModel, DataObjectNode, DataObjectNodeKind};
pub use dto::{ColumnNode, DtoKind, DtoModel, DtoNode, DtoNodeKind, PropertyNode};
pub use form_data_annotation::{FormDataAnnotationDescriptor, SdkCommand};

use crate::source_model::{JavaType, TypeRef};
use std::collections::HashMap;

/// Render a type reference with every name resolved in the owner's scope.
/// Type arguments are resolved recursively; array dimensions survive.
pub(crate) fn render_resolved(t: &TypeRef, owner: &JavaType<'_>) -> String {
    render_substituted(t, owner, &HashMap::new())
}

/// Render with an additional type parameter substitution, used when walking
/// generic supertype chains.
pub(crate) fn render_substituted(
    t: &TypeRef,
    owner: &JavaType<'_>,
    substitution: &HashMap<String, String>,
) -> String {
    if t.type_args.is_empty() && t.array_dims == 0 {
        if let Some(mapped) = substitution.get(&t.name) {
            return mapped.clone();
        }
    }
    let mut out = owner.resolve(&t.name);
    if !t.type_args.is_empty() {
        out.push('<');
        let args = t
            .type_args
            .iter()
            .map(|a| render_substituted(a, owner, substitution))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&args);
        out.push('>');
    }
    for _ in 0..t.array_dims {
        out.push_str("[]");
    }
    out
}

/// Boxed counterpart of a primitive, the name itself otherwise.
pub(crate) fn boxed(name: &str) -> &str {
    match name {
        "boolean" => "Boolean",
        "byte" => "Byte",
        "short" => "Short",
        "int" => "Integer",
        "long" => "Long",
        "char" => "Character",
        "float" => "Float",
        "double" => "Double",
        other => other,
    }
}

/// Walk the superclass chain of `start` until reaching `target_fqn`,
/// carrying generic substitutions, and return the rendered binding of the
/// target's type parameter at `ordinal`.
pub(crate) fn generic_binding_of(
    start: &JavaType<'_>,
    target_fqn: &str,
    ordinal: usize,
) -> Option<String> {
    let mut current = start.clone();
    let mut substitution: HashMap<String, String> = HashMap::new();

    // depth guard against malformed cyclic hierarchies
    for _ in 0..64 {
        let super_ref = current.superclass_ref()?;
        let super_type = current.superclass()?;

        // bind the supertype's parameters to the rendered arguments
        let mut next: HashMap<String, String> = HashMap::new();
        for (param, arg) in super_type
            .decl()
            .type_params
            .iter()
            .zip(super_ref.type_args.iter())
        {
            next.insert(
                param.name.clone(),
                render_substituted(arg, &current, &substitution),
            );
        }

        if super_type.fqn() == target_fqn {
            let param = super_type.decl().type_params.get(ordinal)?;
            return next.get(&param.name).cloned();
        }

        current = super_type;
        substitution = next;
    }
    None
}
