//! Normalized DTO models for forms, table rows and pages.
//!
//! A `DtoModel` is a pure function of the model type, its full supertype
//! chain and the resolved API binding. Replace relationships become
//! explicit references to the replaced member's DTO class; extend
//! relationships reference the extended DTO by name, never structurally.

use super::form_data_annotation::{FormDataAnnotationDescriptor, is_dto_relevant};
use super::{boxed, generic_binding_of, render_resolved};
use crate::api::ScoutApiSpec;
use crate::error::{FormforgeError, Result};
use crate::source_model::{JavaType, MethodDecl, TypeKind, simple_name_of};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DtoKind {
    FormData,
    RowData,
    PageData,
}

/// A bean property exported into the DTO as a property-holder class plus a
/// convenience accessor pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyNode {
    /// Pascal-case property name (`Active` for `isActive()`).
    pub name: String,
    /// Resolved value type, primitives boxed, generic shape preserved.
    pub value_type: String,
}

/// A form field exported into the DTO as a nested field-data class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtoNode {
    /// Field name without the `Field` suffix (`Name` for `NameField`).
    pub name: String,
    pub kind: DtoNodeKind,
    /// What the nested field-data class extends: the runtime base with its
    /// value argument, or the replaced member's DTO class name.
    pub super_type: String,
    /// Name of the replaced member's DTO class, when this field carries a
    /// replace relationship.
    pub replaces: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DtoNodeKind {
    ValueField { value_type: String },
}

/// One table column exported into a row data class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnNode {
    /// Pascal-case column name (`Name` for `NameColumn`).
    pub name: String,
    pub value_type: String,
}

/// The normalized description of one DTO compilation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtoModel {
    pub kind: DtoKind,
    pub package: String,
    pub class_name: String,
    /// Fully qualified supertype of the DTO class.
    pub super_type: String,
    pub model_fqn: String,
    /// Extended DTO class referenced by name, for extension units.
    pub extends_class: Option<String>,
    pub properties: Vec<PropertyNode>,
    pub nodes: Vec<DtoNode>,
    pub columns: Vec<ColumnNode>,
}

impl DtoModel {
    pub fn fqn(&self) -> String {
        if self.package.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}.{}", self.package, self.class_name)
        }
    }

    /// Parse a form model type into its form data description.
    pub fn of_form(model: &JavaType<'_>, api: &ScoutApiSpec) -> Result<DtoModel> {
        let descriptor = FormDataAnnotationDescriptor::of(model, api);
        if !descriptor.should_create(model) {
            return Err(FormforgeError::not_a_model_type(model.fqn()));
        }

        let target = descriptor
            .form_data_type
            .clone()
            .unwrap_or_else(|| format!("{}Data", model.fqn()));
        let (package, class_name) = split_fqn(&target);

        debug!(model = %model.fqn(), dto = %target, "Parsing form data model");

        let super_type = parent_dto_of(model, api)
            .unwrap_or_else(|| api.abstract_form_data().to_string());

        let extends_class = extended_dto_of(model, api);

        let properties = collect_properties(model, api);
        let mut nodes = Vec::new();
        collect_fields(model, api, &mut nodes);

        Ok(DtoModel {
            kind: DtoKind::FormData,
            package,
            class_name,
            super_type,
            model_fqn: model.fqn().to_string(),
            extends_class,
            properties,
            nodes,
            columns: Vec::new(),
        })
    }

    /// Parse a page model type into its page data description. The page
    /// carries a data annotation naming the target class; its nested table
    /// contributes the columns.
    pub fn of_page_data(page: &JavaType<'_>, api: &ScoutApiSpec) -> Result<DtoModel> {
        let anno = page
            .annotation(api.data_annotation())
            .ok_or_else(|| FormforgeError::not_a_model_type(page.fqn()))?;
        let target = anno
            .element("value")
            .map(|v| page.resolve(strip_class_literal(v)))
            .ok_or_else(|| FormforgeError::not_a_model_type(page.fqn()))?;
        let (package, class_name) = split_fqn(&target);

        debug!(model = %page.fqn(), dto = %target, "Parsing page data model");

        let table = page
            .nested_types()
            .find(|t| t.is_instance_of(api.abstract_table()))
            .ok_or_else(|| {
                FormforgeError::generate(page.fqn(), "Page declares no nested table")
            })?;

        Ok(DtoModel {
            kind: DtoKind::PageData,
            package,
            class_name,
            super_type: api.abstract_table_page_data().to_string(),
            model_fqn: page.fqn().to_string(),
            extends_class: None,
            properties: Vec::new(),
            nodes: Vec::new(),
            columns: collect_columns(&table, api),
        })
    }

    /// Parse a table model type (a nested `Table` or any column container)
    /// into a row data description with the given target class name.
    pub fn of_table_row(
        table: &JavaType<'_>,
        api: &ScoutApiSpec,
        target_fqn: &str,
    ) -> Result<DtoModel> {
        if !table.is_instance_of(api.abstract_table()) {
            return Err(FormforgeError::not_a_model_type(table.fqn()));
        }
        let (package, class_name) = split_fqn(target_fqn);
        Ok(DtoModel {
            kind: DtoKind::RowData,
            package,
            class_name,
            super_type: api.abstract_table_row_data().to_string(),
            model_fqn: table.fqn().to_string(),
            extends_class: None,
            properties: Vec::new(),
            nodes: Vec::new(),
            columns: collect_columns(table, api),
        })
    }
}

/// DTO class of the nearest ancestor form that itself exports one.
fn parent_dto_of(model: &JavaType<'_>, api: &ScoutApiSpec) -> Option<String> {
    let parent = model.superclass()?;
    for level in parent.superclass_chain(true) {
        if level.annotation(api.form_data_annotation()).is_some() {
            let descriptor = FormDataAnnotationDescriptor::of(&level, api);
            if let Some(dto) = descriptor.form_data_type {
                return Some(dto);
            }
        }
    }
    None
}

/// Resolved DTO class of an extend relationship, when the model carries one.
/// The extended model's own DTO target wins; its conventional name is the
/// fallback.
fn extended_dto_of(model: &JavaType<'_>, api: &ScoutApiSpec) -> Option<String> {
    let anno = model.annotation(api.extends_annotation())?;
    let value = anno.element("value")?;
    let extended_fqn = model.resolve(strip_class_literal(value));
    if let Some(extended) = model.env().find_type(&extended_fqn) {
        let descriptor = FormDataAnnotationDescriptor::of(&extended, api);
        if let Some(dto) = descriptor.form_data_type {
            return Some(dto);
        }
    }
    Some(format!("{}Data", extended_fqn))
}

/// Bean properties over the class chain, ancestors first; an inherited
/// declaration wins over a leaf shadow.
fn collect_properties(model: &JavaType<'_>, api: &ScoutApiSpec) -> Vec<PropertyNode> {
    let mut chain: Vec<_> = model.superclass_chain(true).collect();
    chain.reverse();

    let mut properties: IndexMap<String, PropertyNode> = IndexMap::new();
    for level in &chain {
        if matches!(level.decl().kind, TypeKind::Interface) {
            continue;
        }
        for method in level.methods() {
            let Some(name) = property_name(method) else {
                continue;
            };
            if method.modifiers.is_static || method.modifiers.is_synthetic {
                continue;
            }
            if !is_dto_relevant(level, method, api) {
                continue;
            }
            if level
                .member_annotation(&method.annotations, api.generated_annotation())
                .is_some()
                || level
                    .member_annotation(&method.annotations, api.ignore_convenience_annotation())
                    .is_some()
            {
                continue;
            }
            if properties.contains_key(&name) {
                trace!(property = %name, "Shadowed property suppressed");
                continue;
            }
            let ret = method.return_type.as_ref().expect("checked by shape");
            let value_type = if ret.is_primitive() {
                boxed(&ret.name).to_string()
            } else {
                render_resolved(ret, level)
            };
            properties.insert(
                name.clone(),
                PropertyNode { name, value_type },
            );
        }
    }
    properties.into_values().collect()
}

/// Zero-argument non-void accessor: `getX()`/`isX()` with a payload name.
fn property_name(method: &MethodDecl) -> Option<String> {
    if method.is_constructor() || !method.params.is_empty() {
        return None;
    }
    let ret = method.return_type.as_ref()?;
    if ret.name == "void" {
        return None;
    }
    let stripped = method
        .name
        .strip_prefix("get")
        .or_else(|| method.name.strip_prefix("is"))?;
    if stripped.is_empty() || !stripped.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }
    Some(stripped.to_string())
}

/// Recursive descent over the form's composite structure. Group boxes
/// contribute their children; value fields contribute nodes.
fn collect_fields(container: &JavaType<'_>, api: &ScoutApiSpec, out: &mut Vec<DtoNode>) {
    for nested in container.nested_types() {
        if nested.is_instance_of(api.abstract_group_box()) {
            collect_fields(&nested, api, out);
            continue;
        }
        if !nested.is_instance_of(api.abstract_value_field()) {
            trace!(nested = %nested.fqn(), "Nested type contributes no DTO node");
            continue;
        }

        let value_type = generic_binding_of(&nested, api.abstract_value_field(), 0)
            .unwrap_or_else(|| "Object".to_string());
        let name = field_data_name(nested.name());

        let replaces = nested
            .annotation(api.replace_annotation())
            .and_then(|_| nested.superclass_ref())
            .map(|super_ref| field_data_name(simple_name_of(&super_ref.name)));

        let super_type = match &replaces {
            Some(replaced) => replaced.clone(),
            None => format!("{}<{}>", api.abstract_value_field_data(), value_type),
        };

        out.push(DtoNode {
            name,
            kind: DtoNodeKind::ValueField { value_type },
            super_type,
            replaces,
        });

        collect_fields(&nested, api, out);
    }
}

fn collect_columns(table: &JavaType<'_>, api: &ScoutApiSpec) -> Vec<ColumnNode> {
    table
        .nested_types()
        .filter(|t| t.is_instance_of(api.abstract_column()))
        .map(|t| ColumnNode {
            name: column_data_name(t.name()),
            value_type: generic_binding_of(&t, api.abstract_column(), 0)
                .unwrap_or_else(|| "Object".to_string()),
        })
        .collect()
}

/// `NameField` contributes a member called `Name`.
fn field_data_name(model_name: &str) -> String {
    model_name
        .strip_suffix("Field")
        .filter(|s| !s.is_empty())
        .unwrap_or(model_name)
        .to_string()
}

/// `NameColumn` contributes a member called `Name`.
fn column_data_name(model_name: &str) -> String {
    model_name
        .strip_suffix("Column")
        .filter(|s| !s.is_empty())
        .unwrap_or(model_name)
        .to_string()
}

fn strip_class_literal(expr: &str) -> &str {
    expr.trim()
        .strip_suffix(".class")
        .unwrap_or(expr.trim())
        .trim()
}

fn split_fqn(fqn: &str) -> (String, String) {
    match fqn.rsplit_once('.') {
        Some((pkg, name)) => (pkg.to_string(), name.to_string()),
        None => (String::new(), fqn.to_string()),
    }
}
