//! Assembly of DTO compilation units from normalized models.

use super::annotation::AnnotationGenerator;
use super::class_gen::{FieldGenerator, MethodGenerator, TypeGenerator};
use super::context::GeneratorContext;
use crate::api::ScoutApiSpec;
use crate::model::{ColumnNode, DtoKind, DtoModel, PropertyNode};
use convert_case::{Case, Casing};
use tracing::debug;

/// Generates DTO source text for one normalized model.
pub struct DtoGenerator<'a> {
    api: &'a ScoutApiSpec,
}

impl<'a> DtoGenerator<'a> {
    pub fn new(api: &'a ScoutApiSpec) -> Self {
        DtoGenerator { api }
    }

    /// Produce the complete compilation unit text.
    pub fn generate(&self, model: &DtoModel, ctx: &mut GeneratorContext) -> String {
        debug!(dto = %model.fqn(), kind = ?model.kind, "Generating DTO unit");
        let class = match model.kind {
            DtoKind::FormData => self.form_data_class(model, ctx),
            DtoKind::PageData => self.page_data_class(model, ctx),
            DtoKind::RowData => self.row_data_class(model, ctx, &model.class_name, false),
        };
        let body = class.generate(ctx, 0);
        assemble_unit(&model.package, &body, ctx)
    }

    fn marker_annotation(&self, model: &DtoModel) -> AnnotationGenerator {
        AnnotationGenerator::generated(self.api.generated_annotation(), &model.model_fqn)
    }

    fn form_data_class(&self, model: &DtoModel, ctx: &mut GeneratorContext) -> TypeGenerator {
        let mut class = TypeGenerator::new(&model.class_name)
            .with_annotation(self.marker_annotation(model))
            .with_super_type(&model.super_type)
            .with_field(FieldGenerator::serial_version_uid());

        if let Some(extended) = &model.extends_class {
            let literal = format!("{}.class", ctx.use_type(extended));
            class = class.with_annotation(
                AnnotationGenerator::new(self.api.extends_annotation())
                    .with_element("value", super::annotation::ElementValue::raw(literal)),
            );
        }

        for property in &model.properties {
            for method in property_accessors(property) {
                class = class.with_method(method);
            }
        }
        for node in &model.nodes {
            class = class.with_method(field_getter(&node.name));
        }
        for property in &model.properties {
            class = class.with_nested_type(property_holder(property, self.api));
        }
        for node in &model.nodes {
            let mut nested = TypeGenerator::new(&node.name)
                .with_static()
                .with_super_type(&node.super_type)
                .with_field(FieldGenerator::serial_version_uid());
            if node.replaces.is_some() {
                nested = nested
                    .with_annotation(AnnotationGenerator::new(self.api.replace_annotation()));
            }
            class = class.with_nested_type(nested);
        }
        class
    }

    fn page_data_class(&self, model: &DtoModel, ctx: &mut GeneratorContext) -> TypeGenerator {
        let row_class_name = row_class_name_of(&model.class_name);
        let row = self.row_data_class(model, ctx, &row_class_name, true);
        TypeGenerator::new(&model.class_name)
            .with_annotation(self.marker_annotation(model))
            .with_super_type(&model.super_type)
            .with_field(FieldGenerator::serial_version_uid())
            .with_nested_type(row)
    }

    fn row_data_class(
        &self,
        model: &DtoModel,
        _ctx: &mut GeneratorContext,
        class_name: &str,
        nested: bool,
    ) -> TypeGenerator {
        let mut class = TypeGenerator::new(class_name);
        if nested {
            class = class.with_static().with_super_type(self.api.abstract_table_row_data());
        } else {
            class = class
                .with_annotation(self.marker_annotation(model))
                .with_super_type(&model.super_type);
        }
        class = class.with_field(FieldGenerator::serial_version_uid());

        // column name constants, then the value fields, then accessor pairs
        for column in &model.columns {
            let constant = column.name.to_case(Case::Camel);
            class = class.with_field(
                FieldGenerator::new("String", constant.clone())
                    .with_visibility("public")
                    .with_static()
                    .with_final()
                    .with_initializer(format!("\"{}\"", constant)),
            );
        }
        for column in &model.columns {
            class = class.with_field(FieldGenerator::new(
                column.value_type.clone(),
                format!("m_{}", column.name.to_case(Case::Camel)),
            ));
        }
        for column in &model.columns {
            for method in column_accessors(column) {
                class = class.with_method(method);
            }
        }
        class
    }
}

fn property_accessors(property: &PropertyNode) -> Vec<MethodGenerator> {
    let holder = format!("{}Property", property.name);
    let arg = property.name.to_case(Case::Camel);
    let doc = format!("access method for property {}.", property.name);
    vec![
        MethodGenerator::new(holder.clone(), format!("get{}", holder))
            .with_body_line(format!("return getPropertyByClass({}.class);", holder)),
        MethodGenerator::new(property.value_type.clone(), format!("get{}", property.name))
            .with_javadoc(doc.clone())
            .with_body_line(format!("return get{}Property().getValue();", property.name)),
        MethodGenerator::new("void", format!("set{}", property.name))
            .with_javadoc(doc)
            .with_param(property.value_type.clone(), arg.clone())
            .with_body_line(format!("get{}Property().setValue({});", property.name, arg)),
    ]
}

fn property_holder(property: &PropertyNode, api: &ScoutApiSpec) -> TypeGenerator {
    TypeGenerator::new(format!("{}Property", property.name))
        .with_static()
        .with_super_type(format!(
            "{}<{}>",
            api.abstract_property_data(),
            property.value_type
        ))
        .with_field(FieldGenerator::serial_version_uid())
}

fn field_getter(name: &str) -> MethodGenerator {
    MethodGenerator::new(name.to_string(), format!("get{}", name))
        .with_body_line(format!("return getFieldByClass({}.class);", name))
}

fn column_accessors(column: &ColumnNode) -> Vec<MethodGenerator> {
    let member = format!("m_{}", column.name.to_case(Case::Camel));
    let arg = format!("new{}", column.name);
    vec![
        MethodGenerator::new(column.value_type.clone(), format!("get{}", column.name))
            .with_body_line(format!("return {};", member)),
        MethodGenerator::new("void", format!("set{}", column.name))
            .with_param(column.value_type.clone(), arg.clone())
            .with_body_line(format!("{} = {};", member, arg)),
    ]
}

/// `PersonPageData` nests `PersonRowData`.
fn row_class_name_of(page_data_class: &str) -> String {
    let base = page_data_class
        .strip_suffix("PageData")
        .filter(|s| !s.is_empty())
        .unwrap_or(page_data_class);
    format!("{}RowData", base)
}

/// Package declaration, sorted imports, one top-level type.
pub(crate) fn assemble_unit(package: &str, type_text: &str, ctx: &GeneratorContext) -> String {
    let nl = ctx.line_delimiter.as_str();
    let mut out = String::new();
    if !package.is_empty() {
        out.push_str(&format!("package {};{}{}", package, nl, nl));
    }
    let imports = ctx.imports.imports();
    if !imports.is_empty() {
        for import in &imports {
            out.push_str(&format!("import {};{}", import, nl));
        }
        out.push_str(nl);
    }
    out.push_str(type_text);
    out.push_str(nl);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_class_name() {
        assert_eq!(row_class_name_of("PersonPageData"), "PersonRowData");
        assert_eq!(row_class_name_of("Custom"), "CustomRowData");
    }
}
