//! Chained accessor generation for data object nodes.
//!
//! Data objects keep their node accessors; generation adds the chainable
//! `withX` setters and typed `getX` getters next to them, each carrying the
//! generated marker so a later pass never re-processes them.

use super::annotation::AnnotationGenerator;
use super::class_gen::MethodGenerator;
use super::context::GeneratorContext;
use crate::api::ScoutApiSpec;
use crate::model::{DataObjectModel, DataObjectNode, DataObjectNodeKind};
use convert_case::{Case, Casing};

/// Marker value of accessor methods produced here.
pub const DO_CONVENIENCE_GENERATOR: &str = "DoConvenienceMethodsGenerator";

/// Build the convenience accessor methods for every own node of the model.
/// Inherited nodes are skipped; their origin generates them.
pub fn convenience_methods(
    model: &DataObjectModel,
    owner_simple_name: &str,
    api: &ScoutApiSpec,
) -> Vec<MethodGenerator> {
    let mut methods = Vec::new();
    for node in model.own_nodes() {
        methods.push(with_chainer(node, owner_simple_name, api));
        methods.push(typed_getter(node, api));
    }
    methods
}

/// Render the methods as insertable member text at class-body depth.
pub fn render_methods(methods: &[MethodGenerator], ctx: &mut GeneratorContext) -> String {
    let nl = ctx.line_delimiter.as_str();
    methods
        .iter()
        .map(|m| m.generate(ctx, 1))
        .collect::<Vec<_>>()
        .join(&format!("{}{}", nl, nl))
}

fn marker(api: &ScoutApiSpec) -> AnnotationGenerator {
    AnnotationGenerator::new(api.generated_annotation())
        .with_element("value", DO_CONVENIENCE_GENERATOR)
}

fn with_chainer(
    node: &DataObjectNode,
    owner_simple_name: &str,
    api: &ScoutApiSpec,
) -> MethodGenerator {
    let pascal = node.name.to_case(Case::Pascal);
    let param_type = match node.kind {
        DataObjectNodeKind::Value => node.value_type.clone(),
        _ => format!("java.util.Collection<? extends {}>", node.value_type),
    };
    MethodGenerator::new(owner_simple_name.to_string(), format!("with{}", pascal))
        .with_annotation(marker(api))
        .with_param(param_type, node.name.clone())
        .with_body_line(format!("{}().set({});", node.name, node.name))
        .with_body_line("return this;")
}

fn typed_getter(node: &DataObjectNode, api: &ScoutApiSpec) -> MethodGenerator {
    let pascal = node.name.to_case(Case::Pascal);
    let return_type = match node.kind {
        DataObjectNodeKind::Value => node.value_type.clone(),
        DataObjectNodeKind::List => format!("java.util.List<{}>", node.value_type),
        DataObjectNodeKind::Set => format!("java.util.Set<{}>", node.value_type),
        DataObjectNodeKind::Collection => {
            format!("java.util.Collection<{}>", node.value_type)
        }
    };
    MethodGenerator::new(return_type, format!("get{}", pascal))
        .with_annotation(marker(api))
        .with_body_line(format!("return {}().get();", node.name))
}
