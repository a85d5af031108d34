//! Resolution of the DTO-driving annotation over a model type's hierarchy.

use crate::api::ScoutApiSpec;
use crate::source_model::{ElementId, JavaType, MethodDecl};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What the generator should do for an annotated model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SdkCommand {
    Create,
    Use,
    Ignore,
    #[default]
    Default,
}

impl SdkCommand {
    /// Parses the enum constant out of expressions like
    /// `FormData.SdkCommand.CREATE`.
    pub fn parse(expr: &str) -> SdkCommand {
        match expr.rsplit('.').next().unwrap_or(expr) {
            "CREATE" => SdkCommand::Create,
            "USE" => SdkCommand::Use,
            "IGNORE" => SdkCommand::Ignore,
            _ => SdkCommand::Default,
        }
    }
}

/// The effective DTO annotation for one model type, merged over its full
/// supertype chain. Values declared closer to the leaf win; unset elements
/// inherit from ancestors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormDataAnnotationDescriptor {
    /// Target DTO class, fully qualified.
    pub form_data_type: Option<String>,
    pub sdk_command: SdkCommand,
    pub generic_ordinal: i32,
    pub interfaces: Vec<String>,
    /// The hierarchy level that contributed the winning annotation.
    pub annotation_owner: Option<ElementId>,
}

impl FormDataAnnotationDescriptor {
    pub fn of(model: &JavaType<'_>, api: &ScoutApiSpec) -> Self {
        let mut chain: Vec<_> = model.superclass_chain(true).collect();
        chain.reverse();

        let mut desc = FormDataAnnotationDescriptor::default();
        for level in chain {
            let Some(anno) = level.annotation(api.form_data_annotation()) else {
                continue;
            };
            trace!(level = %level.fqn(), "FormData annotation found");
            desc.annotation_owner = Some(level.element_id());
            if let Some(value) = anno.element("value") {
                desc.form_data_type = Some(level.resolve(strip_class_literal(value)));
            }
            if let Some(command) = anno.element("sdkCommand") {
                desc.sdk_command = SdkCommand::parse(command);
            }
            if let Some(ordinal) = anno.element("genericOrdinal") {
                desc.generic_ordinal = ordinal.trim().parse().unwrap_or(desc.generic_ordinal);
            }
            if let Some(interfaces) = anno.element("interfaces") {
                desc.interfaces = parse_class_array(interfaces)
                    .into_iter()
                    .map(|c| level.resolve(c))
                    .collect();
            }
        }
        desc
    }

    /// Whether a DTO must be produced for the annotated model type.
    pub fn should_create(&self, model: &JavaType<'_>) -> bool {
        match self.sdk_command {
            SdkCommand::Create => true,
            SdkCommand::Use | SdkCommand::Ignore => false,
            SdkCommand::Default => self
                .annotation_owner
                .as_ref()
                .is_some_and(|owner| owner.declaring_type == model.fqn()),
        }
    }
}

/// Whether a member is marked DTO-relevant: carries the annotation and is
/// not commanded to be ignored.
pub fn is_dto_relevant(owner: &JavaType<'_>, method: &MethodDecl, api: &ScoutApiSpec) -> bool {
    owner
        .member_annotation(&method.annotations, api.form_data_annotation())
        .map(|anno| {
            anno.element("sdkCommand")
                .map(SdkCommand::parse)
                .unwrap_or_default()
                != SdkCommand::Ignore
        })
        .unwrap_or(false)
}

fn strip_class_literal(expr: &str) -> &str {
    expr.trim()
        .strip_suffix(".class")
        .unwrap_or(expr.trim())
        .trim()
}

/// `{A.class, B.class}` or a single `A.class` into simple expressions.
fn parse_class_array(expr: &str) -> Vec<&str> {
    let inner = expr
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(expr.trim());
    inner
        .split(',')
        .map(strip_class_literal)
        .filter(|s| !s.is_empty())
        .collect()
}
