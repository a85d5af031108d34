//! Batch operations over many model types.
//!
//! Each per-type unit of work runs independently: one failing type is
//! recorded against that type and never aborts its siblings, and a
//! cooperative cancellation flag is checked between units. Completed
//! outputs survive cancellation; nothing is rolled back.

use crate::api::ScoutApiSpec;
use crate::error::{FormforgeError, Result};
use crate::formforge_log;
use crate::generate::context::{GeneratorContext, LineDelimiter};
use crate::generate::do_gen::{convenience_methods, render_methods};
use crate::generate::dto_gen::DtoGenerator;
use crate::model::{DataObjectModel, DtoModel};
use crate::source_model::JavaEnvironment;
use crate::wellform::{Category, StructuredType, wellform};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Shared settings of one batch invocation.
#[derive(Debug, Clone, Default)]
pub struct OperationSettings {
    pub line_delimiter: LineDelimiter,
    pub todo_user: Option<String>,
}

/// One produced compilation unit.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedUnit {
    pub model_fqn: String,
    pub target_fqn: String,
    pub source: String,
}

/// Outcome of a batch run: completed outputs, per-item failures, and
/// whether the batch stopped early on cancellation.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outputs: Vec<GeneratedUnit>,
    pub errors: Vec<(String, FormforgeError)>,
    pub cancelled: bool,
}

impl BatchReport {
    fn collect(results: Vec<Option<Result<GeneratedUnit>>>, cancel: &AtomicBool) -> Self {
        let mut report = BatchReport {
            cancelled: cancel.load(Ordering::Relaxed),
            ..BatchReport::default()
        };
        for result in results.into_iter().flatten() {
            match result {
                Ok(unit) => report.outputs.push(unit),
                Err(e) => {
                    // attribute the failure to its item and move on
                    let item = match &e {
                        FormforgeError::Generate { type_name, .. } => type_name.clone(),
                        FormforgeError::MissingType { type_name } => type_name.clone(),
                        FormforgeError::NotAModelType { type_name } => type_name.clone(),
                        _ => String::new(),
                    };
                    warn!(item = %item, error = %e, "Batch item failed");
                    report.errors.push((item, e));
                }
            }
        }
        report
    }
}

/// Generate or refresh the DTO for every given model type.
pub fn update_dtos(
    env: &JavaEnvironment,
    api: &ScoutApiSpec,
    model_fqns: &[String],
    settings: &OperationSettings,
    cancel: &AtomicBool,
) -> BatchReport {
    info!(count = model_fqns.len(), "DTO update batch started");
    let results: Vec<Option<Result<GeneratedUnit>>> = model_fqns
        .par_iter()
        .map(|fqn| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(update_dto(env, api, fqn, settings))
        })
        .collect();
    let report = BatchReport::collect(results, cancel);
    info!(
        outputs = report.outputs.len(),
        errors = report.errors.len(),
        cancelled = report.cancelled,
        "DTO update batch finished"
    );
    report
}

/// Generate the DTO unit for one model type: a form data, a page data, or
/// the refreshed convenience accessors of a data object.
pub fn update_dto(
    env: &JavaEnvironment,
    api: &ScoutApiSpec,
    model_fqn: &str,
    settings: &OperationSettings,
) -> Result<GeneratedUnit> {
    let model_type = env.require_type(model_fqn)?;

    let dto_model = match DtoModel::of_form(&model_type, api) {
        Ok(model) => Some(model),
        Err(FormforgeError::NotAModelType { .. }) => match DtoModel::of_page_data(&model_type, api)
        {
            Ok(model) => Some(model),
            Err(FormforgeError::NotAModelType { .. }) => None,
            Err(e) => return Err(e),
        },
        Err(e) => return Err(e),
    };

    if let Some(dto_model) = dto_model {
        formforge_log!(
            serde_json::to_string_pretty(&dto_model)?,
            format!("{}.model.json", dto_model.class_name),
            false
        );
        let mut ctx = GeneratorContext::new(dto_model.package.clone())
            .with_line_delimiter(settings.line_delimiter);
        if let Some(user) = &settings.todo_user {
            ctx = ctx.with_todo_user(user.clone());
        }
        let source = DtoGenerator::new(api).generate(&dto_model, &mut ctx);
        return Ok(GeneratedUnit {
            model_fqn: model_fqn.to_string(),
            target_fqn: dto_model.fqn(),
            source,
        });
    }

    // not form- or page-driven: try the data object path
    if api.data_object().is_some() && DataObjectModel::wrap(&model_type, api).is_some() {
        let source = refresh_do_convenience(env, api, model_fqn, settings)?;
        return Ok(GeneratedUnit {
            model_fqn: model_fqn.to_string(),
            target_fqn: model_fqn.to_string(),
            source,
        });
    }

    Err(FormforgeError::not_a_model_type(model_fqn))
}

/// Insert the chained accessors for a data object's own nodes into its own
/// unit, using the structured layout to pick the insertion point.
pub fn refresh_do_convenience(
    env: &JavaEnvironment,
    api: &ScoutApiSpec,
    fqn: &str,
    settings: &OperationSettings,
) -> Result<String> {
    let model_type = env.require_type(fqn)?;
    let source = model_type.unit_source().ok_or_else(|| {
        FormforgeError::generate(fqn, "Cannot refresh accessors of a binary unit")
    })?;
    let model = DataObjectModel::require(&model_type, api)?;

    let methods = convenience_methods(&model, model_type.name(), api);
    if methods.is_empty() {
        debug!(fqn = %fqn, "No own nodes, unit unchanged");
        return Ok(source.to_string());
    }

    let mut ctx =
        GeneratorContext::new(model_type.package().unwrap_or_default().to_string())
            .with_line_delimiter(LineDelimiter::detect(source));
    if let Some(user) = &settings.todo_user {
        ctx = ctx.with_todo_user(user.clone());
    }
    let rendered = render_methods(&methods, &mut ctx);
    let nl = ctx.line_delimiter.as_str();

    let structured = StructuredType::categorize(model_type.decl(), source);
    let offset = structured.insertion_offset(Category::MethodUncategorized);

    let mut merged = String::with_capacity(source.len() + rendered.len());
    merged.push_str(&source[..offset]);
    merged.push_str(nl);
    merged.push_str(&rendered);
    merged.push_str(nl);
    merged.push_str(&source[offset..]);
    Ok(merged)
}

/// Wellform every given type's compilation unit.
pub fn wellform_types(
    env: &JavaEnvironment,
    fqns: &[String],
    cancel: &AtomicBool,
) -> BatchReport {
    info!(count = fqns.len(), "Wellform batch started");
    let results: Vec<Option<Result<GeneratedUnit>>> = fqns
        .par_iter()
        .map(|fqn| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(wellform_type(env, fqn))
        })
        .collect();
    BatchReport::collect(results, cancel)
}

fn wellform_type(env: &JavaEnvironment, fqn: &str) -> Result<GeneratedUnit> {
    let t = env.require_type(fqn)?;
    let source = t
        .unit_source()
        .ok_or_else(|| FormforgeError::generate(fqn, "Cannot wellform a binary unit"))?;
    Ok(GeneratedUnit {
        model_fqn: fqn.to_string(),
        target_fqn: fqn.to_string(),
        source: wellform(source)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiVersion, scout_resolver};
    use crate::source_model::stubs::register_runtime_stubs;

    fn setup() -> (JavaEnvironment, ScoutApiSpec) {
        let api = scout_resolver()
            .resolve(&ApiVersion::parse("23.1").unwrap())
            .unwrap();
        let mut env = JavaEnvironment::new();
        register_runtime_stubs(&mut env, &api).unwrap();
        (env, api)
    }

    #[test]
    fn test_batch_records_errors_and_continues() {
        let (mut env, api) = setup();
        env.register_source(
            "package a;\npublic class NotAForm {\n    private int m_x;\n}\n",
        )
        .unwrap();

        let cancel = AtomicBool::new(false);
        let report = update_dtos(
            &env,
            &api,
            &["a.NotAForm".to_string(), "a.Missing".to_string()],
            &OperationSettings::default(),
            &cancel,
        );

        assert!(report.outputs.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_cancelled_batch_stops_scheduling() {
        let (mut env, _api) = setup();
        env.register_source("package a;\npublic class C {\n    private int m_x;\n}\n")
            .unwrap();

        let cancel = AtomicBool::new(true);
        let report = wellform_types(&env, &["a.C".to_string()], &cancel);
        assert!(report.cancelled);
        assert!(report.outputs.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_do_convenience_merge() {
        let (mut env, api) = setup();
        env.register_source(
            "package a;\n\
             import org.eclipse.scout.rt.dataobject.DoEntity;\n\
             import org.eclipse.scout.rt.dataobject.DoValue;\n\
             public class LookupDo extends DoEntity {\n\
             \n\
                 public DoValue<String> key() {\n\
                     return doValue(\"key\");\n\
                 }\n\
             }\n",
        )
        .unwrap();

        let merged = refresh_do_convenience(
            &env,
            &api,
            "a.LookupDo",
            &OperationSettings::default(),
        )
        .unwrap();

        assert!(merged.contains("public LookupDo withKey(String key) {"));
        assert!(merged.contains("public String getKey() {"));
        // the original accessor survives untouched
        assert!(merged.contains("return doValue(\"key\");"));
        // merged text stays parseable
        assert!(crate::source_model::parse_compilation_unit(&merged).is_ok());
    }
}
