//! The Scout runtime API family: version-dependent annotation and class
//! names consumed by the model parsers and generators.

use super::resolver::{ApiResolver, ApiSpecification};
use super::version::ApiVersion;
use crate::error::{FormforgeError, Result};
use std::sync::Arc;

/// Names of the target runtime's annotations and classes, as seen by one
/// supported release line.
pub trait ScoutApi: Send + Sync {
    /// Largest release this implementation is written against.
    fn level(&self) -> ApiVersion;

    // -- annotations ---------------------------------------------------

    fn form_data_annotation(&self) -> &'static str;
    fn data_annotation(&self) -> &'static str;
    fn replace_annotation(&self) -> &'static str;
    fn extends_annotation(&self) -> &'static str;
    fn ignore_convenience_annotation(&self) -> &'static str;
    fn generated_annotation(&self) -> &'static str;

    // -- model classes -------------------------------------------------

    fn abstract_form(&self) -> &'static str;
    fn form_field_interface(&self) -> &'static str;
    fn abstract_value_field(&self) -> &'static str;
    fn abstract_group_box(&self) -> &'static str;
    fn abstract_table_field(&self) -> &'static str;
    fn abstract_table(&self) -> &'static str;
    fn abstract_column(&self) -> &'static str;
    fn abstract_page_with_table(&self) -> &'static str;

    // -- DTO runtime classes -------------------------------------------

    fn abstract_form_data(&self) -> &'static str;
    fn abstract_form_field_data(&self) -> &'static str;
    fn abstract_value_field_data(&self) -> &'static str;
    fn abstract_property_data(&self) -> &'static str;
    fn abstract_table_row_data(&self) -> &'static str;
    fn abstract_table_page_data(&self) -> &'static str;

    /// Data object support. Optional: release lines predating structured
    /// data objects answer `None`.
    fn data_object(&self) -> Option<&dyn DataObjectApi> {
        None
    }
}

/// Optional facet for structured data object support.
pub trait DataObjectApi: Send + Sync {
    fn do_entity(&self) -> &'static str;
    fn do_value(&self) -> &'static str;
    fn do_list(&self) -> &'static str;
    fn do_set(&self) -> &'static str;
    fn do_collection(&self) -> &'static str;
    fn type_version_annotation(&self) -> &'static str;
}

/// Resolved binding for the Scout family.
pub type ScoutApiSpec = ApiSpecification<dyn ScoutApi>;

impl ApiSpecification<dyn ScoutApi> {
    /// The data object facet, failing when the resolved release line does
    /// not ship data objects. Use [`ScoutApi::data_object`] directly when
    /// absence is acceptable.
    pub fn require_data_object(&self) -> Result<&dyn DataObjectApi> {
        self.api().data_object().ok_or_else(|| {
            FormforgeError::missing_api("DataObjectApi", self.max_level().to_string())
        })
    }
}

/// Candidate table for the bundled Scout release lines.
pub fn scout_resolver() -> ApiResolver<dyn ScoutApi> {
    ApiResolver::<dyn ScoutApi>::new()
        .with_candidate(vec![ApiVersion::new(vec![10])], || Arc::new(Scout10Api))
        .with_candidate(vec![ApiVersion::new(vec![11])], || Arc::new(Scout11Api))
        .with_candidate(
            vec![ApiVersion::new(vec![22]), ApiVersion::new(vec![23])],
            || Arc::new(Scout22Api),
        )
}

/// Scout 10 release line. No data object support.
pub struct Scout10Api;

impl ScoutApi for Scout10Api {
    fn level(&self) -> ApiVersion {
        ApiVersion::new(vec![10])
    }

    fn form_data_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.client.dto.FormData"
    }

    fn data_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.client.dto.Data"
    }

    fn replace_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.platform.Replace"
    }

    fn extends_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.platform.extension.Extends"
    }

    fn ignore_convenience_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.platform.annotations.IgnoreConvenienceMethodGeneration"
    }

    fn generated_annotation(&self) -> &'static str {
        "javax.annotation.Generated"
    }

    fn abstract_form(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.form.AbstractForm"
    }

    fn form_field_interface(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.form.fields.IFormField"
    }

    fn abstract_value_field(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.form.fields.AbstractValueField"
    }

    fn abstract_group_box(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.form.fields.groupbox.AbstractGroupBox"
    }

    fn abstract_table_field(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.form.fields.tablefield.AbstractTableField"
    }

    fn abstract_table(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.basic.table.AbstractTable"
    }

    fn abstract_column(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.basic.table.columns.AbstractColumn"
    }

    fn abstract_page_with_table(&self) -> &'static str {
        "org.eclipse.scout.rt.client.ui.desktop.outline.pages.AbstractPageWithTable"
    }

    fn abstract_form_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.form.AbstractFormData"
    }

    fn abstract_form_field_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.form.fields.AbstractFormFieldData"
    }

    fn abstract_value_field_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.form.fields.AbstractValueFieldData"
    }

    fn abstract_property_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.form.properties.AbstractPropertyData"
    }

    fn abstract_table_row_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.basic.table.AbstractTableRowData"
    }

    fn abstract_table_page_data(&self) -> &'static str {
        "org.eclipse.scout.rt.shared.data.page.AbstractTablePageData"
    }
}

/// Scout 11 release line. First line with data object support.
pub struct Scout11Api;

const SCOUT11_DATA_OBJECT: Scout11DataObjectApi = Scout11DataObjectApi;

impl ScoutApi for Scout11Api {
    fn level(&self) -> ApiVersion {
        ApiVersion::new(vec![11])
    }

    fn form_data_annotation(&self) -> &'static str {
        Scout10Api.form_data_annotation()
    }

    fn data_annotation(&self) -> &'static str {
        Scout10Api.data_annotation()
    }

    fn replace_annotation(&self) -> &'static str {
        Scout10Api.replace_annotation()
    }

    fn extends_annotation(&self) -> &'static str {
        Scout10Api.extends_annotation()
    }

    fn ignore_convenience_annotation(&self) -> &'static str {
        Scout10Api.ignore_convenience_annotation()
    }

    fn generated_annotation(&self) -> &'static str {
        "javax.annotation.Generated"
    }

    fn abstract_form(&self) -> &'static str {
        Scout10Api.abstract_form()
    }

    fn form_field_interface(&self) -> &'static str {
        Scout10Api.form_field_interface()
    }

    fn abstract_value_field(&self) -> &'static str {
        Scout10Api.abstract_value_field()
    }

    fn abstract_group_box(&self) -> &'static str {
        Scout10Api.abstract_group_box()
    }

    fn abstract_table_field(&self) -> &'static str {
        Scout10Api.abstract_table_field()
    }

    fn abstract_table(&self) -> &'static str {
        Scout10Api.abstract_table()
    }

    fn abstract_column(&self) -> &'static str {
        Scout10Api.abstract_column()
    }

    fn abstract_page_with_table(&self) -> &'static str {
        Scout10Api.abstract_page_with_table()
    }

    fn abstract_form_data(&self) -> &'static str {
        Scout10Api.abstract_form_data()
    }

    fn abstract_form_field_data(&self) -> &'static str {
        Scout10Api.abstract_form_field_data()
    }

    fn abstract_value_field_data(&self) -> &'static str {
        Scout10Api.abstract_value_field_data()
    }

    fn abstract_property_data(&self) -> &'static str {
        Scout10Api.abstract_property_data()
    }

    fn abstract_table_row_data(&self) -> &'static str {
        Scout10Api.abstract_table_row_data()
    }

    fn abstract_table_page_data(&self) -> &'static str {
        Scout10Api.abstract_table_page_data()
    }

    fn data_object(&self) -> Option<&dyn DataObjectApi> {
        Some(&SCOUT11_DATA_OBJECT)
    }
}

pub struct Scout11DataObjectApi;

impl DataObjectApi for Scout11DataObjectApi {
    fn do_entity(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.DoEntity"
    }

    fn do_value(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.DoValue"
    }

    fn do_list(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.DoList"
    }

    fn do_set(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.DoSet"
    }

    fn do_collection(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.DoCollection"
    }

    fn type_version_annotation(&self) -> &'static str {
        "org.eclipse.scout.rt.dataobject.TypeVersion"
    }
}

/// Scout 22/23 release lines, served by one implementation. Moves the
/// generated marker to the jakarta namespace.
pub struct Scout22Api;

impl ScoutApi for Scout22Api {
    fn level(&self) -> ApiVersion {
        ApiVersion::new(vec![23])
    }

    fn form_data_annotation(&self) -> &'static str {
        Scout10Api.form_data_annotation()
    }

    fn data_annotation(&self) -> &'static str {
        Scout10Api.data_annotation()
    }

    fn replace_annotation(&self) -> &'static str {
        Scout10Api.replace_annotation()
    }

    fn extends_annotation(&self) -> &'static str {
        Scout10Api.extends_annotation()
    }

    fn ignore_convenience_annotation(&self) -> &'static str {
        Scout10Api.ignore_convenience_annotation()
    }

    fn generated_annotation(&self) -> &'static str {
        "jakarta.annotation.Generated"
    }

    fn abstract_form(&self) -> &'static str {
        Scout10Api.abstract_form()
    }

    fn form_field_interface(&self) -> &'static str {
        Scout10Api.form_field_interface()
    }

    fn abstract_value_field(&self) -> &'static str {
        Scout10Api.abstract_value_field()
    }

    fn abstract_group_box(&self) -> &'static str {
        Scout10Api.abstract_group_box()
    }

    fn abstract_table_field(&self) -> &'static str {
        Scout10Api.abstract_table_field()
    }

    fn abstract_table(&self) -> &'static str {
        Scout10Api.abstract_table()
    }

    fn abstract_column(&self) -> &'static str {
        Scout10Api.abstract_column()
    }

    fn abstract_page_with_table(&self) -> &'static str {
        Scout10Api.abstract_page_with_table()
    }

    fn abstract_form_data(&self) -> &'static str {
        Scout10Api.abstract_form_data()
    }

    fn abstract_form_field_data(&self) -> &'static str {
        Scout10Api.abstract_form_field_data()
    }

    fn abstract_value_field_data(&self) -> &'static str {
        Scout10Api.abstract_value_field_data()
    }

    fn abstract_property_data(&self) -> &'static str {
        Scout10Api.abstract_property_data()
    }

    fn abstract_table_row_data(&self) -> &'static str {
        Scout10Api.abstract_table_row_data()
    }

    fn abstract_table_page_data(&self) -> &'static str {
        Scout10Api.abstract_table_page_data()
    }

    fn data_object(&self) -> Option<&dyn DataObjectApi> {
        Some(&SCOUT11_DATA_OBJECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_resolution() {
        let resolver = scout_resolver();

        let spec = resolver.resolve(&ApiVersion::parse("10.0.4").unwrap()).unwrap();
        assert_eq!(spec.max_level(), &ApiVersion::new(vec![10]));
        assert_eq!(spec.generated_annotation(), "javax.annotation.Generated");

        let spec = resolver.resolve(&ApiVersion::parse("23.1").unwrap()).unwrap();
        assert_eq!(spec.max_level(), &ApiVersion::new(vec![23]));
        assert_eq!(spec.generated_annotation(), "jakarta.annotation.Generated");
    }

    #[test]
    fn test_required_facet_absent_is_distinct_error() {
        let resolver = scout_resolver();
        let spec = resolver.resolve(&ApiVersion::parse("10").unwrap()).unwrap();

        assert!(spec.data_object().is_none());
        assert!(matches!(
            spec.require_data_object(),
            Err(FormforgeError::MissingApi { .. })
        ));

        let spec = resolver.resolve(&ApiVersion::parse("11").unwrap()).unwrap();
        assert!(spec.require_data_object().is_ok());
    }
}
