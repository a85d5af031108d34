//! Binary stub registration for the target runtime's marker types.
//!
//! Model sources reference framework supertypes that are normally only on
//! the classpath, never in the workspace. Hierarchy checks still need their
//! structure, so the resolved API binding is materialized here as binary
//! stubs (structure without source).

use super::env::JavaEnvironment;
use crate::api::ScoutApiSpec;
use crate::error::Result;
use tracing::debug;

fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rsplit_once('.') {
        Some((pkg, name)) => (pkg, name),
        None => ("", fqn),
    }
}

fn class_stub(fqn: &str, type_params: &str, extends: Option<&str>, implements: &[&str]) -> String {
    let (pkg, name) = split_fqn(fqn);
    let mut out = String::new();
    if !pkg.is_empty() {
        out.push_str(&format!("package {};\n", pkg));
    }
    out.push_str(&format!("public abstract class {}{}", name, type_params));
    if let Some(sup) = extends {
        out.push_str(&format!(" extends {}", sup));
    }
    if !implements.is_empty() {
        out.push_str(&format!(" implements {}", implements.join(", ")));
    }
    out.push_str(" {\n}\n");
    out
}

fn interface_stub(fqn: &str, type_params: &str, extends: &[&str]) -> String {
    let (pkg, name) = split_fqn(fqn);
    let mut out = String::new();
    if !pkg.is_empty() {
        out.push_str(&format!("package {};\n", pkg));
    }
    out.push_str(&format!("public interface {}{}", name, type_params));
    if !extends.is_empty() {
        out.push_str(&format!(" extends {}", extends.join(", ")));
    }
    out.push_str(" {\n}\n");
    out
}

/// Register the runtime marker hierarchy for the resolved API binding.
pub fn register_runtime_stubs(env: &mut JavaEnvironment, api: &ScoutApiSpec) -> Result<()> {
    debug!(level = %api.max_level(), "Registering runtime stubs");

    // form model side
    env.register_binary_source(&interface_stub(api.form_field_interface(), "", &[]))?;
    env.register_binary_source(&class_stub(api.abstract_form(), "", None, &[]))?;
    env.register_binary_source(&class_stub(
        "org.eclipse.scout.rt.client.ui.form.fields.AbstractFormField",
        "",
        None,
        &[api.form_field_interface()],
    ))?;
    env.register_binary_source(&class_stub(
        api.abstract_value_field(),
        "<VALUE>",
        Some("org.eclipse.scout.rt.client.ui.form.fields.AbstractFormField"),
        &[],
    ))?;
    env.register_binary_source(&class_stub(
        api.abstract_group_box(),
        "",
        Some("org.eclipse.scout.rt.client.ui.form.fields.AbstractFormField"),
        &[],
    ))?;
    env.register_binary_source(&class_stub(
        api.abstract_table_field(),
        "<T>",
        Some("org.eclipse.scout.rt.client.ui.form.fields.AbstractFormField"),
        &[],
    ))?;
    env.register_binary_source(&class_stub(api.abstract_table(), "", None, &[]))?;
    env.register_binary_source(&class_stub(api.abstract_column(), "<VALUE>", None, &[]))?;
    env.register_binary_source(&class_stub(api.abstract_page_with_table(), "<T>", None, &[]))?;

    // concrete field and column flavors commonly used by models
    let value_field = api.abstract_value_field();
    for (name, value) in [
        ("AbstractStringField", "String"),
        ("AbstractLongField", "Long"),
        ("AbstractBooleanField", "Boolean"),
        ("AbstractDateField", "java.util.Date"),
        ("AbstractBigDecimalField", "java.math.BigDecimal"),
    ] {
        env.register_binary_source(&class_stub(
            &format!("org.eclipse.scout.rt.client.ui.form.fields.{}", name),
            "",
            Some(&format!("{}<{}>", value_field, value)),
            &[],
        ))?;
    }
    let column = api.abstract_column();
    for (name, value) in [
        ("AbstractStringColumn", "String"),
        ("AbstractLongColumn", "Long"),
        ("AbstractBooleanColumn", "Boolean"),
        ("AbstractDateColumn", "java.util.Date"),
    ] {
        env.register_binary_source(&class_stub(
            &format!("org.eclipse.scout.rt.client.ui.basic.table.columns.{}", name),
            "",
            Some(&format!("{}<{}>", column, value)),
            &[],
        ))?;
    }

    // DTO runtime side
    env.register_binary_source(&class_stub(api.abstract_form_data(), "", None, &[]))?;
    env.register_binary_source(&class_stub(api.abstract_form_field_data(), "", None, &[]))?;
    env.register_binary_source(&class_stub(
        api.abstract_value_field_data(),
        "<T>",
        Some(api.abstract_form_field_data()),
        &[],
    ))?;
    env.register_binary_source(&class_stub(api.abstract_property_data(), "<T>", None, &[]))?;
    env.register_binary_source(&class_stub(api.abstract_table_row_data(), "", None, &[]))?;
    env.register_binary_source(&class_stub(api.abstract_table_page_data(), "", None, &[]))?;

    // data object facet, when the release line ships it
    if let Some(dataobject) = api.data_object() {
        env.register_binary_source(&class_stub(dataobject.do_entity(), "", None, &[]))?;
        for container in [
            dataobject.do_value(),
            dataobject.do_list(),
            dataobject.do_set(),
            dataobject.do_collection(),
        ] {
            env.register_binary_source(&class_stub(container, "<V>", None, &[]))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiVersion, scout_resolver};

    #[test]
    fn test_stub_hierarchy_is_connected() {
        let api = scout_resolver()
            .resolve(&ApiVersion::parse("23.1").unwrap())
            .unwrap();
        let mut env = JavaEnvironment::new();
        register_runtime_stubs(&mut env, &api).unwrap();

        let string_field = env
            .find_type("org.eclipse.scout.rt.client.ui.form.fields.AbstractStringField")
            .unwrap();
        assert!(string_field.is_binary());
        assert!(string_field.is_instance_of(api.form_field_interface()));
        assert!(string_field.is_instance_of(api.abstract_value_field()));
    }

    #[test]
    fn test_dataobject_stubs_follow_facet() {
        let mut env = JavaEnvironment::new();
        let api = scout_resolver()
            .resolve(&ApiVersion::parse("10").unwrap())
            .unwrap();
        register_runtime_stubs(&mut env, &api).unwrap();
        assert!(env.find_type("org.eclipse.scout.rt.dataobject.DoEntity").is_none());

        let mut env = JavaEnvironment::new();
        let api = scout_resolver()
            .resolve(&ApiVersion::parse("11").unwrap())
            .unwrap();
        register_runtime_stubs(&mut env, &api).unwrap();
        assert!(env.find_type("org.eclipse.scout.rt.dataobject.DoEntity").is_some());
    }
}
