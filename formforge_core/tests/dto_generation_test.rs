//! End-to-end tests for DTO generation.
//!
//! These tests verify that:
//! 1. A form model with DTO-relevant accessors produces one property-holder
//!    nested class and one accessor pair per property
//! 2. Property data types structurally mirror the source accessor shapes
//! 3. Regeneration is byte-identical (round-trip stability)
//! 4. The generated unit parses with the bundled frontend

use formforge_core::api::{ApiVersion, ScoutApiSpec, scout_resolver};
use formforge_core::generate::{DtoGenerator, GeneratorContext};
use formforge_core::model::DtoModel;
use formforge_core::operation::{OperationSettings, update_dto};
use formforge_core::source_model::{JavaEnvironment, parse_compilation_unit};
use formforge_core::source_model::stubs::register_runtime_stubs;
use pretty_assertions::assert_eq;

const SCENARIO_FORM: &str = r#"package com.acme.client.scenario;

import com.acme.shared.scenario.ScenarioFormData;
import com.acme.shared.services.IService;
import java.util.HashMap;
import java.util.List;
import org.eclipse.scout.rt.client.dto.FormData;
import org.eclipse.scout.rt.client.ui.form.AbstractForm;

@FormData(value = ScenarioFormData.class, sdkCommand = FormData.SdkCommand.CREATE)
public class ScenarioForm extends AbstractForm {

    @FormData
    public boolean isActive() {
        return true;
    }

    @FormData
    public int getCount() {
        return 0;
    }

    @FormData
    public String getName() {
        return null;
    }

    @FormData
    public byte[] getImage() {
        return null;
    }

    @FormData
    public HashMap<String, List<IService>> getServiceIndex() {
        return null;
    }
}
"#;

fn setup() -> (JavaEnvironment, ScoutApiSpec) {
    let api = scout_resolver()
        .resolve(&ApiVersion::parse("23.1").unwrap())
        .unwrap();
    let mut env = JavaEnvironment::new();
    register_runtime_stubs(&mut env, &api).unwrap();
    env.register_source(SCENARIO_FORM).unwrap();
    env.register_binary_source(
        "package com.acme.shared.services;\npublic interface IService {\n}\n",
    )
    .unwrap();
    (env, api)
}

fn generate(env: &JavaEnvironment, api: &ScoutApiSpec) -> String {
    let form = env
        .find_type("com.acme.client.scenario.ScenarioForm")
        .unwrap();
    let model = DtoModel::of_form(&form, api).unwrap();
    let mut ctx = GeneratorContext::new(model.package.clone());
    DtoGenerator::new(api).generate(&model, &mut ctx)
}

#[test]
fn test_scenario_produces_holder_and_accessors_per_property() {
    let (env, api) = setup();
    let source = generate(&env, &api);

    for (holder, value) in [
        ("ActiveProperty", "Boolean"),
        ("CountProperty", "Integer"),
        ("NameProperty", "String"),
        ("ImageProperty", "byte[]"),
        ("ServiceIndexProperty", "HashMap<String, List<IService>>"),
    ] {
        assert!(
            source.contains(&format!(
                "public static class {} extends AbstractPropertyData<{}> {{",
                holder, value
            )),
            "missing holder {} in:\n{}",
            holder,
            source
        );
    }

    for accessor in [
        "public Boolean getActive() {",
        "public void setActive(Boolean active) {",
        "public Integer getCount() {",
        "public void setCount(Integer count) {",
        "public String getName() {",
        "public void setName(String name) {",
        "public byte[] getImage() {",
        "public void setImage(byte[] image) {",
        "public HashMap<String, List<IService>> getServiceIndex() {",
        "public void setServiceIndex(HashMap<String, List<IService>> serviceIndex) {",
    ] {
        assert!(source.contains(accessor), "missing '{}' in:\n{}", accessor, source);
    }
}

#[test]
fn test_generated_unit_header() {
    let (env, api) = setup();
    let source = generate(&env, &api);

    assert!(source.starts_with("package com.acme.shared.scenario;\n"));
    assert!(source.contains("import com.acme.shared.services.IService;\n"));
    assert!(source.contains("import java.util.HashMap;\n"));
    assert!(source.contains(
        "@Generated(value = \"com.acme.client.scenario.ScenarioForm\", comments = \"This class is auto generated. No manual modifications recommended.\")"
    ));
    assert!(source.contains("public class ScenarioFormData extends AbstractFormData {"));
    assert!(source.contains("private static final long serialVersionUID = 1L;"));
}

#[test]
fn test_round_trip_is_byte_identical() {
    let (mut env, api) = setup();
    let first = generate(&env, &api);
    let second = generate(&env, &api);
    assert_eq!(first, second);

    // registering the generated output as the existing companion and
    // regenerating must still produce the identical unit
    env.register_source(first.clone()).unwrap();
    let third = generate(&env, &api);
    assert_eq!(first, third);
}

#[test]
fn test_generated_unit_parses() {
    let (env, api) = setup();
    let source = generate(&env, &api);
    let unit = parse_compilation_unit(&source).unwrap();
    let decl = unit.primary_type().unwrap();
    assert_eq!(decl.name, "ScenarioFormData");
    // five holder classes
    assert_eq!(decl.nested_types().count(), 5);
    // three accessors per property
    assert_eq!(decl.methods().count(), 15);
}

#[test]
fn test_update_dto_operation_routes_to_form_generator() {
    let (env, api) = setup();
    let unit = update_dto(
        &env,
        &api,
        "com.acme.client.scenario.ScenarioForm",
        &OperationSettings::default(),
    )
    .unwrap();
    assert_eq!(unit.target_fqn, "com.acme.shared.scenario.ScenarioFormData");
    assert!(unit.source.contains("class ScenarioFormData"));
}
