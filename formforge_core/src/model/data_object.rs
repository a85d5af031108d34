//! Structured data object introspection.
//!
//! Wraps a `DoEntity` subclass and derives the ordered node list that
//! convenience accessor generation works from.

use crate::api::ScoutApiSpec;
use crate::error::{FormforgeError, Result};
use crate::source_model::{ElementId, JavaType, MethodDecl};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Recognized generic container flavor of a node accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataObjectNodeKind {
    Value,
    List,
    Set,
    Collection,
}

/// One node of a data object: a zero-argument accessor returning one of the
/// recognized container flavors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataObjectNode {
    pub name: String,
    pub kind: DataObjectNodeKind,
    /// Rendered value type (the container's type argument), resolved.
    pub value_type: String,
    /// `true` when the winning declaration sits on a superclass of the
    /// model type. A leaf shadow of an inherited node is suppressed; only
    /// the origin needs accessor generation.
    pub is_inherited: bool,
    pub has_javadoc: bool,
}

/// The normalized model of one data object type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataObjectModel {
    pub source: ElementId,
    pub nodes: Vec<DataObjectNode>,
}

impl DataObjectModel {
    /// Wrap a type, answering `None` when it is not a data object (does not
    /// reach the entity base class) or the resolved API has no data object
    /// support.
    pub fn wrap(model: &JavaType<'_>, api: &ScoutApiSpec) -> Option<DataObjectModel> {
        let dataobject = api.data_object()?;
        if !model.is_instance_of(dataobject.do_entity()) {
            return None;
        }

        debug!(model = %model.fqn(), "Wrapping data object model");

        // collect the class chain leaf-first, then process ancestors first
        // so an inherited declaration wins over a leaf shadow
        let mut chain: Vec<_> = model.superclass_chain(true).collect();
        chain.reverse();

        let mut nodes: IndexMap<String, DataObjectNode> = IndexMap::new();
        for level in &chain {
            let is_inherited = level.fqn() != model.fqn();
            for method in level.methods() {
                let Some((kind, value_type)) = node_shape(level, method, api) else {
                    continue;
                };
                if !is_eligible(level, method, api) {
                    continue;
                }
                if nodes.contains_key(&method.name) {
                    trace!(node = %method.name, "Shadowed node suppressed");
                    continue;
                }
                nodes.insert(
                    method.name.clone(),
                    DataObjectNode {
                        name: method.name.clone(),
                        kind,
                        value_type,
                        is_inherited,
                        has_javadoc: method.javadoc.is_some(),
                    },
                );
            }
        }

        Some(DataObjectModel {
            source: model.element_id(),
            nodes: nodes.into_values().collect(),
        })
    }

    /// Like [`wrap`](Self::wrap) but failing for callers that require a
    /// data object.
    pub fn require(model: &JavaType<'_>, api: &ScoutApiSpec) -> Result<DataObjectModel> {
        api.require_data_object()?;
        Self::wrap(model, api).ok_or_else(|| FormforgeError::not_a_model_type(model.fqn()))
    }

    /// Nodes that still need accessor generation on this type: own nodes
    /// only, inherited ones are generated at their origin.
    pub fn own_nodes(&self) -> impl Iterator<Item = &DataObjectNode> {
        self.nodes.iter().filter(|n| !n.is_inherited)
    }
}

/// Checks the accessor shape: zero arguments, non-static, returning one of
/// the recognized container flavors with an explicit type argument.
fn node_shape(
    owner: &JavaType<'_>,
    method: &MethodDecl,
    api: &ScoutApiSpec,
) -> Option<(DataObjectNodeKind, String)> {
    let dataobject = api.data_object()?;
    if !method.params.is_empty() || method.is_constructor() {
        return None;
    }
    let ret = method.return_type.as_ref()?;
    let resolved = owner.resolve(&ret.name);
    let kind = if resolved == dataobject.do_value() {
        DataObjectNodeKind::Value
    } else if resolved == dataobject.do_list() {
        DataObjectNodeKind::List
    } else if resolved == dataobject.do_set() {
        DataObjectNodeKind::Set
    } else if resolved == dataobject.do_collection() {
        DataObjectNodeKind::Collection
    } else {
        return None;
    };
    let value = ret.type_args.first()?;
    Some((kind, super::render_resolved(value, owner)))
}

/// Filtering rules for node discovery. Constructors and zero-argument
/// requirements are already part of the shape check.
fn is_eligible(owner: &JavaType<'_>, method: &MethodDecl, api: &ScoutApiSpec) -> bool {
    if method.modifiers.is_static || method.modifiers.is_synthetic {
        return false;
    }
    // mixin members don't contribute nodes
    if matches!(
        owner.decl().kind,
        crate::source_model::TypeKind::Interface
    ) {
        return false;
    }
    if owner
        .member_annotation(&method.annotations, api.ignore_convenience_annotation())
        .is_some()
    {
        return false;
    }
    // already-generated accessor scaffolding is never re-processed
    if owner
        .member_annotation(&method.annotations, api.generated_annotation())
        .is_some()
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiVersion, scout_resolver};
    use crate::source_model::JavaEnvironment;
    use crate::source_model::stubs::register_runtime_stubs;

    fn env_with_api() -> (JavaEnvironment, ScoutApiSpec) {
        let api = scout_resolver()
            .resolve(&ApiVersion::parse("23.1").unwrap())
            .unwrap();
        let mut env = JavaEnvironment::new();
        register_runtime_stubs(&mut env, &api).unwrap();
        (env, api)
    }

    #[test]
    fn test_wrap_collects_node_kinds() {
        let (mut env, api) = env_with_api();
        env.register_source(
            "package a;\n\
             import java.util.Locale;\n\
             import org.eclipse.scout.rt.dataobject.DoEntity;\n\
             import org.eclipse.scout.rt.dataobject.DoList;\n\
             import org.eclipse.scout.rt.dataobject.DoSet;\n\
             import org.eclipse.scout.rt.dataobject.DoValue;\n\
             public class TranslationDo extends DoEntity {\n\
             \n\
               /** The translation key. */\n\
               public DoValue<String> key() {\n\
                 return doValue(\"key\");\n\
               }\n\
             \n\
               public DoList<Locale> languages() {\n\
                 return doList(\"languages\");\n\
               }\n\
             \n\
               public DoSet<String> tags() {\n\
                 return doSet(\"tags\");\n\
               }\n\
             \n\
               public static TranslationDo of(String key) {\n\
                 return null;\n\
               }\n\
             }\n",
        )
        .unwrap();

        let model_type = env.find_type("a.TranslationDo").unwrap();
        let model = DataObjectModel::wrap(&model_type, &api).unwrap();

        assert_eq!(model.nodes.len(), 3);
        assert_eq!(model.nodes[0].name, "key");
        assert_eq!(model.nodes[0].kind, DataObjectNodeKind::Value);
        assert!(model.nodes[0].has_javadoc);
        assert_eq!(model.nodes[1].kind, DataObjectNodeKind::List);
        assert_eq!(model.nodes[1].value_type, "java.util.Locale");
        assert_eq!(model.nodes[2].kind, DataObjectNodeKind::Set);
    }

    #[test]
    fn test_inherited_node_wins_over_leaf_shadow() {
        let (mut env, api) = env_with_api();
        env.register_source(
            "package a;\n\
             import org.eclipse.scout.rt.dataobject.DoEntity;\n\
             import org.eclipse.scout.rt.dataobject.DoValue;\n\
             public class BaseDo extends DoEntity {\n\
               public DoValue<String> foo() {\n\
                 return doValue(\"foo\");\n\
               }\n\
             }\n",
        )
        .unwrap();
        env.register_source(
            "package a;\n\
             import org.eclipse.scout.rt.dataobject.DoValue;\n\
             public class ChildDo extends BaseDo {\n\
               public DoValue<String> foo() {\n\
                 return doValue(\"foo\");\n\
               }\n\
             }\n",
        )
        .unwrap();

        let child = env.find_type("a.ChildDo").unwrap();
        let model = DataObjectModel::wrap(&child, &api).unwrap();

        let foo: Vec<_> = model.nodes.iter().filter(|n| n.name == "foo").collect();
        assert_eq!(foo.len(), 1);
        assert!(foo[0].is_inherited);
        assert_eq!(model.own_nodes().count(), 0);
    }

    #[test]
    fn test_non_data_object_is_none_and_facet_gate() {
        let (mut env, api) = env_with_api();
        env.register_source("package a;\npublic class Plain {}\n").unwrap();
        let plain = env.find_type("a.Plain").unwrap();
        assert!(DataObjectModel::wrap(&plain, &api).is_none());
        assert!(DataObjectModel::require(&plain, &api).is_err());

        // a release line without the facet wraps nothing
        let old = scout_resolver()
            .resolve(&ApiVersion::parse("10").unwrap())
            .unwrap();
        assert!(DataObjectModel::wrap(&plain, &old).is_none());
        assert!(matches!(
            DataObjectModel::require(&plain, &old),
            Err(FormforgeError::MissingApi { .. })
        ));
    }
}
