//! Environment tests over real files: folder loading and the explicit
//! two-phase reload protocol.

use formforge_core::source_model::{ElementId, JavaEnvironment};
use std::collections::HashMap;
use std::fs;

#[test]
fn test_load_source_folder_registers_units() {
    let dir = tempfile::tempdir().unwrap();
    let pkg = dir.path().join("com/acme");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(
        pkg.join("One.java"),
        "package com.acme;\npublic class One {}\n",
    )
    .unwrap();
    fs::write(
        pkg.join("Two.java"),
        "package com.acme;\npublic class Two extends One {}\n",
    )
    .unwrap();
    fs::write(pkg.join("notes.txt"), "not java").unwrap();
    // a broken unit is skipped, not fatal
    fs::write(pkg.join("Broken.java"), "class {{{").unwrap();

    let mut env = JavaEnvironment::new();
    let count = env.load_source_folder(dir.path()).unwrap();

    assert_eq!(count, 2);
    let two = env.find_type("com.acme.Two").unwrap();
    assert_eq!(two.superclass().unwrap().fqn(), "com.acme.One");
}

#[test]
fn test_element_identity_is_stable_across_reload() {
    let mut env = JavaEnvironment::new();
    let fqn = env
        .register_source(
            "package a;\npublic class C {\n    public void work() {\n    }\n}\n",
        )
        .unwrap();

    let id_before: ElementId = env.find_type(&fqn).unwrap().element_id();

    // identity works as a map key across the reload boundary
    let mut cache: HashMap<ElementId, &str> = HashMap::new();
    cache.insert(id_before.clone(), "cached");

    env.register_override(
        &fqn,
        "package a;\npublic class C {\n    public void work() {\n    }\n\n    public void more() {\n    }\n}\n",
    );
    env.reload().unwrap();

    let id_after = env.find_type(&fqn).unwrap().element_id();
    assert_eq!(id_before, id_after);
    assert_eq!(cache.get(&id_after), Some(&"cached"));
}

#[test]
fn test_epoch_moves_only_on_effective_reload() {
    let mut env = JavaEnvironment::new();
    let fqn = env
        .register_source("package a;\npublic class C {}\n")
        .unwrap();
    let epoch0 = env.epoch();

    // no override staged: reload is a no-op
    env.reload().unwrap();
    assert_eq!(env.epoch(), epoch0);

    // unchanged content: still a no-op
    env.register_override(&fqn, "package a;\npublic class C {}\n");
    env.reload().unwrap();
    assert_eq!(env.epoch(), epoch0);

    // changed content: epoch and unit epoch both move
    env.register_override(&fqn, "package a;\npublic class C {\n    int m_x;\n}\n");
    let changed = env.reload().unwrap();
    assert_eq!(changed, vec![fqn.clone()]);
    assert!(env.epoch() > epoch0);
    assert_eq!(env.unit_epoch(&fqn), Some(env.epoch()));
}
