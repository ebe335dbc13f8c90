//! Configuration tree properties
//!
//! Merge, build, choice switching and serialization on small templates.

use tardis_config_tree::{
    merge, ConfigTreeModel, Mapping, NodeId, TemplateMap, TreeError, Value,
};

const DENSITY_TEMPLATE: &str = r#"
density:
  type: [true, ["uniform|value", "exponential|time_0|rho_0"]]
  value: [true, null]
  time_0: [true, null]
  rho_0: [true, null]
"#;

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap()
}

fn mapping(text: &str) -> Mapping {
    match yaml(text) {
        Value::Mapping(m) => m,
        other => panic!("not a mapping: {:?}", other),
    }
}

fn density_model(user: &str) -> ConfigTreeModel {
    let template = TemplateMap::from_yaml_str(DENSITY_TEMPLATE).unwrap();
    ConfigTreeModel::from_user_config(&mapping(user), template).unwrap()
}

fn leaf(model: &ConfigTreeModel, path: &str) -> NodeId {
    let key = model.find(path).unwrap();
    model.value_leaf(key).unwrap()
}

#[test]
fn test_density_example() {
    let model = density_model("density: {type: exponential, time_0: 5, rho_0: 2}");

    let type_leaf = leaf(&model, "density.type");
    assert_eq!(
        model.node(type_leaf).unwrap().fields(),
        &[Value::from("exponential"), Value::from("uniform")]
    );

    let value = model.find("density.value").unwrap();
    let time_0 = model.find("density.time_0").unwrap();
    let rho_0 = model.find("density.rho_0").unwrap();
    assert!(model.disabled().contains(&value));
    assert!(!model.disabled().contains(&time_0));
    assert!(!model.disabled().contains(&rho_0));

    assert_eq!(
        model.to_mapping().unwrap(),
        yaml("density: {type: exponential, time_0: 5, rho_0: 2}")
    );
}

#[test]
fn test_merge_rejection_leaves_template_unchanged() {
    let mut template = TemplateMap::from_yaml_str(DENSITY_TEMPLATE).unwrap();
    let pristine = template.clone();

    let user = mapping("density: {value: 3, type: gaussian}");
    let err = merge(&user, &mut template).unwrap_err();

    assert!(matches!(err, TreeError::InvalidOption { .. }));
    assert_eq!(template, pristine);
}

#[test]
fn test_unknown_key_preserved() {
    let model = density_model("density: {type: uniform, value: 1}\nextra: {nested: true}");
    let out = model.to_mapping().unwrap();

    assert_eq!(out["extra"], yaml("{nested: true}"));
}

#[test]
fn test_round_trip_through_serializer() {
    let user = "density: {type: exponential, time_0: 5, rho_0: 2}";
    let first = density_model(user).to_mapping().unwrap();

    let text = serde_yaml::to_string(&first).unwrap();
    let second = density_model(&text).to_mapping().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_selection_idempotent() {
    let mut model = density_model("density: {type: exponential}");
    let type_leaf = leaf(&model, "density.type");
    let disabled = model.disabled().clone();

    model.on_choice_changed(type_leaf, "exponential").unwrap();

    assert_eq!(model.disabled(), &disabled);
    assert_eq!(model.field_at(type_leaf, 0), Some(&Value::from("exponential")));
}

#[test]
fn test_selection_toggle() {
    let mut model = density_model("density: {type: exponential, time_0: 5, rho_0: 2}");
    let type_leaf = leaf(&model, "density.type");
    let disabled = model.disabled().clone();

    model.on_choice_changed(type_leaf, "uniform").unwrap();
    let value = model.find("density.value").unwrap();
    let time_0 = model.find("density.time_0").unwrap();
    assert!(!model.disabled().contains(&value));
    assert!(model.disabled().contains(&time_0));
    assert_eq!(model.to_mapping().unwrap(), yaml("density: {type: uniform, value: null}"));

    model.on_choice_changed(type_leaf, "exponential").unwrap();
    assert_eq!(model.disabled(), &disabled);
}

#[test]
fn test_flags_follow_disabled_set() {
    let model = density_model("density: {type: exponential}");
    let value_leaf = leaf(&model, "density.value");
    let time_0_leaf = leaf(&model, "density.time_0");
    let density = model.find("density").unwrap();

    assert!(!model.is_editable(value_leaf));
    assert!(!model.flags(value_leaf).enabled);
    assert!(model.is_editable(time_0_leaf));
    // Internal nodes are selectable but never editable
    assert!(model.flags(density).selectable);
    assert!(!model.flags(density).editable);
}

#[test]
fn test_navigation_out_of_range_is_none() {
    let model = density_model("density: {type: uniform}");
    let root = model.root();

    assert_eq!(model.row_count(root), 1);
    assert!(model.child_at(root, 1).is_none());
    assert_eq!(model.row_of(root), Some(0));
    let type_leaf = leaf(&model, "density.type");
    assert!(model.field_at(type_leaf, 2).is_none());
}
