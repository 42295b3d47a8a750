use hashbrown::HashMap;
use pretty_assertions::assert_eq;

use super::{CommandLookup, SymbolTables, SymbolTablesBuilder, normalize_name};
use crate::test_utils::fighter;
use crate::values::Value;

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("life"), "life");
    assert_eq!(normalize_name("  Pos   X "), "pos x");
    assert_eq!(normalize_name("P2Dist\tx"), "p2dist x");
    assert!(matches!(normalize_name("pos x"), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn test_standard_lookups_ignore_case_and_spacing() {
    let symbols = SymbolTables::standard();
    assert!(symbols.variable("LIFE").is_some());
    assert!(symbols.variable("p2bodydist  X").is_some());
    assert!(symbols.variable("var").is_none());
    assert!(symbols.array("Var").is_some());
    assert!(symbols.array("life").is_none());
}

#[test]
fn test_comparison_id_suffix() {
    let symbols = SymbolTables::standard();
    assert!(symbols.comparison("statetype").is_some());
    assert!(symbols.comparison("projguarded52").is_some());
    assert!(symbols.comparison("statetype2").is_none());
    assert!(symbols.comparison("1200").is_none());
    assert!(symbols.comparison("life").is_none());
}

#[test]
fn test_builder_replaces_entries() {
    let mut builder = SymbolTables::standard().to_builder();
    builder
        .register_variable("Life", |_| Value::int(1))
        .register_variable("combo", |_| Value::int(5));
    let symbols = builder.build();

    let kfm = fighter("kfm", 1);
    let life = symbols.variable("life").map(|read| read(&kfm));
    assert_eq!(life, Some(Value::Integer(1)));
    assert!(symbols.variable("combo").is_some());

    // The shared tables are untouched.
    let standard = SymbolTables::standard().variable("life").map(|read| read(&kfm));
    assert_eq!(standard, Some(Value::Integer(1000)));
    assert!(SymbolTables::standard().variable("combo").is_none());
}

#[test]
fn test_empty_builder() {
    let symbols = SymbolTablesBuilder::new().build();
    assert_eq!(symbols.variable_names().count(), 0);
    assert!(symbols.array("var").is_none());
}

#[test]
fn test_hash_map_command_lookup() {
    let mut commands = HashMap::new();
    commands.insert("holdfwd".to_string(), 4);
    assert_eq!(commands.command_index("holdfwd"), Some(4));
    assert_eq!(commands.command_index("holdback"), None);
}

#[test]
fn test_debug_lists_sorted_names() {
    let mut builder = SymbolTablesBuilder::new();
    builder
        .register_variable("b", |_| Value::Bottom)
        .register_variable("a", |_| Value::Bottom);
    let debug = format!("{:?}", builder.build());
    assert_eq!(
        debug,
        r#"SymbolTables { variables: ["a", "b"], arrays: [], comparisons: [] }"#
    );
}
