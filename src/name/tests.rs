use super::path::{PathError, resolve_path};
use super::resolve::is_truthy;
use super::*;
use crate::call::{CallArgs, Signature};
use serde_json::json;

fn bound(sig: Signature, args: CallArgs) -> crate::call::BoundCall {
    sig.bind(args)
}

#[test]
fn auto_key_joins_arguments_in_call_order() {
    let call = bound(
        Signature::new().param("a").param("b"),
        CallArgs::new().arg(1).arg("two").named("extra", true),
    );
    assert_eq!(
        resolve_lock_key("refresh", &LockName::Auto, &call),
        "refresh:1:two:true"
    );
}

#[test]
fn auto_key_is_stable_for_identical_argument_values() {
    let sig = Signature::new().param("a").param("b");
    let first = bound(sig.clone(), CallArgs::new().arg(1).arg("x"));
    let second = bound(sig, CallArgs::new().arg(1).arg("x"));

    assert_eq!(
        resolve_lock_key("job", &LockName::Auto, &first),
        resolve_lock_key("job", &LockName::Auto, &second)
    );
}

#[test]
fn auto_key_changes_when_an_argument_changes() {
    let sig = Signature::new().param("a").param("b");
    let first = bound(sig.clone(), CallArgs::new().arg(1).arg("x"));
    let second = bound(sig, CallArgs::new().arg(2).arg("x"));

    assert_ne!(
        resolve_lock_key("job", &LockName::Auto, &first),
        resolve_lock_key("job", &LockName::Auto, &second)
    );
}

#[test]
fn auto_key_omits_composite_values_entirely() {
    let call = bound(
        Signature::new().param("user").param("page"),
        CallArgs::new().arg(json!({"id": 42})).arg(3),
    );
    // The object is dropped, not rendered as an empty segment.
    assert_eq!(resolve_lock_key("sync", &LockName::Auto, &call), "sync:3");
}

#[test]
fn auto_key_keeps_null_arguments() {
    let call = bound(
        Signature::new().param("a"),
        CallArgs::new().arg(Option::<i64>::None),
    );
    assert_eq!(resolve_lock_key("job", &LockName::Auto, &call), "job:null");
}

#[test]
fn literal_key_ignores_arguments() {
    let sig = Signature::new().param("a");
    let first = bound(sig.clone(), CallArgs::new().arg(1));
    let second = bound(sig, CallArgs::new().arg(999));
    let name = LockName::literal("fixed");

    assert_eq!(resolve_lock_key("job", &name, &first), "job:fixed");
    assert_eq!(resolve_lock_key("job", &name, &second), "job:fixed");
}

#[test]
fn selector_key_follows_declaration_order() {
    let call = bound(
        Signature::new()
            .param("arg1")
            .param("arg2")
            .param("arg3")
            .param("arg4"),
        CallArgs::new().arg(1).arg(2).arg(3).arg(4),
    );
    let name = LockName::selectors([
        Selector::param("arg4"),
        Selector::param("arg2"),
        Selector::param("arg3"),
    ]);

    assert_eq!(resolve_lock_key("bar", &name, &call), "bar:4:2:3");
}

#[test]
fn selector_key_resolves_defaulted_parameters() {
    let call = bound(
        Signature::new().param("a").param_with_default("region", "us"),
        CallArgs::new().arg(1),
    );
    let name = LockName::selectors([Selector::param("region")]);

    assert_eq!(resolve_lock_key("job", &name, &call), "job:us");
}

#[test]
fn unresolved_parameter_contributes_empty_fragment() {
    let call = bound(Signature::new().param("a"), CallArgs::new().arg(1));
    let name = LockName::selectors([Selector::param("missing"), Selector::param("a")]);

    // Empty segment kept, not dropped.
    assert_eq!(resolve_lock_key("job", &name, &call), "job::1");
}

#[test]
fn path_selector_walks_attributes_and_indexes() {
    let call = bound(
        Signature::new().param("ctx"),
        CallArgs::new().arg(json!({"obj": {"items": [9, 8]}})),
    );
    let name = LockName::selectors([Selector::path(
        "ctx",
        ["obj".into(), "items".into(), 0usize.into()],
    )]);

    assert_eq!(resolve_lock_key("job", &name, &call), "job:9");
}

#[test]
fn path_selector_degrades_on_empty_array() {
    let call = bound(
        Signature::new().param("ctx"),
        CallArgs::new().arg(json!({"obj": {"items": []}})),
    );
    let name = LockName::selectors([Selector::path(
        "ctx",
        ["obj".into(), "items".into(), 0usize.into()],
    )]);

    assert_eq!(resolve_lock_key("job", &name, &call), "job:");
}

#[test]
fn path_selector_degrades_on_missing_root() {
    let call = bound(Signature::new().param("a"), CallArgs::new().arg(1));
    let name = LockName::selectors([Selector::path("ghost", ["field".into()])]);

    assert_eq!(resolve_lock_key("job", &name, &call), "job:");
}

#[test]
fn priority_selector_picks_first_truthy_value() {
    let sig = Signature::new().param("a").param("b");
    let name = LockName::selectors([Selector::priority(["a", "b"])]);

    let call = bound(sig.clone(), CallArgs::new().arg(0).arg(5));
    assert_eq!(resolve_lock_key("job", &name, &call), "job:5");

    let call = bound(sig, CallArgs::new().arg(0).arg(0));
    assert_eq!(resolve_lock_key("job", &name, &call), "job:");
}

#[test]
fn priority_selector_skips_missing_names() {
    let call = bound(Signature::new().param("b"), CallArgs::new().arg("hit"));
    let name = LockName::selectors([Selector::priority(["ghost", "b"])]);

    assert_eq!(resolve_lock_key("job", &name, &call), "job:hit");
}

#[test]
fn explicitly_selected_composite_renders_compact_json() {
    let call = bound(
        Signature::new().param("user"),
        CallArgs::new().arg(json!({"id": 42})),
    );
    let name = LockName::selectors([Selector::param("user")]);

    assert_eq!(
        resolve_lock_key("job", &name, &call),
        r#"job:{"id":42}"#
    );
}

#[test]
fn resolve_path_failures_are_specific() {
    let value = json!({"items": [1, 2]});

    assert_eq!(
        resolve_path(&value, &["ghost".into()]),
        Err(PathError::MissingField("ghost".to_string()))
    );
    assert_eq!(
        resolve_path(&value, &["items".into(), 5usize.into()]),
        Err(PathError::OutOfRange(5))
    );
    assert_eq!(
        resolve_path(&value, &[0usize.into()]),
        Err(PathError::NotAnArray(0))
    );
    assert_eq!(
        resolve_path(&json!([1]), &["field".into()]),
        Err(PathError::NotAnObject("field".to_string()))
    );
}

#[test]
fn resolve_path_returns_terminal_value() {
    let value = json!({"a": {"b": ["x", "y"]}});
    let terminal = resolve_path(&value, &["a".into(), "b".into(), 1usize.into()]).unwrap();
    assert_eq!(terminal, &json!("y"));
}

#[test]
fn truthiness_follows_conventional_coercion() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&json!([])));
    assert!(!is_truthy(&json!({})));

    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!("x")));
    assert!(is_truthy(&json!([0])));
    assert!(is_truthy(&json!({"k": 0})));
}
