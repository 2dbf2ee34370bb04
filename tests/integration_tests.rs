// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for binding a record from each source.
//!
//! Every source on its own must produce the same filled record.

mod common;

use common::{filled, filled_env, Configuration, EnvGuard};
use propbind::prelude::*;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults_only() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply_defaults().unwrap();
    assert_eq!(binder.commit(&mut config), 3);

    assert_eq!(config.option_a, "unfilled");
    assert_eq!(config.option_b, 4444);
    assert!(!config.option_c);
}

#[test]
fn test_nothing_staged_leaves_record_untouched() {
    let mut config = Configuration {
        option_a: "kept".to_string(),
        option_b: 7,
        option_c: true,
    };
    let before = config.clone();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    assert_eq!(binder.commit(&mut config), 0);
    assert_eq!(config, before);
    assert!(binder.catalog().committed().is_empty());
}

#[test]
#[cfg(feature = "env")]
fn test_bind_from_env_values() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply(&mut EnvVarSource::with_values(filled_env()))
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config, filled());
}

#[test]
#[cfg(feature = "env")]
fn test_bind_from_process_env() {
    let mut guard = EnvGuard::new();
    guard.set("PROPBIND_IT_OPT_A", "filled");
    guard.set("PROPBIND_IT_OPT_B", "8888");
    guard.set("PROPBIND_IT_OPT_C", "true");

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply(&mut EnvVarSource::with_prefix("PROPBIND_IT_"))
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config, filled());
}

#[test]
#[cfg(feature = "env")]
fn test_env_large_value_is_bound() {
    let large = "x".repeat(1024 * 1024 + 1);
    let mut env = HashMap::new();
    env.insert("OPT_A".to_string(), large.clone());

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply(&mut EnvVarSource::with_values(env)).unwrap();
    binder.commit(&mut config);

    assert_eq!(config.option_a.len(), large.len());
}

#[test]
#[cfg(feature = "env")]
fn test_env_missing_falls_back_to_defaults() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply(&mut EnvVarSource::with_values(HashMap::new()))
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config.option_a, "unfilled");
    assert_eq!(config.option_b, 4444);
    assert!(!config.option_c);
}

#[test]
#[cfg(feature = "cli")]
fn test_bind_from_args() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply_args(vec!["opt_a=filled", "opt_b=8888", "opt_c=true"])
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config, filled());
}

#[test]
#[cfg(feature = "cli")]
fn test_args_only_yield_present_keys() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply_args(vec!["opt_b=8888"]).unwrap();
    assert_eq!(binder.commit(&mut config), 1);

    assert_eq!(config.option_a, "");
    assert_eq!(config.option_b, 8888);
    assert!(!binder.catalog().is_committed("option_a"));
}

#[test]
#[cfg(feature = "cli")]
fn test_args_bare_key_is_noop() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply_defaults().unwrap();
    binder.apply_args(vec!["opt_a"]).unwrap();
    binder.commit(&mut config);

    assert_eq!(config.option_a, "unfilled");
}

#[test]
#[cfg(feature = "yaml")]
fn test_bind_from_yaml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "opt_a: filled").unwrap();
    writeln!(file, "opt_b: 8888").unwrap();
    writeln!(file, "opt_c: true").unwrap();

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply_yaml_file(file.path()).unwrap();
    binder.commit(&mut config);

    assert_eq!(config, filled());
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_text_values_are_coerced() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "opt_b: \"8888\"").unwrap();
    writeln!(file, "opt_c: \"T\"").unwrap();

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder.apply_yaml_file(file.path()).unwrap();
    binder.commit(&mut config);

    assert_eq!(config.option_b, 8888);
    assert!(config.option_c);
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_missing_path() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    let err = binder.apply_yaml_file("").unwrap_err();
    assert!(matches!(err, BindError::MissingPath));
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    let err = binder.apply_yaml_file(&path).unwrap_err();
    assert!(matches!(err, BindError::FileRead { .. }));
}

#[test]
#[cfg(feature = "yaml")]
fn test_yaml_invalid_document() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "opt_a: [unclosed").unwrap();

    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    let err = binder.apply_yaml_file(file.path()).unwrap_err();
    match err {
        BindError::FileParse { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected FileParse, got {:?}", other),
    }
}

#[test]
fn test_bind_from_callback() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply_callback(|| {
            let mut values = HashMap::new();
            values.insert("OPT_A".to_string(), "filled".to_string());
            values.insert("opt_b".to_string(), "8888".to_string());
            values.insert("Opt_C".to_string(), "true".to_string());
            Ok::<_, std::io::Error>(values)
        })
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config, filled());
}

#[test]
fn test_callback_native_values() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    binder
        .apply_callback(|| {
            let mut values = HashMap::new();
            values.insert("opt_a".to_string(), RawValue::Integer(12));
            values.insert("opt_b".to_string(), RawValue::Integer(8888));
            values.insert("opt_c".to_string(), RawValue::Integer(1));
            Ok::<_, std::io::Error>(values)
        })
        .unwrap();
    binder.commit(&mut config);

    assert_eq!(config.option_a, "12");
    assert_eq!(config.option_b, 8888);
    assert!(config.option_c);
}

#[test]
fn test_callback_failure() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    let err = binder
        .apply_callback(|| {
            Err::<HashMap<String, String>, _>(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "lookup timed out",
            ))
        })
        .unwrap_err();

    assert!(matches!(err, BindError::Callback { .. }));
    assert!(err.to_string().contains("lookup timed out"));
}

#[test]
fn test_unset_callback() {
    let mut config = Configuration::default();
    let mut binder = PropertyBinder::new(&mut config).unwrap();

    let err = binder.apply(&mut CallbackSource::unset()).unwrap_err();
    assert!(matches!(err, BindError::Callback { source: None, .. }));
}

#[test]
#[cfg(all(feature = "env", feature = "cli", feature = "yaml"))]
fn test_plan_all_sources() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "opt_a: from_yaml").unwrap();
    writeln!(file, "opt_b: 1").unwrap();

    let mut env = HashMap::new();
    env.insert("OPT_B".to_string(), "2".to_string());

    let mut config = Configuration::default();
    let catalog = BindingPlan::new()
        .with_defaults()
        .with_yaml_file(file.path())
        .with_source(Box::new(EnvVarSource::with_values(env)))
        .with_args(vec!["opt_c=t"])
        .bind(&mut config)
        .unwrap();

    // The env pass falls back to OPT_A's default, which replaces the YAML value
    assert_eq!(config.option_a, "unfilled");
    assert_eq!(config.option_b, 2);
    assert!(config.option_c);
    assert_eq!(catalog.committed().len(), 3);
}
