//! Tests for allocator configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [options]
        disable_max_churn = true
        disable_capacity_checking = true

        [policy]
        copies = 2
        capacity = 40

        [solver]
        max_surplus_bound = 7
    "#;

    let config = AllocatorConfig::from_toml_str(toml).unwrap();
    assert!(!config.options.max_churn());
    assert!(!config.options.capacity_checking());
    assert!(config.options.even_distribution());
    assert_eq!(config.policy.copies, 2);
    assert_eq!(config.policy.capacity, 40);
    assert_eq!(config.policy.max_churn, 10);
    assert_eq!(config.solver.max_surplus_bound, 7);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        options:
          disable_even_distribution: true
        policy:
          max_churn: 2
    "#;

    let config = AllocatorConfig::from_yaml_str(yaml).unwrap();
    assert!(!config.options.even_distribution());
    assert_eq!(config.policy.max_churn, 2);
    assert_eq!(config.policy.capacity, 10);
}

#[test]
fn test_empty_toml_is_default() {
    let config = AllocatorConfig::from_toml_str("").unwrap();
    assert_eq!(config, AllocatorConfig::default());
    assert_eq!(config.policy(), UniformPolicy::default());
    assert_eq!(config.solver.max_surplus_bound, 100);
}

#[test]
fn test_builder() {
    let config = AllocatorConfig::new()
        .with_capacity(3)
        .with_max_churn(1)
        .with_copies(2)
        .with_options(AllocationOptions {
            disable_even_distribution: true,
            ..AllocationOptions::default()
        });

    let policy = config.policy();
    assert_eq!(policy.capacity, 3);
    assert_eq!(policy.max_churn, 1);
    assert_eq!(policy.copies, 2);
    assert!(!config.options.even_distribution());
}

#[test]
fn test_validate_rejects_zero_copies() {
    let config = AllocatorConfig::new().with_copies(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_negative_capacity() {
    let config = AllocatorConfig::new().with_capacity(-1);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("policy.capacity"));
}

#[test]
fn test_validate_bounds_max_surplus() {
    let mut config = AllocatorConfig::new();
    config.solver.max_surplus_bound = SolverSettings::MAX_SURPLUS_BOUND_LIMIT;
    assert!(config.validate().is_ok());

    for bound in [-1, SolverSettings::MAX_SURPLUS_BOUND_LIMIT + 1, i64::MAX] {
        config.solver.max_surplus_bound = bound;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("solver.max_surplus_bound"), "{}", err);
    }
}

#[test]
fn test_parsed_overflowing_bound_is_invalid() {
    let config = AllocatorConfig::from_toml_str(
        r#"
        [solver]
        max_surplus_bound = 9223372036854775807
        "#,
    )
    .unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file() {
    let result = AllocatorConfig::load("/nonexistent/allocator.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_toml() {
    let result = AllocatorConfig::from_toml_str("[options\n");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}
