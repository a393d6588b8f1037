// crates/hull-core/src/resolver/tests/ownership_tests.rs
#![cfg(test)]

use std::collections::HashSet;

use crate::graph::{DependencyScope, ModuleName, OwningPlugin};
use crate::report::{CollectingErrorSink, ResolutionError};
use crate::resolver::ownership::{OwnershipContext, OwnershipOutcome, OwnershipValidator};
use crate::suppression::{CollectingUsageSink, SuppressionKind};

const SELF_PLUGIN: &str = "com.example.under-build";

struct Fixture {
    dependency: ModuleName,
    declaring: ModuleName,
    root: ModuleName,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dependency: ModuleName::new("dep.module"),
            declaring: ModuleName::new("declaring.module"),
            root: ModuleName::new("root.module"),
        }
    }

    fn ctx(&self) -> OwnershipContext<'_> {
        OwnershipContext {
            dependency: &self.dependency,
            declaring_module: &self.declaring,
            scope: Some(DependencyScope::Compile),
            declared_in_spec: false,
            root_module: Some(&self.root),
        }
    }
}

fn owner() -> OwningPlugin {
    OwningPlugin::new("owner.plugin", "com.example.owner")
}

fn sets() -> (HashSet<String>, HashSet<String>, HashSet<String>) {
    (HashSet::new(), HashSet::new(), HashSet::new())
}

#[test]
fn test_bundled_owner_resolves() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (mut bundled, additional, allowed) = sets();
    bundled.insert("owner.plugin".to_string());

    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Resolved);
    assert!(errors.is_empty());
    assert!(usages.is_empty());
}

#[test]
fn test_additional_bundled_target_resolves() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, mut additional, allowed) = sets();
    additional.insert("owner.plugin".to_string());

    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Resolved);
    assert!(errors.is_empty());
}

#[test]
fn test_self_ownership_is_never_an_error() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, allowed) = sets();

    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &[OwningPlugin::new("self.target", SELF_PLUGIN)],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Allowed);
    assert!(errors.is_empty());
}

#[test]
fn test_allow_listed_owner_passes() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, mut allowed) = sets();
    allowed.insert("com.example.owner".to_string());

    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Allowed);
    assert!(errors.is_empty());
    assert!(usages.is_empty());
}

#[test]
fn test_disallowed_owner_is_reported() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, allowed) = sets();

    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Reported);
    assert!(usages.is_empty());

    let reported = errors.entries();
    assert_eq!(reported.len(), 1);
    match &reported[0] {
        ResolutionError::DependencyOwnership {
            dependency,
            declaring_module,
            scope,
            declared_in_spec,
            root_module,
            disallowed_owners,
        } => {
            assert_eq!(dependency, &fixture.dependency);
            assert_eq!(declaring_module, &fixture.declaring);
            assert_eq!(*scope, Some(DependencyScope::Compile));
            assert!(!declared_in_spec);
            assert_eq!(root_module.as_ref(), Some(&fixture.root));
            assert_eq!(disallowed_owners.len(), 1);
            assert_eq!(disallowed_owners[0].plugin_id, "com.example.owner");
        }
        other => panic!("expected ownership error, got {other:?}"),
    }
}

#[test]
fn test_update_mode_records_usage_against_root() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, allowed) = sets();

    let outcome = OwnershipValidator::new(true).validate(
        &fixture.ctx(),
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Recorded);
    assert!(errors.is_empty());

    let recorded = usages.entries();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].source, fixture.root);
    assert_eq!(recorded[0].dependency, fixture.dependency);
    assert_eq!(recorded[0].kind, SuppressionKind::MissingPluginOwner);
}

#[test]
fn test_update_mode_falls_back_to_declaring_module() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, allowed) = sets();

    let ctx = OwnershipContext {
        root_module: None,
        ..fixture.ctx()
    };
    OwnershipValidator::new(true).validate(
        &ctx,
        &[owner()],
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(usages.entries()[0].source, fixture.declaring);
}

#[test]
fn test_mixed_owners_report_only_disallowed() {
    let fixture = Fixture::new();
    let usages = CollectingUsageSink::new();
    let errors = CollectingErrorSink::new();
    let (bundled, additional, mut allowed) = sets();
    allowed.insert("com.example.allowed".to_string());

    let owners = vec![
        OwningPlugin::new("allowed.plugin", "com.example.allowed"),
        OwningPlugin::new("bad.plugin", "com.example.bad"),
    ];
    let outcome = OwnershipValidator::new(false).validate(
        &fixture.ctx(),
        &owners,
        SELF_PLUGIN,
        &bundled,
        &additional,
        &allowed,
        &usages,
        &errors,
    );
    assert_eq!(outcome, OwnershipOutcome::Reported);
    match &errors.entries()[0] {
        ResolutionError::DependencyOwnership {
            disallowed_owners, ..
        } => {
            assert_eq!(disallowed_owners.len(), 1);
            assert_eq!(disallowed_owners[0].plugin_id, "com.example.bad");
        }
        other => panic!("expected ownership error, got {other:?}"),
    }
}
