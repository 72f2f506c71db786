#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use grantkit::ComponentRegistry;
use grantkit_security::SecurityContext;
use principal_service::DefaultPrincipalService;
use principal_service_sdk::{
    DynPrincipalTransformer, PrincipalService, PrincipalServiceError, PrincipalTransformer,
};
use tracing_test::traced_test;

#[derive(Debug, PartialEq)]
struct Username(String);

#[derive(Debug, PartialEq)]
struct AuthorityCount(usize);

struct UsernameTransformer;

impl PrincipalTransformer for UsernameTransformer {
    type Output = Username;

    fn apply(&self, principal: Option<&SecurityContext>) -> Option<Username> {
        principal.map(|ctx| Username(ctx.name()))
    }
}

struct AuthorityCountTransformer;

impl PrincipalTransformer for AuthorityCountTransformer {
    type Output = AuthorityCount;

    fn apply(&self, principal: Option<&SecurityContext>) -> Option<AuthorityCount> {
        Some(AuthorityCount(
            principal.map_or(0, |ctx| ctx.authorities().len()),
        ))
    }
}

fn discovered_service() -> Arc<dyn PrincipalService> {
    let registry = Arc::new(ComponentRegistry::new());
    registry
        .register::<dyn DynPrincipalTransformer>("username", Arc::new(UsernameTransformer))
        .unwrap();
    registry
        .register::<dyn DynPrincipalTransformer>(
            "authorityCount",
            Arc::new(AuthorityCountTransformer),
        )
        .unwrap();

    let service = DefaultPrincipalService::builder()
        .owning_registry(registry)
        .build()
        .unwrap();
    Arc::new(service)
}

#[test]
fn transformers_are_discovered_from_registry() {
    let service = discovered_service();
    let ctx = SecurityContext::builder()
        .name("alice")
        .authority("admin")
        .authority("user")
        .build();

    assert_eq!(
        service.unwrap::<Username>(Some(&ctx)).unwrap(),
        Username("alice".to_owned())
    );
    assert_eq!(
        service.unwrap::<AuthorityCount>(Some(&ctx)).unwrap(),
        AuthorityCount(2)
    );
}

#[test]
#[traced_test]
fn missing_transformer_is_reported() {
    let service = discovered_service();
    let ctx = SecurityContext::builder().name("alice").build();

    let err = service.unwrap::<u64>(Some(&ctx)).unwrap_err();

    assert!(matches!(
        err,
        PrincipalServiceError::NoTransformer { ref principal, type_name }
            if principal == "alice" && type_name == "u64"
    ));
    assert!(logs_contain("principal unwrap failed"));
}

#[test]
#[traced_test]
fn empty_transformation_is_reported() {
    let service = discovered_service();

    let err = service.unwrap::<Username>(None).unwrap_err();

    assert!(matches!(
        err,
        PrincipalServiceError::EmptyResult { ref principal, .. } if principal == "<anonymous>"
    ));
    assert!(logs_contain("principal unwrap failed"));
}

#[test]
fn anonymous_principal_is_passed_to_transformer() {
    let service = discovered_service();

    assert_eq!(
        service.unwrap::<AuthorityCount>(None).unwrap(),
        AuthorityCount(0)
    );
}

#[test]
fn explicit_transformers_replace_discovery() {
    let registry = Arc::new(ComponentRegistry::new());
    registry
        .register::<dyn DynPrincipalTransformer>("username", Arc::new(UsernameTransformer))
        .unwrap();

    let service = DefaultPrincipalService::builder()
        .owning_registry(registry)
        .transformer("authorityCount", Arc::new(AuthorityCountTransformer))
        .build()
        .unwrap();

    assert!(service.supports::<AuthorityCount>());
    assert!(!service.supports::<Username>());
    assert_eq!(service.unwrap::<AuthorityCount>(None).unwrap(), AuthorityCount(0));
}

#[test]
fn service_is_reachable_through_registry() {
    let registry = Arc::new(ComponentRegistry::new());
    registry
        .register::<dyn DynPrincipalTransformer>("username", Arc::new(UsernameTransformer))
        .unwrap();
    let service = DefaultPrincipalService::builder()
        .owning_registry(Arc::clone(&registry))
        .build()
        .unwrap();
    registry
        .register::<dyn PrincipalService>("principalService", Arc::new(service))
        .unwrap();

    let service = registry
        .get::<dyn PrincipalService>("principalService")
        .unwrap();
    let ctx = SecurityContext::builder().name("bob").build();
    assert_eq!(
        service.unwrap::<Username>(Some(&ctx)).unwrap(),
        Username("bob".to_owned())
    );
}
