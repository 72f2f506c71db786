//! Evaluator chain.

use std::fmt;
use std::sync::Arc;

use grantkit::ComponentRegistry;
use grantkit_security::SecurityContext;
use permission_evaluator_sdk::{
    ChainedPermissionEvaluator, Permission, PermissionEvaluator, PermissionTarget, TargetId,
};
use tracing::{debug, trace};

use super::deny_all::{DENY_ALL_NAME, DenyAllEvaluator};
use super::error::ChainConfigError;
use crate::config::PermissionChainConfig;

struct Link {
    name: String,
    evaluator: Arc<dyn ChainedPermissionEvaluator>,
}

/// Ordered chain of permission evaluator links ending in [`DenyAllEvaluator`].
///
/// Each check walks the links in order and returns the decision of the first
/// link supporting the input. Fixed after [`build`](EvaluatorChainBuilder::build).
pub struct EvaluatorChain {
    links: Vec<Link>,
}

impl EvaluatorChain {
    #[must_use]
    pub fn builder() -> EvaluatorChainBuilder {
        EvaluatorChainBuilder::default()
    }

    /// Build a chain from the links named in `cfg`, looked up as
    /// `dyn ChainedPermissionEvaluator` components in `registry`.
    ///
    /// # Errors
    ///
    /// - `EmptyLinkName` if a configured name is empty
    /// - `UnknownLink` if a name is not registered
    /// - `DuplicateLink` as for [`EvaluatorChainBuilder::build`]
    pub fn from_config(
        cfg: &PermissionChainConfig,
        registry: &ComponentRegistry,
    ) -> Result<Self, ChainConfigError> {
        let mut builder = Self::builder();
        for (position, name) in cfg.links.iter().enumerate() {
            if name.is_empty() {
                return Err(ChainConfigError::EmptyLinkName { position });
            }
            let evaluator = registry
                .get::<dyn ChainedPermissionEvaluator>(name)
                .ok_or_else(|| ChainConfigError::UnknownLink { name: name.clone() })?;
            builder = builder.link(name.as_str(), evaluator);
        }
        builder.build()
    }

    /// Link names in evaluation order, the deny-all terminal included.
    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|link| link.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always `false`: a built chain holds at least the deny-all link.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl PermissionEvaluator for EvaluatorChain {
    #[tracing::instrument(skip_all, fields(permission = %permission))]
    fn has_permission(
        &self,
        authentication: &SecurityContext,
        target: &dyn PermissionTarget,
        permission: &Permission,
    ) -> bool {
        for link in &self.links {
            if !link
                .evaluator
                .supports_target(authentication, target, permission)
            {
                trace!(link = %link.name, "Link does not support target");
                continue;
            }
            let granted = link
                .evaluator
                .is_permission_granted(authentication, target, permission);
            debug!(link = %link.name, granted, "Permission decided");
            return granted;
        }
        false
    }

    #[tracing::instrument(skip_all, fields(permission = %permission, target_type = %target_type))]
    fn has_permission_for_id(
        &self,
        authentication: &SecurityContext,
        target_id: &TargetId,
        target_type: &str,
        permission: &Permission,
    ) -> bool {
        for link in &self.links {
            if !link.evaluator.supports_target_type(
                authentication,
                target_id,
                target_type,
                permission,
            ) {
                trace!(link = %link.name, "Link does not support target type");
                continue;
            }
            let granted = link.evaluator.is_target_type_permission_granted(
                authentication,
                target_id,
                target_type,
                permission,
            );
            debug!(link = %link.name, granted, "Permission decided");
            return granted;
        }
        false
    }
}

impl fmt::Debug for EvaluatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.link_names()).finish()
    }
}

/// Builder for [`EvaluatorChain`]. Links are evaluated in the order they are added.
#[derive(Default)]
pub struct EvaluatorChainBuilder {
    links: Vec<Link>,
}

impl EvaluatorChainBuilder {
    /// Append `evaluator` under `name`.
    #[must_use]
    pub fn link(
        mut self,
        name: impl Into<String>,
        evaluator: Arc<dyn ChainedPermissionEvaluator>,
    ) -> Self {
        self.links.push(Link {
            name: name.into(),
            evaluator,
        });
        self
    }

    /// Validate the links and append the deny-all terminal.
    ///
    /// # Errors
    ///
    /// - `EmptyLinkName` if a link has an empty name
    /// - `DuplicateLink` if two links share a name or an evaluator instance,
    ///   or a link uses the reserved deny-all name
    pub fn build(self) -> Result<EvaluatorChain, ChainConfigError> {
        let mut links = self.links;
        for (position, link) in links.iter().enumerate() {
            if link.name.is_empty() {
                return Err(ChainConfigError::EmptyLinkName { position });
            }
            if link.name == DENY_ALL_NAME
                || links.iter().take(position).any(|l| {
                    l.name == link.name || Arc::ptr_eq(&l.evaluator, &link.evaluator)
                })
            {
                return Err(ChainConfigError::DuplicateLink {
                    name: link.name.clone(),
                });
            }
        }

        links.push(Link {
            name: DENY_ALL_NAME.to_owned(),
            evaluator: Arc::new(DenyAllEvaluator),
        });

        let chain = EvaluatorChain { links };
        debug!(links = ?chain, "Permission evaluator chain initialized");
        Ok(chain)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    struct GrantAll;

    impl ChainedPermissionEvaluator for GrantAll {
        fn supports_target(
            &self,
            _authentication: &SecurityContext,
            _target: &dyn PermissionTarget,
            _permission: &Permission,
        ) -> bool {
            true
        }

        fn is_permission_granted(
            &self,
            _authentication: &SecurityContext,
            _target: &dyn PermissionTarget,
            _permission: &Permission,
        ) -> bool {
            true
        }

        fn supports_target_type(
            &self,
            _authentication: &SecurityContext,
            _target_id: &TargetId,
            _target_type: &str,
            _permission: &Permission,
        ) -> bool {
            true
        }

        fn is_target_type_permission_granted(
            &self,
            _authentication: &SecurityContext,
            _target_id: &TargetId,
            _target_type: &str,
            _permission: &Permission,
        ) -> bool {
            true
        }
    }

    #[test]
    fn empty_builder_yields_deny_all_chain() {
        let chain = EvaluatorChain::builder().build().unwrap();
        assert_eq!(chain.link_names().collect::<Vec<_>>(), [DENY_ALL_NAME]);

        let ctx = SecurityContext::builder().build();
        assert!(!chain.has_permission(&ctx, &"doc", &Permission::new("read")));
    }

    #[test]
    fn deny_all_is_appended_last() {
        let chain = EvaluatorChain::builder()
            .link("grantAll", Arc::new(GrantAll))
            .build()
            .unwrap();
        assert_eq!(
            chain.link_names().collect::<Vec<_>>(),
            ["grantAll", DENY_ALL_NAME]
        );
        assert!(!chain.is_empty());
    }

    #[test]
    fn empty_link_name_is_rejected() {
        let err = EvaluatorChain::builder()
            .link("grantAll", Arc::new(GrantAll))
            .link("", Arc::new(GrantAll))
            .build()
            .unwrap_err();
        assert!(matches!(err, ChainConfigError::EmptyLinkName { position: 1 }));
    }

    #[test]
    fn duplicate_link_is_rejected() {
        let err = EvaluatorChain::builder()
            .link("grantAll", Arc::new(GrantAll))
            .link("grantAll", Arc::new(GrantAll))
            .build()
            .unwrap_err();
        assert!(matches!(err, ChainConfigError::DuplicateLink { ref name } if name == "grantAll"));
    }

    #[test]
    fn same_evaluator_under_two_names_is_rejected() {
        let shared: Arc<dyn ChainedPermissionEvaluator> = Arc::new(GrantAll);
        let err = EvaluatorChain::builder()
            .link("first", Arc::clone(&shared))
            .link("second", shared)
            .build()
            .unwrap_err();
        assert!(matches!(err, ChainConfigError::DuplicateLink { ref name } if name == "second"));
    }

    #[test]
    fn reserved_deny_all_name_is_rejected() {
        let err = EvaluatorChain::builder()
            .link(DENY_ALL_NAME, Arc::new(DenyAllEvaluator))
            .build()
            .unwrap_err();
        assert!(matches!(err, ChainConfigError::DuplicateLink { .. }));
    }
}
