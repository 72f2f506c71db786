//! Terminal link of every evaluator chain.

use grantkit_security::SecurityContext;
use permission_evaluator_sdk::{ChainedPermissionEvaluator, Permission, PermissionTarget, TargetId};
use tracing::debug;

/// Name under which the deny-all link appears in logs.
pub const DENY_ALL_NAME: &str = "denyAll";

/// Supports every input and denies it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAllEvaluator;

impl ChainedPermissionEvaluator for DenyAllEvaluator {
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
        authentication: &SecurityContext,
        target: &dyn PermissionTarget,
        permission: &Permission,
    ) -> bool {
        debug!(
            authentication = ?authentication,
            target = ?target,
            permission = %permission,
            "Denying access"
        );
        false
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
        authentication: &SecurityContext,
        target_id: &TargetId,
        target_type: &str,
        permission: &Permission,
    ) -> bool {
        debug!(
            authentication = ?authentication,
            target_type,
            target_id = %target_id,
            permission = %permission,
            "Denying access"
        );
        false
    }
}
