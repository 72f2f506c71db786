//! Permission evaluator traits.

use grantkit_security::SecurityContext;

use crate::models::{Permission, PermissionTarget, TargetId};

/// Decides whether an authenticated subject holds a permission on a target.
///
/// Registered in the component registry by the module and consumed by
/// application code:
///
/// ```ignore
/// let evaluator = registry.get::<dyn PermissionEvaluator>("permissionEvaluator").unwrap();
///
/// if !evaluator.has_permission(&ctx, &invoice, &Permission::new("approve")) {
///     return Err(Forbidden);
/// }
/// ```
///
/// Both methods fail closed: `false` unless something explicitly grants access.
pub trait PermissionEvaluator: Send + Sync {
    /// Permission check against a loaded target object.
    fn has_permission(
        &self,
        authentication: &SecurityContext,
        target: &dyn PermissionTarget,
        permission: &Permission,
    ) -> bool;

    /// Permission check against a target known only by id and type name.
    fn has_permission_for_id(
        &self,
        authentication: &SecurityContext,
        target_id: &TargetId,
        target_type: &str,
        permission: &Permission,
    ) -> bool;
}

/// One link of a permission evaluator chain.
///
/// For each input shape a link first declares whether it handles the input
/// (`supports_*`). Only a link that supports the input is asked for a decision,
/// and its decision is final: later links are not consulted.
pub trait ChainedPermissionEvaluator: Send + Sync {
    /// Whether this link decides for `target`. Must not have side effects.
    fn supports_target(
        &self,
        authentication: &SecurityContext,
        target: &dyn PermissionTarget,
        permission: &Permission,
    ) -> bool;

    /// Decision for `target`. Only called when [`supports_target`](Self::supports_target)
    /// returned `true` for the same input.
    fn is_permission_granted(
        &self,
        authentication: &SecurityContext,
        target: &dyn PermissionTarget,
        permission: &Permission,
    ) -> bool;

    /// Whether this link decides for the target identified by `target_id` and
    /// `target_type`. Must not have side effects.
    fn supports_target_type(
        &self,
        authentication: &SecurityContext,
        target_id: &TargetId,
        target_type: &str,
        permission: &Permission,
    ) -> bool;

    /// Decision for the identified target. Only called when
    /// [`supports_target_type`](Self::supports_target_type) returned `true`.
    fn is_target_type_permission_granted(
        &self,
        authentication: &SecurityContext,
        target_id: &TargetId,
        target_type: &str,
        permission: &Permission,
    ) -> bool;
}
