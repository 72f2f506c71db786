use secrecy::SecretString;
use uuid::Uuid;

use crate::authority::GrantedAuthority;

/// `SecurityContext` describes an authenticated principal.
///
/// Built by the authentication layer and handed to the principal service and
/// permission evaluators. Callers without a principal pass `None` instead of a
/// context; see the features transformer for how that case is resolved.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Subject ID: the authenticated user, service, or system.
    subject_id: Uuid,
    /// Subject type classification (e.g., "user", "service").
    subject_type: Option<String>,
    /// Human readable principal name, used in log output.
    name: Option<String>,
    /// Authorities granted to the subject, in grant order.
    #[serde(default)]
    authorities: Vec<GrantedAuthority>,
    /// Original bearer token. Never serialized/persisted.
    /// Wrapped in `SecretString` so `Debug` redacts the value automatically.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Get the subject ID associated with the security context
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Get the subject type classification (e.g., "user", "service").
    #[must_use]
    pub fn subject_type(&self) -> Option<&str> {
        self.subject_type.as_deref()
    }

    /// Principal name, falling back to the subject ID.
    #[must_use]
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.subject_id.to_string())
    }

    /// Authorities granted to the subject, in grant order.
    #[must_use]
    pub fn authorities(&self) -> &[GrantedAuthority] {
        &self.authorities
    }

    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }

    /// Get the original bearer token.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uuid>,
    subject_type: Option<String>,
    name: Option<String>,
    authorities: Vec<GrantedAuthority>,
    bearer_token: Option<SecretString>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn subject_type(mut self, subject_type: &str) -> Self {
        self.subject_type = Some(subject_type.to_owned());
        self
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Append one granted authority.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<GrantedAuthority>) -> Self {
        self.authorities.push(authority.into());
        self
    }

    /// Replace all granted authorities.
    #[must_use]
    pub fn authorities<I, A>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<GrantedAuthority>,
    {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or_default(),
            subject_type: self.subject_type,
            name: self.name,
            authorities: self.authorities,
            bearer_token: self.bearer_token,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_security_context_builder_full() {
        let subject_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();

        let ctx = SecurityContext::builder()
            .subject_id(subject_id)
            .subject_type("user")
            .name("alice")
            .authority("ROLE_USER")
            .authority("ROLE_ADMIN")
            .bearer_token("test-token-123".to_owned())
            .build();

        assert_eq!(ctx.subject_id(), subject_id);
        assert_eq!(ctx.subject_type(), Some("user"));
        assert_eq!(ctx.name(), "alice");
        assert_eq!(
            ctx.authorities(),
            &[
                GrantedAuthority::new("ROLE_USER"),
                GrantedAuthority::new("ROLE_ADMIN")
            ]
        );
        assert_eq!(
            ctx.bearer_token().map(ExposeSecret::expose_secret),
            Some("test-token-123"),
        );
    }

    #[test]
    fn test_security_context_builder_minimal() {
        let ctx = SecurityContext::builder().build();

        assert_eq!(ctx.subject_id(), Uuid::default());
        assert_eq!(ctx.name(), Uuid::default().to_string());
        assert!(ctx.authorities().is_empty());
        assert!(ctx.bearer_token().is_none());
    }

    #[test]
    fn test_authorities_replace_previous() {
        let ctx = SecurityContext::builder()
            .authority("stale")
            .authorities(["a", "b"])
            .build();

        assert!(ctx.has_authority("a"));
        assert!(ctx.has_authority("b"));
        assert!(!ctx.has_authority("stale"));
    }

    #[test]
    fn test_security_context_serialize_deserialize() {
        let original = SecurityContext::builder()
            .subject_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
            .authority("admin")
            .bearer_token("secret-token".to_owned())
            .build();

        let serialized = serde_json::to_string(&original).unwrap();
        assert!(!serialized.contains("secret-token"));
        assert!(!serialized.contains("bearer_token"));

        let deserialized: SecurityContext = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.subject_id(), original.subject_id());
        assert_eq!(deserialized.authorities(), original.authorities());
        // bearer_token is skipped during serialization
        assert!(deserialized.bearer_token().is_none());
    }

    #[test]
    fn test_debug_redacts_bearer_token() {
        let ctx = SecurityContext::builder()
            .bearer_token("super-secret".to_owned())
            .build();

        assert!(!format!("{ctx:?}").contains("super-secret"));
    }
}
