//! Well-known authority names and subject identifiers.

use uuid::Uuid;

/// Authority conventionally granted to callers without a principal.
pub const ANONYMOUS_AUTHORITY: &str = "anonymous";

/// Subject ID used by contexts built without an explicit subject.
pub const ANONYMOUS_SUBJECT_ID: Uuid = Uuid::nil();
