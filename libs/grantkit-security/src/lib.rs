#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod authority;
pub mod constants;
pub mod context;

pub use authority::GrantedAuthority;
pub use context::{SecurityContext, SecurityContextBuilder};
