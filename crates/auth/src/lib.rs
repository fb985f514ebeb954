//! `eventtier-auth`: authentication and tier authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod profile;

pub use authorize::{AccessExplanation, AuthzError, authorize_tier, explain_access};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use profile::{ProfileMetadata, TIER_KEY, UserProfile};
