//! Standalone security utilities (§4.5, §4.10): the ECC scalar-
//! multiplication primitive and a default CMAC-based authenticator.
//! Neither is wired into [`crate::pipeline::security`] by default.

pub mod cmac_policy;
pub mod ecc;

pub use cmac_policy::CmacAuthenticator;
