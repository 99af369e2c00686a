//! Configuration module for the kernel parameter parser
//!
//! Hard limits (parameter count, name length, source size) are generated at
//! build time from `config/<profile>.toml`. User-facing preferences live in
//! [`runtime`] and can change without rebuilding.

// Generated by build.rs from the TOML profile
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("KPARAMS_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("KPARAMS_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
