// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    document: DocumentLimits,
    parameters: ParameterLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct DocumentLimits {
    max_source_size: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct ParameterLimits {
    max_params: usize,
    max_param_name_len: usize,
    max_file_path_len: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_document: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=KPARAMS_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=KPARAMS_CONFIG_DIR");

    let profile = env::var("KPARAMS_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("KPARAMS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the kernel_params directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_SIZE: u64 = 100_000_000;

    if config.document.max_source_size == 0 || config.document.max_source_size > ABSOLUTE_MAX_SOURCE_SIZE {
        panic!("max_source_size must be within 1..={}", ABSOLUTE_MAX_SOURCE_SIZE);
    }

    if config.parameters.max_params == 0 {
        panic!("max_params cannot be zero");
    }

    if config.parameters.max_param_name_len == 0 {
        panic!("max_param_name_len cannot be zero");
    }

    if config.parameters.max_file_path_len == 0 {
        panic!("max_file_path_len cannot be zero");
    }

    if config.parameters.max_params >= config.logging.max_log_events_per_document {
        panic!("max_params must be below max_log_events_per_document");
    }

    if config.logging.max_log_events_per_document > config.logging.log_buffer_size {
        panic!("max_log_events_per_document exceeds log_buffer_size");
    }

    if profile == "production" && config.document.max_source_size > 10_000_000 {
        panic!("PRODUCTION: max_source_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod document {{
        pub const MAX_SOURCE_SIZE: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod parameters {{
        pub const MAX_PARAMS: usize = {};
        pub const MAX_PARAM_NAME_LEN: usize = {};
        pub const MAX_FILE_PATH_LEN: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_DOCUMENT: usize = {};
    }}
}}
"#,
        profile,
        config.document.max_source_size,
        config.document.max_line_count,
        config.parameters.max_params,
        config.parameters.max_param_name_len,
        config.parameters.max_file_path_len,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_document,
    );

    fs::write(output_path, constants_code).unwrap();
}
