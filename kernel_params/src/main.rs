use kernel_params::config::runtime::RuntimeConfig;
use kernel_params::logging::{self, codes};
use kernel_params::pipeline::{self, KernelError, KernelOutput};
use kernel_params::utils::{SourceMap, SourcePosition};
use std::env;
use std::process::ExitCode;

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    kernel_path: Option<String>,
    json: bool,
    config_path: Option<String>,
    help: bool,
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--config" => match iter.next() {
                Some(path) => options.config_path = Some(path.clone()),
                None => return Err("--config requires a file path".to_string()),
            },
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if options.kernel_path.is_some() {
                    return Err(format!("Unexpected extra argument '{}'", path));
                }
                options.kernel_path = Some(path.to_string());
            }
        }
    }

    Ok(options)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("kparams");

    let options = match parse_options(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    if options.help {
        print_help(program);
        return ExitCode::SUCCESS;
    }

    let Some(kernel_path) = options.kernel_path.as_deref() else {
        print_usage(program);
        return ExitCode::FAILURE;
    };

    let config = match &options.config_path {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                logging::safe_log_error(codes::system::CONFIGURATION_ERROR, &e.to_string());
                return ExitCode::FAILURE;
            }
        },
        None => RuntimeConfig::default(),
    };

    if let Err(e) = init_logging(&config) {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
        return ExitCode::FAILURE;
    }

    match pipeline::load_kernel_with_config(kernel_path, &config) {
        Ok(output) => {
            if options.json {
                match serde_json::to_string_pretty(&output.table) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_table(&output);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            // Already logged by the failing stage
            if options.json {
                println!("{}", error_json(&error));
            } else if let Some(diagnostic) = error.diagnostic() {
                if let Some(excerpt) = source_excerpt(kernel_path, diagnostic.position) {
                    eprintln!("{}", excerpt);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()
}

/// Re-read the kernel and render the line a diagnostic points at
fn source_excerpt(path: &str, position: SourcePosition) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let source = String::from_utf8_lossy(&bytes);
    Some(SourceMap::new(&source).format_excerpt(position))
}

fn error_json(error: &KernelError) -> serde_json::Value {
    match error.diagnostic() {
        Some(diagnostic) => serde_json::json!({ "error": diagnostic }),
        None => serde_json::json!({
            "error": {
                "code": error.error_code(),
                "message": error.to_string(),
            }
        }),
    }
}

fn print_table(output: &KernelOutput) {
    let table = &output.table;
    println!("{}: {} parameters", output.document, table.len());

    if table.is_empty() {
        return;
    }

    println!();
    println!(
        "  {:<24} {:<11} {:>6} {:>5} {:>4}  {}",
        "NAME", "TYPE", "OFFSET", "SIZE", "UNIT", "FILE"
    );
    for param in table {
        let unit = param
            .assigned_tex_unit
            .map(|u| u.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<24} {:<11} {:>6} {:>5} {:>4}  {}",
            param.name,
            param.param_type,
            param.std140_offset,
            param.std140_size,
            unit,
            param.file.as_deref().unwrap_or("")
        );
    }

    println!();
    println!(
        "Buffer: {} slots ({} bytes), {} samplers",
        table.buffer_slots(),
        table.buffer_size_bytes(),
        table.sampler_count()
    );
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <kernel-file> [--json] [--config FILE]", program);
    eprintln!("       {} --help", program);
}

fn print_help(program: &str) {
    println!("kparams v{}", env!("CARGO_PKG_VERSION"));
    println!("Extract uniform parameter declarations and their std140 layout");
    println!();
    println!("USAGE:");
    println!("    {} <kernel-file> [options]", program);
    println!();
    println!("OPTIONS:");
    println!("    --json           Print the parameter table as JSON");
    println!("    --config FILE    Load runtime preferences from a TOML file");
    println!("    --help           Show this help message");
    println!();
    println!("OUTPUT:");
    println!("    Success: one row per parameter with its slot offset and size");
    println!("    Failure: a single diagnostic '<file>: line L: col C: error: ...'");
    println!();
    println!("BUILD:");
    println!("    {}", kernel_params::config::build_info::source_info());
    for line in logging::config::get_config_summary().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&["blur.kernel", "--json", "--config", "prefs.toml"]))
            .unwrap();
        assert_eq!(options.kernel_path.as_deref(), Some("blur.kernel"));
        assert!(options.json);
        assert_eq!(options.config_path.as_deref(), Some("prefs.toml"));
        assert!(!options.help);
    }

    #[test]
    fn test_parse_options_errors() {
        assert!(parse_options(&args(&["--config"])).is_err());
        assert!(parse_options(&args(&["--threads", "4"])).is_err());
        assert!(parse_options(&args(&["a.kernel", "b.kernel"])).is_err());
    }

    #[test]
    fn test_help_flag() {
        let options = parse_options(&args(&["--help"])).unwrap();
        assert!(options.help);
        assert!(options.kernel_path.is_none());
    }

    #[test]
    fn test_error_json_for_file_error() {
        let error = KernelError::from(kernel_params::file_processor::FileProcessorError::FileNotFound {
            path: "x.kernel".to_string(),
        });
        let value = error_json(&error);
        assert_eq!(value["error"]["code"], "E005");
    }

    #[test]
    fn test_excerpt_of_non_utf8_kernel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.kernel");
        std::fs::write(&path, b"// caf\xe9\nuniform foo x;\n").unwrap();
        let file = path.to_str().unwrap();

        let diagnostic = kernel_params::parse_kernel("// caf\u{fffd}\nuniform foo x;\n", file)
            .unwrap_err();
        let excerpt = source_excerpt(file, diagnostic.position).unwrap();
        assert!(excerpt.contains("2 | uniform foo x;"));
        assert!(source_excerpt("/nope/missing.kernel", diagnostic.position).is_none());
    }
}
