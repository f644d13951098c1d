//! # Playground Host Daemon
//!
//! Main entry point for the scripted playground host.

use playgroundd::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

struct Options {
    config: HostRuntimeConfig,
    snapshot: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("playgroundd");

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(options.config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }

    let written = runtime.write_output().unwrap_or_else(|e| {
        eprintln!("Failed to write export: {}", e);
        process::exit(1);
    });

    if options.snapshot {
        match runtime.snapshot_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize snapshot: {}", e);
                process::exit(1);
            }
        }
    } else if written.is_none() {
        print!("{}", runtime.export_html());
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config = HostRuntimeConfig::default();
    let mut snapshot = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => {
                let path = value(args, &mut i, "--script")?;
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(text);
            }
            "--settings" => {
                let path = value(args, &mut i, "--settings")?;
                let bytes =
                    fs::read(path).map_err(|e| format!("Failed to read settings file: {}", e))?;
                config.settings = Some(bytes);
            }
            "--out" | "-o" => {
                config.out = Some(PathBuf::from(value(args, &mut i, "--out")?));
            }
            "--name" => {
                config.name = Some(value(args, &mut i, "--name")?.to_string());
            }
            "--max-steps" => {
                let raw = value(args, &mut i, "--max-steps")?;
                config.max_steps = raw
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", raw))?;
            }
            "--snapshot" => {
                snapshot = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(Options { config, snapshot })
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --script <FILE>      Input script file");
    eprintln!("  --settings <FILE>        Settings overrides (JSON)");
    eprintln!("  -o, --out <PATH>         Export file, or directory (see --name)");
    eprintln!("  --name <NAME>            Project name for the export file");
    eprintln!("  --max-steps <N>          Maximum steps to run (0 = unlimited)");
    eprintln!("  --snapshot               Print the final editor snapshot as JSON");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Without --out the exported document goes to stdout.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script playgroundd/scripts/demo.pgkeys", program);
    eprintln!("  {} -s demo.pgkeys --out site/ --name landing --snapshot", program);
}
