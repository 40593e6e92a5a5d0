use anyhow::{Context, Result};
use blockdown_config::Config;
use blockdown_engine::parsing::snapshot;
use std::{
    env,
    io::{self, Read},
    path::PathBuf,
    process,
};

/// Where the Markdown comes from.
enum Input {
    Stdin,
    File(PathBuf),
}

struct Args {
    input: Input,
    github_extensions: Option<bool>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--no-gfm] <markdown-file | ->");
    eprintln!("Prints the block outline of the file with line:column ranges.");
    eprintln!("Settings are read from {}", Config::config_path().display());
    process::exit(1);
}

fn parse_args() -> Args {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "blockdown".to_string());

    let mut input = None;
    let mut github_extensions = None;
    for arg in args {
        match arg.as_str() {
            "--no-gfm" => github_extensions = Some(false),
            "-h" | "--help" => usage(&program),
            "-" if input.is_none() => input = Some(Input::Stdin),
            _ if input.is_none() && !arg.starts_with("--") => {
                input = Some(Input::File(PathBuf::from(&arg)))
            }
            _ => usage(&program),
        }
    }

    match input {
        Some(input) => Args {
            input,
            github_extensions,
        },
        None => usage(&program),
    }
}

fn read_input(input: &Input) -> Result<String> {
    match input {
        Input::Stdin => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            Ok(text)
        }
        Input::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args();

    let mut config = match Config::load() {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    if let Some(enabled) = args.github_extensions {
        config.parse.github_extensions = enabled;
    }

    let text = read_input(&args.input)?;
    if config.parse_options().prefers_streaming(text.len()) {
        log::warn!(
            "Input is {} bytes, above the streaming threshold of {}; parsing in memory",
            text.len(),
            config.parse.streaming_threshold
        );
    }

    let pipeline = config.pipeline_builder().build()?;
    let mut doc = pipeline.parse(&text);
    println!("{}", snapshot::outline(&doc));
    doc.dispose();

    Ok(())
}
