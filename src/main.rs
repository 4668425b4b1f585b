mod cli;

use nullmedia::config::{self, Config};
use nullmedia_av::{
    check_compatibility, check_tools, CompatEntry, Identifier, MediaInfo, MediaKind, Synthesizer,
    SystemRunner, ToolRunner,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// JSON view of a metadata string.
#[derive(Serialize)]
struct MetadataReport<'a> {
    metadata: String,
    kind: Option<MediaKind>,
    #[serde(flatten)]
    info: &'a MediaInfo,
}

impl<'a> MetadataReport<'a> {
    fn new(info: &'a MediaInfo) -> Self {
        Self {
            metadata: info.to_string(),
            kind: info.kind(),
            info,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "nullmedia=trace,nullmedia_av=trace,nullmedia_common=trace".to_string()
        } else {
            "nullmedia=info,nullmedia_av=info".to_string()
        }
    });

    // stdout carries metadata strings; keep logs off it.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Identify {
            file,
            signature,
            no_sniff,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            identify_file(&config, &file, signature.as_deref(), no_sniff, json)
        }
        Commands::Shrink { metadata, output } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            shrink(&config, &metadata, &output)
        }
        Commands::Replace { file, signature } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            replace_file(&config, &file, signature.as_deref())
        }
        Commands::Decode { metadata, json } => decode(&metadata, json),
        Commands::CheckTools => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            check_tools_cmd(&config)
        }
        Commands::CheckCompat { dir } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            check_compat(&config, &dir)
        }
        Commands::Version => {
            println!("nullmedia {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn system_runner(config: &Config) -> Arc<dyn ToolRunner> {
    Arc::new(SystemRunner::new(&config.tools))
}

fn build_identifier(config: &Config, runner: Arc<dyn ToolRunner>) -> Identifier {
    Identifier::new(runner).with_sniffing(config.identify.sniff_missing_ext)
}

fn parse_metadata(metadata: &str) -> Result<MediaInfo> {
    metadata
        .parse()
        .with_context(|| format!("Invalid metadata string: {:?}", metadata))
}

fn identify_file(
    config: &Config,
    file: &Path,
    signature: Option<&str>,
    no_sniff: bool,
    json: bool,
) -> Result<()> {
    let mut identifier = build_identifier(config, system_runner(config));
    if no_sniff {
        identifier = identifier.with_sniffing(false);
    }

    let info = identifier
        .identify(file, signature)
        .with_context(|| format!("Failed to identify {:?}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&MetadataReport::new(&info))?);
    } else {
        println!("{}", info);
    }

    Ok(())
}

fn shrink(config: &Config, metadata: &str, output: &Path) -> Result<()> {
    let info = parse_metadata(metadata)?;

    Synthesizer::new(system_runner(config))
        .synthesize(&info, output)
        .with_context(|| format!("Failed to synthesize {} at {:?}", info, output))?;

    tracing::info!("Wrote {} to {:?}", info, output);
    Ok(())
}

fn replace_file(config: &Config, file: &Path, signature: Option<&str>) -> Result<()> {
    let runner = system_runner(config);

    let info = build_identifier(config, runner.clone())
        .identify(file, signature)
        .with_context(|| format!("Failed to identify {:?}", file))?;

    Synthesizer::new(runner)
        .synthesize(&info, file)
        .with_context(|| format!("Failed to replace {:?}", file))?;

    println!("{}", info);
    Ok(())
}

fn decode(metadata: &str, json: bool) -> Result<()> {
    let info = parse_metadata(metadata)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&MetadataReport::new(&info))?);
        return Ok(());
    }

    let kind = info
        .kind()
        .map_or_else(|| "unknown".to_string(), |k| k.to_string());
    println!("Kind: {}", kind);
    println!("Width: {}", info.width());
    println!("Height: {}", info.height());
    println!("Duration: {} ms", info.duration());
    println!("Signature: {}", info.signature());
    println!("Extension: {}", info.ext());

    Ok(())
}

fn check_tools_cmd(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let tools = check_tools(&config.tools);
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable all features.");
    }

    Ok(())
}

fn check_compat(config: &Config, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

    let runner = system_runner(config);
    let identifier = build_identifier(config, runner.clone());
    let synthesizer = Synthesizer::new(runner);

    println!("Checking formats in {}...\n", dir.display());
    let entries = check_compatibility(&identifier, &synthesizer, dir, print_compat_entry);

    let failed = entries.iter().filter(|e| e.outcome.is_err()).count();
    println!();
    if failed == 0 {
        println!("All {} formats round-tripped.", entries.len());
    } else {
        println!("{} of {} formats failed.", failed, entries.len());
    }

    Ok(())
}

fn print_compat_entry(entry: &CompatEntry) {
    match &entry.outcome {
        Ok(outcome) => {
            let sniffed = outcome.sniffed.unwrap_or("-");
            println!(
                "✓ {:<5} {:<6} sniffed={:<5} {} margin={}ms",
                entry.ext,
                entry.kind,
                sniffed,
                outcome.identified,
                outcome.margin_ms
            );
        }
        Err(e) => println!("✗ {:<5} {:<6} {}", entry.ext, entry.kind, e),
    }
}
