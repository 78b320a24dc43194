// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use labwired_topgen_codegen::CTestGenerator;
use labwired_topgen_config::TopConfig;
use labwired_topgen_ir::{TestPeripherals, Topology};

const EXIT_PASS: u8 = 0;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_OUTPUT_ERROR: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate top-level IRQ and alert test descriptors",
    long_about = None
)]
struct Cli {
    /// Path to the top configuration (YAML)
    #[arg(short, long)]
    top: PathBuf,

    /// Write the descriptors here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the generated document.
    let level = if cli.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let peripherals = match build(&cli.top) {
        Ok(peripherals) => peripherals,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match write_output(&peripherals, cli.format, cli.output.as_deref()) {
        Ok(()) => ExitCode::from(EXIT_PASS),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(EXIT_OUTPUT_ERROR)
        }
    }
}

fn build(top_path: &Path) -> Result<TestPeripherals> {
    info!("Loading top configuration: {:?}", top_path);
    let top = TopConfig::from_file(top_path)?;
    let topology = Topology::new(top).context("Failed to derive top topology")?;
    CTestGenerator::generate(&topology).context("Failed to generate test peripherals")
}

fn render(peripherals: &TestPeripherals, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(peripherals)
                .context("Failed to serialize test peripherals to JSON")?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yaml::to_string(peripherals)
            .context("Failed to serialize test peripherals to YAML"),
    }
}

fn write_output(
    peripherals: &TestPeripherals,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let document = render(peripherals, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, document)
                .with_context(|| format!("Failed to write descriptors to {:?}", path))?;
            info!("Wrote test peripherals to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .context("Failed to write descriptors to stdout")?;
        }
    }
    Ok(())
}
