//! picker: Pick typed values out of a JSON document
//!
//! Usage:
//!   # Rules from a config file, document from a file
//!   picker --config rules.json stats.json
//!
//!   # Inline rules, document from stdin
//!   curl -s http://localhost:8091/pools/default/buckets | picker -p ./name:[]op
//!
//!   # Only print one result, compact
//!   picker -p servers/hostname:[]o:hosts --name hosts --compact nodes.json

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use picker::{Config, MissingFieldPolicy, Picker, Property, Tag};
use regex::Regex;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing_subscriber::EnvFilter;

static INLINE_PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<path>[^:]+):(?P<tag>[^:]+)(?::(?P<alias>[^:]+))?$").unwrap());

#[derive(Parser, Debug)]
#[command(name = "picker")]
#[command(about = "Pick typed values out of JSON documents", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// JSON config file with a "properties" list
    #[arg(long, short = 'c', conflicts_with = "property")]
    config: Option<String>,

    /// Inline property rule, repeatable
    #[arg(long, short = 'p', value_name = "PATH:TYPE[:ALIAS]")]
    property: Vec<String>,

    /// Print only the result with this name
    #[arg(long)]
    name: Option<String>,

    /// What []o and []op do with elements missing the field: omit, null or fail
    #[arg(long)]
    missing_slice_field: Option<MissingFieldPolicy>,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Log every picked property to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(&args)?;
    if let Some(policy) = args.missing_slice_field {
        config.missing_slice_field = policy;
    }

    let document = read_document(args.input.as_deref())?;
    let response = Picker::new(config).pick_value(&document)?;

    let output = match &args.name {
        Some(name) => response
            .get(name)
            .cloned()
            .with_context(|| format!("No result named '{}'", name))?,
        None => response.into(),
    };

    let rendered = if args.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path))?;
        return Ok(Config::from_json(&text)?);
    }

    if args.property.is_empty() {
        bail!("No properties given; pass --config FILE or at least one --property PATH:TYPE");
    }

    let properties = args
        .property
        .iter()
        .map(|spec| parse_inline_property(spec))
        .collect::<Result<Vec<_>>>()?;
    Ok(Config::new(properties))
}

fn parse_inline_property(spec: &str) -> Result<Property> {
    let Some(caps) = INLINE_PROPERTY.captures(spec) else {
        bail!("Invalid property '{}', expected PATH:TYPE or PATH:TYPE:ALIAS", spec);
    };

    let tag: Tag = caps["tag"].parse()?;
    let property = Property::new(&caps["path"], tag);
    Ok(match caps.name("alias") {
        Some(alias) => property.with_alias(alias.as_str()),
        None => property,
    })
}

/// Read the whole document and parse it with SIMD-accelerated JSON parsing
fn read_document(input: Option<&str>) -> Result<Value> {
    let reader = if let Some(file_path) = input {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open file: {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let mut content = Vec::new();
    BufReader::new(reader)
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    simd_json::serde::from_slice(&mut content).context("Failed to parse JSON document")
}
