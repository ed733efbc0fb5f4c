//! Wattle command-line inspector for CSS stylesheets and values
//!
//! Run with: cargo run --bin wattle -- [OPTIONS] [FILE]
//!
//! Modes:
//! - wattle style.css                          # Print the parsed rules
//! - wattle --tokens style.css                 # Print the token stream
//! - wattle --declarations --css 'margin: 0'   # Parse a declaration block
//! - wattle -p width -v 'calc(50vw - 1em)'     # Parse and resolve one value

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use wattle_common::clear_warnings;
use wattle_css::parser::{parse_declaration_list, parse_stylesheet};
use wattle_css::{
    CSSValue, LengthResolver, ParserContext, ParserMode, PropertyValueSet, parse_declaration_value_in,
    tokenize,
};

/// Parse CSS and print what the engine sees
#[derive(Parser, Debug)]
#[command(name = "wattle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the rules of a stylesheet
    wattle ./style.css

    # Parse inline CSS and print it as JSON
    wattle --json --css 'a { margin: 1px 2px }'

    # Print the token stream
    wattle --tokens --css '@layer base, utilities;'

    # Parse a declaration block and fold shorthands
    wattle --declarations --css 'margin-top: 1px; margin-right: 1px; margin-bottom: 1px; margin-left: 1px'

    # Resolve a length against a 1920x1080 viewport
    wattle -p width -v 'calc(50vw - 2em)' --viewport 1920x1080 --font-size 20

    # Quirks mode accepts unitless lengths
    wattle --quirks -p height -v 10
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to a CSS file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse CSS text given on the command line instead of a file
    #[arg(long, value_name = "TEXT", conflicts_with = "path")]
    css: Option<String>,

    /// Parse the input as a declaration block instead of a stylesheet
    #[arg(short, long)]
    declarations: bool,

    /// Print the token stream instead of parsing
    #[arg(short, long)]
    tokens: bool,

    /// Property whose value to parse (requires --value)
    #[arg(short, long, value_name = "NAME", requires = "value")]
    property: Option<String>,

    /// Value text for --property
    #[arg(short, long, value_name = "TEXT", requires = "property")]
    value: Option<String>,

    /// Parser mode: standard, quirks, ua-sheet or svg-attribute
    #[arg(long, default_value = "standard")]
    mode: ParserMode,

    /// Shorthand for --mode quirks
    #[arg(short, long, conflicts_with = "mode")]
    quirks: bool,

    /// Disable the string-level fast path
    #[arg(long)]
    no_fast_path: bool,

    /// Report dropped declarations and unsupported rules on stderr
    #[arg(short, long)]
    reporting: bool,

    /// Print JSON instead of CSS text
    #[arg(long)]
    json: bool,

    /// Font size in px for resolving font-relative units
    #[arg(long, default_value = "16")]
    font_size: f64,

    /// Zoom factor applied to resolved lengths
    #[arg(long, default_value = "1")]
    zoom: f64,

    /// Viewport size for resolving viewport units, as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_viewport)]
    viewport: (f64, f64),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let mode = if cli.quirks { ParserMode::Quirks } else { cli.mode };
    let context = ParserContext::new()
        .with_mode(mode)
        .with_fast_path(!cli.no_fast_path)
        .with_reporting(cli.reporting);

    if let (Some(property), Some(value)) = (&cli.property, &cli.value) {
        let parsed = parse_declaration_value_in(property, value, &context)?;
        let resolver = LengthResolver::default()
            .with_viewport(cli.viewport.0, cli.viewport.1)
            .with_zoom(cli.zoom)
            .with_font_size(cli.font_size);
        print_value(&cli, &parsed, &resolver)?;
        return Ok(());
    }

    let source = load_source(&cli)?;

    if cli.tokens {
        let tokens = tokenize(&source);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            print_header("Tokens");
            for token in &tokens {
                println!("{token:?}");
            }
        }
        return Ok(());
    }

    if cli.declarations {
        let set = parse_declaration_list(&source, &context);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&set)?);
        } else {
            print_header("Declarations");
            println!("{}", set.as_text());
            println!("({} longhands)", set.property_count());
        }
        return Ok(());
    }

    let sheet = parse_stylesheet(&source, &context);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
    } else {
        print_header("Rules");
        for rule in &sheet.rules {
            println!("{}", rule.css_text());
        }
        println!("({} rules)", sheet.rules.len());
    }
    Ok(())
}

/// Read the input from `--css` or the file argument.
fn load_source(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref text) = cli.css {
        Ok(text.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("expected a file path, --css, or --property with --value")
    }
}

fn print_header(title: &str) {
    println!("=== {} ===", title.bold());
}

/// Print a single parsed value, resolving it to px when it is a length.
fn print_value(cli: &Cli, value: &CSSValue, resolver: &LengthResolver) -> anyhow::Result<()> {
    let category = value.numeric_category();
    let px = (value.is_length() || value.is_calculated_percentage_with_length())
        .then(|| value.compute_length_px(resolver));

    if cli.json {
        let report = serde_json::json!({
            "value": value,
            "category": category,
            "px": px,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_header("Value");
    println!("{}", value.css_text());
    if let Some(category) = category {
        println!("{} {category:?}", "category:".dimmed());
    }
    if let Some(px) = px {
        println!("{} {px}px", "resolved:".dimmed());
    }
    Ok(())
}

/// Parse `WIDTHxHEIGHT` into a pair of px sizes.
fn parse_viewport(text: &str) -> Result<(f64, f64), String> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|error| format!("invalid viewport size '{part}': {error}"))
    };
    Ok((parse(width)?, parse(height)?))
}
