mod date;
mod dimension;
mod dynasty;
mod types;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use types::{DateInterval, DimensionMeasurement};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(
    name = "artifact_normalize",
    about = "Museum catalog date/era and dimension normalizer"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a record file → output/normalized.json
    Normalize {
        /// Tab-separated records: id, date text, optional size text
        input: PathBuf,
    },
    /// Parse one free-form date string, print the interval as JSON
    Date {
        /// Raw date text, e.g. "公元前1世纪", "1775-79"
        text: Vec<String>,
    },
    /// Look up a dynasty/era name, print the interval as JSON
    Dynasty {
        /// Raw era text, e.g. "北宋", "清·咸丰"
        text: Vec<String>,
    },
    /// Parse a size description, print the measurements as JSON
    Dimensions {
        /// Raw size text, e.g. "整体 (2.7 x 10.3 x 7.1 厘米)"
        text: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize { input } => run_normalize(&input),
        Command::Date { text } => print_json(&date::parse_date(&text.join(" "))),
        Command::Dynasty { text } => print_json(&dynasty::lookup_dynasty(&text.join(" "))),
        Command::Dimensions { text } => print_json(&dimension::parse_dimensions(&text.join(" "))),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn print_json<T: serde::Serialize>(data: &T) {
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    println!("{json}");
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = Path::new(OUTPUT_DIR).join(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

// ═══════════════════════════════════════════════════════════════════════
//  NORMALIZE MODE: batch-process a record file
// ═══════════════════════════════════════════════════════════════════════

/// How the date field of a record was resolved.
enum DateOutcome {
    Direct,
    DynastyFallback,
    Unparsed,
}

/// Resolve a raw date field: the free-form parser first, then the
/// dynasty table for texts the parser cannot read (pure era names).
fn normalize_date_field(raw: &str) -> (DateInterval, DateOutcome) {
    let interval = date::parse_date(raw);
    if interval.is_known() {
        return (interval, DateOutcome::Direct);
    }

    let interval = dynasty::lookup_dynasty(raw);
    if interval.is_known() {
        (interval, DateOutcome::DynastyFallback)
    } else {
        (interval, DateOutcome::Unparsed)
    }
}

#[derive(serde::Serialize)]
struct NormalizedRecord {
    id: String,
    date: DateInterval,
    dimensions: Vec<DimensionMeasurement>,
}

fn run_normalize(input: &Path) {
    let content = std::fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", input.display());
        std::process::exit(1);
    });

    let mut records = Vec::new();
    let (mut direct, mut fallback, mut unparsed) = (0usize, 0, 0);
    let mut measurements = 0usize;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // id <TAB> date text [<TAB> size text]; a lone field is taken
        // as the date text with the line number standing in as id.
        let fields: Vec<&str> = line.split('\t').collect();
        let (id, date_text, size_text) = match fields.as_slice() {
            [date_only] => ((i + 1).to_string(), *date_only, ""),
            [id, date] => (id.to_string(), *date, ""),
            [id, date, size, ..] => (id.to_string(), *date, *size),
            [] => continue,
        };

        let (interval, outcome) = normalize_date_field(date_text);
        match outcome {
            DateOutcome::Direct => direct += 1,
            DateOutcome::DynastyFallback => fallback += 1,
            DateOutcome::Unparsed => unparsed += 1,
        }

        let dimensions = dimension::parse_dimensions(size_text);
        measurements += dimensions.len();

        records.push(NormalizedRecord {
            id,
            date: interval,
            dimensions,
        });
    }

    eprintln!("══════════════════════════════════════════");
    eprintln!("  NORMALIZATION STATISTICS");
    eprintln!("══════════════════════════════════════════");
    eprintln!("  Records:          {}", records.len());
    eprintln!("  Date parsed:      {direct}");
    eprintln!("  Dynasty fallback: {fallback}");
    eprintln!("  Unparseable:      {unparsed}");
    eprintln!("  Measurements:     {measurements}");

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");
    write_json("normalized.json", &records);
}
