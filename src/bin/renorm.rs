//! renorm CLI - normalize small YAML datasets from the command line
//!
//! This CLI tool expands packed multi-value fields into atomic records (1NF)
//! and decomposes flat order relations into Orders/OrderItems (2NF).

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use renorm::{
    decompose, join_values, load_document, split_values, verify_lossless, Document, Expander,
    FlatRelation, NdjsonWriter, PackedDataset,
};

#[derive(Parser)]
#[command(name = "renorm")]
#[command(version, about = "Normalize delimited fields and flat relations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a packed dataset into atomic records (1NF)
    Expand {
        /// Path to dataset YAML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output NDJSON file
        #[arg(short, long, default_value = "atomic.ndjson")]
        output: PathBuf,
    },

    /// Decompose a flat order relation into Orders and OrderItems (2NF)
    Decompose {
        /// Path to relation YAML file
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = "decomposition.json")]
        output: PathBuf,
    },

    /// Verify normalization invariants without writing output
    Check {
        /// Path to dataset or relation YAML file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Expand { input, output } => expand_dataset(input, output),
        Commands::Decompose { input, output } => decompose_relation(input, output),
        Commands::Check { input } => check_file(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Expand a packed dataset and write atomic records as NDJSON
fn expand_dataset(input: PathBuf, output: PathBuf) -> Result<(), String> {
    println!("Expanding {}...", input.display());

    let dataset = PackedDataset::load_from_file(&input)?;
    println!("  ✓ Loaded {} records (delimiter '{}')", dataset.records.len(), dataset.delimiter);

    let expander = Expander::new(dataset.delimiter);
    let atomic = expander.expand_all(&dataset.records);
    println!("  ✓ Expanded into {} atomic records", atomic.len());

    let file = File::create(&output)
        .map_err(|e| format!("Failed to create output file {}: {}", output.display(), e))?;

    let mut writer = NdjsonWriter::new(BufWriter::new(file));
    writer
        .write_all(&atomic)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    println!("  ✓ Wrote {}", output.display());

    Ok(())
}

/// Decompose a flat relation and write Orders/OrderItems as JSON
fn decompose_relation(input: PathBuf, output: PathBuf) -> Result<(), String> {
    println!("Decomposing {}...", input.display());

    let relation = FlatRelation::load_from_file(&input)?;
    println!("  ✓ Loaded {} rows", relation.rows.len());

    let decomposition = decompose(&relation.rows).map_err(|e| e.to_string())?;
    println!(
        "  ✓ Decomposed into {} orders and {} order items",
        decomposition.orders.len(),
        decomposition.order_items.len()
    );

    let file = File::create(&output)
        .map_err(|e| format!("Failed to create output file {}: {}", output.display(), e))?;

    renorm::write_decomposition(BufWriter::new(file), &decomposition)
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    println!("  ✓ Wrote {}", output.display());

    Ok(())
}

/// Verify normalization invariants for either document kind
fn check_file(input: PathBuf) -> Result<(), String> {
    println!("Checking {}...", input.display());

    match load_document(&input)? {
        Document::Packed(dataset) => check_packed(&dataset),
        Document::Flat(relation) => check_flat(&relation),
    }
}

/// Check the join-back property of an expanded packed dataset
fn check_packed(dataset: &PackedDataset) -> Result<(), String> {
    let expander = Expander::new(dataset.delimiter);
    let mut total = 0;

    for record in &dataset.records {
        let atomic = expander.expand(record);

        if atomic.iter().any(|r| r.item.is_empty()) {
            return Err(format!("Record {} produced an empty item", record.id));
        }

        // joining the expansion must reproduce the non-empty tokens of the
        // source field, in order
        let items: Vec<String> = atomic.into_iter().map(|r| r.item).collect();
        let expected = join_values(&split_values(&record.items, dataset.delimiter), dataset.delimiter);

        if join_values(&items, dataset.delimiter) != expected {
            return Err(format!("Record {} failed the join-back check", record.id));
        }

        total += items.len();
    }

    println!(
        "  ✓ {} records expand to {} atomic records, join-back holds",
        dataset.records.len(),
        total
    );
    println!("✅ Dataset is valid");

    Ok(())
}

/// Check the lossless-join property of a flat relation
fn check_flat(relation: &FlatRelation) -> Result<(), String> {
    let decomposition = decompose(&relation.rows).map_err(|e| e.to_string())?;
    println!(
        "  ✓ Decomposes into {} orders and {} order items",
        decomposition.orders.len(),
        decomposition.order_items.len()
    );

    if !verify_lossless(&relation.rows).map_err(|e| e.to_string())? {
        return Err("Reconstruction does not reproduce the original relation".to_string());
    }

    println!("  ✓ Join of Orders and OrderItems reproduces the original relation");
    println!("✅ Relation is valid");

    Ok(())
}
