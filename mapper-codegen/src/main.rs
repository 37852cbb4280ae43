//! CLI entry point for mapper-codegen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mapper_codegen::codegen::TypeResolver;
use mapper_codegen::config::GeneratorConfig;
use mapper_codegen::{GenerationEvent, UnitKind};

#[derive(Parser)]
#[command(name = "mapper-codegen")]
#[command(about = "Generate ScalikeJDBC models, specs and ScalaCheck generators from table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to schema file, JSON or TOML (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Package of the generated sources (overrides config)
    #[arg(short, long)]
    package: Option<String>,

    /// Overwrite files that already exist
    #[arg(short, long)]
    force: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate models, specs and arbitrary generators
    All,
    /// Generate only models
    Model,
    /// Generate only specs
    Spec,
    /// Generate only arbitrary generators
    Arbitrary,
    /// Inspect schema (show loaded tables for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = GeneratorConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(package) = cli.package {
        config.package_name = package;
    }
    if cli.force {
        config.force = true;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    let kinds: &[UnitKind] = match &cli.command {
        Some(Commands::Model) => &[UnitKind::Model],
        Some(Commands::Spec) => &[UnitKind::Spec],
        Some(Commands::Arbitrary) => &[UnitKind::Arbitrary],
        Some(Commands::Inspect) => return inspect_schema(&config),
        Some(Commands::All) | None => &UnitKind::ALL,
    };

    info!("Generating code from schema: {:?}", config.schema_file);
    if config.dry_run {
        println!("Dry run mode - would generate:");
    }

    let events = mapper_codegen::generate_units(&config, kinds)?;
    print_events(&events);

    info!("Code generation completed successfully");
    Ok(())
}

fn print_events(events: &[GenerationEvent]) {
    for event in events {
        println!(
            "  {:<9} {:<15} {}",
            event.kind.to_string(),
            event.outcome.to_string(),
            event.path.display()
        );
    }
}

fn inspect_schema(config: &GeneratorConfig) -> Result<()> {
    let tables = mapper_codegen::load_tables(config)?;

    let resolver = TypeResolver::new(config);

    println!("Loaded {} tables:\n", tables.len());
    for table in &tables {
        let class_name = config.table_name_to_class_name.apply(&table.name);
        match &table.schema {
            Some(schema) => println!("Table: {}.{}", schema, table.name),
            None => println!("Table: {}", table.name),
        }
        println!("  Columns:");
        for col in &table.all_columns {
            let nullable = if col.is_not_null { "NOT NULL" } else { "NULL" };
            let auto_inc = if col.is_auto_increment {
                " AUTO_INCREMENT"
            } else {
                ""
            };
            let generated = if col.is_generated { " GENERATED" } else { "" };
            let type_label = if col.size > 0 {
                format!("{}({})", col.jdbc_type_name, col.size)
            } else {
                col.jdbc_type_name.clone()
            };
            println!(
                "    - {} {} {}{}{} -> {}: {}",
                col.name,
                type_label,
                nullable,
                auto_inc,
                generated,
                config.column_name_to_field_name.apply(&col.name),
                resolver.resolve(col, &class_name).to_type_string()
            );
        }
        if table.has_primary_key() {
            let keys: Vec<&str> = table
                .primary_key_columns
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            println!("  Primary Key: {:?}", keys);
        } else {
            println!("  Primary Key: none (all non-generated columns are used as key)");
        }
        println!();
    }

    Ok(())
}
