//! Maintlog CLI
//!
//! Command-line access to the maintenance sheet:
//! - List records
//! - Show the problem chart
//! - Show form options
//! - Append a record
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use maintlog::config::{generate_default_config, Config};
use maintlog::records::{NewRecord, RecordForm, COLUMNS};
use maintlog::report::{problem_counts, ExportFormat};
use maintlog::sheets::{self, RecordStore};

#[derive(Parser)]
#[command(name = "maintlog-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and append machine maintenance records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Spreadsheet web-app URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all records
    List {
        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show records per problem as a text bar chart
    Problems,

    /// Show selectable values per form field
    Options,

    /// Append a record
    Add {
        #[arg(long, default_value = "")]
        bu: String,
        #[arg(long, default_value = "")]
        line: String,
        #[arg(long, default_value = "")]
        product: String,
        #[arg(long, default_value = "")]
        machine: String,
        /// Work date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM), must be later than start
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        problem: String,
        #[arg(long, default_value = "")]
        action: String,
        /// Spare-part description
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0)]
        quantity: u32,
        #[arg(long, default_value = "")]
        pic: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (mut config, _) = Config::resolve(cli.config.as_deref())?;
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    let store = sheets::connect(config.backend.sheets_config())?;

    match cli.command {
        Commands::List { format } => {
            let records = store.fetch_records().await?;
            if records.is_empty() {
                eprintln!("No data available.");
                return Ok(());
            }

            if format == "table" {
                print_table(&records);
            } else {
                let format: ExportFormat = format.parse()?;
                print!("{}", format.render(&records)?);
            }
        }

        Commands::Problems => {
            let records = store.fetch_records().await?;
            let counts = problem_counts(&records);
            if counts.is_empty() {
                eprintln!("No data available.");
                return Ok(());
            }

            let width = counts.iter().map(|c| c.problem.chars().count()).max().unwrap_or(0);
            let max = counts[0].count.max(1);
            for entry in &counts {
                let bar = "#".repeat((entry.count * 40).div_ceil(max));
                println!("{:<width$}  {:>4}  {}", entry.problem, entry.count, bar, width = width);
            }
        }

        Commands::Options => {
            let options = store.fetch_options().await?;
            if options.is_empty() {
                eprintln!("No options available.");
            }
            for (category, values) in options.iter() {
                let shown: Vec<&str> = values.iter().skip(1).map(String::as_str).collect();
                println!("{}: {}", category, shown.join(", "));
            }
        }

        Commands::Add {
            bu,
            line,
            product,
            machine,
            date,
            start,
            end,
            problem,
            action,
            description,
            quantity,
            pic,
        } => {
            let form = RecordForm {
                bu,
                line,
                product,
                machine,
                date: date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
                start,
                end,
                problem,
                action,
                description,
                quantity: quantity.to_string(),
                pic,
            };

            let record = NewRecord::from_form(&form)?;
            store.append_record(&record).await?;
            println!(
                "Added record: {} on {} {}-{}",
                record.machine,
                record.date,
                record.start.format("%H:%M"),
                record.end.format("%H:%M")
            );
        }

        // Written before connecting
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Print records as an aligned text table
fn print_table(records: &[maintlog::Record]) {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for record in records {
        for (idx, cell) in record.cells().iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    println!("{}", header.join("  "));

    for record in records {
        let row: Vec<String> = record
            .cells()
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        println!("{}", row.join("  "));
    }

    println!("\n{} records", records.len());
}
