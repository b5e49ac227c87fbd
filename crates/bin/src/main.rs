//! Pampa CLI binary.
//!
//! Terminal front end for the dashboard core: the same pages the
//! interactive surface renders, printed as metrics and ASCII tables or
//! dumped as JSON for another renderer to consume.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::info;

use pampa::analytics::Predicate;
use pampa::data::schema::columns;
use pampa::output::{ChartSpec, ExportFormat, Metric};
use pampa::{Dashboard, DashboardConfig, PageView};

#[derive(Parser)]
#[command(name = "pampa")]
#[command(about = "Pampa: internet connectivity analytics", long_about = None)]
#[command(version)]
struct Cli {
    /// Source workbook (xlsx)
    #[arg(long, short = 'f', global = true, default_value = "dataset_internet.xlsx")]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Filter selection shared by every page command.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Restrict to provinces (repeatable)
    #[arg(long)]
    province: Vec<String>,

    /// Restrict to technologies (repeatable)
    #[arg(long)]
    technology: Vec<String>,

    /// Restrict to years (repeatable)
    #[arg(long)]
    year: Vec<i64>,
}

impl FilterArgs {
    fn predicate(&self) -> Predicate {
        Predicate::new()
            .with_text(columns::PROVINCE, self.province.clone())
            .with_text(columns::TECHNOLOGY, self.technology.clone())
            .with_ints(columns::YEAR, self.year.iter().copied())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Overview page: headline metrics, charts, outlier table
    Overview {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the page as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// KPI page: growth, fiber share and projection targets
    Kpi {
        #[command(flatten)]
        filters: FilterArgs,

        /// Annual growth target for the projection KPI
        #[arg(long, default_value = "0.10")]
        target_rate: f64,

        /// Print the page as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Access rows falling outside the Tukey outlier fences
    Outliers {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the table as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the filter choices present in the data
    Options,

    /// Export the KPI page tables as CSV files
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Directory the CSV files are written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Overview { filters, json } => {
            let dashboard = Dashboard::open(&cli.file)?;
            let page = dashboard.overview(&filters.predicate())?;
            print_page(&page, json)?;
        }
        Commands::Kpi {
            filters,
            target_rate,
            json,
        } => {
            let config = DashboardConfig {
                target_rate,
                ..DashboardConfig::default()
            };
            let dashboard = Dashboard::open_with_config(&cli.file, config)?;
            let page = dashboard.kpis(&filters.predicate())?;
            print_page(&page, json)?;
        }
        Commands::Outliers { filters, json } => {
            let dashboard = Dashboard::open(&cli.file)?;
            let table = dashboard.outliers(&filters.predicate())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", table.to_ascii_table());
            }
        }
        Commands::Options => {
            let dashboard = Dashboard::open(&cli.file)?;
            let options = dashboard.filter_options()?;
            println!("Provincias:  {}", options.provinces.join(", "));
            println!("Tecnologias: {}", options.technologies.join(", "));
            println!("Anios:       {}", options.years.join(", "));
        }
        Commands::Export { filters, out_dir } => {
            let dashboard = Dashboard::open(&cli.file)?;
            let page = dashboard.kpis(&filters.predicate())?;
            std::fs::create_dir_all(&out_dir)?;
            for table in &page.tables {
                let path = out_dir.join(format!("{}.csv", slug(&table.title)));
                table.export_to_file(&path, ExportFormat::Csv)?;
                info!("wrote {}", path.display());
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn print_page(page: &PageView, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    println!("{}", page.title);
    println!("{}", "=".repeat(page.title.len()));
    for metric in &page.metrics {
        print_metric(metric);
    }
    for chart in &page.charts {
        print_chart(chart);
    }
    for table in &page.tables {
        print!("{}", table.to_ascii_table());
    }
    Ok(())
}

fn print_metric(metric: &Metric) {
    println!("  {metric}");
}

/// One-line summary per chart; actual drawing belongs to a graphical
/// surface consuming the JSON form.
fn print_chart(chart: &ChartSpec) {
    let points: usize = chart.series.iter().map(|s| s.values.len()).sum();
    println!(
        "  [{:?}] {} ({} series, {} points)",
        chart.kind,
        chart.title,
        chart.series.len(),
        points
    );
}

fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
