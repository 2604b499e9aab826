use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hospital_admin_core::forms::{to_display_time, MedicationField};
use hospital_admin_core::navigation::rank_destinations;
use hospital_admin_core::{AdminConfig, EntityForm, MedicationForm, Router, Session};

mod replay;

#[derive(Parser)]
#[command(name = "hospital-admin")]
#[command(about = "Hospital admin forms, records and routing from the command line")]
struct Cli {
    /// JSON config file (falls back to HOSPITAL_ADMIN_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Finalize a medication and print it as JSON
    Medication {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Units on hand
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        stock: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        supplier: String,
    },
    /// Convert a 24-hour time to 12-hour display form
    Time {
        /// Time as HH:MM
        input: String,
    },
    /// Resolve a path through the session guard
    Route {
        path: String,
        /// Resolve as this signed-in user
        #[arg(long)]
        user: Option<String>,
    },
    /// List destinations matching a quick-navigation query
    Palette {
        #[arg(default_value = "")]
        query: String,
    },
    /// Replay a JSON script of form submissions and print the resulting records
    Replay {
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hospital_admin_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Medication {
            name,
            category,
            stock,
            price,
            supplier,
        } => {
            let form = MedicationForm::from_config(&config);
            let mut draft = form.initialize(None);
            for (field, value) in [
                (MedicationField::Name, name),
                (MedicationField::Category, category),
                (MedicationField::Stock, stock),
                (MedicationField::Price, price),
                (MedicationField::Supplier, supplier),
            ] {
                draft = form.set_field(&draft, field, &value)?;
            }
            let medication = form.finalize(&draft)?;
            println!("{}", serde_json::to_string_pretty(&medication)?);
        }
        Commands::Time { input } => {
            println!("{}", to_display_time(&input)?);
        }
        Commands::Route { path, user } => {
            let mut session = Session::new();
            if let Some(user) = user {
                session.login(&user)?;
            }
            let outcome = Router::new().resolve(&session, &path);
            println!("{}", serde_json::to_string(&outcome)?);
        }
        Commands::Palette { query } => {
            for dest in rank_destinations(&query) {
                println!("{}\t{}", dest.label(), dest.path());
            }
        }
        Commands::Replay { script } => {
            let contents = std::fs::read_to_string(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let script: replay::Script = serde_json::from_str(&contents)
                .with_context(|| format!("parsing {}", script.display()))?;

            let mut workspace = replay::Workspace::default();
            workspace.run(&config, &script)?;
            println!("{}", serde_json::to_string_pretty(&workspace.snapshot())?);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<AdminConfig> {
    let path = path.or_else(|| std::env::var_os("HOSPITAL_ADMIN_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => AdminConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(AdminConfig::default()),
    }
}
