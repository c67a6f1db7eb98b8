#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shift_scheduler::{
    config::{read_params, save_params, ScheduleParams},
    generate, io,
    model::PersonId,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Planning de gardes : génération et export iCalendar
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de paramètres
    #[arg(long, global = true, default_value = "shift-params.json")]
    config: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Surcharges appliquées par-dessus le fichier de paramètres
#[derive(clap::Args, Debug, Default)]
struct Overrides {
    /// Date de début (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Durée en années (décimales acceptées)
    #[arg(long)]
    years: Option<f64>,
    /// Ordre de rotation "A,B,C"
    #[arg(long)]
    people: Option<String>,
}

impl Overrides {
    fn apply(self, params: &mut ScheduleParams) {
        if let Some(start) = self.start {
            params.start = start;
        }
        if let Some(years) = self.years {
            params.years = years;
        }
        if let Some(list) = self.people {
            params.rotation = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PersonId::new)
                .collect();
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Écrire un fichier de paramètres par défaut
    Init {
        /// Écrase un fichier existant
        #[arg(long)]
        force: bool,
    },

    /// Générer et lister le planning
    Generate {
        #[command(flatten)]
        overrides: Overrides,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Générer puis exporter en .ics
    Export {
        #[command(flatten)]
        overrides: Overrides,
        #[arg(long, default_value = "schedule.ics")]
        out: String,
    },
}

/// Fichier puis surcharges ; la validation a lieu dans `generate`.
fn load_with(path: &str, overrides: Overrides) -> Result<ScheduleParams> {
    let mut params = if std::path::Path::new(path).exists() {
        read_params(path)?
    } else {
        ScheduleParams::default()
    };
    overrides.apply(&mut params);
    Ok(params)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Init { force } => {
            if std::path::Path::new(&cli.config).exists() && !force {
                eprintln!("{} already exists (use --force)", cli.config);
                2
            } else {
                save_params(&cli.config, &ScheduleParams::default())?;
                println!("Wrote {}", cli.config);
                0
            }
        }
        Commands::Generate {
            overrides,
            out_json,
            out_csv,
        } => {
            let params = load_with(&cli.config, overrides)?;
            let schedule = generate(&params).context("generating schedule")?;
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &schedule)?;
            }
            // impression compacte
            for e in &schedule {
                println!(
                    "{} → {} | {}",
                    e.start().format("%Y-%m-%d %H:%M"),
                    e.end().format("%Y-%m-%d %H:%M"),
                    e.title()
                );
            }
            0
        }
        Commands::Export { overrides, out } => {
            let params = load_with(&cli.config, overrides)?;
            let schedule = generate(&params).context("generating schedule")?;
            io::export_ics(&out, &schedule)?;
            println!("Exported {} event(s) to {}", schedule.len(), out);
            0
        }
    };

    std::process::exit(code);
}
