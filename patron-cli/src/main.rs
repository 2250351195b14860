mod display;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use patron_core::analyze_draws;
use patron_core::catalog::{find_lottery, schedule_of};
use patron_core::config::{AnalysisConfig, load_config, save_config};
use patron_core::parse::{extract_results, parse_draws, parse_draws_strict};

use crate::display::{
    display_analysis, display_header, display_insufficient, display_lotteries,
};

#[derive(Parser)]
#[command(name = "patron", about = "Analyseur de motifs pour loteries à 4 chiffres")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyser un historique de tirages (entrée standard si aucun fichier)
    Analyze {
        /// Fichier de tirages, un par ligne ou séparés par des virgules
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Nom de la loterie (affichage uniquement)
        #[arg(short, long)]
        lottery: Option<String>,

        /// Date de l'analyse (AAAA-MM-JJ), aujourd'hui par défaut
        #[arg(short, long)]
        date: Option<String>,

        /// Sortie JSON au lieu des tableaux
        #[arg(long)]
        json: bool,

        /// Refuser les jetons invalides au lieu de les ignorer
        #[arg(long)]
        strict: bool,

        /// Fichier de configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Extraire les tirages d'un texte libre (réponse récupérée en ligne)
    Extract {
        /// Fichier contenant le texte brut
        #[arg(short, long)]
        file: PathBuf,

        /// Fichier de configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Lister les loteries connues
    Lotteries,

    /// Afficher la configuration par défaut, ou l'écrire dans un fichier
    Config {
        /// Fichier de sortie
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

static INIT: Once = Once::new();

/// Initialise `tracing` une seule fois ; filtre lu dans `PATRON_LOG`.
fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PATRON_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            lottery,
            date,
            json,
            strict,
            config,
        } => cmd_analyze(file.as_deref(), lottery.as_deref(), date.as_deref(), json, strict, config.as_deref()),
        Command::Extract { file, config } => cmd_extract(&file, config.as_deref()),
        Command::Lotteries => {
            display_lotteries();
            Ok(())
        }
        Command::Config { output } => cmd_config(output.as_deref()),
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => load_config(p)
            .with_context(|| format!("Impossible de charger la configuration {}", p.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Impossible de lire l'entrée standard")?;
            Ok(buf)
        }
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Date invalide : {} (attendu AAAA-MM-JJ)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn resolve_lottery(raw: Option<&str>) -> Option<String> {
    let name = raw?;
    match find_lottery(name) {
        Some(canonical) => {
            let schedule = schedule_of(canonical).map(|s| s.to_string()).unwrap_or_default();
            Some(format!("{} ({})", canonical, schedule))
        }
        None => {
            warn!(lottery = name, "loterie inconnue du catalogue");
            Some(name.to_string())
        }
    }
}

/// Historique trop court : un état, pas une erreur.
fn insufficient_marker(found: usize, required: usize) -> serde_json::Value {
    serde_json::json!({
        "status": "insufficient",
        "found": found,
        "required": required,
    })
}

fn cmd_analyze(
    file: Option<&Path>,
    lottery: Option<&str>,
    date: Option<&str>,
    json: bool,
    strict: bool,
    config: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config)?;
    let as_of = parse_date(date)?;
    let lottery = resolve_lottery(lottery);
    let text = read_input(file)?;

    let draws = if strict {
        parse_draws_strict(&text)?
    } else {
        parse_draws(&text)
    };

    let Some(analysis) = analyze_draws(&draws, Some(as_of), &config)? else {
        if json {
            let marker = insufficient_marker(draws.len(), config.min_history);
            println!("{}", serde_json::to_string_pretty(&marker)?);
        } else {
            display_insufficient(draws.len(), config.min_history);
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    display_header(lottery.as_deref(), &as_of.format("%d/%m/%Y").to_string());
    display_analysis(&analysis);
    Ok(())
}

fn cmd_extract(file: &Path, config: Option<&Path>) -> Result<()> {
    let config = resolve_config(config)?;
    let response = read_input(Some(file))?;
    let results = extract_results(&response, &config.extraction)?;
    println!("{}", results);
    Ok(())
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let config = AnalysisConfig::default();
    match output {
        Some(path) => {
            save_config(&config, path)
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            println!("Configuration écrite dans {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
