// src/main.rs
//
// Calculatrice pas à pas: point d’entrée terminal
// ------------------------------------------------
// - Expressions en arguments, sinon une expression par ligne sur stdin
// - Journal : RUST_LOG (défaut "warn"), sur stderr
// - Code de sortie 1 si au moins une expression échoue

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;

use calculatrice_etapes::app::{session, AppCalc, Sections};

#[derive(Parser, Debug)]
#[command(name = "calculatrice_etapes", version)]
#[command(about = "Calcul décimal exact, avec démarche pas à pas")]
struct Args {
    /// Expressions à évaluer (stdin si aucune)
    expressions: Vec<String>,

    /// Décimales conservées pour / et les puissances négatives
    #[arg(long)]
    precision: Option<u32>,

    /// Afficher les étapes
    #[arg(long)]
    etapes: bool,

    /// Afficher les termes et les cumuls
    #[arg(long)]
    termes: bool,

    /// Afficher la liste des jetons
    #[arg(long)]
    jetons: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut app = AppCalc {
        sections: Sections {
            jetons: args.jetons,
            etapes: args.etapes,
            termes: args.termes,
        },
        ..AppCalc::default()
    };
    if let Some(p) = args.precision {
        app.set_precision(p);
        log::debug!("précision: {}", app.contexte.precision);
    }

    let entrees = if args.expressions.is_empty() {
        match lire_stdin() {
            Ok(lignes) => lignes,
            Err(e) => {
                log::error!("lecture stdin: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        args.expressions
    };

    let mut stdout = io::stdout().lock();
    match session(&mut app, entrees, &mut stdout) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(n) => {
            log::debug!("{n} expression(s) en échec");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("écriture: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Lignes non vides de stdin.
fn lire_stdin() -> io::Result<Vec<String>> {
    let mut lignes = Vec::new();
    for ligne in io::stdin().lock().lines() {
        let ligne = ligne?;
        if !ligne.trim().is_empty() {
            lignes.push(ligne);
        }
    }
    Ok(lignes)
}
