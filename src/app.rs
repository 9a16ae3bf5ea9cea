// src/app.rs
//
// Calculatrice pas à pas: module App (racine)
// -------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs)
// - Fournir la boucle de session : une entrée -> évaluer -> rendre
//
// La lecture des entrées (arguments ou stdin) reste dans main.rs.

pub mod etat;
pub mod vue;

pub use etat::{AppCalc, Sections};

use std::io::{self, Write};

/// Évalue chaque entrée dans l’ordre et écrit son rendu. Renvoie le nombre d’échecs.
pub fn session<I, W>(app: &mut AppCalc, entrees: I, out: &mut W) -> io::Result<usize>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut echecs = 0;
    for entree in entrees {
        app.entree = entree;
        if !app.evaluer() {
            echecs += 1;
        }
        app.rendre(out)?;
        app.clear_entree();
    }
    out.flush()?;
    Ok(echecs)
}
