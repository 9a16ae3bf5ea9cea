//! Noyau: pipeline complet
//!
//! normalise -> jetons -> AST (Pratt) -> évaluation + démarche -> termes + cumuls
//!
//! Les plages des erreurs renvoyées ici indexent la source NORMALISÉE
//! (`Calcul::source`, ou `normalise(entree)` côté appelant en cas d’échec).

use super::decimal::{Contexte, Decimal};
use super::erreurs::ErreurCalc;
use super::eval::evaluate_raw_avec;
use super::expr::Plage;
use super::format::{expr_to_string, format_decimal, format_step};
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalise;
use super::pratt::parse;
use super::termes::{cumuls, extract_top_level_terms, Terme};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Calcul {
    pub source: String,
    pub jetons: String,
    pub expression: String,
    pub valeur: Decimal,
    pub affichage: String,
    pub etapes: Vec<String>,
    pub termes: Vec<Terme>,
}

/// API publique : évalue une entrée utilisateur brute.
pub fn eval_expression(entree: &str, ctx: &Contexte) -> Result<Calcul, ErreurCalc> {
    let source = normalise(entree);
    log::debug!("entrée normalisée: {source:?}");

    let resultat = pipeline(source, ctx);
    match &resultat {
        Ok(c) => log::debug!("{} = {} ({} étapes)", c.expression, c.affichage, c.etapes.len()),
        Err(e) => log::debug!("échec {} [{}]: {e}", e.kind(), e.code()),
    }
    resultat
}

fn pipeline(source: String, ctx: &Contexte) -> Result<Calcul, ErreurCalc> {
    if source.trim().is_empty() {
        return Err(ErreurCalc::syntaxe("entrée vide", Plage::new(0, 0)));
    }

    let jetons = tokenize(&source)?;
    let ast = parse(&jetons, &source)?;

    let (valeur, etapes) = evaluate_raw_avec(&ast, ctx)?;
    let etapes: Vec<String> = etapes.iter().map(format_step).collect();

    let termes = cumuls(extract_top_level_terms(&ast), ctx)?;

    Ok(Calcul {
        jetons: format_tokens(&jetons),
        expression: expr_to_string(&ast),
        affichage: format_decimal(&valeur),
        valeur,
        etapes,
        termes,
        source,
    })
}
