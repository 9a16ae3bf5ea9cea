// src/noyau/termes.rs
//
// Termes de premier niveau (chaîne + / - de la racine) et cumuls progressifs.
// Un terme est opaque : on ne descend jamais dans un Groupe, un produit ou une puissance.

use super::decimal::{Contexte, Decimal};
use super::erreurs::ErreurCalc;
use super::eval::evaluate_raw_avec;
use super::expr::Expr;
use super::format::expr_to_string;
use super::operateurs::{OpBin, OpUn};

/// Découpe `a + b - c` en [a, b, -c] ; le signe accumulé devient un Unaire(-) synthétique.
pub fn extract_top_level_terms(ast: &Expr) -> Vec<Expr> {
    fn parcourt(n: &Expr, negatif: bool, out: &mut Vec<Expr>) {
        match n {
            Expr::Binaire {
                op: op @ (OpBin::Plus | OpBin::Moins),
                gauche,
                droite,
                ..
            } => {
                parcourt(gauche, negatif, out);
                parcourt(droite, negatif ^ (*op == OpBin::Moins), out);
            }
            _ if negatif => out.push(Expr::Unaire {
                op: OpUn::Moins,
                operande: Box::new(n.clone()),
                plage: n.plage(),
            }),
            _ => out.push(n.clone()),
        }
    }

    let mut out = Vec::new();
    parcourt(ast, false, &mut out);
    out
}

/// Un terme affichable + le total atteint en l’incluant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terme {
    pub expr: Expr,
    pub texte: String,
    pub valeur: Decimal,
    pub cumul: Decimal,
}

/// Évalue chaque terme et accumule : le dernier cumul vaut l’expression entière.
pub fn cumuls(termes: Vec<Expr>, ctx: &Contexte) -> Result<Vec<Terme>, ErreurCalc> {
    let mut total = Decimal::zero();
    let mut out = Vec::with_capacity(termes.len());

    for expr in termes {
        let (valeur, _) = evaluate_raw_avec(&expr, ctx)?;
        total = total.additionner(&valeur);
        out.push(Terme {
            texte: expr_to_string(&expr),
            expr,
            valeur,
            cumul: total.clone(),
        });
    }

    Ok(out)
}
