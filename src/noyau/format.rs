// src/noyau/format.rs

use super::decimal::{Arrondi, Decimal};
use super::eval::Etape;
use super::expr::Expr;

/// Décimales gardées à l’affichage.
pub const CHIFFRES_AFFICHAGE: u32 = 12;

/* ------------------------ Nombres ------------------------ */

/// Arrondi demi-haut à 12 décimales, sans zéros de queue ni point nu.
/// Un zéro rationnel n’a pas de signe : un négatif arrondi à zéro s’écrit "0".
pub fn format_decimal(v: &Decimal) -> String {
    v.arrondir(CHIFFRES_AFFICHAGE, Arrondi::DemiHaut).to_string()
}

/* ------------------------ Expressions ------------------------ */

fn needs_parens_for_unary(e: &Expr) -> bool {
    matches!(e, Expr::Binaire { .. } | Expr::Unaire { .. })
}

/// Ré-imprime l’expression avec le minimum de parenthèses fidèle à l’arbre :
/// - gauche entre () si précédence strictement plus faible
/// - droite entre () si plus faible, ou égale quand l’opérateur n’est pas associatif à droite
/// Les Groupe tapés par l’utilisateur sont conservés tels quels.
pub fn expr_to_string(e: &Expr) -> String {
    match e {
        Expr::Nombre { valeur, .. } => format_decimal(valeur),

        Expr::Groupe { interieur, .. } => format!("({})", expr_to_string(interieur)),

        Expr::Unaire { op, operande, .. } => {
            if needs_parens_for_unary(operande) {
                format!("{op}({})", expr_to_string(operande))
            } else {
                format!("{op}{}", expr_to_string(operande))
            }
        }

        Expr::Binaire {
            op, gauche, droite, ..
        } => {
            let p = op.precedence();

            let sg = expr_to_string(gauche);
            let sg = match gauche.op_binaire() {
                Some(og) if og.precedence() < p => format!("({sg})"),
                _ => sg,
            };

            let sd = expr_to_string(droite);
            let sd = match droite.op_binaire() {
                Some(od)
                    if od.precedence() < p
                        || (od.precedence() == p && !op.est_associatif_droite()) =>
                {
                    format!("({sd})")
                }
                _ => sd,
            };

            format!("{sg} {op} {sd}")
        }
    }
}

/// Nombre nu, sinon expression entre parenthèses (un Groupe apporte déjà les siennes).
pub fn format_maybe_paren(e: &Expr) -> String {
    match e {
        Expr::Nombre { valeur, .. } => format_decimal(valeur),
        Expr::Groupe { .. } => expr_to_string(e),
        _ => format!("({})", expr_to_string(e)),
    }
}

/* ------------------------ Démarche ------------------------ */

/// "-(2 * 3) = -6" ou "2 * 3 = 6".
pub fn format_step(etape: &Etape<'_>) -> String {
    match etape {
        Etape::Unaire {
            op,
            operande,
            resultat,
            noeud,
        } => {
            let sx = match noeud {
                Expr::Unaire { operande: e, .. } => format_maybe_paren(e),
                _ => format_decimal(operande),
            };
            format!("{op}{sx} = {}", format_decimal(resultat))
        }
        Etape::Binaire {
            op,
            gauche,
            droite,
            resultat,
            ..
        } => format!(
            "{} {op} {} = {}",
            format_decimal(gauche),
            format_decimal(droite),
            format_decimal(resultat)
        ),
    }
}
