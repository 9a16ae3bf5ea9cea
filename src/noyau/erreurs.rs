// src/noyau/erreurs.rs
//
// Erreurs du noyau : toujours une plage, pour afficher un caret sous la zone fautive.
// - Syntaxe    : lexer / parseur
// - Invalide   : opération refusée par la couche décimale (plage = noeud fautif)
// - Interne    : tout autre échec arithmétique, ré-emballé avec la plage du noeud

use thiserror::Error;

use super::decimal::{ErreurArith, OperationInvalide};
use super::expr::Plage;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("{message} @{}", .plage.start)]
    Syntaxe { message: String, plage: Plage },

    #[error("{operation} @{}", .plage.start)]
    Invalide {
        operation: OperationInvalide,
        plage: Plage,
    },

    #[error("erreur interne d’évaluation: {message} @{}", .plage.start)]
    Interne { message: String, plage: Plage },
}

impl ErreurCalc {
    pub fn syntaxe(message: impl Into<String>, plage: Plage) -> Self {
        ErreurCalc::Syntaxe {
            message: message.into(),
            plage,
        }
    }

    /// Rattache un échec arithmétique au noeud qui l’a provoqué.
    pub fn depuis_arith(e: ErreurArith, plage: Plage) -> Self {
        match e {
            ErreurArith::Invalide(operation) => ErreurCalc::Invalide { operation, plage },
            ErreurArith::Interne(message) => ErreurCalc::Interne { message, plage },
        }
    }

    /// Étiquette stable (ne change pas avec la langue des messages).
    pub fn kind(&self) -> &'static str {
        match self {
            ErreurCalc::Syntaxe { .. } => "SyntaxError",
            ErreurCalc::Invalide { .. } => "InvalidOperation",
            ErreurCalc::Interne { .. } => "EvalError",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ErreurCalc::Syntaxe { .. } => "PARSE_ERROR",
            ErreurCalc::Invalide { operation, .. } => match operation {
                OperationInvalide::DivisionParZero => "DIVISION_BY_ZERO",
                OperationInvalide::ExposantNonEntier => "NON_INTEGER_EXPONENT",
                OperationInvalide::ExposantTropGrand => "EXPONENT_TOO_LARGE",
            },
            ErreurCalc::Interne { .. } => "EVAL_INTERNAL",
        }
    }

    pub fn plage(&self) -> Plage {
        match self {
            ErreurCalc::Syntaxe { plage, .. }
            | ErreurCalc::Invalide { plage, .. }
            | ErreurCalc::Interne { plage, .. } => *plage,
        }
    }

    /// Message seul, sans la position.
    pub fn message(&self) -> String {
        match self {
            ErreurCalc::Syntaxe { message, .. } => message.clone(),
            ErreurCalc::Invalide { operation, .. } => operation.to_string(),
            ErreurCalc::Interne { message, .. } => format!("erreur interne d’évaluation: {message}"),
        }
    }
}

/// Ligne de la source contenant `plage.start` + une ligne de carets dessous.
///
/// ```text
/// 1 @ 2
///   ^
/// ```
pub fn format_caret(source: &str, plage: Plage) -> String {
    let mut offset = 0usize;
    let mut lignes = source.split('\n').peekable();

    let (ligne, col) = loop {
        let Some(l) = lignes.next() else {
            break ("", 0);
        };
        let n = l.chars().count();
        if plage.start <= offset + n || lignes.peek().is_none() {
            break (l, plage.start.saturating_sub(offset).min(n));
        }
        offset += n + 1;
    };

    // largeur : bornée à la ligne courante, au moins un caret
    let fin_ligne = ligne.chars().count();
    let fin = (plage.end.saturating_sub(offset)).min(fin_ligne);
    let largeur = fin.saturating_sub(col).max(1);

    format!("{ligne}\n{}{}", " ".repeat(col), "^".repeat(largeur))
}
