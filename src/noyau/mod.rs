//! Noyau de calcul pas à pas
//!
//! Organisation interne :
//! - normalise.rs  : NFKC + glyphes mathématiques -> ASCII
//! - jetons.rs     : tokenisation (plages en caractères)
//! - operateurs.rs : table précédence / associativité (parseur ET affichage)
//! - pratt.rs      : parseur par précédence -> Expr
//! - expr.rs       : AST + Plage
//! - decimal.rs    : décimal exact + Contexte (précision, arrondi, garde-fous)
//! - eval.rs       : évaluation + démarche (étapes)
//! - format.rs     : affichage des nombres, expressions, étapes
//! - termes.rs     : termes de premier niveau + cumuls
//! - erreurs.rs    : ErreurCalc + caret
//! - calcul.rs     : pipeline complet

pub mod calcul;
pub mod decimal;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod operateurs;
pub mod pratt;
pub mod termes;

#[cfg(test)]
mod tests_scientifiques;


#[cfg(test)]
mod tests_proprietes;

// API publique
pub use calcul::{eval_expression, Calcul};
pub use decimal::{Arrondi, Contexte, Decimal, OperationInvalide};
pub use erreurs::{format_caret, ErreurCalc};
pub use eval::{evaluate, evaluate_avec, evaluate_raw, evaluate_raw_avec, Etape};
pub use expr::{Expr, Plage};
pub use format::{expr_to_string, format_decimal, format_step};
pub use jetons::{tokenize, Tok};
pub use normalise::normalise;
pub use operateurs::{OpBin, OpUn};
pub use pratt::parse;
pub use termes::{cumuls, extract_top_level_terms, Terme};
