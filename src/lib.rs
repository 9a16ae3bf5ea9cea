// src/lib.rs
//
// Calculatrice pas à pas : noyau décimal exact + front-end terminal.

pub mod app;
pub mod noyau;

pub use noyau::{eval_expression, Calcul, Contexte, ErreurCalc};
