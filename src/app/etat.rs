//! src/app/etat.rs
//!
//! État de la calculatrice (sans rendu).
//!
//! Rôle : contenir l’entrée, le dernier calcul, la dernière erreur, le contexte
//! numérique et les sections demandées, avec des opérations simples (C/CLR/AC).
//!
//! - Aucun rendu ici (voir vue.rs).
//! - Actions déterministes, sans effet de bord caché.
//! - Garde-fou : la précision est bornée (PRECISION_MAX).

use crate::noyau::decimal::PRECISION_MAX;
use crate::noyau::{Calcul, Contexte, ErreurCalc};

/// Sections affichées en plus de la valeur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sections {
    pub jetons: bool,
    pub etapes: bool,
    pub termes: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: Option<Calcul>,
    pub erreur: Option<ErreurCalc>,
    // source normalisée à laquelle les plages de `erreur` se rapportent
    pub source_erreur: String,

    // --- paramètres ---
    pub contexte: Contexte,
    pub sections: Sections,
}

impl AppCalc {
    /* ------------------------ Actions (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + contexte par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.contexte = Contexte::default();
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat = None;
        self.erreur = None;
        self.source_erreur.clear();
    }

    /// On CONSERVE le dernier résultat ; la vue donne priorité à l’erreur.
    pub fn set_erreur(&mut self, erreur: ErreurCalc, source: impl Into<String>) {
        self.erreur = Some(erreur);
        self.source_erreur = source.into();
    }

    pub fn set_resultat(&mut self, calcul: Calcul) {
        self.erreur = None;
        self.source_erreur.clear();
        self.resultat = Some(calcul);
    }

    /// Garde-fou : limite la précision (évite abus / gel dans les divisions).
    pub fn set_precision(&mut self, precision: u32) {
        self.contexte.precision = precision.min(PRECISION_MAX);
    }
}
