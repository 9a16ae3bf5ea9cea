// src/app/vue.rs
//
// Vue texte (terminal)
// --------------------
// - `evaluer` passe l’entrée au noyau et dépose le résultat / l’erreur dans l’état
// - `rendre` écrit l’état dans n’importe quel `io::Write` (stdout, tampon de test)
//
// Format :
//   = <valeur>
//   jetons : ...            (si demandé)
//   étapes :                (si demandé)
//     2 * 3 = 6
//   termes :                (si demandé)
//     [1] 2 * 3 = 6 | cumul 6
//
// En cas d’erreur :
//   <kind>: <message>
//   <ligne fautive>
//   <carets>

use std::io::{self, Write};

use crate::noyau::{eval_expression, format_caret, format_decimal, normalise, Calcul, ErreurCalc};

use super::etat::AppCalc;

impl AppCalc {
    /// Évalue l’entrée via le noyau. Renvoie false en cas d’erreur.
    pub fn evaluer(&mut self) -> bool {
        match eval_expression(&self.entree, &self.contexte) {
            Ok(calcul) => {
                self.set_resultat(calcul);
                true
            }
            Err(e) => {
                log::info!("{}: {}", e.kind(), e.message());
                let source = normalise(&self.entree);
                self.set_erreur(e, source);
                false
            }
        }
    }

    /// Écrit l’erreur courante si elle existe, sinon le dernier résultat.
    pub fn rendre<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(e) = &self.erreur {
            return Self::rendre_erreur(out, e, &self.source_erreur);
        }
        match &self.resultat {
            Some(c) => self.rendre_calcul(out, c),
            None => Ok(()),
        }
    }

    fn rendre_calcul<W: Write>(&self, out: &mut W, c: &Calcul) -> io::Result<()> {
        writeln!(out, "= {}", c.affichage)?;

        if self.sections.jetons {
            writeln!(out, "jetons : {}", c.jetons)?;
        }

        if self.sections.etapes {
            writeln!(out, "étapes :")?;
            if c.etapes.is_empty() {
                writeln!(out, "  (aucune)")?;
            }
            for e in &c.etapes {
                writeln!(out, "  {e}")?;
            }
        }

        if self.sections.termes {
            writeln!(out, "termes :")?;
            for (i, t) in c.termes.iter().enumerate() {
                writeln!(
                    out,
                    "  [{}] {} = {} | cumul {}",
                    i + 1,
                    t.texte,
                    format_decimal(&t.valeur),
                    format_decimal(&t.cumul)
                )?;
            }
        }

        Ok(())
    }

    fn rendre_erreur<W: Write>(out: &mut W, e: &ErreurCalc, source: &str) -> io::Result<()> {
        writeln!(out, "{}: {}", e.kind(), e.message())?;
        writeln!(out, "{}", format_caret(source, e.plage()))
    }
}
