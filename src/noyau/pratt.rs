// src/noyau/pratt.rs
//
// Parseur descendant récursif par précédence (Pratt).
// Remplace l’ancien passage shunting-yard -> RPN -> Expr : les plages
// des jetons remontent directement dans l’AST.
//
// Règles:
// - primaire  : préfixes + / - enchaînables (--5), nombre, ( expression )
// - expression: tant que l’opérateur suivant a une précédence >= min, on replie à gauche ;
//               membre droit lu à `prec` (assoc. droite) ou `prec + 1` (assoc. gauche)
// - la table de précédence vient de operateurs.rs (même source que l’affichage)
// - chaque noeud construit remonte sa hauteur : l’AST final ne dépasse jamais HAUTEUR_MAX

use super::erreurs::ErreurCalc;
use super::expr::{Expr, Plage};
use super::jetons::Tok;
use super::operateurs::{Assoc, OpUn};

/// Garde-fou : profondeur de récursion maximale (parenthèses, préfixes, puissances).
pub const PROFONDEUR_MAX: usize = 256;

/// Garde-fou : hauteur maximale de l’AST, chaînes `1 + 1 + ...` comprises.
/// Évaluation, affichage, termes et libération parcourent l’arbre récursivement.
pub const HAUTEUR_MAX: usize = 1_000;

/// Construit l’AST. `source` sert uniquement à citer le texte fautif dans les messages.
pub fn parse(jetons: &[Tok], source: &str) -> Result<Expr, ErreurCalc> {
    let mut p = Parseur::new(jetons, source);
    let (ast, _) = p.expression(0)?;

    match p.peek() {
        Tok::Fin { .. } => Ok(ast),
        t => Err(p.erreur("jetons en trop en fin d’expression", t.plage())),
    }
}

struct Parseur<'a> {
    jetons: &'a [Tok],
    source: &'a str,
    pos: usize,
    profondeur: usize,
    // jeton de fin de secours si la suite n’en contient pas
    fin: Tok,
}

impl<'a> Parseur<'a> {
    fn new(jetons: &'a [Tok], source: &'a str) -> Self {
        let bout = jetons.last().map(|t| t.plage().end).unwrap_or(0);
        Self {
            jetons,
            source,
            pos: 0,
            profondeur: 0,
            fin: Tok::Fin {
                plage: Plage::new(bout, bout),
            },
        }
    }

    fn peek(&self) -> &Tok {
        self.jetons.get(self.pos).unwrap_or(&self.fin)
    }

    fn avancer(&mut self) {
        if self.pos < self.jetons.len() {
            self.pos += 1;
        }
    }

    fn prefixe(&self) -> Option<OpUn> {
        match self.peek() {
            Tok::Op { op, .. } => op.en_unaire(),
            _ => None,
        }
    }

    fn entrer(&mut self) -> Result<(), ErreurCalc> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            let plage = self.peek().plage();
            return Err(self.erreur("expression trop imbriquée", plage));
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur = self.profondeur.saturating_sub(1);
    }

    /// Hauteur d’un noeud posé au-dessus d’un sous-arbre de hauteur `dessous`.
    fn hauteur(&self, dessous: usize, plage: Plage) -> Result<usize, ErreurCalc> {
        let h = dessous + 1;
        if h > HAUTEUR_MAX {
            return Err(self.erreur("expression trop imbriquée", plage));
        }
        Ok(h)
    }

    /// Message + extrait de la source (si disponible).
    fn erreur(&self, message: &str, plage: Plage) -> ErreurCalc {
        let extrait: String = self
            .source
            .chars()
            .skip(plage.start)
            .take(plage.len())
            .collect();
        if extrait.is_empty() {
            ErreurCalc::syntaxe(message, plage)
        } else {
            ErreurCalc::syntaxe(format!("{message} '{extrait}'"), plage)
        }
    }

    /// Noeud lu + sa hauteur (un nombre vaut 1).
    fn primaire(&mut self) -> Result<(Expr, usize), ErreurCalc> {
        self.entrer()?;
        let debut = self.peek().plage();

        let lu = if let Some(op) = self.prefixe() {
            self.avancer();
            let (operande, h) = self.primaire()?;
            let h = self.hauteur(h, debut)?;
            let plage = debut.union(operande.plage());
            let noeud = Expr::Unaire {
                op,
                operande: Box::new(operande),
                plage,
            };
            (noeud, h)
        } else if let Tok::Num { valeur, plage, .. } = self.peek() {
            let n = Expr::Nombre {
                valeur: valeur.clone(),
                plage: *plage,
            };
            self.avancer();
            (n, 1)
        } else if let Tok::LPar { plage: ouvrante } = self.peek() {
            let ouvrante = *ouvrante;
            self.avancer();
            let (interieur, h) = self.expression(0)?;

            let fermante = match self.peek() {
                Tok::RPar { plage } => *plage,
                _ => return Err(self.erreur("parenthèse fermante manquante pour", ouvrante)),
            };
            self.avancer();

            let plage = ouvrante.union(fermante);
            let h = self.hauteur(h, plage)?;
            let noeud = Expr::Groupe {
                interieur: Box::new(interieur),
                plage,
            };
            (noeud, h)
        } else {
            return Err(self.erreur("opérande attendu", debut));
        };

        self.sortir();
        Ok(lu)
    }

    fn expression(&mut self, prec_min: u8) -> Result<(Expr, usize), ErreurCalc> {
        self.entrer()?;
        let (mut gauche, mut h_gauche) = self.primaire()?;

        loop {
            let (op, plage_op) = match self.peek() {
                Tok::Op { op, plage } => (*op, *plage),
                _ => break,
            };
            let info = op.info();
            if info.precedence < prec_min {
                break;
            }
            self.avancer();

            let prec_droite = match info.assoc {
                Assoc::Droite => info.precedence,
                Assoc::Gauche => info.precedence + 1,
            };
            let (droite, h_droite) = self.expression(prec_droite)?;
            // le repli à gauche ne récurse pas : la hauteur est comptée ici
            h_gauche = self.hauteur(h_gauche.max(h_droite), plage_op)?;
            let plage = gauche.plage().union(droite.plage());

            gauche = Expr::Binaire {
                op,
                gauche: Box::new(gauche),
                droite: Box::new(droite),
                plage,
            };
        }

        self.sortir();
        Ok((gauche, h_gauche))
    }
}
