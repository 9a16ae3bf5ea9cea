//! Noyau: évaluation avec démarche
//!
//! Parcours postfixe de l’AST : chaque noeud Unaire / Binaire ajoute une `Etape`,
//! dans l’ordre où il est calculé. Nombre et Groupe n’en ajoutent aucune.
//!
//! Remarque : la démarche est construite localement puis rendue avec la valeur ;
//! au premier échec on ne rend NI valeur NI démarche partielle.

use super::decimal::{Contexte, Decimal, ErreurArith};
use super::erreurs::ErreurCalc;
use super::expr::Expr;
use super::format::format_step;
use super::operateurs::{OpBin, OpUn};

/// Un calcul élémentaire, avec le noeud source (pour l’affichage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Etape<'a> {
    Unaire {
        op: OpUn,
        operande: Decimal,
        resultat: Decimal,
        noeud: &'a Expr,
    },
    Binaire {
        op: OpBin,
        gauche: Decimal,
        droite: Decimal,
        resultat: Decimal,
        noeud: &'a Expr,
    },
}

impl<'a> Etape<'a> {
    pub fn resultat(&self) -> &Decimal {
        match self {
            Etape::Unaire { resultat, .. } | Etape::Binaire { resultat, .. } => resultat,
        }
    }

    pub fn noeud(&self) -> &'a Expr {
        match self {
            Etape::Unaire { noeud, .. } | Etape::Binaire { noeud, .. } => *noeud,
        }
    }
}

/// API structurée : valeur + étapes (contexte par défaut).
pub fn evaluate_raw(ast: &Expr) -> Result<(Decimal, Vec<Etape<'_>>), ErreurCalc> {
    evaluate_raw_avec(ast, &Contexte::default())
}

pub fn evaluate_raw_avec<'a>(
    ast: &'a Expr,
    ctx: &Contexte,
) -> Result<(Decimal, Vec<Etape<'a>>), ErreurCalc> {
    let mut etapes = Vec::new();
    let valeur = eval_noeud(ast, ctx, &mut etapes)?;
    Ok((valeur, etapes))
}

/// API texte : valeur + étapes déjà formatées ("2 + 3 = 5").
pub fn evaluate(ast: &Expr) -> Result<(Decimal, Vec<String>), ErreurCalc> {
    evaluate_avec(ast, &Contexte::default())
}

pub fn evaluate_avec(ast: &Expr, ctx: &Contexte) -> Result<(Decimal, Vec<String>), ErreurCalc> {
    let (valeur, etapes) = evaluate_raw_avec(ast, ctx)?;
    Ok((valeur, etapes.iter().map(format_step).collect()))
}

fn eval_noeud<'a>(
    noeud: &'a Expr,
    ctx: &Contexte,
    etapes: &mut Vec<Etape<'a>>,
) -> Result<Decimal, ErreurCalc> {
    match noeud {
        Expr::Nombre { valeur, .. } => Ok(valeur.clone()),

        Expr::Groupe { interieur, .. } => eval_noeud(interieur, ctx, etapes),

        Expr::Unaire { op, operande, .. } => {
            let v = eval_noeud(operande, ctx, etapes)?;
            let resultat = match op {
                OpUn::Moins => v.negation(),
                OpUn::Plus => v.clone(),
            };
            log::trace!("{op}{v} = {resultat}");
            etapes.push(Etape::Unaire {
                op: *op,
                operande: v,
                resultat: resultat.clone(),
                noeud,
            });
            Ok(resultat)
        }

        Expr::Binaire {
            op,
            gauche,
            droite,
            plage,
        } => {
            let a = eval_noeud(gauche, ctx, etapes)?;
            let b = eval_noeud(droite, ctx, etapes)?;
            let resultat =
                applique(*op, &a, &b, ctx).map_err(|e| ErreurCalc::depuis_arith(e, *plage))?;
            log::trace!("{a} {op} {b} = {resultat}");
            etapes.push(Etape::Binaire {
                op: *op,
                gauche: a,
                droite: b,
                resultat: resultat.clone(),
                noeud,
            });
            Ok(resultat)
        }
    }
}

fn applique(op: OpBin, a: &Decimal, b: &Decimal, ctx: &Contexte) -> Result<Decimal, ErreurArith> {
    match op {
        OpBin::Plus => Ok(a.additionner(b)),
        OpBin::Moins => Ok(a.soustraire(b)),
        OpBin::Fois => Ok(a.multiplier(b)),
        OpBin::Divise => a.diviser(b, ctx),
        OpBin::Modulo => a.modulo(b),
        OpBin::Chapeau | OpBin::DoubleEtoile => a.puissance(b, ctx),
    }
}
