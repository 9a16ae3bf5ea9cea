// src/noyau/expr.rs
//
// AST avec plages.
// - Plage : [start, end) en caractères (pas en octets) dans la source normalisée.
// - Chaque noeud porte sa plage ; un parent couvre l’union de ses enfants.
// - Groupe : transparent à l’évaluation, conservé pour l’affichage.

use std::fmt;

use super::decimal::Decimal;
use super::operateurs::{OpBin, OpUn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plage {
    pub start: usize,
    pub end: usize,
}

impl Plage {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn union(self, autre: Plage) -> Plage {
        Plage::new(self.start.min(autre.start), self.end.max(autre.end))
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Plage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Nombre {
        valeur: Decimal,
        plage: Plage,
    },
    Groupe {
        interieur: Box<Expr>,
        plage: Plage,
    },
    Unaire {
        op: OpUn,
        operande: Box<Expr>,
        plage: Plage,
    },
    Binaire {
        op: OpBin,
        gauche: Box<Expr>,
        droite: Box<Expr>,
        plage: Plage,
    },
}

impl Expr {
    pub fn plage(&self) -> Plage {
        match self {
            Expr::Nombre { plage, .. }
            | Expr::Groupe { plage, .. }
            | Expr::Unaire { plage, .. }
            | Expr::Binaire { plage, .. } => *plage,
        }
    }

    /// Opérateur binaire à la racine, s’il y en a un.
    pub fn op_binaire(&self) -> Option<OpBin> {
        match self {
            Expr::Binaire { op, .. } => Some(*op),
            _ => None,
        }
    }
}
