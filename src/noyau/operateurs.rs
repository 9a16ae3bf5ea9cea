// src/noyau/operateurs.rs
//
// Table des opérateurs : précédence + associativité.
// Source unique consultée par le parseur (pratt.rs) ET l’affichage (format.rs).

use std::fmt;

/// Opérateurs binaires reconnus par le lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpBin {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Chapeau,      // ^
    DoubleEtoile, // **
}

/// Opérateurs préfixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpUn {
    Plus,
    Moins,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoOp {
    pub precedence: u8,
    pub assoc: Assoc,
}

impl OpBin {
    pub const TOUS: [OpBin; 7] = [
        OpBin::Plus,
        OpBin::Moins,
        OpBin::Fois,
        OpBin::Divise,
        OpBin::Modulo,
        OpBin::Chapeau,
        OpBin::DoubleEtoile,
    ];

    /// Précédence plus haute = lie plus fort.
    pub const fn info(self) -> InfoOp {
        match self {
            OpBin::Chapeau | OpBin::DoubleEtoile => InfoOp {
                precedence: 4,
                assoc: Assoc::Droite,
            },
            OpBin::Fois | OpBin::Divise | OpBin::Modulo => InfoOp {
                precedence: 3,
                assoc: Assoc::Gauche,
            },
            OpBin::Plus | OpBin::Moins => InfoOp {
                precedence: 2,
                assoc: Assoc::Gauche,
            },
        }
    }

    pub const fn precedence(self) -> u8 {
        self.info().precedence
    }

    pub fn est_associatif_droite(self) -> bool {
        self.info().assoc == Assoc::Droite
    }

    pub const fn symbole(self) -> &'static str {
        match self {
            OpBin::Plus => "+",
            OpBin::Moins => "-",
            OpBin::Fois => "*",
            OpBin::Divise => "/",
            OpBin::Modulo => "%",
            OpBin::Chapeau => "^",
            OpBin::DoubleEtoile => "**",
        }
    }

    /// `+` et `-` servent aussi de préfixes.
    pub const fn en_unaire(self) -> Option<OpUn> {
        match self {
            OpBin::Plus => Some(OpUn::Plus),
            OpBin::Moins => Some(OpUn::Moins),
            _ => None,
        }
    }
}

impl OpUn {
    pub const fn symbole(self) -> &'static str {
        match self {
            OpUn::Plus => "+",
            OpUn::Moins => "-",
        }
    }
}

impl fmt::Display for OpBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

impl fmt::Display for OpUn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}
