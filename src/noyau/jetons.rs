// src/noyau/jetons.rs

use super::decimal::Decimal;
use super::erreurs::ErreurCalc;
use super::expr::Plage;
use super::operateurs::OpBin;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    // brut = texte tel que tapé (séparateurs compris)
    Num {
        valeur: Decimal,
        brut: String,
        plage: Plage,
    },
    Op {
        op: OpBin,
        plage: Plage,
    },

    LPar {
        plage: Plage,
    },
    RPar {
        plage: Plage,
    },

    Fin {
        plage: Plage,
    },
}

impl Tok {
    pub fn plage(&self) -> Plage {
        match self {
            Tok::Num { plage, .. }
            | Tok::Op { plage, .. }
            | Tok::LPar { plage }
            | Tok::RPar { plage }
            | Tok::Fin { plage } => *plage,
        }
    }
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - nombres décimaux, séparateurs `_` et `,` ignorés (ex: 1_234,567.5)
/// - opérateurs + - * / % ^ et ** (reconnu avant *)
/// - parenthèses ( )
///
/// Termine toujours par exactement un `Tok::Fin`.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffres, séparateurs, au plus un point (un 2e point termine le littéral)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut vu_point = c == '.';
            i += 1;
            while i < chars.len() {
                match chars[i] {
                    '.' if vu_point => break,
                    '.' => {
                        vu_point = true;
                        i += 1;
                    }
                    '0'..='9' | '_' | ',' => i += 1,
                    _ => break,
                }
            }

            let brut: String = chars[start..i].iter().collect();
            let nettoye: String = brut.chars().filter(|&c| c != '_' && c != ',').collect();
            let plage = Plage::new(start, i);

            if nettoye.is_empty() || nettoye == "." {
                return Err(ErreurCalc::syntaxe(format!("nombre invalide '{brut}'"), plage));
            }
            let valeur = nettoye
                .parse::<Decimal>()
                .map_err(|_| ErreurCalc::syntaxe(format!("nombre invalide '{brut}'"), plage))?;

            out.push(Tok::Num {
                valeur,
                brut,
                plage,
            });
            continue;
        }

        // ** avant *
        if c == '*' && chars.get(i + 1) == Some(&'*') {
            out.push(Tok::Op {
                op: OpBin::DoubleEtoile,
                plage: Plage::new(i, i + 2),
            });
            i += 2;
            continue;
        }

        let plage = Plage::new(i, i + 1);
        let tok = match c {
            '(' => Tok::LPar { plage },
            ')' => Tok::RPar { plage },
            '+' => Tok::Op {
                op: OpBin::Plus,
                plage,
            },
            '-' => Tok::Op {
                op: OpBin::Moins,
                plage,
            },
            '*' => Tok::Op {
                op: OpBin::Fois,
                plage,
            },
            '/' => Tok::Op {
                op: OpBin::Divise,
                plage,
            },
            '%' => Tok::Op {
                op: OpBin::Modulo,
                plage,
            },
            '^' => Tok::Op {
                op: OpBin::Chapeau,
                plage,
            },
            _ => {
                return Err(ErreurCalc::syntaxe(
                    format!("caractère non pris en charge '{c}'"),
                    plage,
                ))
            }
        };
        out.push(tok);
        i += 1;
    }

    out.push(Tok::Fin {
        plage: Plage::new(i, i),
    });
    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte, sans le jeton de fin.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num { brut, .. } => brut.as_str(),
            Tok::Op { op, .. } => op.symbole(),
            Tok::LPar { .. } => "(",
            Tok::RPar { .. } => ")",
            Tok::Fin { .. } => continue,
        };
        out.push(s);
    }
    out.join(" ")
}
