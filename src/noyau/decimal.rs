// src/noyau/decimal.rs
//
// Décimal exact (base 10), sans flottants.
// - Valeur = rationnel réduit dont le dénominateur divise une puissance de 10
//   (donc de la forme 2^a·5^b) : l’écriture décimale est toujours finie.
// - Aucun pgcd sur les grands opérandes dans / et ^ (coût quadratique en bits).
// - + - * : exacts.
// - / et puissances négatives : arrondis à `Contexte::precision` décimales.
// - % : reste de la division TRONQUÉE (signe du dividende).

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/* ------------------------ Contexte (configuration) ------------------------ */

/// Décimales conservées par défaut pour / et x^-n.
pub const PRECISION_DEFAUT: u32 = 40;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const PRECISION_MAX: u32 = 200;

/// |exposant| maximal accepté par `puissance`.
pub const EXPOSANT_MAX_DEFAUT: i64 = 1_000_000;

/// Taille maximale (en bits) estimée d’un résultat de puissance.
pub const BITS_MAX_DEFAUT: u64 = 4_000_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Arrondi {
    /// Au plus proche, égalité => loin de zéro.
    #[default]
    DemiHaut,
    /// Vers zéro.
    Tronque,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contexte {
    pub precision: u32,
    pub arrondi: Arrondi,
    pub exposant_max: i64,
    pub bits_max: u64,
}

impl Default for Contexte {
    fn default() -> Self {
        Self {
            precision: PRECISION_DEFAUT,
            arrondi: Arrondi::DemiHaut,
            exposant_max: EXPOSANT_MAX_DEFAUT,
            bits_max: BITS_MAX_DEFAUT,
        }
    }
}

impl Contexte {
    pub fn avec_precision(precision: u32) -> Self {
        Self {
            precision: precision.min(PRECISION_MAX),
            ..Self::default()
        }
    }
}

/* ------------------------ Erreurs arithmétiques ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum OperationInvalide {
    #[error("division par zéro")]
    DivisionParZero,
    #[error("l’exposant doit être entier")]
    ExposantNonEntier,
    #[error("exposant trop grand")]
    ExposantTropGrand,
}

/// Échec remonté par la couche arithmétique.
/// `Interne` = tout ce qui n’est pas une opération invalide connue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurArith {
    #[error(transparent)]
    Invalide(#[from] OperationInvalide),
    #[error("{0}")]
    Interne(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("littéral décimal invalide: {0:?}")]
pub struct ErreurLitteral(pub String);

/* ------------------------ Décimal ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(BigRational);

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal(BigRational::zero())
    }

    pub fn one() -> Self {
        Decimal(BigRational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn as_rational(&self) -> &BigRational {
        &self.0
    }

    pub fn additionner(&self, autre: &Decimal) -> Decimal {
        // cumuls : le total part de zéro
        if self.is_zero() {
            return autre.clone();
        }
        if autre.is_zero() {
            return self.clone();
        }
        Decimal(&self.0 + &autre.0)
    }

    pub fn soustraire(&self, autre: &Decimal) -> Decimal {
        Decimal(&self.0 - &autre.0)
    }

    pub fn multiplier(&self, autre: &Decimal) -> Decimal {
        Decimal(&self.0 * &autre.0)
    }

    pub fn negation(&self) -> Decimal {
        Decimal(-&self.0)
    }

    pub fn diviser(&self, autre: &Decimal, ctx: &Contexte) -> Result<Decimal, ErreurArith> {
        if autre.is_zero() {
            return Err(OperationInvalide::DivisionParZero.into());
        }
        let num = self.0.numer() * autre.0.denom();
        let den = self.0.denom() * autre.0.numer();
        Ok(quotient_arrondi(&num, &den, ctx.precision, ctx.arrondi))
    }

    /// a - b * trunc(a / b) : exact, signe du dividende.
    pub fn modulo(&self, autre: &Decimal) -> Result<Decimal, ErreurArith> {
        if autre.is_zero() {
            return Err(OperationInvalide::DivisionParZero.into());
        }
        let q = (&self.0 / &autre.0).trunc();
        Ok(Decimal(&self.0 - &autre.0 * q))
    }

    /// Exposant entier seulement. x^-n = 1 / x^n (arrondi comme `diviser`).
    pub fn puissance(&self, exposant: &Decimal, ctx: &Contexte) -> Result<Decimal, ErreurArith> {
        if !exposant.is_integer() {
            return Err(OperationInvalide::ExposantNonEntier.into());
        }
        let n = exposant
            .0
            .numer()
            .to_i64()
            .ok_or(OperationInvalide::ExposantTropGrand)?;
        let magnitude = n.unsigned_abs();
        if magnitude > ctx.exposant_max.unsigned_abs() {
            return Err(OperationInvalide::ExposantTropGrand.into());
        }

        if magnitude == 0 {
            return Ok(Decimal::one());
        }
        if self.is_zero() {
            return if n < 0 {
                Err(OperationInvalide::DivisionParZero.into())
            } else {
                Ok(Decimal::zero())
            };
        }

        // garde-fou mémoire : taille estimée du numérateur/dénominateur
        let bits = self.0.numer().bits().max(self.0.denom().bits());
        if bits.saturating_mul(magnitude) > ctx.bits_max {
            return Err(ErreurArith::Interne(format!(
                "résultat trop volumineux (~{} bits)",
                bits.saturating_mul(magnitude)
            )));
        }

        let k = u32::try_from(magnitude).map_err(|_| OperationInvalide::ExposantTropGrand)?;
        // numérateur et dénominateur premiers entre eux : leurs puissances aussi
        let num = self.0.numer().pow(k);
        let den = self.0.denom().pow(k);
        if n < 0 {
            Ok(quotient_arrondi(&den, &num, ctx.precision, ctx.arrondi))
        } else {
            Ok(Decimal(BigRational::new_raw(num, den)))
        }
    }

    /// Arrondit à `chiffres` décimales.
    pub fn arrondir(&self, chiffres: u32, mode: Arrondi) -> Decimal {
        if self.0.is_integer() {
            return self.clone();
        }
        quotient_arrondi(self.0.numer(), self.0.denom(), chiffres, mode)
    }

    /// mantisse × 10^-echelle, réduit sans pgcd : seuls 2 et 5 peuvent se simplifier.
    fn depuis_echelle(mantisse: BigInt, echelle: u32) -> Decimal {
        if mantisse.is_zero() {
            return Decimal::zero();
        }
        let t2 = mantisse
            .trailing_zeros()
            .unwrap_or(0)
            .min(u64::from(echelle)) as u32;
        let mut m = mantisse >> t2;

        let mut t5 = 0;
        while t5 < echelle && (&m % 5u32).is_zero() {
            m = m / 5u32;
            t5 += 1;
        }

        let den = (BigInt::one() << (echelle - t2)) * BigInt::from(5).pow(echelle - t5);
        Decimal(BigRational::new_raw(m, den))
    }

    /// Écriture finie : (décimales, f) avec dénominateur × f = 10^décimales.
    /// None si le dénominateur n’est pas de la forme 2^a·5^b.
    fn ecriture_finie(&self) -> Option<(u32, BigInt)> {
        let d = self.0.denom();
        let n2 = d.trailing_zeros().unwrap_or(0);
        let n5 = exposant_de_cinq(&(d >> n2))?;
        let n2 = u32::try_from(n2).ok()?;

        let facteur = if n2 >= n5 {
            BigInt::from(5).pow(n2 - n5)
        } else {
            BigInt::one() << (n5 - n2)
        };
        Some((n2.max(n5), facteur))
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Decimal(BigRational::from_integer(BigInt::from(n)))
    }
}

impl From<BigInt> for Decimal {
    fn from(n: BigInt) -> Self {
        Decimal(BigRational::from_integer(n))
    }
}

/// Accepte `[+-]chiffres[.chiffres]`, `.5`, `5.` ; rien d’autre (pas d’exposant).
impl FromStr for Decimal {
    type Err = ErreurLitteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalide = || ErreurLitteral(s.to_string());

        let (neg, corps) = match s.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));

        let que_des_chiffres = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (ent.is_empty() && frac.is_empty()) || !que_des_chiffres(ent) || !que_des_chiffres(frac)
        {
            return Err(invalide());
        }

        let chiffres = format!("{ent}{frac}");
        let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
        let n = if neg { -n } else { n };
        let echelle = u32::try_from(frac.len()).map_err(|_| invalide())?;
        Ok(Decimal::depuis_echelle(n, echelle))
    }
}

/// Écriture décimale minimale (pas de zéros de queue, pas de point nu).
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fini = self.ecriture_finie();
        debug_assert!(fini.is_some(), "écriture décimale infinie: {}", self.0);
        match fini {
            Some((digits, facteur)) => {
                let scaled = self.0.numer() * facteur;
                f.write_str(&scaled_to_decimal(&scaled, digits))
            }
            // hors invariant : on montre la fraction telle quelle
            None => write!(f, "{}", self.0),
        }
    }
}

/* ------------------------ Outils internes ------------------------ */

/// num / den (den ≠ 0) arrondi à `chiffres` décimales, sans réduire la fraction d’entrée.
fn quotient_arrondi(num: &BigInt, den: &BigInt, chiffres: u32, mode: Arrondi) -> Decimal {
    let echelle = pow10(chiffres);
    let (num, den) = if den.is_negative() {
        (-(num * &echelle), -den)
    } else {
        (num * &echelle, den.clone())
    };

    // division entière BigInt : tronque vers zéro
    let q = &num / &den;
    let q = match mode {
        Arrondi::Tronque => q,
        Arrondi::DemiHaut => {
            let r = &num - &q * &den;
            if r.abs() * 2u32 >= den {
                if num.is_negative() {
                    q - 1u32
                } else {
                    q + 1u32
                }
            } else {
                q
            }
        }
    };
    Decimal::depuis_echelle(q, chiffres)
}

/// Some(m) si x == 5^m.
fn exposant_de_cinq(x: &BigInt) -> Option<u32> {
    if x.is_one() {
        return Some(0);
    }
    // 5^m s’écrit sur floor(m·log2(5)) + 1 bits
    let estime = ((x.bits().saturating_sub(1)) as f64 / 5f64.log2()) as u32;
    let bas = estime.saturating_sub(1);
    let mut p = BigInt::from(5).pow(bas);
    for m in bas..=estime + 1 {
        if p == *x {
            return Some(m);
        }
        p *= 5u32;
    }
    None
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(scaled: &BigInt, digits: u32) -> String {
    let signe = if scaled.is_negative() { "-" } else { "" };
    let chiffres = scaled.magnitude().to_str_radix(10);
    let digits = digits as usize;

    if digits == 0 {
        return format!("{signe}{chiffres}");
    }
    let chiffres = if chiffres.len() <= digits {
        format!("{}{chiffres}", "0".repeat(digits + 1 - chiffres.len()))
    } else {
        chiffres
    };
    let (ent, frac) = chiffres.split_at(chiffres.len() - digits);
    format!("{signe}{ent}.{frac}")
}
