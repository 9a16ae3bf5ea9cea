//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés publiques du pipeline complet sans faire chauffer la machine.
//! - budget temps global sur les tests de stress
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - % est le reste de la division TRONQUÉE : le signe suit le dividende.
//! - x^-n = 1 / x^n, arrondi à la précision du contexte.
//! - Une somme très longue est une chaîne gauche dans l’AST : sa hauteur est bornée
//!   au parseur (HAUTEUR_MAX), au-delà c’est une SyntaxError.
//! - Les puissances acceptées par les garde-fous doivent finir vite, même à la limite.

use std::time::{Duration, Instant};

use super::decimal::{Contexte, Decimal};
use super::erreurs::ErreurCalc;
use super::eval::evaluate;
use super::expr::{Expr, Plage};
use super::format::{expr_to_string, format_decimal};
use super::jetons::{tokenize, Tok};
use super::operateurs::OpBin;
use super::pratt::{parse, HAUTEUR_MAX, PROFONDEUR_MAX};
use super::termes::extract_top_level_terms;
use super::{eval_expression, Calcul};

fn eval_ok(expr: &str) -> Calcul {
    eval_expression(expr, &Contexte::default()).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_err(expr: &str) -> ErreurCalc {
    match eval_expression(expr, &Contexte::default()) {
        Ok(c) => panic!("expr={expr:?} aurait dû échouer, valeur={}", c.affichage),
        Err(e) => e,
    }
}

fn assert_valeur(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr).affichage, attendu, "expr={expr:?}");
}

fn ast(s: &str) -> Expr {
    let toks = tokenize(s).unwrap_or_else(|e| panic!("tokenize({s:?}): {e}"));
    parse(&toks, s).unwrap_or_else(|e| panic!("parse({s:?}): {e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés publiques ------------------------ */

#[test]
fn sci_jetons_separateurs_et_double_etoile() {
    let toks = tokenize("1_234,567").unwrap();
    let nombres: Vec<String> = toks
        .iter()
        .filter_map(|t| match t {
            Tok::Num { valeur, .. } => Some(valeur.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(nombres, vec!["1234567"]);

    let etoiles = tokenize("2**3")
        .unwrap()
        .iter()
        .filter(|t| matches!(t, Tok::Op { op: OpBin::DoubleEtoile, .. }))
        .count();
    assert_eq!(etoiles, 1);
}

#[test]
fn sci_racine_plus_fils_droit_fois() {
    match ast("1 + 2 * 3") {
        Expr::Binaire {
            op: OpBin::Plus,
            droite,
            ..
        } => assert_eq!(droite.op_binaire(), Some(OpBin::Fois)),
        e => panic!("racine inattendue: {e:?}"),
    }
}

#[test]
fn sci_puissance_associative_a_droite() {
    assert_valeur("2 ^ 3 ^ 2", "512");
    assert_valeur("2 ** 3 ** 2", "512");
    assert_valeur("2 ^ 3 ** 2", "512");
}

#[test]
fn sci_decimal_exact() {
    assert_valeur("0.1 + 0.2", "0.3");
    assert_valeur("0.1 * 3", "0.3");
    assert_valeur("1 - 0.9", "0.1");
    assert_valeur("1.005 * 1000", "1005");
}

#[test]
fn sci_division_et_modulo_par_zero() {
    for s in ["1 / 0", "1 % 0", "5 / (2 - 2)", "5 % 0.0", "0 ^ -1"] {
        let e = eval_err(s);
        assert_eq!(e.kind(), "InvalidOperation", "expr={s:?}");
        assert_eq!(e.code(), "DIVISION_BY_ZERO", "expr={s:?}");
    }
}

#[test]
fn sci_affichage_nombres() {
    assert_valeur("-0", "0");
    assert_valeur("0 * -1", "0");
    assert_valeur("10", "10");
    assert_valeur("1.2300", "1.23");
}

#[test]
fn sci_termes_et_somme() {
    let a = ast("1 + (2*3) - 4");
    let termes = extract_top_level_terms(&a);
    let textes: Vec<String> = termes.iter().map(expr_to_string).collect();
    assert_eq!(textes, vec!["1", "(2 * 3)", "-4"]);

    let c = eval_ok("1 + (2*3) - 4");
    assert_eq!(c.affichage, "3");
    assert_eq!(c.termes.last().map(|t| t.cumul.clone()), Some(c.valeur.clone()));
}

#[test]
fn sci_reimpression_minimale() {
    assert_eq!(expr_to_string(&ast("(1 + 2) * 3")), "(1 + 2) * 3");
    assert_eq!(expr_to_string(&ast("1 + 2 + 3")), "1 + 2 + 3");
}

#[test]
fn sci_caractere_inconnu_plage_exacte() {
    let e = eval_err("1 @ 2");
    assert_eq!(e.kind(), "SyntaxError");
    assert_eq!(e.plage(), Plage::new(2, 3));
}

/* ------------------------ Choix arithmétiques ------------------------ */

#[test]
fn sci_modulo_signe_du_dividende() {
    assert_valeur("7 % 3", "1");
    assert_valeur("-7 % 3", "-1");
    assert_valeur("7 % -3", "1");
    assert_valeur("-7 % -3", "-1");
    assert_valeur("7.5 % 2", "1.5");
}

#[test]
fn sci_exposants_negatifs() {
    assert_valeur("2 ^ -1", "0.5");
    assert_valeur("2 ^ -3", "0.125");
    assert_valeur("10 ** -2", "0.01");
    // 1/3 arrondi à 40 décimales, puis affiché à 12
    assert_valeur("3 ^ -1", "0.333333333333");
    assert_valeur("0 ^ 0", "1");
}

#[test]
fn sci_exposants_refuses() {
    assert_eq!(eval_err("2 ^ 0.5").code(), "NON_INTEGER_EXPONENT");
    assert_eq!(eval_err("2 ^ 1000001").code(), "EXPONENT_TOO_LARGE");
    assert_eq!(eval_err("2 ^ -1000001").code(), "EXPONENT_TOO_LARGE");
}

#[test]
fn sci_precision_du_contexte() {
    let c = eval_expression("1 / 3", &Contexte::avec_precision(5)).unwrap();
    assert_eq!(c.valeur.to_string(), "0.33333");
    assert_eq!(c.affichage, "0.33333");

    // l’affichage coupe à 12 décimales même si le calcul en garde 40
    let c = eval_ok("1 / 3");
    assert_eq!(c.valeur.to_string(), format!("0.{}", "3".repeat(40)));
    assert_eq!(c.affichage, "0.333333333333");
}

/* ------------------------ Démarche ------------------------ */

#[test]
fn sci_demarche_ordre_postfixe() {
    let c = eval_ok("(1 + 2) * -(3 - 5)");
    assert_eq!(
        c.etapes,
        vec!["1 + 2 = 3", "3 - 5 = -2", "-(3 - 5) = 2", "3 * 2 = 6"]
    );
}

#[test]
fn sci_demarche_identique_api_texte() {
    let a = ast("2 * 3 + 4 / 8");
    let (v, etapes) = evaluate(&a).unwrap();
    let c = eval_ok("2 * 3 + 4 / 8");
    assert_eq!(v, c.valeur);
    assert_eq!(etapes, c.etapes);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 100 niveaux : passe (chaque niveau coûte 2 dans le compteur de profondeur)
    let n = 100;
    let expr = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    assert_valeur(&expr, "7");
    budget(t0, max);

    // au-delà du garde-fou : erreur propre, pas de débordement de pile
    let n = PROFONDEUR_MAX + 1;
    let expr = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    let e = eval_err(&expr);
    assert_eq!(e.kind(), "SyntaxError");
    assert!(e.message().contains("trop imbriquée"), "msg={}", e.message());
    budget(t0, max);
}

#[test]
fn sci_stress_prefixes_enchaines() {
    let e = eval_err(&format!("{}1", "-".repeat(PROFONDEUR_MAX * 2)));
    assert_eq!(e.kind(), "SyntaxError");

    assert_valeur(&format!("{}1", "-".repeat(10)), "1");
    assert_valeur(&format!("{}1", "-".repeat(11)), "-1");
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["0.5"; 200].join(" + ");
    let c = eval_ok(&expr);
    budget(t0, max);

    assert_eq!(c.affichage, "100");
    assert_eq!(c.termes.len(), 200);
    assert_eq!(c.etapes.len(), 199);
}

#[test]
fn sci_stress_chaine_gauche_tres_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    // 20 000 termes : refus propre au parseur, pas de débordement de pile
    let e = eval_err(&vec!["1"; 20_000].join("+"));
    assert_eq!(e.kind(), "SyntaxError");
    assert!(e.message().contains("trop imbriquée"), "msg={}", e.message());
    let pos = 2 * HAUTEUR_MAX - 1;
    assert_eq!(e.plage(), Plage::new(pos, pos + 1));
    budget(t0, max);

    // pile à la limite : évaluée, termes et cumuls compris
    let c = eval_ok(&vec!["1"; HAUTEUR_MAX].join("+"));
    assert_eq!(c.affichage, HAUTEUR_MAX.to_string());
    assert_eq!(c.termes.len(), HAUTEUR_MAX);
    assert_eq!(c.etapes.len(), HAUTEUR_MAX - 1);
    budget(t0, max);
}

#[test]
fn sci_stress_bigint() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let big = "9".repeat(100);
    let c = eval_ok(&format!("{big} + 1"));
    assert_eq!(c.affichage, format!("1{}", "0".repeat(100)));

    let c = eval_ok("2 ^ 1000");
    assert_eq!(c.affichage.len(), 302);
    budget(t0, max);
}

#[test]
fn sci_puissance_trop_volumineuse_interne() {
    let e = eval_err("123456789 ^ 999999");
    assert_eq!(e.kind(), "EvalError");
    assert_eq!(e.code(), "EVAL_INTERNAL");
    assert_eq!(e.plage(), Plage::new(0, 18));
    assert_eq!(format_decimal(&eval_ok("1 ^ 999999").valeur), "1");
}

#[test]
fn sci_puissance_a_la_limite_sans_gel() {
    let t0 = Instant::now();
    let max = Duration::from_secs(30);

    // 4 bits × 10^6 : exactement bits_max
    let c = eval_ok("0.1 ^ 1000000");
    assert_eq!(c.affichage, "0");
    assert!(!c.valeur.is_zero());
    assert_eq!(c.etapes, vec!["0.1 ^ 1000000 = 0"]);
    budget(t0, max);

    // 1.1^999999 ≈ 10^41392.64 : 41 393 chiffres avant la virgule
    let base: Decimal = "1.1".parse().unwrap();
    let v = base
        .puissance(&Decimal::from(999_999), &Contexte::default())
        .unwrap();
    let affichage = format_decimal(&v);
    let entier = affichage.split('.').next().unwrap_or("");
    assert_eq!(entier.len(), 41_393);
    budget(t0, max);
}
