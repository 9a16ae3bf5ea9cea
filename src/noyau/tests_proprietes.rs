//! Propriétés (proptest) : ré-impression, termes, normalisation, lexer.

use proptest::prelude::*;

use super::decimal::{Contexte, Decimal};
use super::jetons::{tokenize, Tok};
use super::normalise::normalise;
use super::eval_expression;

fn arb_nombre() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..1000).prop_map(|(e, f)| format!("{e}.{f}")),
        (1u32..100).prop_map(|n| format!(".{n}")),
        (1u32..10).prop_map(|n| format!("{n}_000")),
    ]
}

fn arb_expr(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_nombre().boxed();
    }

    let leaf = arb_nombre();
    let binaire = (
        arb_expr(depth - 1),
        prop_oneof![Just("+"), Just("-"), Just("*"), Just("/"), Just("%")],
        arb_expr(depth - 1),
        any::<bool>(),
    )
        .prop_map(|(g, op, d, nu)| {
            if nu {
                format!("{g} {op} {d}")
            } else {
                format!("({g} {op} {d})")
            }
        });
    let unaire = arb_expr(depth - 1).prop_map(|e| format!("-{e}"));
    let puissance = (arb_expr(depth - 1), -2i32..4, any::<bool>()).prop_map(|(b, n, etoiles)| {
        let op = if etoiles { "**" } else { "^" };
        format!("({b}) {op} {n}")
    });
    prop_oneof![leaf, binaire, unaire, puissance].boxed()
}

proptest! {
    #[test]
    fn reimpression_garde_la_valeur(expr in arb_expr(3)) {
        let ctx = Contexte::default();
        if let Ok(c) = eval_expression(&expr, &ctx) {
            let relu = eval_expression(&c.expression, &ctx)
                .expect("la ré-impression doit se relire");
            prop_assert_eq!(&relu.valeur, &c.valeur);
            prop_assert_eq!(&relu.expression, &c.expression);
        }
    }

    #[test]
    fn somme_des_termes_egale_le_total(expr in arb_expr(3)) {
        if let Ok(c) = eval_expression(&expr, &Contexte::default()) {
            let somme = c
                .termes
                .iter()
                .fold(Decimal::zero(), |acc, t| acc.additionner(&t.valeur));
            prop_assert_eq!(&somme, &c.valeur);
            prop_assert!(!c.termes.is_empty());
        }
    }

    #[test]
    fn normalisation_idempotente(s in "[0-9 .,_+*/%^()a-z×÷−–—·％＾，１２（）￥]{0,24}") {
        let une = normalise(&s);
        prop_assert_eq!(normalise(&une), une);
    }

    #[test]
    fn lexer_ne_panique_jamais(s in "\\PC{0,32}") {
        if let Ok(jetons) = tokenize(&s) {
            let n = s.chars().count();
            let fin_unique = matches!(jetons.last(), Some(Tok::Fin { .. }));
            prop_assert!(fin_unique);
            let fins = jetons.iter().filter(|t| matches!(t, Tok::Fin { .. })).count();
            prop_assert_eq!(fins, 1);

            // plages croissantes, dans la source
            let mut precedent = 0usize;
            for t in &jetons {
                let p = t.plage();
                prop_assert!(p.start >= precedent && p.end <= n);
                precedent = p.end;
            }
        }
    }
}
