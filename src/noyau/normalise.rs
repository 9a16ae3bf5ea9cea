// src/noyau/normalise.rs
//
// Normalisation du texte AVANT tokenisation.
// NFKC (pleine chasse -> ASCII), puis glyphes mathématiques courants -> opérateurs ASCII.
// Totale et idempotente : normalise(normalise(s)) == normalise(s).

use unicode_normalization::UnicodeNormalization;

/// Glyphes que NFKC laisse passer (ou produit) et qu’on ramène à l’ASCII.
fn glyphe_ascii(c: char) -> Option<char> {
    match c {
        '×' | '✕' | '✖' | '·' | '・' => Some('*'),
        '÷' | '／' => Some('/'),
        '−' | '–' | '—' => Some('-'),
        '％' => Some('%'),
        '＾' => Some('^'),
        '￥' | '¥' => Some('\\'),
        '，' => Some(','),
        _ => None,
    }
}

pub fn normalise(s: &str) -> String {
    s.nfkc().map(|c| glyphe_ascii(c).unwrap_or(c)).collect()
}
