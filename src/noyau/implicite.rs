// src/noyau/implicite.rs
//
// Multiplication implicite : "43(24)", "(43)(24)", "2sqrt(9)".
// On insère un Mul entre deux jetons juxtaposés ; seule l’adjacence d’origine compte.

use super::jetons::{Operateur, Tok};

/// Vrai si la paire (a, b) désigne deux termes juxtaposés.
fn juxtaposes(a: &Tok, b: &Tok) -> bool {
    match (a, b) {
        (Tok::Num(_), Tok::LPar) => true,
        (Tok::Num(_), b) if b.est_fonction() => true,
        (Tok::RPar, Tok::Num(_)) => true,
        (Tok::RPar, b) if b.est_fonction() => true,
        (Tok::RPar, Tok::LPar) => true,
        _ => false,
    }
}

pub fn expand(tokens: &[Tok]) -> Vec<Tok> {
    let mut out = Vec::with_capacity(tokens.len() + tokens.len() / 2);

    for (i, tok) in tokens.iter().enumerate() {
        if i > 0 && juxtaposes(&tokens[i - 1], tok) {
            out.push(Tok::Op(Operateur::Mul));
        }
        out.push(tok.clone());
    }

    out
}
