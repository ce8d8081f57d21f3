// src/noyau/format.rs
//
// Rendus texte pour la démarche et l’affichage du résultat.

use super::jetons::{Operateur, Tok};

fn format_op(op: &Operateur) -> &str {
    match op {
        Operateur::Add => "+",
        Operateur::Sub => "-",
        Operateur::Mul => "*",
        Operateur::Div => "/",
        Operateur::Pow => "^",
        Operateur::Sci => "E",
        Operateur::Fonction(nom) => nom.as_str(),
    }
}

/// Liste de jetons en texte, séparés par des espaces.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => v.to_string(),
            Tok::Op(op) => format_op(op).to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}

/// Résultat numérique : forme la plus courte ; ∞ / -∞ ; NaN => "indéfini".
pub fn format_valeur(v: f64) -> String {
    if v.is_nan() {
        return "indéfini".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    // -0 s’affiche 0
    if v == 0.0 {
        return "0".to_string();
    }
    v.to_string()
}
