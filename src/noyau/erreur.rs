// src/noyau/erreur.rs
//
// Taxonomie des erreurs structurelles du noyau.
// Les cas numériques (division par zéro, sqrt(-1), log(0)) ne sont PAS des erreurs :
// ils donnent ∞ / NaN à l’évaluation.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Littéral numérique illisible (ex: "1.2.3", "-" isolé).
    #[error("nombre invalide: '{lexeme}'")]
    MalformedNumber { lexeme: String },

    /// Expression structurellement incomplète ou incohérente.
    #[error("erreur de syntaxe: {0}")]
    Syntax(String),

    #[error("fonction inconnue: '{0}'")]
    UnknownFunction(String),

    #[error("'{name}' attend {expected} argument(s), reçu {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

impl ParseError {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        ParseError::Syntax(msg.into())
    }
}
