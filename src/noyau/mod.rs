//! Noyau calculatrice scientifique (f64)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation (littéraux négatifs, E, noms de fonctions)
//! - implicite.rs : multiplication implicite ("2(3)", "(2)(3)", "2sqrt(9)")
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST (Lit / Binaire / Appel)
//! - registre.rs  : table statique des fonctions
//! - config.rs    : unité d’angle (valeur immuable)
//! - format.rs    : rendus texte (jetons, valeurs)
//! - erreur.rs    : ParseError
//! - eval.rs      : pipeline complet

pub mod config;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod implicite;
pub mod jetons;
pub mod registre;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use config::{AngleUnit, EvaluationConfig};
pub use erreur::ParseError;
pub use eval::{eval_expression, evaluate, parse, Demarche};
pub use expr::{Expr, OpBinaire};
pub use format::{format_tokens, format_valeur};
pub use jetons::{scan, Operateur, Tok};
pub use registre::{fonctions, noms_fonctions, Arite, Fonction};

/// Traces visibles dans les tests (RUST_LOG, sinon DEBUG).
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    // déjà initialisé par un autre test : on ignore
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
