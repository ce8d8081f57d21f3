//! Noyau — évaluation (pipeline réel)
//!
//! scan -> multiplication implicite -> RPN -> Expr -> f64
//!
//! Chaque étape est une fonction pure de son entrée ; seule l’évaluation reçoit
//! en plus la configuration (unité d’angle), par valeur.

use super::config::EvaluationConfig;
use super::erreur::ParseError;
use super::expr::{Expr, OpBinaire};
use super::format::format_tokens;
use super::implicite::expand;
use super::jetons::scan;
use super::registre::Fonction;
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub developpes: String,
    pub rpn: String,
    pub arbre: String,
}

/// Texte -> arbre. `Ok(None)` pour une entrée sans aucun jeton.
#[tracing::instrument(level = "debug")]
pub fn parse(expr_str: &str) -> Result<Option<Expr>, ParseError> {
    let jetons = scan(expr_str)?;
    let rpn = to_rpn(&expand(&jetons))?;
    from_rpn(&rpn)
}

/// Réduction d’un arbre en une valeur, en post-ordre avec pile explicite
/// (la profondeur de l’arbre ne touche pas la pile d’appels).
///
/// Jamais d’erreur structurelle : les cas limites IEEE-754 (x/0, sqrt(-1),
/// log(0)) donnent ±∞ ou NaN.
pub fn evaluate(expr: &Expr, config: EvaluationConfig) -> f64 {
    enum Tache<'a> {
        Visiter(&'a Expr),
        Binaire(OpBinaire),
        Appel(&'static Fonction, usize),
    }

    let mut taches = vec![Tache::Visiter(expr)];
    let mut valeurs: Vec<f64> = Vec::new();

    while let Some(t) = taches.pop() {
        match t {
            Tache::Visiter(Expr::Lit(v)) => valeurs.push(*v),
            Tache::Visiter(Expr::Binaire(op, g, d)) => {
                taches.push(Tache::Binaire(*op));
                taches.push(Tache::Visiter(d));
                taches.push(Tache::Visiter(g));
            }
            Tache::Visiter(Expr::Appel(fonction, args)) => {
                taches.push(Tache::Appel(*fonction, args.len()));
                taches.extend(args.iter().rev().map(Tache::Visiter));
            }
            Tache::Binaire(op) => {
                let d = valeurs.pop().unwrap_or(f64::NAN);
                let g = valeurs.pop().unwrap_or(f64::NAN);
                valeurs.push(op.appliquer(g, d));
            }
            Tache::Appel(fonction, n) => {
                let args = valeurs.split_off(valeurs.len().saturating_sub(n));
                valeurs.push(fonction.appliquer(&args, config));
            }
        }
    }

    valeurs.pop().unwrap_or(f64::NAN)
}

/// API publique : évalue une expression et retourne:
/// - la valeur (None si l’entrée ne contient aucun jeton)
/// - la démarche (jetons, jetons développés, RPN, arbre)
#[tracing::instrument(level = "debug")]
pub fn eval_expression(
    expr_str: &str,
    config: EvaluationConfig,
) -> Result<(Option<f64>, Demarche), ParseError> {
    // 1) Jetons
    let jetons = scan(expr_str)?;

    // 2) Multiplication implicite
    let developpes = expand(&jetons);

    // 3) RPN
    let rpn = to_rpn(&developpes)?;

    // 4) AST
    let arbre = from_rpn(&rpn)?;

    let mut d = Demarche {
        jetons: format_tokens(&jetons),
        developpes: format_tokens(&developpes),
        rpn: format_tokens(&rpn),
        arbre: String::new(),
    };

    // 5) Valeur
    let valeur = arbre.as_ref().map(|e| {
        d.arbre = e.to_string();
        tracing::debug!(noeuds = e.taille(), "arbre construit");
        evaluate(e, config)
    });

    tracing::debug!(?valeur, jetons = jetons.len(), "évaluation");
    Ok((valeur, d))
}
