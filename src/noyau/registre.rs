// src/noyau/registre.rs
//
// Table statique des fonctions : nom -> (arité, calcul pur).
// Le calcul reçoit les arguments déjà évalués et la configuration (unité d’angle).
//
// ATTENTION (conservé tel quel) : `log` = logarithme NATUREL, `ln` = logarithme en BASE 2.

use std::fmt;

use num_traits::ToPrimitive;

use super::config::EvaluationConfig;

pub type Calcul = fn(&[f64], EvaluationConfig) -> f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Fixe(usize),
    /// Au moins un argument.
    Variadique,
}

impl Arite {
    pub fn accepte(self, n: usize) -> bool {
        match self {
            Arite::Fixe(k) => n == k,
            Arite::Variadique => n >= 1,
        }
    }
}

impl fmt::Display for Arite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arite::Fixe(k) => write!(f, "{k}"),
            Arite::Variadique => f.write_str("1+"),
        }
    }
}

pub struct Fonction {
    nom: &'static str,
    arite: Arite,
    calcul: Calcul,
}

impl Fonction {
    pub fn nom(&self) -> &'static str {
        self.nom
    }

    pub fn arite(&self) -> Arite {
        self.arite
    }

    /// Applique la fonction. Un nombre d’arguments refusé par l’arité donne NaN
    /// (l’arbre construit par `build` ne produit jamais ce cas).
    pub fn appliquer(&self, args: &[f64], config: EvaluationConfig) -> f64 {
        if !self.arite.accepte(args.len()) {
            return f64::NAN;
        }
        (self.calcul)(args, config)
    }
}

impl fmt::Debug for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fonction")
            .field("nom", &self.nom)
            .field("arite", &self.arite)
            .finish()
    }
}

impl PartialEq for Fonction {
    fn eq(&self, other: &Self) -> bool {
        self.nom == other.nom
    }
}

static FONCTIONS: &[Fonction] = &[
    Fonction { nom: "sin", arite: Arite::Fixe(1), calcul: sin },
    Fonction { nom: "cos", arite: Arite::Fixe(1), calcul: cos },
    Fonction { nom: "tan", arite: Arite::Fixe(1), calcul: tan },
    Fonction { nom: "arcsin", arite: Arite::Fixe(1), calcul: arcsin },
    Fonction { nom: "arccos", arite: Arite::Fixe(1), calcul: arccos },
    Fonction { nom: "arctan", arite: Arite::Fixe(1), calcul: arctan },
    Fonction { nom: "sqrt", arite: Arite::Fixe(1), calcul: sqrt },
    Fonction { nom: "rad", arite: Arite::Fixe(2), calcul: rad },
    Fonction { nom: "log", arite: Arite::Fixe(1), calcul: log },
    Fonction { nom: "ln", arite: Arite::Fixe(1), calcul: ln },
    Fonction { nom: "avg", arite: Arite::Variadique, calcul: avg },
    Fonction { nom: "min", arite: Arite::Variadique, calcul: min },
    Fonction { nom: "max", arite: Arite::Variadique, calcul: max },
    Fonction { nom: "med", arite: Arite::Variadique, calcul: med },
    Fonction { nom: "factorial", arite: Arite::Fixe(1), calcul: factorial },
    Fonction { nom: "ceil", arite: Arite::Fixe(1), calcul: ceil },
    Fonction { nom: "floor", arite: Arite::Fixe(1), calcul: floor },
    Fonction { nom: "int", arite: Arite::Fixe(1), calcul: int },
];

pub fn lookup(nom: &str) -> Option<&'static Fonction> {
    FONCTIONS.iter().find(|f| f.nom == nom)
}

/// Noms disponibles, dans l’ordre de la table (boutons UI, messages).
pub fn noms_fonctions() -> impl Iterator<Item = &'static str> {
    fonctions().map(Fonction::nom)
}

/// Toutes les entrées, dans l’ordre du tableau (boutons de l’UI).
pub fn fonctions() -> impl Iterator<Item = &'static Fonction> {
    FONCTIONS.iter()
}

/* ------------------------ Calculs ------------------------ */

fn x(args: &[f64]) -> f64 {
    args.first().copied().unwrap_or(f64::NAN)
}

fn sin(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.vers_radians(x(a)).sin()
}

fn cos(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.vers_radians(x(a)).cos()
}

fn tan(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.vers_radians(x(a)).tan()
}

fn arcsin(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.depuis_radians(x(a).asin())
}

fn arccos(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.depuis_radians(x(a).acos())
}

fn arctan(a: &[f64], c: EvaluationConfig) -> f64 {
    c.angle_unit.depuis_radians(x(a).atan())
}

fn sqrt(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).sqrt()
}

/// rad(x, n) = x^(1/n)
fn rad(a: &[f64], _: EvaluationConfig) -> f64 {
    let n = a.get(1).copied().unwrap_or(f64::NAN);
    x(a).powf(1.0 / n)
}

fn log(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).ln()
}

fn ln(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).log2()
}

fn avg(a: &[f64], _: EvaluationConfig) -> f64 {
    a.iter().sum::<f64>() / a.len() as f64
}

fn min(a: &[f64], _: EvaluationConfig) -> f64 {
    a.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(a: &[f64], _: EvaluationConfig) -> f64 {
    a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn med(a: &[f64], _: EvaluationConfig) -> f64 {
    if a.is_empty() {
        return f64::NAN;
    }
    let mut v = a.to_vec();
    v.sort_by(f64::total_cmp);

    let m = v.len() / 2;
    if v.len() % 2 == 1 {
        v[m]
    } else {
        (v[m - 1] + v[m]) / 2.0
    }
}

/// Produit 1..=trunc(x). Négatif => 1 (produit vide) ; au-delà de 170! => ∞.
fn factorial(a: &[f64], _: EvaluationConfig) -> f64 {
    let n = x(a).trunc();
    if n.is_nan() {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    match n.to_u32() {
        Some(n) => (1..=n).map(f64::from).product(),
        None => 1.0,
    }
}

fn ceil(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).ceil()
}

fn floor(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).floor()
}

fn int(a: &[f64], _: EvaluationConfig) -> f64 {
    x(a).trunc()
}
