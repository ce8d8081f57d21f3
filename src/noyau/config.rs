// src/noyau/config.rs
//
// Configuration d’évaluation : une VALEUR immuable passée à chaque évaluation.
// Aucun état partagé : deux évaluations concurrentes ne se voient pas.

/// Unité d’angle pour sin/cos/tan (argument) et arcsin/arccos/arctan (résultat).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Libellé court (affichage UI).
    pub fn label(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "DEG",
            AngleUnit::Radians => "RAD",
        }
    }

    pub fn basculer(self) -> Self {
        match self {
            AngleUnit::Degrees => AngleUnit::Radians,
            AngleUnit::Radians => AngleUnit::Degrees,
        }
    }

    /// Argument trig -> radians.
    pub(crate) fn vers_radians(self, x: f64) -> f64 {
        match self {
            AngleUnit::Degrees => x.to_radians(),
            AngleUnit::Radians => x,
        }
    }

    /// Résultat trig inverse (radians) -> unité courante.
    pub(crate) fn depuis_radians(self, x: f64) -> f64 {
        match self {
            AngleUnit::Degrees => x.to_degrees(),
            AngleUnit::Radians => x,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationConfig {
    pub angle_unit: AngleUnit,
}

impl EvaluationConfig {
    pub fn new(angle_unit: AngleUnit) -> Self {
        Self { angle_unit }
    }
}
