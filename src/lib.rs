//! Calculatrice scientifique : texte -> jetons -> RPN -> arbre -> f64.
//!
//! ```
//! use calculatrice_sci::noyau::{evaluate, parse, EvaluationConfig};
//!
//! let arbre = parse("2sqrt(9) + max(1, 4)").unwrap().unwrap();
//! assert_eq!(evaluate(&arbre, EvaluationConfig::default()), 10.0);
//! ```

pub mod noyau;
