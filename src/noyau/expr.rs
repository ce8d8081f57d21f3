// src/noyau/expr.rs
//
// AST flottant.
// - Lit     : littéral f64
// - Binaire : exactement deux enfants, toujours
// - Appel   : fonction DÉJÀ résolue dans le registre + arguments dans l’ordre écrit
//
// Arbre strict : chaque noeud appartient à son parent (Box / Vec), pas de partage.

use std::fmt;

use super::jetons::Operateur;
use super::registre::Fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Sci,
}

impl OpBinaire {
    /// None pour une fonction (pas un opérateur binaire).
    pub fn depuis(op: &Operateur) -> Option<Self> {
        match op {
            Operateur::Add => Some(OpBinaire::Add),
            Operateur::Sub => Some(OpBinaire::Sub),
            Operateur::Mul => Some(OpBinaire::Mul),
            Operateur::Div => Some(OpBinaire::Div),
            Operateur::Pow => Some(OpBinaire::Pow),
            Operateur::Sci => Some(OpBinaire::Sci),
            Operateur::Fonction(_) => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            OpBinaire::Add => "+",
            OpBinaire::Sub => "-",
            OpBinaire::Mul => "*",
            OpBinaire::Div => "/",
            OpBinaire::Pow => "^",
            OpBinaire::Sci => "E",
        }
    }

    /// IEEE-754 : a/0 donne ±∞ ou NaN, jamais de panique.
    pub fn appliquer(self, a: f64, b: f64) -> f64 {
        match self {
            OpBinaire::Add => a + b,
            OpBinaire::Sub => a - b,
            OpBinaire::Mul => a * b,
            OpBinaire::Div => a / b,
            OpBinaire::Pow => a.powf(b),
            OpBinaire::Sci => a * 10f64.powf(b),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(f64),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(&'static Fonction, Vec<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, g: Expr, d: Expr) -> Expr {
        Expr::Binaire(op, Box::new(g), Box::new(d))
    }

    /// Nombre de noeuds (itératif : pas de récursion sur la profondeur).
    pub fn taille(&self) -> usize {
        let mut pile: Vec<&Expr> = vec![self];
        let mut n = 0usize;

        while let Some(e) = pile.pop() {
            n += 1;
            match e {
                Expr::Lit(_) => {}
                Expr::Binaire(_, g, d) => {
                    pile.push(g.as_ref());
                    pile.push(d.as_ref());
                }
                Expr::Appel(_, args) => pile.extend(args.iter()),
            }
        }

        n
    }
}

/// Rendu infixe entièrement parenthésé : "((2 + 3) * 4)", "max(1, 2)".
///
/// Parcours avec pile explicite : la profondeur de l’arbre n’est pas bornée.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Morceau<'a> {
            Noeud(&'a Expr),
            Texte(&'static str),
        }

        let mut pile = vec![Morceau::Noeud(self)];

        while let Some(m) = pile.pop() {
            match m {
                Morceau::Texte(t) => f.write_str(t)?,
                Morceau::Noeud(Expr::Lit(v)) => write!(f, "{v}")?,
                Morceau::Noeud(Expr::Binaire(op, g, d)) => {
                    // empilé à l’envers
                    pile.push(Morceau::Texte(")"));
                    pile.push(Morceau::Noeud(d));
                    pile.push(Morceau::Texte(" "));
                    pile.push(Morceau::Texte(op.symbole()));
                    pile.push(Morceau::Texte(" "));
                    pile.push(Morceau::Noeud(g));
                    f.write_str("(")?;
                }
                Morceau::Noeud(Expr::Appel(fonction, args)) => {
                    f.write_str(fonction.nom())?;
                    f.write_str("(")?;
                    pile.push(Morceau::Texte(")"));
                    for (i, a) in args.iter().enumerate().rev() {
                        pile.push(Morceau::Noeud(a));
                        if i > 0 {
                            pile.push(Morceau::Texte(", "));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Libération itérative : les sous-arbres non triviaux sont détachés sur une
/// pile au lieu d’être libérés par récursion.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile: Vec<Expr> = Vec::new();
        detacher_enfants(self, &mut pile);

        while let Some(mut e) = pile.pop() {
            detacher_enfants(&mut e, &mut pile);
            // `e` n’a plus que des feuilles : sa libération est plate
        }
    }
}

fn detacher_enfants(e: &mut Expr, pile: &mut Vec<Expr>) {
    match e {
        Expr::Lit(_) => {}
        Expr::Binaire(_, g, d) => {
            for enfant in [g, d] {
                if !matches!(**enfant, Expr::Lit(_)) {
                    pile.push(std::mem::replace(enfant.as_mut(), Expr::Lit(0.0)));
                }
            }
        }
        Expr::Appel(_, args) => {
            pile.extend(args.drain(..).filter(|a| !matches!(a, Expr::Lit(_))));
        }
    }
}
