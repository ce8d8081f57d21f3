// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix) -> AST
//
// Règles:
// - Précédences : + - (1) < * / (2) < ^ E (3) < fonction (4)
// - Associativité à GAUCHE pour tous les opérateurs, y compris ^ et E :
//   "2^3^2" => (2^3)^2 = 64
// - Fonctions : poussées sur la pile, sorties à la parenthèse fermante
//   précédées du nombre d’arguments (Num(virgules + 1)).
//   "rad(27, 9)" => 27 9 2 rad
// - Virgules : bornes d’argument sur la pile, jamais émises.
//
// Reconstruction : le Num qui précède chaque fonction est consommé comme
// nombre d’arguments n ; les n noeuds du dessous redeviennent les arguments
// dans l’ordre d’écriture (rad n’est pas commutatif).

use num_traits::ToPrimitive;

use super::erreur::ParseError;
use super::expr::{Expr, OpBinaire};
use super::jetons::{Operateur, Tok};
use super::registre::{lookup, Arite};

/// Convertit une suite de jetons (déjà développée) en RPN.
///
/// Exemple:
///   tokens: [Op(Fonction("max")), LPar, Num(1), Virgule, Num(2), RPar]
///   rpn:    [Num(1), Num(2), Num(2), Op(Fonction("max"))]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ParseError> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() + 4);
    let mut ops: Vec<Tok> = Vec::new();

    let mut precedent: Option<&Tok> = None;

    // Alternance opérande / opérateur : vrai tant qu’un opérande est attendu.
    // Les juxtapositions légales sont déjà des Mul explicites (implicite.rs).
    let mut attend_operande = true;

    for tok in tokens {
        if let Some(p) = precedent {
            if p.est_fonction() && !matches!(tok, Tok::LPar) {
                return Err(ParseError::syntaxe("fonction sans parenthèse ouvrante"));
            }
        }

        match tok {
            Tok::Num(_) => {
                if !attend_operande {
                    return Err(ParseError::syntaxe("opérateur manquant avant un nombre"));
                }
                out.push(tok.clone());
                attend_operande = false;
            }

            Tok::LPar => {
                if !attend_operande {
                    return Err(ParseError::syntaxe("opérateur manquant avant '('"));
                }
                ops.push(Tok::LPar);
            }

            Tok::Op(op) if op.est_fonction() => {
                if !attend_operande {
                    return Err(ParseError::syntaxe("opérateur manquant avant une fonction"));
                }
                ops.push(tok.clone());
            }

            Tok::Op(_) => {
                if attend_operande {
                    return Err(ParseError::syntaxe("opérande manquant avant un opérateur"));
                }
                attend_operande = true;

                let p = tok.precedence();
                while ops.last().is_some_and(|top| top.precedence() >= p) {
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(tok.clone());
            }

            Tok::Virgule => {
                if attend_operande {
                    return Err(ParseError::syntaxe("argument vide ou incomplet"));
                }
                attend_operande = true;

                // dépile jusqu’à la borne d’argument (laissée en place)
                while ops
                    .last()
                    .is_some_and(|top| !matches!(top, Tok::LPar | Tok::Virgule))
                {
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(Tok::Virgule);
            }

            Tok::RPar => {
                if matches!(precedent, Some(Tok::LPar) | Some(Tok::Virgule)) {
                    return Err(ParseError::syntaxe("argument vide"));
                }
                if attend_operande {
                    return Err(ParseError::syntaxe("opérande manquant avant ')'"));
                }

                let mut virgules = 0usize;
                loop {
                    match ops.pop() {
                        None => {
                            return Err(ParseError::syntaxe(
                                "parenthèse fermante sans ouvrante",
                            ))
                        }
                        Some(Tok::LPar) => break,
                        Some(Tok::Virgule) => virgules += 1,
                        Some(t) => out.push(t),
                    }
                }

                // fonction au sommet : on la sort avec son nombre d’arguments
                match ops.last() {
                    Some(top) if top.est_fonction() => {
                        out.push(Tok::Num((virgules + 1) as f64));
                        if let Some(f) = ops.pop() {
                            out.push(f);
                        }
                    }
                    _ if virgules > 0 => {
                        return Err(ParseError::syntaxe("virgule hors d’un appel de fonction"));
                    }
                    _ => {}
                }
            }
        }

        precedent = Some(tok);
    }

    if precedent.is_some_and(Tok::est_fonction) {
        return Err(ParseError::syntaxe("fonction sans parenthèse ouvrante"));
    }
    if precedent.is_some() && attend_operande {
        return Err(ParseError::syntaxe("opérateur en fin d’expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Tok::LPar => return Err(ParseError::syntaxe("parenthèses non fermées")),
            Tok::Virgule => {
                return Err(ParseError::syntaxe("virgule hors d’un appel de fonction"))
            }
            _ => out.push(op),
        }
    }

    tracing::debug!(entree = tokens.len(), sortie = out.len(), "RPN");
    Ok(out)
}

/// Construit l’AST à partir d’une RPN produite par `to_rpn`.
///
/// - None seulement pour une RPN vide.
/// - Fonction inconnue => UnknownFunction ; mauvaise arité fixe => ArityMismatch.
pub fn from_rpn(rpn: &[Tok]) -> Result<Option<Expr>, ParseError> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(Expr::Lit(*v)),

            Tok::Op(Operateur::Fonction(nom)) => {
                let n = nombre_d_arguments(st.pop())?;
                if st.len() < n {
                    return Err(ParseError::syntaxe(format!(
                        "arguments manquants pour '{nom}'"
                    )));
                }
                // les n derniers noeuds, dans l’ordre d’écriture
                let args = st.split_off(st.len() - n);

                let fonction =
                    lookup(nom).ok_or_else(|| ParseError::UnknownFunction(nom.clone()))?;

                if let Arite::Fixe(k) = fonction.arite() {
                    if k != n {
                        return Err(ParseError::ArityMismatch {
                            name: nom.clone(),
                            expected: k,
                            got: n,
                        });
                    }
                }

                st.push(Expr::Appel(fonction, args));
            }

            Tok::Op(op) => {
                let op = OpBinaire::depuis(op)
                    .ok_or_else(|| ParseError::syntaxe("opérateur inattendu"))?;
                let d = st
                    .pop()
                    .ok_or_else(|| ParseError::syntaxe("opérande manquant"))?;
                let g = st
                    .pop()
                    .ok_or_else(|| ParseError::syntaxe("opérande manquant"))?;
                st.push(Expr::binaire(op, g, d));
            }

            Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ParseError::syntaxe("parenthèse ou virgule inattendue en RPN"))
            }
        }
    }

    match st.len() {
        0 | 1 => Ok(st.pop()),
        _ => Err(ParseError::syntaxe("opérandes sans opérateur")),
    }
}

/// Le noeud qui précède une fonction en RPN doit être un entier littéral >= 1.
fn nombre_d_arguments(noeud: Option<Expr>) -> Result<usize, ParseError> {
    match noeud.as_ref() {
        Some(&Expr::Lit(v)) if v.fract() == 0.0 => v
            .to_usize()
            .filter(|n| *n >= 1)
            .ok_or_else(|| ParseError::syntaxe("nombre d’arguments invalide")),
        _ => Err(ParseError::syntaxe("nombre d’arguments invalide")),
    }
}
