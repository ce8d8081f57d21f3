// src/noyau/jetons.rs

use super::erreur::ParseError;

/// Opérateurs reconnus. `Fonction` porte le nom (minuscules) tel qu’écrit.
#[derive(Clone, Debug, PartialEq)]
pub enum Operateur {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Sci, // E : a·10^b

    Fonction(String),
}

impl Operateur {
    pub fn precedence(&self) -> u8 {
        match self {
            Operateur::Add | Operateur::Sub => 1,
            Operateur::Mul | Operateur::Div => 2,
            Operateur::Pow | Operateur::Sci => 3,
            Operateur::Fonction(_) => 4,
        }
    }

    pub fn est_fonction(&self) -> bool {
        matches!(self, Operateur::Fonction(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operateur),

    LPar,
    RPar,
    Virgule,
}

impl Tok {
    /// Précédence utilisée par le shunting-yard (0 pour tout ce qui n’est pas opérateur).
    pub fn precedence(&self) -> u8 {
        match self {
            Tok::Op(op) => op.precedence(),
            _ => 0,
        }
    }

    pub fn est_fonction(&self) -> bool {
        matches!(self, Tok::Op(op) if op.est_fonction())
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5)
/// - littéraux négatifs (ex: -2, 3*-2, (-4), f(1,-1))
/// - opérateurs + - * / ^ et E (notation scientifique)
/// - parenthèses ( ) et virgules
/// - noms de fonctions en minuscules [a-z]+
///
/// Tout autre caractère est ignoré. Seul échec possible : un littéral illisible.
pub fn scan(s: &str) -> Result<Vec<Tok>, ParseError> {
    let mut out: Vec<Tok> = Vec::new();

    // Deux tampons : les seuls lexèmes sur plusieurs caractères.
    let mut nombre = String::new();
    let mut nom = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            vider_nom(&mut nom, &mut out);
            nombre.push(c);
            continue;
        }

        if c.is_ascii_lowercase() {
            vider_nombre(&mut nombre, &mut out)?;
            nom.push(c);
            continue;
        }

        // "- 3" : un signe en attente traverse les espaces
        if c.is_whitespace() && nombre == "-" {
            continue;
        }

        vider_nombre(&mut nombre, &mut out)?;
        vider_nom(&mut nom, &mut out);

        match c {
            '+' => out.push(Tok::Op(Operateur::Add)),
            '-' => {
                if debut_de_litteral(out.last()) {
                    nombre.push('-');
                } else {
                    out.push(Tok::Op(Operateur::Sub));
                }
            }
            '*' => out.push(Tok::Op(Operateur::Mul)),
            '/' => out.push(Tok::Op(Operateur::Div)),
            '^' => out.push(Tok::Op(Operateur::Pow)),
            'E' => out.push(Tok::Op(Operateur::Sci)),
            '(' => out.push(Tok::LPar),
            ')' => out.push(Tok::RPar),
            ',' => out.push(Tok::Virgule),
            _ => {}
        }
    }

    vider_nombre(&mut nombre, &mut out)?;
    vider_nom(&mut nom, &mut out);

    Ok(out)
}

/// Un '-' ouvre un littéral négatif en début d’entrée, après '(', ',' ou un opérateur.
fn debut_de_litteral(precedent: Option<&Tok>) -> bool {
    matches!(
        precedent,
        None | Some(Tok::LPar) | Some(Tok::Virgule) | Some(Tok::Op(_))
    )
}

fn vider_nombre(nombre: &mut String, out: &mut Vec<Tok>) -> Result<(), ParseError> {
    if nombre.is_empty() {
        return Ok(());
    }

    let lexeme = std::mem::take(nombre);
    let v: f64 = lexeme
        .parse()
        .map_err(|_| ParseError::MalformedNumber {
            lexeme: lexeme.clone(),
        })?;

    tracing::trace!(%lexeme, valeur = v, "littéral");
    out.push(Tok::Num(v));
    Ok(())
}

fn vider_nom(nom: &mut String, out: &mut Vec<Tok>) {
    if nom.is_empty() {
        return;
    }
    let nom = std::mem::take(nom);
    tracing::trace!(%nom, "nom de fonction");
    out.push(Tok::Op(Operateur::Fonction(nom)));
}
