//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : jamais de panique ; toute erreur est une ParseError
//! - une expression bien formée donne toujours une valeur (éventuellement ∞ / NaN)

use std::time::{Duration, Instant};

use super::{eval_expression, format_valeur, AngleUnit, EvaluationConfig};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    let s = if rng.coin() {
        format!("{entier}.{}", rng.pick(100))
    } else {
        format!("{entier}")
    };
    if rng.pick(4) == 0 {
        format!("-{s}")
    } else {
        s
    }
}

fn gen_chiffres(rng: &mut Rng, max: u32) -> String {
    (0..rng.pick(max + 1))
        .map(|_| char::from(b'0' + rng.pick(10) as u8))
        .collect()
}

/// Littéral seul, toutes formes : "12", "12.5", ".5", "5.", "007.250", signe optionnel.
fn gen_litteral(rng: &mut Rng) -> String {
    let entier = gen_chiffres(rng, 9);
    let corps = match rng.pick(3) {
        0 if !entier.is_empty() => entier,
        1 if !entier.is_empty() => format!("{entier}."),
        _ => {
            let mut frac = gen_chiffres(rng, 7);
            if frac.is_empty() {
                frac.push('0');
            }
            format!("{entier}.{frac}")
        }
    };
    if rng.pick(4) == 0 {
        format!("-{corps}")
    } else {
        corps
    }
}

fn gen_args(rng: &mut Rng, depth: usize, n: usize) -> String {
    (0..n)
        .map(|_| gen_expr(rng, depth))
        .collect::<Vec<_>>()
        .join(",")
}

/// Expressions toujours bien formées (sans fonction trig : indépendantes de l’unité).
fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }
    let d = depth - 1;

    match rng.pick(12) {
        0 => gen_nombre(rng),
        1 => format!("({}+{})", gen_expr(rng, d), gen_expr(rng, d)),
        2 => format!("({}-{})", gen_expr(rng, d), gen_expr(rng, d)),
        3 => format!("({}*{})", gen_expr(rng, d), gen_expr(rng, d)),
        4 => format!("({}/{})", gen_expr(rng, d), gen_expr(rng, d)),
        5 => format!("({}^{})", gen_expr(rng, d), gen_nombre(rng)),
        // multiplication implicite
        6 => format!("{}({})", rng.pick(10), gen_expr(rng, d)),
        7 => format!("({})({})", gen_expr(rng, d), gen_expr(rng, d)),
        8 => {
            let n = 1 + rng.pick(4) as usize;
            let f = ["avg", "min", "max", "med"][rng.pick(4) as usize];
            format!("{f}({})", gen_args(rng, d, n))
        }
        9 => format!("rad({},{})", gen_expr(rng, d), gen_args(rng, d, 1)),
        10 => {
            let f = ["sqrt", "log", "ln", "ceil", "floor", "int"][rng.pick(6) as usize];
            format!("{f}({})", gen_expr(rng, d))
        }
        _ => format!("factorial({})", rng.pick(12)),
    }
}

/// Soupe de caractères du langage (et quelques intrus) : souvent invalide.
fn gen_soupe(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', '+', '-', '*', '/', '^', 'E', '(', ')', ',', ' ', 's', 'q', 'r',
        't', 'm', 'a', 'x', '#', 'é',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/// Empreinte comparable (NaN inclus) d’un résultat.
fn empreinte(expr: &str, config: EvaluationConfig) -> String {
    match eval_expression(expr, config) {
        Ok((Some(v), _d)) => format_valeur(v),
        Ok((None, _d)) => "vide".to_string(),
        Err(e) => format!("erreur: {e}"),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_formees_donnent_une_valeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr, EvaluationConfig::default()) {
            Ok((Some(_v), d)) => {
                assert!(!d.rpn.is_empty(), "expr={expr:?} : RPN vide");
            }
            Ok((None, _)) => panic!("expr={expr:?} : aucune valeur"),
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }
}

#[test]
fn fuzz_safe_litteraux_comme_f64() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x11_7E_4A_u64);

    for _ in 0..400 {
        budget(t0, max);

        let lit = gen_litteral(&mut rng);
        let attendu: f64 = lit
            .parse()
            .unwrap_or_else(|e| panic!("littéral généré invalide {lit:?}: {e}"));

        let v = match eval_expression(&lit, EvaluationConfig::default()) {
            Ok((Some(v), _d)) => v,
            autre => panic!("lit={lit:?} : {autre:?}"),
        };
        assert!(
            (v - attendu).abs() <= 1e-5 * attendu.abs().max(1.0),
            "lit={lit:?} : {v} au lieu de {attendu}"
        );
    }
}

#[test]
fn fuzz_safe_determinisme_et_independance_de_l_unite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let deg = EvaluationConfig::new(AngleUnit::Degrees);
    let rad = EvaluationConfig::new(AngleUnit::Radians);

    // Même seed => mêmes expressions => mêmes sorties
    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);

        let r1 = empreinte(&ea, deg);
        assert_eq!(r1, empreinte(&ea, deg), "expr={ea:?}");
        // aucune fonction trig générée : l’unité ne change rien
        assert_eq!(r1, empreinte(&ea, rad), "expr={ea:?}");
    }
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let len = 1 + rng.pick(24) as usize;
        let expr = gen_soupe(&mut rng, len);

        // Seule exigence : un Result, jamais de panique.
        match eval_expression(&expr, EvaluationConfig::default()) {
            Ok(_) => seen_ok += 1,
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 0, "aucun succès: fuzz trop “sauvage”");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let (v, _d) = eval_expression(&expr, EvaluationConfig::default())
        .unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v, Some(400.0));
}
