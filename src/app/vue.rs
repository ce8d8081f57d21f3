// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Boutons de fonctions construits depuis le registre du noyau
// - Bascule DEG/RAD (seules sin/cos/tan et arcsin/arccos/arctan en dépendent)

use eframe::egui;

use calculatrice_sci::noyau::{eval_expression, fonctions, format_valeur, noms_fonctions, Fonction};

use super::etat::{AppCalc, LONGUEUR_MAX};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2sqrt(9), med(1,5,3), rad(27,3), 0.42E2, sin(30)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Actions + unité d’angle
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            let label = self.unite.label();
            self.bouton_action(
                ui,
                label,
                "Unité d’angle pour la trigonométrie",
                Action::BasculerUnite,
            );
        });

        ui.add_space(8.0);

        // Opérateurs + "="
        ui.horizontal_wrapped(|ui| {
            for op in ["(", ")", ",", "+", "-", "*", "/", "^", "E"] {
                self.bouton_insert(ui, op, op);
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        // Fonctions du registre
        ui.horizontal_wrapped(|ui| {
            for fonction in fonctions() {
                self.bouton_fonction(ui, fonction);
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [["7", "8", "9"], ["4", "5", "6"], ["1", "2", "3"]] {
                    for chiffre in ligne {
                        self.bouton_insert(ui, chiffre, chiffre);
                    }
                    ui.end_row();
                }

                self.bouton_insert(ui, "0", "0");
                self.bouton_insert(ui, ".", ".");
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup un appel ouvert ("sqrt(", "avg(", ...).
    fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // le plus long d’abord : "arcsin(" et non "sin("
        let appel_ouvert = noms_fonctions()
            .map(|nom| format!("{nom}("))
            .filter(|pat| self.entree.ends_with(pat.as_str()))
            .max_by_key(String::len);

        match appel_ouvert {
            Some(pat) => {
                let reste = self.entree.len() - pat.len();
                self.entree.truncate(reste);
            }
            None => {
                self.entree.pop();
            }
        }
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Résultat ({}) :", self.unite.label()));
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(
                    ui,
                    "Multiplication implicite",
                    "demarche_developpes",
                    &self.demarche.developpes,
                );
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 1);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : Frame + Label monospace (pas de TextEdit).
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
                Action::BasculerUnite => self.basculer_unite(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if resp.clicked() {
            self.entree.push_str(to_insert);
            self.focus_entree = true;
        }
    }

    /// Insère "nom(" ; le survol rappelle l’arité attendue.
    fn bouton_fonction(&mut self, ui: &mut egui::Ui, fonction: &Fonction) {
        let resp = ui
            .add_sized([46.0, 28.0], egui::Button::new(fonction.nom()))
            .on_hover_text(aide_fonction(fonction));
        if resp.clicked() {
            self.entree.push_str(fonction.nom());
            self.entree.push('(');
            self.focus_entree = true;
        }
    }

    /// Évalue l’expression via le noyau, puis dépose résultat + démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        self.focus_entree = true;

        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }
        if s.len() > LONGUEUR_MAX {
            self.set_erreur(format!("Entrée trop longue (max {LONGUEUR_MAX} octets)"));
            return;
        }

        match eval_expression(s, self.config()) {
            Ok((Some(v), demarche)) => self.set_resultat(format_valeur(v), demarche),
            Ok((None, _)) => self.set_erreur("Entrée vide"),
            Err(e) => {
                tracing::warn!(erreur = %e, "expression refusée");
                self.set_erreur(e.to_string());
            }
        }
    }
}

fn aide_fonction(fonction: &Fonction) -> String {
    format!("{}(…) : {} argument(s)", fonction.nom(), fonction.arite())
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
    BasculerUnite,
}
