use std::time::Duration;

use client_core::{OrderFormController, SubmitError};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{FieldName, SubmissionStatus};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

const SUBMIT_LABEL: &str = "Отправить заявку";
const SENDING_LABEL: &str = "Отправка...";

struct FieldSpec {
    field: FieldName,
    id: &'static str,
    label: &'static str,
    hint: &'static str,
}

const NAME_FIELD: FieldSpec = FieldSpec {
    field: FieldName::Name,
    id: "order_name",
    label: "Имя или организация",
    hint: "Например: Иван, ООО \"Рога и Копыта\"",
};

const TEL_FIELD: FieldSpec = FieldSpec {
    field: FieldName::Tel,
    id: "order_tel",
    label: "Номер телефона",
    hint: "+7 999 999 99 99",
};

const QUANTITY_FIELD: FieldSpec = FieldSpec {
    field: FieldName::Quantity,
    id: "order_quantity",
    label: "Количество молока (кг)",
    hint: "Сколько кг молока вам нужно?",
};

const ADDRESS_FIELD: FieldSpec = FieldSpec {
    field: FieldName::Address,
    id: "order_address",
    label: "Адрес доставки",
    hint: "Укажите адрес доставки",
};

const DATE_FIELD: FieldSpec = FieldSpec {
    field: FieldName::Date,
    id: "order_date",
    label: "На какую дату нужно молоко",
    hint: "ГГГГ-ММ-ДД",
};

pub struct OrderFormApp {
    controller: OrderFormController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    backend_notice: Option<String>,
}

impl OrderFormApp {
    pub fn new(
        controller: OrderFormController,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup_notice: Option<String>,
    ) -> Self {
        Self {
            controller,
            cmd_tx,
            ui_rx,
            backend_notice: startup_notice,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    tracing::debug!("backend worker ready");
                }
                UiEvent::BackendFailed(message) => {
                    self.backend_notice = Some(message);
                }
                UiEvent::SubmitFinished { record, outcome } => {
                    self.controller.finish_submit(&record, outcome);
                }
            }
        }
    }

    fn try_submit(&mut self) {
        let Some(record) = self.controller.begin_submit() else {
            return;
        };

        let cmd = BackendCommand::Submit {
            record: record.clone(),
        };
        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.controller
                .finish_submit(&record, Err(SubmitError::Unavailable(reason.clone())));
            self.backend_notice = Some(reason);
        }
    }

    fn field_input(&mut self, ui: &mut egui::Ui, spec: &FieldSpec) {
        ui.label(egui::RichText::new(spec.label).strong());

        let mut value = self.controller.record().field(spec.field).to_string();
        let edit = egui::TextEdit::singleline(&mut value)
            .id_salt(spec.id)
            .hint_text(
                egui::RichText::new(spec.hint)
                    .color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
            )
            .desired_width(f32::INFINITY);
        let response = ui.add_sized([ui.available_width(), 34.0], edit);

        if response.changed() {
            self.controller.handle_change(spec.field, &value);
        }
        ui.add_space(6.0);
    }

    fn show_errors(&self, ui: &mut egui::Ui) {
        let errors = self.controller.errors();
        if errors.is_empty() {
            return;
        }
        let color = ui.visuals().error_fg_color;
        for (_, message) in errors.iter() {
            ui.colored_label(color, message);
        }
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status = self.controller.status();
        let Some(message) = status.message() else {
            return;
        };
        let color = match status {
            SubmissionStatus::Success => egui::Color32::from_rgb(46, 160, 67),
            SubmissionStatus::SuccessPickup => egui::Color32::from_rgb(33, 136, 190),
            _ => ui.visuals().error_fg_color,
        };
        ui.colored_label(color, egui::RichText::new(message).strong());
    }

    fn show_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(360.0, 520.0);
            ui.add_space((avail.y * 0.05).clamp(8.0, 40.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);

                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(14.0)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .inner_margin(egui::Margin::symmetric(20, 18))
                    .show(ui, |ui| {
                        ui.heading("Форма заказа молока");
                        ui.add_space(10.0);

                        if let Some(notice) = &self.backend_notice {
                            ui.colored_label(ui.visuals().warn_fg_color, notice.as_str());
                            ui.add_space(6.0);
                        }

                        self.field_input(ui, &NAME_FIELD);
                        self.field_input(ui, &TEL_FIELD);
                        self.field_input(ui, &QUANTITY_FIELD);
                        if self.controller.address_required() {
                            self.field_input(ui, &ADDRESS_FIELD);
                        }
                        self.field_input(ui, &DATE_FIELD);

                        ui.add_space(8.0);
                        let sending = self.controller.status().is_sending();
                        let label = if sending { SENDING_LABEL } else { SUBMIT_LABEL };
                        let btn = egui::Button::new(egui::RichText::new(label).strong().size(16.0))
                            .min_size(egui::vec2(ui.available_width(), 40.0));
                        if ui.add_enabled(self.controller.can_submit(), btn).clicked() {
                            self.try_submit();
                        }

                        ui.add_space(8.0);
                        self.show_errors(ui);
                        self.show_status(ui);
                    });
            });
        });
    }
}

impl eframe::App for OrderFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_form(ctx);

        if self.controller.status().is_sending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
