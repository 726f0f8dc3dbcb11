pub const CONTACT_FORM_SELECTOR: &str = ".contact-form";
pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;
pub const NAME_SELECTOR: &str = r#"input[type="text"]"#;
pub const EMAIL_SELECTOR: &str = r#"input[type="email"]"#;
pub const MESSAGE_SELECTOR: &str = "textarea";
pub const SHAKE_ANIMATION: &str = "shake 0.5s ease-in-out";
pub const SHAKE_DURATION_MS: u32 = 500;
pub const SENT_BACKGROUND: &str = "linear-gradient(45deg, #10b981, #059669)";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected { missing: Vec<&'static str> },
    Busy,
    Accepted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub icon: Option<&'static str>,
    pub label: String,
    pub disabled: bool,
    pub background: &'static str,
}

impl ButtonView {
    pub fn markup(&self) -> String {
        match self.icon {
            Some(icon) => format!(r#"<i class="bi {icon}"></i> {}"#, self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ContactForm {
    phase: SubmitPhase,
    original_label: String,
}

impl ContactForm {
    pub fn new(original_label: impl Into<String>) -> Self {
        Self {
            phase: SubmitPhase::Idle,
            original_label: original_label.into(),
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn submit(&mut self, fields: &ContactFields) -> SubmitOutcome {
        if self.phase != SubmitPhase::Idle {
            return SubmitOutcome::Busy;
        }

        let missing = fields.missing();
        if !missing.is_empty() {
            return SubmitOutcome::Rejected { missing };
        }

        self.phase = SubmitPhase::Sending;
        SubmitOutcome::Accepted
    }

    pub fn advance(&mut self) -> Option<SubmitPhase> {
        self.phase = match self.phase {
            SubmitPhase::Idle => return None,
            SubmitPhase::Sending => SubmitPhase::Sent,
            SubmitPhase::Sent => SubmitPhase::Idle,
        };
        Some(self.phase)
    }

    pub fn button_view(&self) -> ButtonView {
        match self.phase {
            SubmitPhase::Idle => ButtonView {
                icon: None,
                label: self.original_label.clone(),
                disabled: false,
                background: "",
            },
            SubmitPhase::Sending => ButtonView {
                icon: Some("bi-arrow-clockwise"),
                label: "Sending...".to_string(),
                disabled: true,
                background: "",
            },
            SubmitPhase::Sent => ButtonView {
                icon: Some("bi-check-lg"),
                label: "Sent!".to_string(),
                disabled: true,
                background: SENT_BACKGROUND,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello!".to_string(),
        }
    }

    #[test]
    fn any_empty_field_rejects_without_touching_button() {
        for blank in ["name", "email", "message"] {
            let mut fields = filled();
            match blank {
                "name" => fields.name.clear(),
                "email" => fields.email.clear(),
                _ => fields.message.clear(),
            }

            let mut form = ContactForm::new("Send Message");
            let before = form.button_view();

            assert_eq!(
                form.submit(&fields),
                SubmitOutcome::Rejected {
                    missing: vec![blank]
                }
            );
            assert_eq!(form.phase(), SubmitPhase::Idle);
            assert_eq!(form.button_view(), before);
            assert!(!form.button_view().disabled);
        }
    }

    #[test]
    fn accepted_submission_walks_label_sequence() {
        let mut form = ContactForm::new("Send Message");
        let mut labels = vec![form.button_view().label];

        assert_eq!(form.submit(&filled()), SubmitOutcome::Accepted);
        labels.push(form.button_view().label);
        while let Some(phase) = form.advance() {
            labels.push(form.button_view().label);
            if phase == SubmitPhase::Idle {
                break;
            }
        }

        assert_eq!(labels, vec!["Send Message", "Sending...", "Sent!", "Send Message"]);
        assert!(!form.button_view().disabled);
        assert_eq!(form.advance(), None);
    }

    #[test]
    fn sent_state_uses_success_background() {
        let mut form = ContactForm::new("Send");
        form.submit(&filled());
        form.advance();

        let view = form.button_view();
        assert_eq!(view.background, SENT_BACKGROUND);
        assert!(view.disabled);
        assert_eq!(view.markup(), r#"<i class="bi bi-check-lg"></i> Sent!"#);
    }

    #[test]
    fn second_submit_while_sending_is_busy() {
        let mut form = ContactForm::new("Send");
        form.submit(&filled());
        assert_eq!(form.submit(&filled()), SubmitOutcome::Busy);
    }

    #[test]
    fn all_blank_reports_every_field() {
        assert_eq!(
            ContactFields::default().missing(),
            vec!["name", "email", "message"]
        );
    }
}
