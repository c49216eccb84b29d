use pricewatch_core::settings::{Settings, SettingsForm};

pub const FIELD_LABELS: [&str; 3] = [
    "Alert threshold (%)",
    "Notification key",
    "Refresh interval (s)",
];

/// Editable copy of the settings while the form is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    values: [String; 3],
    focused: usize,
}

impl FormState {
    pub fn from_settings(settings: &Settings) -> Self {
        let form = SettingsForm::from(settings);
        Self {
            values: [form.threshold, form.notification_key, form.interval_seconds],
            focused: 0,
        }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn values(&self) -> &[String; 3] {
        &self.values
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.values.len();
    }

    pub fn previous_field(&mut self) {
        self.focused = (self.focused + self.values.len() - 1) % self.values.len();
    }

    pub fn input(&mut self, c: char) {
        self.values[self.focused].push(c);
    }

    pub fn backspace(&mut self) {
        self.values[self.focused].pop();
    }

    pub fn to_form(&self) -> SettingsForm {
        SettingsForm::new(
            self.values[0].as_str(),
            self.values[1].as_str(),
            self.values[2].as_str(),
        )
    }
}
