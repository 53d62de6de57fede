//! Form state management for the registration form

use super::field::{Field, FormField};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Buttons shown below the registration inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterButton {
    #[default]
    SignUp,
    GoToLogin,
}

impl RegisterButton {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::SignUp => Self::GoToLogin,
            Self::GoToLogin => Self::SignUp,
        };
    }
}

/// Registration form: name, email, password, confirmation, then the buttons row
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: FormField,
    pub email: FormField,
    pub password: FormField,
    pub confirm_password: FormField,
    pub active_field_index: usize,
    pub selected_button: RegisterButton,
}

impl RegistrationForm {
    /// Index of the buttons row
    pub const BUTTONS_ROW: usize = 4;

    pub fn new() -> Self {
        Self {
            name: FormField::new(Field::Name),
            email: FormField::new(Field::Email),
            password: FormField::new(Field::Password),
            confirm_password: FormField::new(Field::ConfirmPassword),
            active_field_index: 0,
            selected_button: RegisterButton::default(),
        }
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == Self::BUTTONS_ROW
    }

    /// The input currently focused, if any
    pub fn active_input(&self) -> Option<Field> {
        self.get_field(self.active_field_index).map(|f| f.field)
    }

    pub fn field(&self, field: Field) -> &FormField {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    #[cfg(test)]
    pub fn field_mut(&mut self, field: Field) -> &mut FormField {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for RegistrationForm {
    fn field_count(&self) -> usize {
        5 // name, email, password, confirm, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(Self::BUTTONS_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.password),
            3 => Some(&mut self.confirm_password),
            _ => None,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.password),
            3 => Some(&self.confirm_password),
            // Index 4 is buttons row, no FormField for it
            _ => None,
        }
    }
}
