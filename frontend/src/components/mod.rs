pub mod expense_modal;
pub mod layout;
