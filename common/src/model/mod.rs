pub mod card;
pub mod form;
pub mod origin;
pub mod session;
pub mod sort;
