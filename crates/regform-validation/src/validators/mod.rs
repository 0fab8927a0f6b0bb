//! Built-in validators for common validation scenarios

pub mod age;
pub mod confirmed;
pub mod custom;
pub mod email;
pub mod length;
pub mod pattern;
pub mod required;

pub use age::AgeValidator;
pub use confirmed::ConfirmedValidator;
pub use custom::CustomValidator;
pub use email::EmailValidator;
pub use length::LengthValidator;
pub use pattern::PatternValidator;
pub use required::RequiredValidator;
