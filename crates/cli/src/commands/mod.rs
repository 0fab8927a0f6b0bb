pub mod fill;
pub mod rules;
pub mod validate;

use clap::ValueEnum;

/// Which form variant a command works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    /// Username, email and an optional password
    Minimal,
    /// Full nine-field registration form
    Registration,
}

/// Run `$body` with `$schema` bound to the concrete schema for `$kind`
macro_rules! with_schema {
    ($kind:expr, $config:expr, |$schema:ident| $body:expr) => {
        match $kind {
            $crate::commands::FormKind::Minimal => {
                let $schema = regform_validation::MinimalSignupForm::new();
                $body
            }
            $crate::commands::FormKind::Registration => {
                let $schema = regform_validation::RegistrationForm::with_clock($config.clock());
                $body
            }
        }
    };
}

pub(crate) use with_schema;
