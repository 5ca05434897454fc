//! Validation performed before anything is copied.

pub mod preflight;
pub mod rules;

pub use preflight::preflight_checks;
pub use rules::validate_package_name;
