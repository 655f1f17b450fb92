//! User module: contact details and the stored personality profile.

mod phone;
mod profile;

pub use phone::PhoneNumber;
pub use profile::Profile;
