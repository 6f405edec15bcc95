//! Capability providers used by the transformation handlers
//!
//! Handlers decide when a provider is called and how its outcome maps onto
//! the value/sentinel/error policy; the providers do the actual text work.
//!
//! - [`case`] - casing styles (`heck`)
//! - [`date`] - format token translation, parsing and rendering (`chrono`, `chrono-tz`)
//! - [`phone`] - phone number parsing and rendering (`phonenumber`)
//! - [`identifier`] - injectable identifier generation (`uuid`)

pub mod case;
pub mod date;
pub mod identifier;
pub mod phone;

pub use case::CaseStyle;
pub use date::DateError;
pub use identifier::{IdentifierError, IdentifierGenerator, IdentifierVersion, UuidGenerator};
pub use phone::{PhoneError, PhoneFormat};
