//! Domain value objects and types.
//!
//! Phone numbers enter the system as free-form user input and leave it as
//! [`NormalizedPhone`] values. The normalizer is the only place that knows
//! about the default country code.

pub mod errors;
pub mod phone;

pub use errors::ValidationError;
pub use phone::{is_valid, normalize, NormalizedPhone, PhoneNormalizer, DEFAULT_COUNTRY_CODE};
