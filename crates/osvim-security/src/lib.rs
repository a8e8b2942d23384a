//! Secret masking for Heat templates before they are logged

pub mod redactor;
mod scalar;
mod span;

pub use redactor::{
    DEFAULT_MASK_CHAR, DEFAULT_SECRET_FIELD, DEFAULT_SECRET_RESOURCE, MaskingInfo, SecretMasker,
    mask_secrets, mask_text,
};
