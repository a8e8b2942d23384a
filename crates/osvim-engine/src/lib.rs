//! Template parameter reconciliation and create-stack request preparation

pub mod filter;
pub mod request;

pub use filter::{
    PRIVATE_KEY_SUFFIX, PUBLIC_KEY_SUFFIX, ResolutionRule, filter_template_properties,
    filter_used_properties, resolve_parameter,
};
pub use request::CreateStackRequest;
