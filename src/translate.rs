//! Re-expression of a slide in the publishing platform's sticker schema.

pub(crate) mod platform;
pub(crate) mod translator;
