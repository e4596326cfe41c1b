pub mod encoding;
pub mod hash;
pub mod register;
pub mod templates;
pub mod text;

pub use encoding::{Base64DecodeTransform, Base64EncodeTransform, JsonFormatTransform};
pub use hash::Sha256Transform;
pub use register::{default_registry, register_transforms};
pub use templates::{Template, find_template, templates};
pub use text::{
    LowercaseTransform, RegexReplaceTransform, ReverseTransform, TrimTransform, UppercaseTransform,
};
