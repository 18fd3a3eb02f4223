pub mod key;
pub mod sequence;
pub mod value;

pub use key::Key;
pub use sequence::Sequence;
pub use value::Value;
