pub mod bracket;
pub mod error;
pub mod session;
pub mod types;
pub mod value;

pub use bracket::parse_bracketed;
pub use error::{TranslateError, TranslateErrorKind};
pub use session::*;
pub use types::*;
pub use value::*;
