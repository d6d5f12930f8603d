pub mod operand;
pub mod target;
pub mod value;

pub use operand::{Operand, resolve_operand};
pub use target::Target;
pub use value::{ParamValue, ValueKind};
