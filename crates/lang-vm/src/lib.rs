//! A register-and-stack bytecode interpreter over persistent, immutable
//! collections. `lang-core` produces the AST; a separate (unshipped here)
//! compiler lowers it to the [`bytecode::Program`] this crate executes.

pub mod bytecode;
pub mod error;
pub mod interpreter;
pub mod object;
pub mod syscall;
pub mod value;

pub use error::{FatalError, FatalResult};
pub use interpreter::{CallFrame, Interpreter, PendingError};
pub use object::{Object, ObjRef};
pub use value::Value;
