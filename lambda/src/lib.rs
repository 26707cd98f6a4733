//! Prototype objects with late-bound `this`, plus three function
//! combinators: [`singleton`], [`partial`] and [`pepper`].
//!
//! ```
//! use lambda::{Function, Value, prototype, record};
//!
//! let base = prototype(record([
//!     ("name", Value::from("base")),
//!     ("greet", Value::from(Function::nullary("greet", |frame| {
//!         Ok(Value::from(format!("hi {}", frame.get("name")?)))
//!     }))),
//! ]));
//! let derived = base.extend(record([("name", Value::from("derived"))]));
//!
//! assert_eq!(derived.send("greet", &[]).unwrap(), Value::from("hi derived"));
//! ```

mod error;
mod function;
pub mod lookup;
mod partial;
mod pepper;
mod prototype;
mod signature;
mod singleton;
mod value;

pub use error::{Error, Result};
pub use function::{Callable, Frame, Function, Native, NativeBody};
pub use lookup::{Chain, LookupResult};
pub use partial::{Partial, Slots, partial, partial_with};
pub use pepper::{ARGUMENTS, Keyword, pepper};
pub use prototype::{DEFAULT_REPRESENTATION, Proto, TO_STRING, prototype};
pub use signature::{Param, Signature};
pub use singleton::{Singleton, singleton};
pub use value::{Name, Record, Value, record};
