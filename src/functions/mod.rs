pub mod traits;
pub mod boolean;
pub mod math;
pub mod registry;

pub use traits::{BoolFunction, MathFunction, Primitive};
pub use registry::{bool_functions, math_functions, BoolFuncMap, FunctionRegistry, MathFuncMap};
