use crate::functions::{
    boolean::{And, If, Nand, Nor, Not, Or, Xnor, Xor},
    math::{Abs, Add, Div, Max, Min, Mul, Neg, Sub},
    traits::{BoolFunction, MathFunction, Primitive},
};
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

/// Symbol name -> function lookup table.
///
/// Registries are built up front and only read afterwards, so a shared
/// reference can be used from any number of threads without locking.
pub struct FunctionRegistry<F: ?Sized + Primitive> {
    functions: HashMap<String, Arc<F>>,
}

pub type BoolFuncMap = FunctionRegistry<dyn BoolFunction>;
pub type MathFuncMap = FunctionRegistry<dyn MathFunction>;

static BOOL_FUNCTIONS: OnceLock<BoolFuncMap> = OnceLock::new();
static MATH_FUNCTIONS: OnceLock<MathFuncMap> = OnceLock::new();

/// Process-wide registry of the built-in boolean functions.
pub fn bool_functions() -> &'static BoolFuncMap {
    BOOL_FUNCTIONS.get_or_init(BoolFuncMap::boolean)
}

/// Process-wide registry of the built-in numeric functions.
pub fn math_functions() -> &'static MathFuncMap {
    MATH_FUNCTIONS.get_or_init(MathFuncMap::math)
}

impl<F: ?Sized + Primitive> FunctionRegistry<F> {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register a function under its own symbol, replacing any previous
    /// entry with the same symbol.
    pub fn register(&mut self, function: Arc<F>) {
        self.functions
            .insert(function.symbol().to_string(), function);
    }

    pub fn get(&self, symbol: &str) -> Option<&Arc<F>> {
        self.functions.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.functions.contains_key(symbol)
    }

    pub fn arity(&self, symbol: &str) -> Option<usize> {
        self.functions.get(symbol).map(|f| f.arity())
    }

    /// Registered symbols in sorted order
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Largest arity of any registered function, 0 when empty
    pub fn max_arity(&self) -> usize {
        self.functions.values().map(|f| f.arity()).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<F: ?Sized + Primitive> Default for FunctionRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry<dyn BoolFunction> {
    /// Registry pre-populated with the built-in boolean functions
    pub fn boolean() -> Self {
        let mut registry = Self::new();
        let functions: Vec<Arc<dyn BoolFunction>> = vec![
            Arc::new(Not),
            Arc::new(And),
            Arc::new(Or),
            Arc::new(Xor),
            Arc::new(Nand),
            Arc::new(Nor),
            Arc::new(Xnor),
            Arc::new(If),
        ];
        for function in functions {
            registry.register(function);
        }
        registry
    }
}

impl FunctionRegistry<dyn MathFunction> {
    /// Registry pre-populated with the built-in numeric functions
    pub fn math() -> Self {
        let mut registry = Self::new();
        let functions: Vec<Arc<dyn MathFunction>> = vec![
            Arc::new(Add),
            Arc::new(Sub),
            Arc::new(Mul),
            Arc::new(Div),
            Arc::new(Min),
            Arc::new(Max),
            Arc::new(Neg),
            Arc::new(Abs),
        ];
        for function in functions {
            registry.register(function);
        }
        registry
    }
}
