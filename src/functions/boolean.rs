use crate::functions::traits::{BoolFunction, Primitive};

// --- Unary ---
pub struct Not;
impl Primitive for Not {
    fn symbol(&self) -> &'static str { "Not" }
    fn arity(&self) -> usize { 1 }
}
impl BoolFunction for Not {
    fn bool_function(&self, a: bool, _b: bool, _c: bool, _d: bool) -> bool {
        !a
    }
}

// --- Binary ---
pub struct And;
impl Primitive for And {
    fn symbol(&self) -> &'static str { "And" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for And {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        a && b
    }
}

pub struct Or;
impl Primitive for Or {
    fn symbol(&self) -> &'static str { "Or" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for Or {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        a || b
    }
}

pub struct Xor;
impl Primitive for Xor {
    fn symbol(&self) -> &'static str { "Xor" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for Xor {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        a != b
    }
}

pub struct Nand;
impl Primitive for Nand {
    fn symbol(&self) -> &'static str { "Nand" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for Nand {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        !(a && b)
    }
}

pub struct Nor;
impl Primitive for Nor {
    fn symbol(&self) -> &'static str { "Nor" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for Nor {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        !(a || b)
    }
}

pub struct Xnor;
impl Primitive for Xnor {
    fn symbol(&self) -> &'static str { "Xnor" }
    fn arity(&self) -> usize { 2 }
}
impl BoolFunction for Xnor {
    fn bool_function(&self, a: bool, b: bool, _c: bool, _d: bool) -> bool {
        a == b
    }
}

// --- Ternary ---
/// `a ? b : c`
pub struct If;
impl Primitive for If {
    fn symbol(&self) -> &'static str { "If" }
    fn arity(&self) -> usize { 3 }
}
impl BoolFunction for If {
    fn bool_function(&self, a: bool, b: bool, c: bool, _d: bool) -> bool {
        if a { b } else { c }
    }
}
