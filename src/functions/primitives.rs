use crate::functions::traits::Primitive;

// --- Any input true ---
pub struct Or;

impl Primitive for Or {
    fn ui_name(&self) -> &'static str { "Any Input True" }
    fn alias(&self) -> &'static str { "or" }
    fn arity(&self) -> Option<usize> { None }
    fn execute(&self, inputs: &[bool]) -> bool {
        inputs.iter().any(|&b| b)
    }
}

// --- All inputs true ---
pub struct And;

impl Primitive for And {
    fn ui_name(&self) -> &'static str { "All Inputs True" }
    fn alias(&self) -> &'static str { "and" }
    fn arity(&self) -> Option<usize> { None }
    // Vacuously true with no inputs.
    fn execute(&self, inputs: &[bool]) -> bool {
        inputs.iter().all(|&b| b)
    }
}

// --- Negate first input ---
pub struct Not;

impl Primitive for Not {
    fn ui_name(&self) -> &'static str { "Negate First" }
    fn alias(&self) -> &'static str { "not" }
    fn arity(&self) -> Option<usize> { Some(1) }
    fn execute(&self, inputs: &[bool]) -> bool {
        inputs.first().map_or(false, |&b| !b)
    }
}

// --- Odd parity ---
pub struct Parity;

impl Primitive for Parity {
    fn ui_name(&self) -> &'static str { "Odd Parity" }
    fn alias(&self) -> &'static str { "parity" }
    fn arity(&self) -> Option<usize> { None }
    fn execute(&self, inputs: &[bool]) -> bool {
        inputs.iter().filter(|&&b| b).count() % 2 == 1
    }
}

/// Apply a two-input function to the first two inputs, false when fewer are present.
fn binary(inputs: &[bool], f: impl Fn(bool, bool) -> bool) -> bool {
    match inputs {
        [a, b, ..] => f(*a, *b),
        _ => false,
    }
}

// --- First xor second ---
pub struct Xor2;

impl Primitive for Xor2 {
    fn ui_name(&self) -> &'static str { "First Xor Second" }
    fn alias(&self) -> &'static str { "xor2" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, inputs: &[bool]) -> bool {
        binary(inputs, |a, b| a != b)
    }
}

// --- First and not second ---
pub struct AndNot;

impl Primitive for AndNot {
    fn ui_name(&self) -> &'static str { "First And Not Second" }
    fn alias(&self) -> &'static str { "and_not" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, inputs: &[bool]) -> bool {
        binary(inputs, |a, b| a && !b)
    }
}

// --- Not first and second ---
pub struct NotAnd;

impl Primitive for NotAnd {
    fn ui_name(&self) -> &'static str { "Not First And Second" }
    fn alias(&self) -> &'static str { "not_and" }
    fn arity(&self) -> Option<usize> { Some(2) }
    fn execute(&self, inputs: &[bool]) -> bool {
        binary(inputs, |a, b| !a && b)
    }
}
