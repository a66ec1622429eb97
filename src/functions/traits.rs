/// Pure boolean function a gate applies to its flattened inputs.
pub trait Primitive: Send + Sync {
    /// Display name
    fn ui_name(&self) -> &'static str;

    /// Short name used in the registry and circuit snapshots
    fn alias(&self) -> &'static str;

    /// Number of inputs read, `None` when the function folds over all of them
    fn arity(&self) -> Option<usize>;

    fn execute(&self, inputs: &[bool]) -> bool;
}
