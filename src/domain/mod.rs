pub mod cleanup;
pub mod converting;
pub mod index;
pub mod introspection;
pub mod language;
pub mod semantic;
pub mod solution;
pub mod syntax;
pub mod vb;
