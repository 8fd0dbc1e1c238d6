//! Constructor resolution and factory assembly.

pub mod closure;
pub mod constructor;

pub use closure::{ArgumentPolicy, FactoryPlan, assemble_factory};
pub use constructor::{
    DocumentedMethod, Resolution, constructor_from, constructor_from_signature, parse_labels,
    resolve,
};
