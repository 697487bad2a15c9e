//! Input model for pairwise suite generation: parameters, their scalar
//! domains, and generation settings.

pub mod parse;
pub mod types;
pub mod value;

pub use parse::parse_model;
pub use types::{reference_parameters, GenerationConfig, InputModel, Parameter, ParameterSet};
pub use value::DomainValue;
