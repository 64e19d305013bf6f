//! Expectations and signatures.
//!
//! An expectation string such as `"string|number"` names the type tags one
//! argument position accepts. Signatures bundle an ordered list of them under
//! a name and can be loaded from YAML or JSON.

mod parser;
mod schema;
mod signature;

pub use parser::{
    parse_expectations, render_expectations, Expectation, ExpectationError, TypeTag,
    ALTERNATION_SEPARATOR,
};
pub use schema::validate_signature_schema;
pub use signature::{Signature, SignatureError};
