pub mod invariants;
pub mod validation;

pub use validation::{validate_graph, validate_max_len, validate_required};
