pub mod confidence;
pub mod query;
pub mod state;

pub use confidence::{ConfidenceValidator, Validated};
pub use query::{Query, QueryBuilder};
pub use state::FilterState;
