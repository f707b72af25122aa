pub mod derive;
pub mod error;
pub mod lookup;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod table;

pub use error::{EnrichError, TableRole};
pub use pipeline::{run, Report, Summary};
pub use schema::Variant;
pub use table::{Cell, RawTable};
