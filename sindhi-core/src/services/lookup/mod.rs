pub mod matcher;
pub mod model;
pub mod normalize;

pub use model::LookupTable;
