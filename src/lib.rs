pub mod cli;
pub mod ctx;
pub mod error;
pub mod freq;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod stats;
pub mod store;
