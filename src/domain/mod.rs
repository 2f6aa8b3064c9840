// Core model: input values, node identifiers, the graph and its builder.

pub mod builder;
pub mod graph;
pub mod ids;
pub mod value;
