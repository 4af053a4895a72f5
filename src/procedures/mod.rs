//! Built-in analysis procedures, grouped by concern.

pub mod centrality;
pub mod proximity;
pub mod traversal;
