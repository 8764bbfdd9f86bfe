// Repository visualization: fetch repo stats → aggregate into chart-ready series.

pub mod handlers;
pub mod models;
pub mod stats;
