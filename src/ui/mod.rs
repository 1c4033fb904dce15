pub mod charts;
pub mod narrative;
pub mod panels;
