pub mod chart;
pub mod overview;
pub mod range;
pub mod series;
pub mod settings;
pub mod sheet;
