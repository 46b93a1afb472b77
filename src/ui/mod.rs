/// UI layer: panel chrome, charts, and the dashboard itself.
pub mod charts;
pub mod dashboard;
pub mod panels;
