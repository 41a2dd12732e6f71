/// UI layer: immediate-mode widgets and chart views.
pub mod charts;
pub mod panels;
