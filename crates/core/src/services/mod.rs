pub mod chart_service;
pub mod dashboard_service;
pub mod hover_service;
pub mod range_service;
pub mod report_service;
pub mod series_service;
pub mod sheet_service;
