pub mod chart_service;
pub mod nav_service;
pub mod page_service;
pub mod render_service;
