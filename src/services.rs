pub mod auth;
pub mod client_service;
pub mod dashboard_service;
pub mod goal_service;
pub mod knowledge_service;
pub mod nps_service;
pub mod team_service;
pub mod ticket_service;
