pub mod user_repo;
pub use user_repo::UserRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod ticket_repo;
pub use ticket_repo::TicketRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod goal_repo;
pub use goal_repo::GoalRepository;
pub mod knowledge_repo;
pub use knowledge_repo::KnowledgeRepository;
pub mod nps_repo;
pub use nps_repo::NpsRepository;
