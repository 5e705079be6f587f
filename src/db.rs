pub mod alert_repo;
pub use alert_repo::AlertRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod chamado_repo;
pub use chamado_repo::ChamadoRepository;
pub mod enquete_repo;
pub use enquete_repo::EnqueteRepository;
pub mod item_repo;
pub use item_repo::ItemRepository;
pub mod log_repo;
pub use log_repo::LogRepository;
pub mod prestador_repo;
pub use prestador_repo::PrestadorRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod space_repo;
pub use space_repo::SpaceRepository;
pub mod wiki_repo;
pub use wiki_repo::WikiRepository;
