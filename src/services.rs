pub mod booking_service;
pub use booking_service::BookingService;
pub mod chamado_service;
pub use chamado_service::ChamadoService;
pub mod enquete_service;
pub use enquete_service::EnqueteService;
pub mod sheet_service;
pub use sheet_service::SheetService;
