//! Orphanage registration, listing and detail.

pub mod form;
pub mod repository;
pub mod service;
pub mod view;

pub use form::{OrphanageForm, UploadedImage};
pub use repository::{OrphanageRepository, SeaOrmOrphanageRepository};
pub use service::OrphanageService;
pub use view::{ImageView, OrphanagePresenter, OrphanageView};
