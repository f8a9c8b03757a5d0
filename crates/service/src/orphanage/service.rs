use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::metrics::{ORPHANAGES_CREATED_TOTAL, VALIDATION_FAILURES_TOTAL};
use crate::orphanage::form::{OrphanageForm, UploadedImage};
use crate::orphanage::repository::OrphanageRepository;
use crate::orphanage::view::{OrphanagePresenter, OrphanageView};
use crate::storage::ImageStore;
use models::validation::flatten_errors;

/// Application service for registering and browsing orphanages.
pub struct OrphanageService<R: OrphanageRepository, S: ImageStore> {
    repo: Arc<R>,
    images: Arc<S>,
    presenter: OrphanagePresenter,
}

impl<R: OrphanageRepository, S: ImageStore> OrphanageService<R, S> {
    pub fn new(repo: Arc<R>, images: Arc<S>, presenter: OrphanagePresenter) -> Self {
        Self { repo, images, presenter }
    }

    /// Register a new orphanage.
    ///
    /// Uploads are written first so their assigned names can be validated
    /// and persisted; any failure afterwards removes them again.
    #[instrument(skip(self, form, uploads), fields(uploads = uploads.len()))]
    pub async fn create(&self, form: OrphanageForm, uploads: Vec<UploadedImage>) -> Result<OrphanageView, ServiceError> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in &uploads {
            match self.images.store(&upload.file_name, &upload.bytes).await {
                Ok(name) => stored.push(name),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        let valid = match form.into_candidate(stored.clone()).validated() {
            Ok(v) => v,
            Err(errors) => {
                VALIDATION_FAILURES_TOTAL.inc();
                self.discard(&stored).await;
                let errors = flatten_errors(&errors);
                info!(fields = ?errors.keys().collect::<Vec<_>>(), "orphanage_rejected");
                return Err(ServiceError::Validation(errors));
            }
        };

        let record = match self.repo.save(valid).await {
            Ok(r) => r,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e);
            }
        };
        ORPHANAGES_CREATED_TOTAL.inc();
        info!(id = record.orphanage.id, images = record.images.len(), "orphanage_created");
        Ok(self.presenter.render(record))
    }

    /// Every orphanage with its images, in registration order.
    pub async fn index(&self) -> Result<Vec<OrphanageView>, ServiceError> {
        let records = self.repo.find_all().await?;
        Ok(self.presenter.render_many(records))
    }

    pub async fn show(&self, id: i32) -> Result<OrphanageView, ServiceError> {
        match self.repo.find_by_id(id).await? {
            Some(record) => Ok(self.presenter.render(record)),
            None => Err(ServiceError::not_found("orphanage")),
        }
    }

    async fn discard(&self, stored: &[String]) {
        for name in stored {
            if let Err(e) = self.images.remove(name).await {
                warn!(file = %name, error = %e, "failed to remove stored image");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use models::orphanage::{OrphanageRecord, ValidOrphanage};

    use crate::orphanage::repository::SeaOrmOrphanageRepository;
    use crate::storage::DiskImageStore;
    use crate::test_support::get_db;

    const BASE: &str = "http://localhost:3333";

    fn form(name: &str) -> OrphanageForm {
        let mut f = OrphanageForm::default();
        f.set("name", name.into());
        f.set("latitude", "-27.2092052".into());
        f.set("longitude", "-49.6401092".into());
        f.set("about", "Presta assistência a crianças de 06 a 15 anos".into());
        f.set("instructions", "Venha como se sentir a vontade".into());
        f.set("opening_hours", "Das 8h às 18h".into());
        f.set("open_on_weekends", "true".into());
        f
    }

    fn upload(name: &str) -> UploadedImage {
        UploadedImage { file_name: name.into(), bytes: vec![0xFF, 0xD8, 0xFF] }
    }

    fn files_in(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
    }

    async fn service(dir: &std::path::Path) -> anyhow::Result<OrphanageService<SeaOrmOrphanageRepository, DiskImageStore>> {
        let db = get_db().await?;
        let repo = Arc::new(SeaOrmOrphanageRepository::new(db));
        let images = Arc::new(DiskImageStore::new(dir).await?);
        Ok(OrphanageService::new(repo, images, OrphanagePresenter::new(BASE)))
    }

    #[tokio::test]
    async fn create_returns_view_with_one_image_per_upload() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;

        let created = svc.create(form("Lar"), vec![upload("a.jpg"), upload("b.jpg")]).await?;
        assert!(created.id > 0);
        assert_eq!(created.images.len(), 2);
        assert!(created.images.iter().all(|i| i.url.starts_with("http://localhost:3333/uploads/")));
        assert!(created.open_on_weekends);
        assert_eq!(files_in(tmp.path()), 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_then_show_round_trips() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;

        let created = svc.create(form("Casa"), vec![upload("c.png")]).await?;
        let shown = svc.show(created.id).await?;
        assert_eq!(shown, created);
        assert_eq!(shown.name, "Casa");
        assert!((shown.latitude + 27.2092052).abs() < 1e-9);
        assert!((shown.longitude + 49.6401092).abs() < 1e-9);
        assert_eq!(shown.about, "Presta assistência a crianças de 06 a 15 anos");
        assert_eq!(shown.instructions, "Venha como se sentir a vontade");
        assert_eq!(shown.opening_hours, "Das 8h às 18h");
        assert_eq!(shown.images.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_all_reported_and_nothing_is_kept() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;

        let mut partial = OrphanageForm::default();
        partial.set("name", "Incompleto".into());
        let err = svc.create(partial, vec![upload("x.jpg")]).await.unwrap_err();
        let ServiceError::Validation(fields) = err else { panic!("expected validation error") };
        for field in ["latitude", "longitude", "about", "instructions", "opening_hours"] {
            assert!(fields.contains_key(field), "{field} not reported");
        }
        assert!(!fields.contains_key("name"));

        assert!(svc.index().await?.iter().all(|o| o.name != "Incompleto"));
        assert_eq!(files_in(tmp.path()), 0);
        Ok(())
    }

    #[tokio::test]
    async fn weekend_flag_other_than_true_is_false() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;
        for raw in ["false", "no", ""] {
            let mut f = form("Flag");
            f.set("open_on_weekends", raw.into());
            assert!(!svc.create(f, vec![]).await?.open_on_weekends, "{raw:?}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn about_boundary() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;

        let mut ok = form("Limite");
        ok.set("about", "a".repeat(300));
        assert_eq!(svc.create(ok, vec![]).await?.about.chars().count(), 300);

        let mut too_long = form("Longo");
        too_long.set("about", "a".repeat(301));
        assert!(matches!(svc.create(too_long, vec![]).await, Err(ServiceError::Validation(f)) if f.contains_key("about")));
        Ok(())
    }

    #[tokio::test]
    async fn index_returns_every_created_orphanage_in_order() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;
        for n in 0..3 {
            svc.create(form(&format!("Lar {n}")), vec![upload("p.jpg")]).await?;
        }
        let all = svc.index().await?;
        let names: Vec<_> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Lar 0", "Lar 1", "Lar 2"]);
        for o in &all {
            assert_eq!(o.images.len(), 1);
            assert!(o.images[0].url.starts_with(BASE));
        }
        Ok(())
    }

    #[tokio::test]
    async fn show_unknown_id_is_not_found() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let svc = service(tmp.path()).await?;
        assert!(matches!(svc.show(999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    struct FailingRepository;

    #[async_trait]
    impl OrphanageRepository for FailingRepository {
        async fn save(&self, _: ValidOrphanage) -> Result<OrphanageRecord, ServiceError> {
            Err(ServiceError::Db("disk full".into()))
        }
        async fn find_all(&self) -> Result<Vec<OrphanageRecord>, ServiceError> { Ok(vec![]) }
        async fn find_by_id(&self, _: i32) -> Result<Option<OrphanageRecord>, ServiceError> { Ok(None) }
    }

    #[tokio::test]
    async fn persistence_failure_removes_stored_images() -> anyhow::Result<()> {
        let tmp = tempfile::tempdir()?;
        let images = Arc::new(DiskImageStore::new(tmp.path()).await?);
        let svc = OrphanageService::new(Arc::new(FailingRepository), images, OrphanagePresenter::new(BASE));

        let err = svc.create(form("Falha"), vec![upload("a.jpg"), upload("b.jpg")]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(files_in(tmp.path()), 0);
        Ok(())
    }
}
