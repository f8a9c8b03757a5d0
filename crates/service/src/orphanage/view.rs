use serde::{Deserialize, Serialize};

use models::orphanage::OrphanageRecord;

/// Public shape of an orphanage returned across the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanageView {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageView {
    pub id: i32,
    pub url: String,
}

/// Turns persisted records into views, resolving image paths against the
/// public base URL the uploads directory is served from.
#[derive(Debug, Clone)]
pub struct OrphanagePresenter {
    base_url: String,
}

impl OrphanagePresenter {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut base_url = public_base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn image_url(&self, path: &str) -> String {
        format!("{}/uploads/{}", self.base_url, path)
    }

    pub fn render(&self, record: OrphanageRecord) -> OrphanageView {
        let OrphanageRecord { orphanage, images } = record;
        OrphanageView {
            id: orphanage.id,
            name: orphanage.name,
            latitude: orphanage.latitude,
            longitude: orphanage.longitude,
            about: orphanage.about,
            instructions: orphanage.instructions,
            opening_hours: orphanage.opening_hours,
            open_on_weekends: orphanage.open_on_weekends,
            images: images
                .into_iter()
                .map(|i| ImageView { url: self.image_url(&i.path), id: i.id })
                .collect(),
        }
    }

    pub fn render_many(&self, records: Vec<OrphanageRecord>) -> Vec<OrphanageView> {
        records.into_iter().map(|r| self.render(r)).collect()
    }
}
