use tracing::debug;

use models::orphanage::{parse_flag, NewImage, NewOrphanage};

/// Text fields of a registration form, exactly as received.
#[derive(Debug, Clone, Default)]
pub struct OrphanageForm {
    pub name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub about: Option<String>,
    pub instructions: Option<String>,
    pub opening_hours: Option<String>,
    pub open_on_weekends: Option<String>,
}

/// One `images` file part.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl OrphanageForm {
    /// Record a multipart text field; unknown names are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "latitude" => &mut self.latitude,
            "longitude" => &mut self.longitude,
            "about" => &mut self.about,
            "instructions" => &mut self.instructions,
            "opening_hours" => &mut self.opening_hours,
            "open_on_weekends" => &mut self.open_on_weekends,
            other => {
                debug!(field = other, "ignoring unknown form field");
                return;
            }
        };
        *slot = Some(value);
    }

    /// Build the validation candidate, attaching the stored image names.
    pub fn into_candidate(self, image_paths: Vec<String>) -> NewOrphanage {
        NewOrphanage {
            open_on_weekends: parse_flag(self.open_on_weekends.as_deref()),
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            about: self.about,
            instructions: self.instructions,
            opening_hours: self.opening_hours,
            images: image_paths.into_iter().map(|path| NewImage { path }).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_routes_known_fields() {
        let mut form = OrphanageForm::default();
        form.set("name", "Lar".into());
        form.set("opening_hours", "8h-18h".into());
        form.set("color", "blue".into());
        assert_eq!(form.name.as_deref(), Some("Lar"));
        assert_eq!(form.opening_hours.as_deref(), Some("8h-18h"));
        assert!(form.about.is_none());
    }

    #[test]
    fn candidate_coerces_weekend_flag() {
        let mut form = OrphanageForm::default();
        form.set("open_on_weekends", "true".into());
        assert!(form.clone().into_candidate(vec![]).open_on_weekends);

        form.set("open_on_weekends", "no".into());
        assert!(!form.clone().into_candidate(vec![]).open_on_weekends);

        form.open_on_weekends = None;
        assert!(!form.into_candidate(vec![]).open_on_weekends);
    }

    #[test]
    fn candidate_keeps_image_order() {
        let candidate = OrphanageForm::default().into_candidate(vec!["b".into(), "a".into()]);
        let paths: Vec<_> = candidate.images.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["b", "a"]);
    }
}
