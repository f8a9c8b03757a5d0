use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};

// Prometheus metrics (default registry)
pub static ORPHANAGES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "happy_orphanages_created_total",
        "Total orphanages registered"
    )
    .expect("register orphanages_created_total")
});

pub static VALIDATION_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "happy_validation_failures_total",
        "Total registrations rejected by validation"
    )
    .expect("register validation_failures_total")
});

pub static IMAGES_STORED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "happy_images_stored_total",
        "Total image files written to the uploads directory"
    )
    .expect("register images_stored_total")
});
