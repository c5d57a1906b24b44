//! In-memory services for rockets, launches and customers.
//!
//! Each service owns one [`Repository`] behind a mutex and is cheap to clone.
//! [`LaunchSchedule`] reads through a [`RocketCatalog`] handle; the leaf
//! services know nothing about launches.

mod customers;
mod ids;
mod launches;
mod repository;
mod rockets;

pub use customers::CustomerDirectory;
pub use ids::{IdGenerator, IdStrategy, RandomIds, SequentialIds};
pub use launches::{parse_launch_date_time, LaunchSchedule};
pub use repository::Repository;
pub use rockets::RocketCatalog;

/// The three services wired together over shared rocket records.
#[derive(Clone)]
pub struct Catalog {
    pub rockets: RocketCatalog,
    pub launches: LaunchSchedule,
    pub customers: CustomerDirectory,
}

impl Catalog {
    pub fn new(ids: IdStrategy) -> Self {
        let rockets = RocketCatalog::new(ids.generator("rocket"));
        let launches = LaunchSchedule::new(rockets.clone(), ids.generator("launch"));
        Self {
            rockets,
            launches,
            customers: CustomerDirectory::new(),
        }
    }

    /// A catalog with sequential `rocket-N` / `launch-N` ids.
    pub fn sequential() -> Self {
        Self::new(IdStrategy::Sequential)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}
