//! Generic tenant-scoped CRUD
//!
//! [`CrudService`] implements create / list / get / update / remove once;
//! each resource plugs in through the [`Resource`] trait.

pub mod filters;
pub mod record;
pub mod related;
pub mod resource;
pub mod service;

pub use filters::Conditions;
pub use record::{Active, Stored};
pub use related::{FormatError, Related};
pub use resource::{Reference, Relation, Resource, Touched, UniqueKey};
pub use service::CrudService;
