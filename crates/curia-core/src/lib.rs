//! curia-core - Core types, traits, and the list-management engine.
//!
//! Every listing screen of the admin console shares one shape: fetch a
//! collection, filter it client-side, paginate the filtered view, and
//! reconcile server-confirmed deletes and updates back into it. This crate
//! holds that shared engine ([`ListPage`]) together with the domain
//! vocabulary ([`Record`], [`RecordKey`], [`ResourceSpec`]) and the
//! transport traits the backends implement.

pub mod catalog;
pub mod credentials;
pub mod engine;
pub mod error;
pub mod record;
pub mod resource;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use engine::{FetchTicket, ListPage, MutationKind, MutationStatus, Outcome};
pub use error::Error;
pub use record::{Patch, Record};
pub use resource::ResourceSpec;
pub use tokens::AccessToken;
pub use traits::{Backend, Session};
pub use types::{ApiUrl, FieldPath, RecordKey};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
