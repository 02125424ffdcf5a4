//! The configuration resolution pipeline of a cluster provisioning tool.
//!
//! A user authored cluster definition moves through these stages:
//!
//! 1. [`loader`] parses the versioned document and, on request, rejects
//!    unknown keys and semantically invalid input,
//! 2. [`merge`] carries pinned values of an already deployed cluster over,
//! 3. [`convert`] turns the versioned document into the canonical
//!    [`api::ContainerService`],
//! 4. [`defaults`] fills in everything the user left out, using the
//!    [`cloud::CloudRegistry`] and the [`image`] resolver.
//!
//! ```no_run
//! use cluster_config::{
//!     cloud::CloudRegistry,
//!     defaults::DefaultsParams,
//!     loader::{load_container_service, serialize_container_service},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = std::fs::read("cluster.json")?;
//! let (mut container_service, version) = load_container_service(&input, true, false, None)?;
//!
//! container_service.set_defaults(CloudRegistry::builtin(), DefaultsParams::default());
//!
//! let output = serialize_container_service(&container_service, &version)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cloud;
pub mod convert;
pub mod defaults;
pub mod image;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod vlabs;
