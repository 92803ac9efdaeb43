//! In-memory record registry for producers, farms and crop entries.
//!
//! This is the boundary that receives untrusted input: it runs the document
//! validator before storing a producer, the area check before storing or
//! updating a farm, and the aggregator when the dashboard is read. It owns
//! uniqueness rules and cascade deletes; there is no database and no HTTP.

pub mod command;
pub mod producer;
pub mod registry;

pub use command::{AddCrop, RegisterFarm, RegisterProducer, UpdateFarm, UpdateProducer};
pub use producer::Producer;
pub use registry::{CascadeReport, LandRegistry, Record, RegistryError, RegistryResult};
