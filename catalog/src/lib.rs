//! Catalog core library modules.
//!
//! Record validation and versioning engine for 3D product metadata. The
//! crate owns the domain logic only; HTTP transport and persistence engines
//! live behind the ports in [`domain::ports`].

pub mod domain;
