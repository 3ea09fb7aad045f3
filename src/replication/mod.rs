//! Replication State Model
//!
//! Value types describing where a host sits in the replication stream:
//! - `ReplicationStatus`: a replica's view of its master
//! - `ReplicationPosition`: an opaque stream position
//!
//! These carry no behavior beyond equality and a few derived accessors.
//! Both the host contract and its double consume them whole.

mod position;
mod status;

pub use position::ReplicationPosition;
pub use status::ReplicationStatus;
