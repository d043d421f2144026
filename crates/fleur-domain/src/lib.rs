//! fleur-domain
//!
//! Pure domain models for the FLEUR fulfillment tracker (records, amounts,
//! stages, timeline steps, payment submissions).
//! No I/O, no logging, no storage. Only data types and core enums.

pub mod money;
pub mod payment;
pub mod record;
pub mod rows;
pub mod stage;
pub mod timeline;

pub use money::*;
pub use payment::*;
pub use record::*;
pub use rows::*;
pub use stage::*;
pub use timeline::*;
