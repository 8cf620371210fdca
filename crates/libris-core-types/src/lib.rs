//! Shared primitives for the Libris facilities
//!
//! - **Correlation**: `RequestId`, `TraceId`, `RequestContext`
//! - **Sensitive data**: `Sensitive<T>` redacts itself in logs and output
//! - **Schema constants**: canonical log field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
