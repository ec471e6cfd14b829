//! # Carehive Core
//!
//! Models, errors and the pure scheduling logic behind the agency shift
//! scheduler. Nothing in this crate performs I/O; the async orchestration
//! over the external scheduling services lives in `carehive-service`.

pub mod calendar;
pub mod errors;
pub mod filter;
pub mod models;
pub mod pattern;
pub mod role;
pub mod time;
