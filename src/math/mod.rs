//! Numeric building blocks.
//!
//! - cylindrical surface-area model (`surface`)
//! - normalized volume/area weights (`weights`)
//! - weighted-average radius reduction (`eptr`)

pub mod eptr;
pub mod surface;
pub mod weights;
