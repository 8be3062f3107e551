//! Persona/platform policy: stateless lookup tables describing how content
//! must be shaped for each social platform.

mod constraints;
mod platform;

pub use constraints::{Percent, PlatformConstraints, PlatformPolicy, SafeZones};
pub use platform::Platform;
