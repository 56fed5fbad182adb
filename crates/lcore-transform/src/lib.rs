//! Domain transformers.
//!
//! One generic executor ([`DomainRun`]) applies the declarative rules of the
//! configuration table; six pluggable strategies (see [`strategies`]) supply
//! what differs per domain: timestamps and device paths.

#![deny(unsafe_code)]

pub mod context;
pub mod error;
pub mod executor;
pub mod output;
pub mod registry;
pub mod strategies;
pub mod units;

pub use context::{SourceSet, TransformContext};
pub use error::{Result, RowParseError, TransformError};
pub use executor::{DomainRun, ParsedRow, PreparedSource, device_segment, slug};
pub use output::{TransformOutput, TransformStats};
pub use registry::{DomainTransformer, TransformerRegistry, default_registry};
pub use units::{UnitParser, fahrenheit_to_celsius};
