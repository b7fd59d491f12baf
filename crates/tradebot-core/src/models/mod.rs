//! Resource models for the TradeBOT backend.
//!
//! Input sources feed data in (economic calendars, trading signals,
//! market news); output destinations are the accounts generated content
//! gets posted to.

mod connection;
mod input_source;
mod output_destination;
mod secret;

pub use connection::{ConnectionStatus, ConnectionTestResult};
pub use input_source::{
    CreateInputSource, FetchMethod, InputSource, InputSourcePatch, SourceType,
    active_input_sources,
};
pub use output_destination::{
    CreateOutputDestination, OutputDestination, OutputDestinationPatch, Platform,
    active_output_destinations,
};
pub use secret::SecretFields;

/// Free-form JSON configuration attached to a source or destination.
pub type Config = serde_json::Map<String, serde_json::Value>;
