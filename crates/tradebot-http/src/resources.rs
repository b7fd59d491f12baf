//! Typed calls for input sources and output destinations.
//!
//! Everything here goes through [`ApiClient::request`] and so inherits the
//! refresh-and-retry behavior.

use tracing::instrument;

use tradebot_core::Result;
use tradebot_core::models::{
    ConnectionTestResult, CreateInputSource, CreateOutputDestination, InputSource,
    InputSourcePatch, OutputDestination, OutputDestinationPatch,
};

use crate::client::ApiClient;
use crate::endpoints::{INPUT_SOURCES, OUTPUT_DESTINATIONS, detail_path, test_connection_path};
use crate::options::RequestOptions;

impl ApiClient {
    // ========================================================================
    // Input sources
    // ========================================================================

    /// List all configured input sources.
    #[instrument(skip(self))]
    pub async fn input_sources(&self) -> Result<Vec<InputSource>> {
        self.get(INPUT_SOURCES).await
    }

    #[instrument(skip(self, source), fields(name = %source.name))]
    pub async fn create_input_source(&self, source: &CreateInputSource) -> Result<InputSource> {
        self.post(INPUT_SOURCES, source).await
    }

    /// Apply a partial update to an input source.
    #[instrument(skip(self, patch))]
    pub async fn update_input_source(
        &self,
        id: u64,
        patch: &InputSourcePatch,
    ) -> Result<InputSource> {
        self.patch(&detail_path(INPUT_SOURCES, id), patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete_input_source(&self, id: u64) -> Result<()> {
        self.delete(&detail_path(INPUT_SOURCES, id)).await
    }

    /// Ask the backend to test connectivity to an input source.
    #[instrument(skip(self))]
    pub async fn test_input_source_connection(&self, id: u64) -> Result<ConnectionTestResult> {
        self.request(
            &test_connection_path(INPUT_SOURCES, id),
            RequestOptions::post(),
        )
        .await
    }

    // ========================================================================
    // Output destinations
    // ========================================================================

    /// List all configured output destinations.
    #[instrument(skip(self))]
    pub async fn output_destinations(&self) -> Result<Vec<OutputDestination>> {
        self.get(OUTPUT_DESTINATIONS).await
    }

    #[instrument(skip(self, destination), fields(platform = %destination.platform))]
    pub async fn create_output_destination(
        &self,
        destination: &CreateOutputDestination,
    ) -> Result<OutputDestination> {
        self.post(OUTPUT_DESTINATIONS, destination).await
    }

    /// Apply a partial update to an output destination.
    #[instrument(skip(self, patch))]
    pub async fn update_output_destination(
        &self,
        id: u64,
        patch: &OutputDestinationPatch,
    ) -> Result<OutputDestination> {
        self.patch(&detail_path(OUTPUT_DESTINATIONS, id), patch)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_output_destination(&self, id: u64) -> Result<()> {
        self.delete(&detail_path(OUTPUT_DESTINATIONS, id)).await
    }

    /// Ask the backend to test connectivity to an output destination.
    #[instrument(skip(self))]
    pub async fn test_output_destination_connection(
        &self,
        id: u64,
    ) -> Result<ConnectionTestResult> {
        self.request(
            &test_connection_path(OUTPUT_DESTINATIONS, id),
            RequestOptions::post(),
        )
        .await
    }
}
