//! Per-operation request state
//!
//! Each image operation owns its own `watch` channel. Operations never share
//! a lock, so one can be loading while the other fails or completes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use super::client::ImageGenerator;
use super::prompts::{floorplan_prompt, storefront_prompt};
use crate::error::VantageResult;

/// Lifecycle of one image request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            RequestState::Ready(url) => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One independently tracked image operation
#[derive(Debug)]
pub struct ImageRequest {
    name: &'static str,
    state: watch::Sender<RequestState>,
}

impl ImageRequest {
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { name, state }
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.send_replace(RequestState::Idle);
    }

    /// Run one request, recording its progress and outcome
    pub async fn run(&self, generator: &dyn ImageGenerator, prompt: &str) -> VantageResult<String> {
        self.state.send_replace(RequestState::Loading);

        match generator.generate(prompt).await {
            Ok(url) => {
                info!(operation = self.name, "Image ready");
                self.state.send_replace(RequestState::Ready(url.clone()));
                Ok(url)
            }
            Err(e) => {
                error!(operation = self.name, error = %e, "Image generation failed");
                self.state.send_replace(RequestState::Failed(e.to_string()));
                Err(e)
            }
        }
    }
}

/// Storefront and floor plan imagery for a property
pub struct PropertyImagery {
    generator: Arc<dyn ImageGenerator>,
    storefront: ImageRequest,
    floorplan: ImageRequest,
}

impl PropertyImagery {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            storefront: ImageRequest::new("storefront"),
            floorplan: ImageRequest::new("floorplan"),
        }
    }

    pub fn storefront(&self) -> &ImageRequest {
        &self.storefront
    }

    pub fn floorplan(&self) -> &ImageRequest {
        &self.floorplan
    }

    pub async fn generate_storefront(
        &self,
        address: &str,
        business_type: Option<&str>,
    ) -> VantageResult<String> {
        let prompt = storefront_prompt(address, business_type);
        self.storefront.run(self.generator.as_ref(), &prompt).await
    }

    pub async fn generate_floorplan(
        &self,
        square_feet: u32,
        business_type: Option<&str>,
    ) -> VantageResult<String> {
        let prompt = floorplan_prompt(square_feet, business_type);
        self.floorplan.run(self.generator.as_ref(), &prompt).await
    }

    /// Return both operations to idle
    pub fn reset(&self) {
        self.storefront.reset();
        self.floorplan.reset();
    }

    /// Watch both operations
    pub fn subscribe(&self) -> (watch::Receiver<RequestState>, watch::Receiver<RequestState>) {
        (self.storefront.subscribe(), self.floorplan.subscribe())
    }
}
