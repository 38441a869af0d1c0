//! Generated storefront and floor plan imagery

pub mod client;
pub mod prompts;
pub mod state;

pub use client::{ImageGenerator, OpenAiImageClient};
pub use prompts::{floorplan_prompt, storefront_prompt};
pub use state::{ImageRequest, PropertyImagery, RequestState};
