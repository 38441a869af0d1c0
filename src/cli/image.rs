//! CLI commands for generated property imagery

use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use crate::config::ApiKeys;
use crate::error::VantageResult;
use crate::imagery::{OpenAiImageClient, PropertyImagery};

/// Image subcommands
#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Generate a storefront rendering for an address
    Storefront {
        /// Street address
        address: String,

        /// Business type (defaults to retail)
        #[arg(short, long)]
        business_type: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a floor plan for a space
    #[command(alias = "floor-plan")]
    Floorplan {
        /// Floor area in square feet (0 uses the default)
        sqft: u32,

        /// Business type (defaults to retail)
        #[arg(short, long)]
        business_type: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle image commands
pub async fn handle_image_command(keys: &ApiKeys, cmd: ImageCommands) -> VantageResult<()> {
    let client = OpenAiImageClient::from_keys(keys)?;
    let imagery = PropertyImagery::new(Arc::new(client));

    let (kind, url, json) = match cmd {
        ImageCommands::Storefront {
            address,
            business_type,
            json,
        } => {
            let url = imagery
                .generate_storefront(&address, business_type.as_deref())
                .await?;
            ("storefront", url, json)
        }
        ImageCommands::Floorplan {
            sqft,
            business_type,
            json,
        } => {
            let url = imagery
                .generate_floorplan(sqft, business_type.as_deref())
                .await?;
            ("floorplan", url, json)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "kind": kind, "url": url }))?);
    } else {
        println!("{}", url);
    }
    Ok(())
}
