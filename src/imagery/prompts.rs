//! Prompt text for generated property imagery

/// City every prompt is set in
pub const CITY: &str = "New York City";

/// Business type used when none is given
pub const DEFAULT_BUSINESS_TYPE: &str = "retail";

/// Floor area used when none is given
pub const DEFAULT_SQUARE_FEET: u32 = 2000;

fn business_or_default(business_type: Option<&str>) -> &str {
    match business_type.map(str::trim) {
        Some(b) if !b.is_empty() => b,
        _ => DEFAULT_BUSINESS_TYPE,
    }
}

/// Street-level photo of a renovated storefront at `address`
pub fn storefront_prompt(address: &str, business_type: Option<&str>) -> String {
    format!(
        "A photorealistic street-level photograph of a modern renovated {} storefront at {}, {}. \
         Large glass windows, contemporary signage, warm lighting, clean modern materials. \
         Golden hour, pedestrians walking by. Architectural photography.",
        business_or_default(business_type),
        address,
        CITY
    )
}

/// Top-down floor plan for a space of `square_feet`; zero means the default area
pub fn floorplan_prompt(square_feet: u32, business_type: Option<&str>) -> String {
    let area = if square_feet == 0 {
        DEFAULT_SQUARE_FEET
    } else {
        square_feet
    };
    format!(
        "A clean, professional architectural floor plan for a {} sq ft {} commercial space in {}. \
         Top-down blueprint view showing: entrance, sales floor, storage room, restroom, and counter area. \
         Clean lines, labeled rooms with dimensions, minimalist style on white background. \
         Technical drawing style.",
        area,
        business_or_default(business_type),
        CITY
    )
}
