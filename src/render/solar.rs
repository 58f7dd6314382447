//! Markdown blocks for celestial bodies, positions and known-object counts.

use serde_json::Value;

use crate::record::{display, group_thousands, Preview, Record};
use crate::render::markdown::Block;

/// Format a celestial body: physical, orbital and discovery details.
pub fn body_block(value: &Value) -> String {
    let body = Record::new(value);
    let mut block = Block::for_record(2, &body, &["englishName", "name"]);

    block.field("Type", body.text("bodyType")).field(
        "Is Planet",
        body.defined("isPlanet")
            .and_then(Value::as_bool)
            .map(|p| if p { "Yes" } else { "No" }),
    );

    // Physical characteristics
    block
        .field("Mass", scientific(&body, "mass", "massValue", "massExponent", "kg"))
        .field("Volume", scientific(&body, "vol", "volValue", "volExponent", "km³"))
        .field("Density", body.text("density").map(|d| format!("{} g/cm³", d)))
        .field("Surface Gravity", body.text("gravity").map(|g| format!("{} m/s²", g)))
        .field("Mean Radius", body.text("meanRadius").map(|r| format!("{} km", r)));

    // Orbital characteristics
    block.field(
        "Semi-major Axis",
        body.get("semimajorAxis").map(|a| format!("{} km", group_thousands(a))),
    );
    if let (Some(perihelion), Some(aphelion)) = (body.get("perihelion"), body.get("aphelion")) {
        block.field(
            "Orbit Range",
            Some(format!(
                "{} - {} km",
                group_thousands(perihelion),
                group_thousands(aphelion)
            )),
        );
    }
    block
        .field("Eccentricity", body.text("eccentricity"))
        .field("Orbital Period", body.text("sideralOrbit").map(|p| format!("{} days", p)))
        .field("Rotation Period", body.text("sideralRotation").map(|p| format!("{} hours", p)))
        .field("Average Temperature", body.text("avgTemp").map(|t| format!("{} K", t)));

    if let Some(moons) = body.list("moons") {
        let preview = Preview::new(
            moons
                .iter()
                .map(|m| Record::new(m).text_or("moon", "Unknown")),
        );
        block.push(format!("**Moons** ({} total): {}", preview.total, preview.shown));
        if let Some(more) = preview.more_suffix() {
            block.push(format!("  *{}*", more));
        }
    }

    block.field(
        "Orbits",
        body.nested("aroundPlanet").map(|a| a.text_or("planet", "Unknown")),
    );

    let discovery: Vec<String> = [
        body.text("discoveredBy").map(|by| format!("by {}", by)),
        body.text("discoveryDate").map(|on| format!("on {}", on)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !discovery.is_empty() {
        block.field("Discovered", Some(discovery.join(" ")));
    }

    block.finish()
}

/// `{value} x 10^{exponent} {unit}` from a nested mantissa/exponent object.
fn scientific(
    body: &Record<'_>,
    key: &str,
    value_key: &str,
    exponent_key: &str,
    unit: &str,
) -> Option<String> {
    let nested = body.nested(key)?;
    let value = nested.text(value_key)?;
    let exponent = nested
        .defined(exponent_key)
        .map(display)
        .unwrap_or_else(|| "0".to_string());
    Some(format!("{} x 10^{} {}", value, exponent, unit))
}

/// Format one entry of a positions response.
pub fn position_block(value: &Value) -> String {
    let position = Record::new(value);
    let mut block = Block::new(format!("### {}", position.text_or("name", "Unknown")));

    if let (Some(ra), Some(dec)) = (position.defined("ra"), position.defined("dec")) {
        block
            .push(format!("**Right Ascension**: {}°", display(ra)))
            .push(format!("**Declination**: {}°", display(dec)));
    }
    if let (Some(az), Some(alt)) = (position.defined("az"), position.defined("alt")) {
        block
            .push(format!("**Azimuth**: {}°", display(az)))
            .push(format!("**Altitude**: {}°", display(alt)));
    }

    block.finish()
}

/// One bullet line of the known-object counts listing.
pub fn known_count_line(value: &Value) -> String {
    let entry = Record::new(value);
    format!(
        "- **{}**: {} (updated: {})",
        entry.text_or("id", "Unknown"),
        defined_or(&entry, "knownCount", "N/A"),
        defined_or(&entry, "updateDate", "N/A")
    )
}

/// Field rendered when it exists and is not null, else the fallback. Zero counts are data.
pub fn defined_or(record: &Record<'_>, key: &str, fallback: &str) -> String {
    record
        .defined(key)
        .map(display)
        .unwrap_or_else(|| fallback.to_string())
}
