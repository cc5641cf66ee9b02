use rust_embed::RustEmbed;

/// Embedded web assets (stylesheet and page script).
/// Path is relative to Cargo.toml.
#[derive(RustEmbed)]
#[folder = "web"]
pub struct WebAssets;
