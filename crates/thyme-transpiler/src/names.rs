//! Well-known placeholder names and class dependencies.
//!
//! Environment roles are shared by every fragment and are obtained with
//! `PlaceholderSet::create`. Per-lookup roles are obtained with
//! `create_fresh` so that two lookups in one scope never collide.

// ── Environment roles ────────────────────────────────────────────────────────

pub const TEST_CONTEXT: &str = "TEST_CONTEXT";
pub const NAVIGATOR: &str = "NAVIGATOR";
pub const ENV_ARRAY: &str = "ENV_ARRAY";
pub const CLIENT: &str = "CLIENT";
pub const CRAWLER: &str = "CRAWLER";
pub const INSPECTOR: &str = "INSPECTOR";
pub const MUTATOR: &str = "MUTATOR";

// ── Per-lookup roles ─────────────────────────────────────────────────────────

pub const ELEMENT_LOCATOR: &str = "ELEMENT_LOCATOR";
pub const ELEMENT: &str = "ELEMENT";
pub const COLLECTION: &str = "COLLECTION";
pub const HAS: &str = "HAS";
pub const VALUE: &str = "VALUE";
pub const DURATION: &str = "DURATION";
pub const EXAMINED_VALUE: &str = "EXAMINED_VALUE";
pub const EXPECTED_VALUE: &str = "EXPECTED_VALUE";
pub const WEBDRIVER_DIMENSION: &str = "WEBDRIVER_DIMENSION";

// ── Class dependencies ───────────────────────────────────────────────────────

pub const ELEMENT_LOCATOR_CLASS: &str = "ElementLocator";
pub const LOCATOR_TYPE_CLASS: &str = "LocatorType";
