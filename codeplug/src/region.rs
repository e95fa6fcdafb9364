//! Maidenhead locator to UK region classification.
//!
//! Classification is a two-tier lookup: the 4-character grid square selects
//! a base region, and a handful of boundary squares carry a subsquare column
//! override that applies when the locator has a 5th character.

/// Region returned for empty, short or unrecognised locators.
pub const DEFAULT_REGION: &str = "SE";

/// Base region for each grid square.
const GRID_SQUARE_REGIONS: &[(&str, &str)] = &[
    // South west England
    ("IO70", "SW"),
    ("IO80", "SW"),
    ("IO81", "SW"),
    ("IO90", "SW"),
    // Wales
    ("IO71", "WAL"),
    ("IO72", "WAL"),
    ("IO73", "WAL"),
    // North west England
    ("IO83", "NW"),
    ("IO84", "NW"),
    // Midlands
    ("IO82", "MIDL"),
    ("IO92", "MIDL"),
    // North east England
    ("IO93", "NE"),
    ("IO94", "NE"),
    // South east England
    ("IO91", "SE"),
    ("JO00", "SE"),
    ("JO01", "SE"),
    // East Anglia
    ("JO02", "E.ANG"),
    ("JO03", "E.ANG"),
    // Scotland
    ("IO67", "SCOT"),
    ("IO68", "SCOT"),
    ("IO69", "SCOT"),
    ("IO75", "SCOT"),
    ("IO76", "SCOT"),
    ("IO77", "SCOT"),
    ("IO78", "SCOT"),
    ("IO79", "SCOT"),
    ("IO85", "SCOT"),
    ("IO86", "SCOT"),
    ("IO87", "SCOT"),
    ("IO88", "SCOT"),
    ("IO95", "SCOT"),
    ("IO96", "SCOT"),
    ("IO97", "SCOT"),
    ("IP90", "SCOT"),
    // Northern Ireland
    ("IO54", "N.IRE"),
    ("IO64", "N.IRE"),
    ("IO65", "N.IRE"),
    ("IO74", "N.IRE"),
    // Channel Islands
    ("IN79", "CH.IS"),
    ("IN89", "CH.IS"),
];

/// A subsquare column range that reassigns part of a boundary grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOverride {
    /// First subsquare column (A-X) covered, inclusive.
    pub lo: char,
    /// Last subsquare column (A-X) covered, inclusive.
    pub hi: char,
    /// Region used when the column falls in range.
    pub region: &'static str,
}

impl ColumnOverride {
    const fn new(lo: char, hi: char, region: &'static str) -> Self {
        Self { lo, hi, region }
    }

    /// Returns `true` if the (uppercased) column falls inside the range.
    #[must_use]
    pub fn covers(&self, column: char) -> bool {
        (self.lo..=self.hi).contains(&column)
    }
}

/// Column overrides for grid squares that straddle a region boundary.
const SUBSQUARE_OVERRIDES: &[(&str, ColumnOverride)] = &[
    // Cardiff and the valleys
    ("IO81", ColumnOverride::new('A', 'L', "WAL")),
    // Wrexham and Mold
    ("IO83", ColumnOverride::new('A', 'J', "WAL")),
    ("IO91", ColumnOverride::new('T', 'X', "LONDON")),
    // Isle of Man
    ("IO74", ColumnOverride::new('G', 'X', "NW")),
];

/// Resolves grid locators to coarse region tags.
///
/// # Examples
///
/// ```
/// use codeplug::RegionResolver;
///
/// let resolver = RegionResolver::new();
/// assert_eq!(resolver.resolve("IO91WM"), "LONDON");
/// assert_eq!(resolver.resolve("io91lm"), "SE");
/// assert_eq!(resolver.resolve("IO9"), "SE");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RegionResolver {
    squares: &'static [(&'static str, &'static str)],
    overrides: &'static [(&'static str, ColumnOverride)],
}

impl Default for RegionResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionResolver {
    /// Create a resolver over the built-in UK tables.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            squares: GRID_SQUARE_REGIONS,
            overrides: SUBSQUARE_OVERRIDES,
        }
    }

    /// Map a locator to its region tag.
    ///
    /// Locators shorter than 4 characters and unknown grid squares map to
    /// [`DEFAULT_REGION`].
    #[must_use]
    pub fn resolve(&self, locator: &str) -> &'static str {
        let mut chars = locator.chars().map(|c| c.to_ascii_uppercase());
        let grid: String = chars.by_ref().take(4).collect();
        if grid.chars().count() < 4 {
            return DEFAULT_REGION;
        }

        let Some(base) = self.base_region(&grid) else {
            return DEFAULT_REGION;
        };

        match (chars.next(), self.column_override(&grid)) {
            (Some(column), Some(rule)) if rule.covers(column) => rule.region,
            _ => base,
        }
    }

    fn base_region(&self, grid: &str) -> Option<&'static str> {
        self.squares
            .iter()
            .find(|(square, _)| *square == grid)
            .map(|(_, region)| *region)
    }

    fn column_override(&self, grid: &str) -> Option<&ColumnOverride> {
        self.overrides
            .iter()
            .find(|(square, _)| *square == grid)
            .map(|(_, rule)| rule)
    }
}
