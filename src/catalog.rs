use crate::error::CatalogError;
use crate::params::{AcfParams, GridSize, WindowSize};

use itertools::iproduct;
use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Single pooled feature: grid cell `(x, y)` of channel `channel`
///
/// Coordinates are in pooling blocks, `y` is the row.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct FeatureDef {
    pub x: usize,
    pub y: usize,
    pub channel: usize,
}

impl FeatureDef {
    pub fn new(x: usize, y: usize, channel: usize) -> Self {
        Self { x, y, channel }
    }
}

impl fmt::Display for FeatureDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acf_x{}_y{}_ch{}", self.x, self.y, self.channel)
    }
}

macro_const! {
    const DOC: &str = r"
Ordered, immutable list of feature definitions

Position $i$ in the catalog is component $i$ of every feature vector evaluated
with it. Cloning is cheap, all clones share the same storage, so a single
catalog can back any number of [crate::FeatureEvaluator]s.

Serialized as a plain sequence of `{x, y, channel}` records.
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<FeatureDef>", from = "Vec<FeatureDef>")]
pub struct FeatureCatalog {
    features: Arc<[FeatureDef]>,
}

impl FeatureCatalog {
    pub fn new(features: Vec<FeatureDef>) -> Self {
        Self {
            features: features.into(),
        }
    }

    /// Feature names in catalog order, see [FeatureDef]'s `Display`
    pub fn names(&self) -> Vec<String> {
        self.features.iter().map(FeatureDef::to_string).collect()
    }

    /// Check that every feature addresses a cell of `grid` and one of `n_channels` channels
    ///
    /// A catalog generated for another window size or channel layout fails this check.
    pub fn fits(&self, grid: GridSize, n_channels: usize) -> bool {
        self.features
            .iter()
            .all(|f| grid.contains(f.x, f.y) && f.channel < n_channels)
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Deref for FeatureCatalog {
    type Target = [FeatureDef];

    fn deref(&self) -> &Self::Target {
        &self.features
    }
}

impl From<Vec<FeatureDef>> for FeatureCatalog {
    fn from(features: Vec<FeatureDef>) -> Self {
        Self::new(features)
    }
}

impl From<FeatureCatalog> for Vec<FeatureDef> {
    fn from(catalog: FeatureCatalog) -> Self {
        catalog.features.to_vec()
    }
}

impl FromIterator<FeatureDef> for FeatureCatalog {
    fn from_iter<I: IntoIterator<Item = FeatureDef>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FeatureCatalog {
    type Item = &'a FeatureDef;
    type IntoIter = std::slice::Iter<'a, FeatureDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl JsonSchema for FeatureCatalog {
    json_schema!(Vec<FeatureDef>, false);
}

/// Generate a feature catalog with default [AcfParams]
///
/// ### Example
/// ```
/// use acf_feature::*;
///
/// let catalog = generate_features(WindowSize::new(32, 32), 1000).unwrap();
/// assert_eq!(catalog.len(), 640);
/// assert_eq!(catalog[0], FeatureDef::new(0, 0, 0));
/// assert_eq!(catalog[11], FeatureDef::new(0, 1, 1));
/// ```
pub fn generate_features(
    window: WindowSize,
    count: usize,
) -> Result<FeatureCatalog, CatalogError> {
    generate_features_with(&AcfParams::default(), window, count)
}

/// Enumerate up to `count` features of a window
///
/// Features are taken in the canonical order: grid `x` ascending, then grid `y`,
/// then channel index, and enumeration stops as soon as `count` features are
/// produced. The result has `min(count, params.max_features(window))` entries and
/// is the same for the same arguments.
///
/// A window that does not fit a single pooling block admits no features and is
/// rejected with [CatalogError::WindowTooSmall], so a returned catalog is never empty.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(params), fields(n_channels = params.n_channels()))
)]
pub fn generate_features_with(
    params: &AcfParams,
    window: WindowSize,
    count: usize,
) -> Result<FeatureCatalog, CatalogError> {
    if count == 0 {
        return Err(CatalogError::ZeroCount);
    }
    let grid = params.grid_size(window);
    if grid.cells() == 0 {
        return Err(CatalogError::WindowTooSmall {
            width: window.width,
            height: window.height,
            block_size: params.block_size(),
        });
    }
    #[cfg(feature = "tracing")]
    if count > params.max_features(window) {
        debug!(
            max_features = params.max_features(window),
            "requested feature count exceeds the window capacity"
        );
    }
    Ok(iproduct!(0..grid.cols, 0..grid.rows, 0..params.n_channels())
        .take(count)
        .map(|(x, y, channel)| FeatureDef { x, y, channel })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    use itertools::Itertools;
    use serde_test::{Token, assert_tokens};

    #[test]
    fn full_grid() {
        let catalog = generate_features(WindowSize::new(32, 32), 1000).unwrap();
        assert_eq!(catalog.len(), 8 * 8 * 10);
        let desired: Vec<_> = iproduct!(0..8, 0..8, 0..10)
            .map(|(x, y, c)| FeatureDef::new(x, y, c))
            .collect();
        assert_eq!(&catalog[..], &desired[..]);
    }

    #[test]
    fn prefix_of_canonical_order() {
        let full = generate_features(WindowSize::new(24, 16), 10_000).unwrap();
        for count in [1, 9, 10, 11, 57, 239, 240] {
            let catalog = generate_features(WindowSize::new(24, 16), count).unwrap();
            assert_eq!(catalog.len(), count);
            assert_eq!(&catalog[..], &full[..count]);
        }
        assert_eq!(full.len(), 6 * 4 * 10);
        assert_eq!(full[10], FeatureDef::new(0, 1, 0));
        assert_eq!(full[40], FeatureDef::new(1, 0, 0));
    }

    #[test]
    fn deterministic() {
        let a = generate_features(WindowSize::new(64, 128), 777).unwrap();
        let b = generate_features(WindowSize::new(64, 128), 777).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bounded() {
        for (width, height) in [(4, 4), (7, 13), (16, 64), (33, 9), (5, 100)] {
            let window = WindowSize::new(width, height);
            let max = (width / 4) * (height / 4) * 10;
            for count in [1, 5, 100, 10_000] {
                let len = generate_features(window, count).unwrap().len();
                assert_eq!(len, usize::min(count, max), "{width}x{height}, {count}");
            }
        }
    }

    #[test]
    fn window_smaller_than_block() {
        for (width, height) in [(3, 100), (100, 3), (0, 0), (1, 1)] {
            assert_eq!(
                generate_features(WindowSize::new(width, height), 10),
                Err(CatalogError::WindowTooSmall {
                    width,
                    height,
                    block_size: 4
                })
            );
        }
        let params = AcfParams::new(8, 10).unwrap();
        assert_eq!(
            generate_features_with(&params, WindowSize::new(7, 64), 10),
            Err(CatalogError::WindowTooSmall {
                width: 7,
                height: 64,
                block_size: 8
            })
        );
        assert!(generate_features_with(&params, WindowSize::new(8, 8), 10).is_ok());
    }

    #[test]
    fn no_duplicates() {
        let catalog = generate_features(WindowSize::new(40, 20), 10_000).unwrap();
        assert!(catalog.iter().all_unique());
        assert!(catalog.fits(GridSize { cols: 10, rows: 5 }, 10));
    }

    #[test]
    fn custom_params() {
        let params = AcfParams::new(8, 3).unwrap();
        let catalog = generate_features_with(&params, WindowSize::new(32, 16), 100).unwrap();
        assert_eq!(catalog.len(), 4 * 2 * 3);
        assert_eq!(catalog.last(), Some(&FeatureDef::new(3, 1, 2)));
        assert!(catalog.fits(params.grid_size(WindowSize::new(32, 16)), 3));
        assert!(!catalog.fits(GridSize { cols: 4, rows: 1 }, 3));
        assert!(!catalog.fits(GridSize { cols: 4, rows: 2 }, 2));
    }

    #[test]
    fn zero_count() {
        assert_eq!(
            generate_features(WindowSize::new(32, 32), 0),
            Err(CatalogError::ZeroCount)
        );
    }

    #[test]
    fn names() {
        let catalog = generate_features(WindowSize::new(8, 8), 2).unwrap();
        assert_eq!(catalog.names(), vec!["acf_x0_y0_ch0", "acf_x0_y0_ch1"]);
    }

    #[test]
    fn clones_share_storage() {
        let catalog = generate_features(WindowSize::new(32, 32), 100).unwrap();
        let clone = catalog.clone();
        assert!(Arc::ptr_eq(&catalog.features, &clone.features));
    }

    #[test]
    fn serialization() {
        let catalog = FeatureCatalog::new(vec![FeatureDef::new(1, 2, 3)]);
        assert_tokens(
            &catalog,
            &[
                Token::Seq { len: Some(1) },
                Token::Struct {
                    len: 3,
                    name: "FeatureDef",
                },
                Token::Str("x"),
                Token::U64(1),
                Token::Str("y"),
                Token::U64(2),
                Token::Str("channel"),
                Token::U64(3),
                Token::StructEnd,
                Token::SeqEnd,
            ],
        );
    }
}
