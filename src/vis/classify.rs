//! Boolean visibility classification.
//!
//! Combines the per-waypoint fields into the final per-cell verdict: the
//! sign is visible from a cell when its weighted, capped visibility
//! distance covers the distance to the cell and clears the minimum
//! usability threshold.

use crate::core::Field2D;

/// Classify every cell as seeing the waypoint or not.
///
/// * `mean_ext` is `None` when the extinction factor is disabled; the
///   visibility distance is then the `max_vis` cap everywhere.
/// * `occlusion` is `None` when occlusion is disabled; a masked-out cell
///   contributes a factor of zero.
///
/// The raw visibility distance is `contrast / mean_ext`, guarded against
/// zero extinction (clear air saturates to `max_vis` rather than producing
/// an infinity) and capped at `max_vis`. A cell is visible iff
/// `view * capped * occlusion >= distance` and `>= min_vis`, both
/// comparisons non-strict.
pub fn classify(
    view: &Field2D<f32>,
    mean_ext: Option<&Field2D<f32>>,
    occlusion: Option<&Field2D<bool>>,
    distance: &Field2D<f32>,
    contrast: f32,
    min_vis: f32,
    max_vis: f32,
) -> Field2D<bool> {
    let (nx, ny) = distance.dims();
    debug_assert_eq!(view.dims(), (nx, ny));
    debug_assert!(mean_ext.is_none_or(|f| f.dims() == (nx, ny)));
    debug_assert!(occlusion.is_none_or(|f| f.dims() == (nx, ny)));
    let mut out = Field2D::filled(nx, ny, false);
    for i in 0..nx {
        for j in 0..ny {
            let vis = match mean_ext {
                Some(ext) => {
                    let e = ext.at(i, j);
                    if e > 0.0 {
                        (contrast / e).min(max_vis)
                    } else {
                        max_vis
                    }
                }
                None => max_vis,
            };
            let occ = match occlusion {
                Some(mask) => {
                    if mask.at(i, j) {
                        1.0
                    } else {
                        0.0
                    }
                }
                None => 1.0,
            };
            let combined = view.at(i, j) * vis * occ;
            out.set(i, j, combined >= distance.at(i, j) && combined >= min_vis);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones(nx: usize, ny: usize) -> Field2D<f32> {
        Field2D::filled(nx, ny, 1.0)
    }

    #[test]
    fn test_visible_at_exact_distance() {
        // combined == distance is visible (non-strict comparison).
        let view = ones(1, 1);
        let ext = Field2D::filled(1, 1, 1.0);
        let dist = Field2D::filled(1, 1, 3.0);
        let map = classify(&view, Some(&ext), None, &dist, 3.0, 0.0, 30.0);
        assert!(map.at(0, 0));
    }

    #[test]
    fn test_not_visible_just_below_min_vis() {
        let view = ones(1, 1);
        let ext = Field2D::filled(1, 1, 1.0); // combined = 3.0
        let dist = Field2D::filled(1, 1, 0.0);
        let visible = classify(&view, Some(&ext), None, &dist, 3.0, 3.0, 30.0);
        assert!(visible.at(0, 0));
        let hidden = classify(&view, Some(&ext), None, &dist, 3.0, 3.0 + 1e-3, 30.0);
        assert!(!hidden.at(0, 0));
    }

    #[test]
    fn test_zero_extinction_saturates_to_cap() {
        let view = ones(1, 1);
        let ext = Field2D::filled(1, 1, 0.0);
        let dist = Field2D::filled(1, 1, 29.0);
        let map = classify(&view, Some(&ext), None, &dist, 3.0, 0.0, 30.0);
        assert!(map.at(0, 0));
        let far = Field2D::filled(1, 1, 31.0);
        let map = classify(&view, Some(&ext), None, &far, 3.0, 0.0, 30.0);
        assert!(!map.at(0, 0));
    }

    #[test]
    fn test_cap_limits_clear_air() {
        // Tiny extinction would give a huge ratio; the cap bounds it.
        let view = ones(1, 1);
        let ext = Field2D::filled(1, 1, 1e-6);
        let dist = Field2D::filled(1, 1, 35.0);
        let map = classify(&view, Some(&ext), None, &dist, 3.0, 0.0, 30.0);
        assert!(!map.at(0, 0));
    }

    #[test]
    fn test_occluded_cell_never_visible() {
        let view = ones(1, 1);
        let occ = Field2D::filled(1, 1, false);
        let dist = Field2D::filled(1, 1, 0.0);
        let map = classify(&view, None, Some(&occ), &dist, 3.0, 0.0, 30.0);
        assert!(!map.at(0, 0));
    }

    #[test]
    fn test_all_factors_disabled_reduces_to_distance_cap() {
        let (nx, ny) = (4, 3);
        let view = ones(nx, ny);
        let mut dist = Field2D::filled(nx, ny, 0.0f32);
        for i in 0..nx {
            for j in 0..ny {
                dist.set(i, j, (i * ny + j) as f32 * 4.0);
            }
        }
        let map = classify(&view, None, None, &dist, 3.0, 0.0, 30.0);
        for ((i, j), visible) in map.iter_cells() {
            assert_eq!(visible, dist.at(i, j) <= 30.0);
        }
    }

    #[test]
    fn test_view_weight_scales_visibility() {
        let mut view = ones(1, 2);
        view.set(0, 1, 0.5);
        let ext = Field2D::filled(1, 2, 1.0); // raw vis = 3.0
        let dist = Field2D::filled(1, 2, 2.0);
        let map = classify(&view, Some(&ext), None, &dist, 3.0, 0.0, 30.0);
        assert!(map.at(0, 0)); // 3.0 >= 2.0
        assert!(!map.at(0, 1)); // 1.5 < 2.0
    }
}
