use rand::Rng;

use crate::patch::Patch;
use crate::plane::PlaneError;
use crate::quilt::Quilt;

/// Picks the next patch to place out of the candidate set.
///
/// Every candidate is scored against the actual grid neighbors, then one is
/// drawn uniformly from the subset whose total error stays within the
/// multiplicative margin of the best score. Sampling from the near-best set
/// instead of always taking the winner is what keeps the output from turning
/// repetitive.
#[derive(Debug, Clone)]
pub struct PatchSelector {
    margin: f64,
}

impl Default for PatchSelector {
    fn default() -> Self {
        Self {
            margin: Quilt::BEST_FIT_MARGIN,
        }
    }
}

impl PatchSelector {
    /// Selects a patch for a placement with the given neighbors.
    ///
    /// # Arguments
    /// - `candidates` - the full candidate set extracted from the exemplar.
    /// - `left` - the patch placed left of this position, [`None`] for the
    ///   first patch in a row.
    /// - `above` - the patch placed above this position, [`None`] in the
    ///   first row.
    ///
    /// With no neighbors at all any candidate fits, so one is drawn directly.
    /// The returned patch is an independent clone carrying the error surface
    /// of its scoring run; the candidate set itself is never modified.
    pub fn select<R: Rng>(
        &self,
        candidates: &[Patch],
        left: Option<&Patch>,
        above: Option<&Patch>,
        rng: &mut R,
    ) -> Result<Patch, PlaneError> {
        if left.is_none() && above.is_none() {
            let index = rng.gen_range(0..candidates.len());
            return Ok(candidates[index].clone());
        }

        let mut scored = Vec::with_capacity(candidates.len());
        let mut best_error = i32::MAX;

        for candidate in candidates {
            let mut patch = candidate.clone();
            let error = patch.compute_overlap_error(left, above)?;

            best_error = best_error.min(error);
            scored.push(patch);
        }

        let cutoff = f64::from(best_error) * self.margin;
        scored.retain(|patch| f64::from(patch.total_error()) <= cutoff);

        let index = rng.gen_range(0..scored.len());
        Ok(scored.swap_remove(index))
    }
}
