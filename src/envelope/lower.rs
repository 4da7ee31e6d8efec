//! Lower envelope of parabolas sampled at consecutive integer abscissae.
//!
//! Parabolas `p(x) = (x·s − i·s)² + y` are added in order of strictly
//! increasing apex abscissa `i`; the envelope keeps only those that are the
//! pointwise minimum somewhere and remembers, for each survivor, the abscissa
//! from which it dominates. Afterwards the envelope can be sampled at
//! consecutive integer abscissae, optionally copying an opaque per-parabola
//! label to every sample it wins.
//!
//! Dominance boundaries come from the intersection abscissa of two parabolas,
//! computed with floor division: the returned cut is the largest integer at
//! which the earlier parabola still lies on or below the later one. When two
//! parabolas meet exactly at an integer, the earlier one therefore wins that
//! sample and the later one wins from the next sample onward.
//!
//! Sampling never mutates the envelope: the end of the region list bounds
//! the iteration implicitly, so an envelope can keep receiving parabolas
//! after being sampled, and a cleared envelope reuses its allocation.

use super::bounds::EnvelopeBounds;
use super::pixel::DistancePixel;

/// Abscissa spacing shared by all parabolas of one envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spacing {
    /// Index space equals physical space; the s² factors drop out of the
    /// intersection and evaluation formulas.
    Unit,
    /// Physical spacing between consecutive abscissae.
    Scaled { s: f64, s_sq: f64 },
}

impl Spacing {
    /// Spacing `s` with its square precomputed for the inner loops.
    pub fn scaled(s: f64) -> Self {
        Self::Scaled { s, s_sq: s * s }
    }

    /// The physical distance between consecutive abscissae.
    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::Scaled { s, .. } => *s,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Parabola<D, L> {
    apex: i64,
    height: D,
    label: L,
}

/// A parabola together with the left border of the open interval on which it
/// is the pointwise minimum of the envelope.
#[derive(Clone, Copy, Debug)]
struct ParabolaRegion<D, L> {
    parabola: Parabola<D, L>,
    dominant_from: i64,
}

/// Lower envelope of parabolas with apexes at integer abscissae.
///
/// `D` is the apex-height/distance pixel; `L` is an opaque label copied to
/// every sample a parabola wins. The default `L = ()` compiles all label
/// bookkeeping away.
pub struct LowerEnvelope<D: DistancePixel, L: Copy = ()> {
    spacing: Spacing,
    bounds: EnvelopeBounds,
    regions: Vec<ParabolaRegion<D, L>>,
}

impl<D: DistancePixel, L: Copy> LowerEnvelope<D, L> {
    /// Create an envelope expecting up to `expected_parabolas` additions,
    /// typically the scanline length.
    pub fn new(expected_parabolas: usize, spacing: Spacing) -> Self {
        let bounds = EnvelopeBounds::for_spacing::<D>(spacing.value());
        Self {
            spacing,
            bounds,
            regions: Vec::with_capacity(expected_parabolas),
        }
    }

    /// The overflow bounds this envelope enforces.
    #[inline]
    pub fn bounds(&self) -> EnvelopeBounds {
        self.bounds
    }

    /// Number of parabolas currently participating in the envelope.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Forget all parabolas but keep the allocation for the next scanline.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Add the parabola `(x·s − apex·s)² + height` carrying `label`.
    ///
    /// Preconditions, checked in debug builds and undefined in release:
    /// `apex` is strictly greater than every previously added apex,
    /// `|apex| ≤ max_abscissa` and `|height| ≤ max_apex_height`.
    pub fn add_labeled_parabola(&mut self, apex: i64, height: D, label: L) {
        let height_wide = height.to_wide();
        debug_assert!(
            height_wide.is_finite() && height_wide.abs() <= self.bounds.max_apex_height,
            "apex height {height_wide} outside [-{0}, {0}]",
            self.bounds.max_apex_height
        );
        debug_assert!(
            apex.abs() <= self.bounds.max_abscissa,
            "apex abscissa {apex} outside the representable range {}",
            self.bounds.max_abscissa
        );
        debug_assert!(
            self.regions
                .last()
                .is_none_or(|last| apex > last.parabola.apex),
            "apex abscissae must be strictly increasing"
        );

        let parabola = Parabola {
            apex,
            height,
            label,
        };
        loop {
            let Some(last) = self.regions.last() else {
                self.regions.push(ParabolaRegion {
                    parabola,
                    dominant_from: i64::MIN,
                });
                return;
            };
            let cut = self.intersection(&last.parabola, &parabola);
            if cut <= last.dominant_from {
                // The last parabola is nowhere minimal anymore.
                self.regions.pop();
            } else {
                self.regions.push(ParabolaRegion {
                    parabola,
                    dominant_from: cut,
                });
                return;
            }
        }
    }

    /// Write the envelope's minimum at abscissae `from, from+1, …` into
    /// `out`. Panics if the envelope is empty.
    pub fn sample_into(&self, from: i64, out: &mut [D]) {
        assert!(!self.regions.is_empty(), "cannot sample an empty envelope");
        let mut j = 0;
        for (step, slot) in out.iter_mut().enumerate() {
            let x = from + step as i64;
            j = self.region_at(j, x);
            *slot = self.value_at(&self.regions[j].parabola, x);
        }
    }

    /// Like [`Self::sample_into`], additionally copying the dominating
    /// parabola's label at every abscissa.
    pub fn sample_with_labels_into(&self, from: i64, distances: &mut [D], labels: &mut [L]) {
        assert!(!self.regions.is_empty(), "cannot sample an empty envelope");
        assert_eq!(
            distances.len(),
            labels.len(),
            "distance and label output lengths disagree"
        );
        let mut j = 0;
        for (step, (slot, label_slot)) in distances.iter_mut().zip(labels.iter_mut()).enumerate() {
            let x = from + step as i64;
            j = self.region_at(j, x);
            let region = &self.regions[j];
            *slot = self.value_at(&region.parabola, x);
            *label_slot = region.parabola.label;
        }
    }

    /// Advance the region cursor so that region `j` dominates abscissa `x`.
    /// Region `j` wins every `x` with `dominant_from_j < x ≤ dominant_from_{j+1}`.
    #[inline]
    fn region_at(&self, mut j: usize, x: i64) -> usize {
        while let Some(next) = self.regions.get(j + 1) {
            if next.dominant_from < x {
                j += 1;
            } else {
                break;
            }
        }
        j
    }

    /// Evaluate a parabola at abscissa `x`, saturating at the sentinel.
    #[inline]
    fn value_at(&self, p: &Parabola<D, L>, x: i64) -> D {
        let dx = (x - p.apex) as f64;
        let offset_sq = match self.spacing {
            Spacing::Unit => dx * dx,
            Spacing::Scaled { s_sq, .. } => dx * dx * s_sq,
        };
        D::from_wide((offset_sq + p.height.to_wide()).min(self.bounds.max_apex_height))
    }

    /// Largest integer abscissa at which `p` still lies on or below `q`,
    /// clamped to the representable range. Requires `p.apex < q.apex`.
    fn intersection(&self, p: &Parabola<D, L>, q: &Parabola<D, L>) -> i64 {
        let ip = p.apex as f64;
        let iq = q.apex as f64;
        let dy = q.height.to_wide() - p.height.to_wide();
        let cut = match self.spacing {
            Spacing::Unit => (dy + (iq * iq - ip * ip)) / (2.0 * (iq - ip)),
            Spacing::Scaled { s_sq, .. } => {
                (dy + s_sq * (iq * iq - ip * ip)) / (2.0 * s_sq * (iq - ip))
            }
        };
        let max_a = self.bounds.max_abscissa as f64;
        cut.floor().clamp(-max_a, max_a) as i64
    }
}

impl<D: DistancePixel> LowerEnvelope<D, ()> {
    /// Add an unlabeled parabola.
    pub fn add_parabola(&mut self, apex: i64, height: D) {
        self.add_labeled_parabola(apex, height, ());
    }
}
