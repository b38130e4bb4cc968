//! Running best solution and the tie-break rule.

use super::candidate::Candidate;
use super::evaluator::{Evaluation, Evaluator};

/// Ratios closer than this are considered equal.
pub const RATIO_EPSILON: f64 = 1e-9;

/// A feasible candidate with its evaluated objective.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub candidate: Candidate,
    pub units: u64,
    pub ratio: f64,
}

impl Scored {
    /// Whether `(ratio, aisles)` beats this solution.
    ///
    /// Higher ratio wins; on an equal ratio, fewer aisles wins; otherwise
    /// the existing solution stays.
    pub fn is_beaten_by(&self, ratio: f64, aisles: usize) -> bool {
        if ratio > self.ratio + RATIO_EPSILON {
            return true;
        }
        (ratio - self.ratio).abs() <= RATIO_EPSILON && aisles < self.candidate.aisles().len()
    }
}

/// Best feasible candidate seen so far.
///
/// # Examples
///
/// ```
/// use u_wave::catalog::Catalog;
/// use u_wave::eval::{Candidate, Evaluator, Incumbent};
///
/// let catalog = Catalog::new(
///     1,
///     vec![vec![(0, 5)], vec![(0, 5)]],
///     vec![vec![(0, 5)], vec![(0, 5)]],
///     5,
///     10,
/// ).unwrap();
/// let evaluator = Evaluator::new(&catalog);
/// let mut best = Incumbent::new();
/// assert!(best.offer(&evaluator, Candidate::new(vec![0, 1], vec![0, 1])));
///
/// // same ratio with fewer aisles replaces it
/// assert!(best.offer(&evaluator, Candidate::new(vec![0], vec![0])));
/// assert_eq!(best.best().unwrap().candidate.aisles(), &[0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    best: Option<Scored>,
}

impl Incumbent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates `candidate` and keeps it if it beats the incumbent.
    /// Infeasible candidates are ignored.
    ///
    /// Returns `true` if the candidate became the new incumbent.
    pub fn offer(&mut self, evaluator: &Evaluator<'_>, candidate: Candidate) -> bool {
        let (units, ratio) = match evaluator.evaluate(&candidate) {
            Evaluation::Feasible { units, ratio, .. } => (units, ratio),
            Evaluation::Infeasible(_) => return false,
        };
        let accept = match &self.best {
            None => true,
            Some(best) => best.is_beaten_by(ratio, candidate.aisles().len()),
        };
        if accept {
            self.best = Some(Scored {
                candidate,
                units,
                ratio,
            });
        }
        accept
    }

    /// Whether some wave with `aisles` aisles and ratio at most `bound`
    /// could still replace the incumbent.
    ///
    /// An equal bound only admits fewer aisles than the incumbent uses.
    pub fn admits(&self, bound: f64, aisles: usize) -> bool {
        self.best
            .as_ref()
            .is_none_or(|best| best.is_beaten_by(bound, aisles))
    }

    /// Ratio of the incumbent, `0.0` if there is none.
    pub fn ratio(&self) -> f64 {
        self.best.as_ref().map_or(0.0, |b| b.ratio)
    }

    pub fn best(&self) -> Option<&Scored> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<Scored> {
        self.best
    }
}
