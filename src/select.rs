use crate::{evaluate, Dataset, FeatureSubset, SelectResult};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;

/// Way the greedy search walks through the feature subsets.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Start with no feature and add one per round
    Forward,
    /// Start with all the features and remove one per round
    Backward,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchParams {
    pub direction: Direction,
    /// Evaluate the candidates of a round on the Rayon thread pool.
    /// The result is the same as the sequential search.
    pub parallel: bool,
}

impl SearchParams {
    pub fn new(direction: Direction) -> Self {
        SearchParams {
            direction,
            parallel: true,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(Direction::Forward)
    }
}

/// Accuracy of a given subset.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Evaluation {
    pub subset: FeatureSubset,
    pub accuracy: f64,
}

/// A feature tried during a round: added for a forward search, removed for a backward one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub feature: usize,
    pub accuracy: f64,
}

/// Trace of one round of the search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Round {
    /// Starts at 1
    pub round: usize,
    /// Every feature tried, in ascending order
    pub candidates: Vec<Candidate>,
    /// None when no candidate had an accuracy above 0. The subset is then left unchanged.
    pub chosen: Option<usize>,
    /// Current subset at the end of the round
    pub subset: FeatureSubset,
    /// Accuracy of the chosen candidate, 0 if there is none
    pub accuracy: f64,
    /// True if the round beat the best accuracy seen before it
    pub improved: bool,
}

/// Result of a greedy search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Selection {
    pub direction: Direction,
    /// Starting point: no feature for a forward search, all of them for a backward one
    pub baseline: Evaluation,
    pub best_subset: FeatureSubset,
    pub best_accuracy: f64,
    pub rounds: Vec<Round>,
    /// Last look at the empty subset after a backward search
    pub closing: Option<Evaluation>,
}

impl Selection {
    pub fn best(&self) -> Evaluation {
        Evaluation {
            subset: self.best_subset.clone(),
            accuracy: self.best_accuracy,
        }
    }

    /// Number of calls to the evaluator during the search.
    pub fn n_evaluations(&self) -> usize {
        let n_candidates: usize = self.rounds.iter().map(|r| r.candidates.len()).sum();
        1 + n_candidates + self.closing.iter().count()
    }
}

/// Greedy forward selection: start from no feature and add the best one at every round.
pub fn forward_select(dataset: &Dataset) -> SelectResult<Selection> {
    select(dataset, &SearchParams::new(Direction::Forward))
}

/// Greedy backward elimination: start from all the features and remove the least useful one
/// at every round.
pub fn backward_select(dataset: &Dataset) -> SelectResult<Selection> {
    select(dataset, &SearchParams::new(Direction::Backward))
}

pub(crate) fn apply(
    subset: &FeatureSubset,
    feature: usize,
    direction: Direction,
) -> FeatureSubset {
    match direction {
        Direction::Forward => subset.with(feature),
        Direction::Backward => subset.without(feature),
    }
}

fn evaluate_candidates(
    dataset: &Dataset,
    current: &FeatureSubset,
    features: &[usize],
    params: &SearchParams,
) -> SelectResult<Vec<Candidate>> {
    let direction = params.direction;
    let eval = |feature: usize| -> SelectResult<Candidate> {
        let accuracy = evaluate(dataset, &apply(current, feature, direction))?;
        Ok(Candidate { feature, accuracy })
    };
    // The order of the candidates is kept, so ties are broken the same way in both cases
    if params.parallel {
        features.par_iter().map(|&feature| eval(feature)).collect()
    } else {
        features.iter().map(|&feature| eval(feature)).collect()
    }
}

/// Highest accuracy above 0, the lowest feature index wins the ties.
fn best_candidate(candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .filter(|c| c.accuracy > 0.)
        .min_by_key(|c| (Reverse(OrderedFloat(c.accuracy)), c.feature))
        .cloned()
}

/// Run a greedy search in the given direction.
///
/// There is exactly one round per feature. The chosen feature of a round is always applied,
/// even when it doesn't beat the best subset found so far: the search goes on in case it's
/// only a local maximum. The best subset is only replaced on a strict improvement.
pub fn select(dataset: &Dataset, params: &SearchParams) -> SelectResult<Selection> {
    let direction = params.direction;
    let n_features = dataset.n_features();
    let mut current = match direction {
        Direction::Forward => FeatureSubset::new(),
        Direction::Backward => dataset.all_features(),
    };

    let baseline = Evaluation {
        accuracy: evaluate(dataset, &current)?,
        subset: current.clone(),
    };
    info!(
        "{:?} search over {} features, starting from {} with accuracy {:.4}",
        direction, n_features, baseline.subset, baseline.accuracy
    );
    let mut best = baseline.clone();

    let mut rounds = Vec::with_capacity(n_features);
    for round in 1..=n_features {
        let features: Vec<usize> = match direction {
            Direction::Forward => (1..=n_features).filter(|&f| !current.contains(f)).collect(),
            Direction::Backward => current.sorted(),
        };
        let candidates = evaluate_candidates(dataset, &current, &features, params)?;
        for candidate in &candidates {
            debug!(
                "round {}: feature {} gives accuracy {:.4}",
                round, candidate.feature, candidate.accuracy
            );
        }

        let chosen = best_candidate(&candidates);
        let accuracy = chosen.map_or(0., |c| c.accuracy);
        match chosen {
            Some(c) => current = apply(&current, c.feature, direction),
            None => warn!("round {}: no candidate above 0, subset unchanged", round),
        }

        let improved = accuracy > best.accuracy;
        if improved {
            best = Evaluation {
                subset: current.clone(),
                accuracy,
            };
            info!("round {}: {} is the new best, accuracy {:.4}", round, current, accuracy);
        } else {
            warn!(
                "round {}: accuracy {:.4} of {} is below the best {:.4}, possible local maximum",
                round, accuracy, current, best.accuracy
            );
        }

        rounds.push(Round {
            round,
            candidates,
            chosen: chosen.map(|c| c.feature),
            subset: current.clone(),
            accuracy,
            improved,
        });
    }

    let closing = match direction {
        Direction::Forward => None,
        Direction::Backward => {
            let empty = FeatureSubset::new();
            let closing = Evaluation {
                accuracy: evaluate(dataset, &empty)?,
                subset: empty,
            };
            if closing.accuracy > best.accuracy {
                info!("no feature at all is the best, accuracy {:.4}", closing.accuracy);
                best = closing.clone();
            }
            Some(closing)
        }
    };

    Ok(Selection {
        direction,
        baseline,
        best_subset: best.subset,
        best_accuracy: best.accuracy,
        rounds,
        closing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_close {
        ($a : expr, $b: expr) => {{
            let (a, b) = ($a, $b);
            assert!((a - b).abs() <= 1e-9, "{:.6} != {:.6}", a, b);
        }};
    }

    /// Feature 2 separates the classes, feature 1 is weaker and spoils it when both are used.
    fn one_good_feature() -> Dataset {
        Dataset::from_rows(vec![
            vec![1., 0., 0.],
            vec![1., 1., 1.],
            vec![1., 20., 0.5],
            vec![2., 20., 10.],
            vec![2., 40., 11.],
            vec![2., 60., 10.5],
        ])
        .unwrap()
    }

    /// Both features are the same column.
    fn twin_features() -> Dataset {
        Dataset::from_rows(vec![
            vec![1., 0.0, 0.0],
            vec![1., 0.1, 0.1],
            vec![2., 5.0, 5.0],
            vec![2., 5.1, 5.1],
        ])
        .unwrap()
    }

    fn features(round: &Round) -> Vec<usize> {
        round.subset.to_vec()
    }

    #[test]
    fn test_forward_keeps_best_past_local_maximum() {
        let selection = forward_select(&one_good_feature()).unwrap();
        assert_close!(selection.baseline.accuracy, 0.5);
        assert_eq!(selection.rounds.len(), 2);

        let first = &selection.rounds[0];
        assert_eq!(first.chosen, Some(2));
        assert_close!(first.candidates[0].accuracy, 0.5);
        assert_close!(first.accuracy, 1.);
        assert!(first.improved);

        let second = &selection.rounds[1];
        assert_eq!(second.chosen, Some(1));
        assert_eq!(features(second), vec![2, 1]);
        assert_close!(second.accuracy, 4. / 6.);
        assert!(!second.improved);

        assert_eq!(selection.best_subset.to_vec(), vec![2]);
        assert_close!(selection.best_accuracy, 1.);
        assert_eq!(selection.closing, None);
        assert_eq!(selection.n_evaluations(), 4);
    }

    #[test]
    fn test_backward_keeps_best_after_emptying() {
        let selection = backward_select(&one_good_feature()).unwrap();
        assert_eq!(selection.baseline.subset.to_vec(), vec![1, 2]);
        assert_close!(selection.baseline.accuracy, 4. / 6.);

        let first = &selection.rounds[0];
        assert_eq!(first.chosen, Some(1));
        assert_eq!(features(first), vec![2]);
        assert_close!(first.accuracy, 1.);
        assert!(first.improved);

        let last = &selection.rounds[1];
        assert_eq!(last.chosen, Some(2));
        assert!(last.subset.is_empty());
        assert!(!last.improved);

        let closing = selection.closing.as_ref().unwrap();
        assert!(closing.subset.is_empty());
        assert_close!(closing.accuracy, 0.5);

        assert_eq!(selection.best_subset.to_vec(), vec![2]);
        assert_close!(selection.best_accuracy, 1.);
    }

    #[test]
    fn test_ties_pick_lowest_feature() {
        let dataset = twin_features();

        let forward = forward_select(&dataset).unwrap();
        assert_eq!(forward.rounds[0].chosen, Some(1));
        assert_eq!(forward.best_subset.to_vec(), vec![1]);

        let backward = backward_select(&dataset).unwrap();
        assert_eq!(backward.rounds[0].chosen, Some(1));
        assert_eq!(features(&backward.rounds[0]), vec![2]);
        // Removing a twin doesn't strictly improve, the full set stays the best
        assert_eq!(backward.best_subset.to_vec(), vec![1, 2]);
        assert_close!(backward.best_accuracy, 1.);
    }

    #[test]
    fn test_zero_accuracy_round_is_a_no_op() {
        // The single feature always points to a row of the other class
        let dataset = Dataset::from_rows(vec![
            vec![1., 0.],
            vec![2., 1.],
            vec![1., 10.],
            vec![2., 11.],
        ])
        .unwrap();

        let forward = forward_select(&dataset).unwrap();
        assert_eq!(forward.rounds.len(), 1);
        assert_eq!(forward.rounds[0].chosen, None);
        assert!(forward.rounds[0].subset.is_empty());
        assert_close!(forward.rounds[0].candidates[0].accuracy, 0.);
        assert!(forward.best_subset.is_empty());
        assert_close!(forward.best_accuracy, 0.25);

        let backward = backward_select(&dataset).unwrap();
        assert_close!(backward.baseline.accuracy, 0.);
        assert_eq!(backward.rounds[0].chosen, Some(1));
        assert!(backward.rounds[0].improved);
        assert!(backward.best_subset.is_empty());
        assert_close!(backward.best_accuracy, 0.25);
    }

    #[test]
    fn test_backward_closing_on_empty_subset() {
        // Any non-empty subset scores 0, so backward elimination never removes anything
        let dataset = Dataset::from_rows(vec![
            vec![1., 0., 0.],
            vec![2., 1., 1.],
            vec![1., 10., 10.],
            vec![2., 11., 11.],
        ])
        .unwrap();
        let selection = backward_select(&dataset).unwrap();
        assert!(selection.rounds.iter().all(|r| r.chosen.is_none()));
        assert_eq!(selection.rounds[1].subset.to_vec(), vec![1, 2]);
        assert!(selection.best_subset.is_empty());
        assert_close!(selection.best_accuracy, 0.25);
    }

    #[test]
    fn test_parallel_same_as_sequential() {
        let dataset = one_good_feature();
        for &direction in &[Direction::Forward, Direction::Backward] {
            let parallel = select(&dataset, &SearchParams::new(direction)).unwrap();
            let sequential = select(
                &dataset,
                &SearchParams {
                    direction,
                    parallel: false,
                },
            )
            .unwrap();
            assert_eq!(parallel, sequential);
        }
    }

    #[test]
    fn test_best_candidate() {
        let candidates = vec![
            Candidate {
                feature: 3,
                accuracy: 0.5,
            },
            Candidate {
                feature: 4,
                accuracy: 0.75,
            },
            Candidate {
                feature: 7,
                accuracy: 0.75,
            },
        ];
        assert_eq!(best_candidate(&candidates).map(|c| c.feature), Some(4));
        assert_eq!(best_candidate(&[]), None);
        assert_eq!(
            best_candidate(&[Candidate {
                feature: 1,
                accuracy: 0.
            }]),
            None
        );
    }
}
