//! Human readable trace of a search.
use crate::select::apply;
use crate::{Direction, Selection};
use std::io::{self, Write};
use std::time::Duration;

fn percent(accuracy: f64) -> String {
    format!("{:.1}%", accuracy * 100.)
}

/// Write the baseline, every candidate of every round, the local maxima warnings and the
/// final best subset.
pub fn write_report<W: Write>(
    w: &mut W,
    selection: &Selection,
    elapsed: Option<Duration>,
) -> io::Result<()> {
    let direction = selection.direction;
    let baseline = &selection.baseline;
    match direction {
        Direction::Forward => writeln!(
            w,
            "Running nearest neighbor with no features (default rate), using \"leaving-one-out\" evaluation, I get an accuracy of {}",
            percent(baseline.accuracy)
        )?,
        Direction::Backward => writeln!(
            w,
            "Running nearest neighbor with all {} features, using \"leaving-one-out\" evaluation, I get an accuracy of {}",
            baseline.subset.len(),
            percent(baseline.accuracy)
        )?,
    }
    writeln!(w)?;
    writeln!(w, "Beginning search.")?;
    writeln!(w)?;

    let mut current = &baseline.subset;
    for round in &selection.rounds {
        for candidate in &round.candidates {
            let subset = apply(current, candidate.feature, direction);
            match direction {
                Direction::Forward => writeln!(
                    w,
                    "        Using feature(s) {} accuracy is {}",
                    subset,
                    percent(candidate.accuracy)
                )?,
                Direction::Backward => writeln!(
                    w,
                    "        Removing feature {}, using feature(s) {} accuracy is {}",
                    candidate.feature,
                    subset,
                    percent(candidate.accuracy)
                )?,
            }
        }
        writeln!(w)?;
        if round.chosen.is_none() {
            writeln!(
                w,
                "No candidate is above 0% accuracy, the feature set stays {}",
                round.subset
            )?;
        } else if !round.improved {
            writeln!(
                w,
                "(Warning, accuracy has decreased! Continuing search in case of local maxima)"
            )?;
        }
        writeln!(
            w,
            "Feature set {} was best, accuracy is {}",
            round.subset,
            percent(round.accuracy)
        )?;
        writeln!(w)?;
        current = &round.subset;
    }

    if let Some(closing) = &selection.closing {
        writeln!(
            w,
            "With no features at all, accuracy is {}",
            percent(closing.accuracy)
        )?;
        writeln!(w)?;
    }

    writeln!(
        w,
        "Finished search!! The best feature subset is {}, which has an accuracy of {}",
        selection.best_subset,
        percent(selection.best_accuracy)
    )?;
    if let Some(elapsed) = elapsed {
        writeln!(w, "Elapsed: {:.2} secs", elapsed.as_secs_f64())?;
    }
    Ok(())
}
