// Backward elimination, sequential and parallel, on the same dataset as forward_selection.

use rselect::{parse_table, select, Direction, SearchParams};
use std::time::Instant;

fn main() -> Result<(), failure::Error> {
    env_logger::init();

    let data = include_str!("data/small.txt");
    let dataset = parse_table(data)?;

    for &parallel in &[false, true] {
        let params = SearchParams {
            direction: Direction::Backward,
            parallel,
        };
        let start_time = Instant::now();
        let selection = select(&dataset, &params)?;
        println!(
            "parallel={} best {} accuracy {:.1}% after {} evaluations. Elapsed: {:.3} secs",
            parallel,
            selection.best_subset,
            selection.best_accuracy * 100.,
            selection.n_evaluations(),
            start_time.elapsed().as_secs_f64()
        );
        for round in &selection.rounds {
            let removed = match round.chosen {
                Some(feature) => feature.to_string(),
                None => "nothing".to_string(),
            };
            println!(
                "    round {}: removed {}, {} -> {:.1}%",
                round.round,
                removed,
                round.subset,
                round.accuracy * 100.
            );
        }
    }
    Ok(())
}
