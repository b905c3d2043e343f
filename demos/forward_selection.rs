// Forward selection on a small dataset where features 2 and 5 carry the class.

use rselect::report::write_report;
use rselect::{parse_table, select, Direction, SearchParams};
use std::io;
use std::time::Instant;

fn main() -> Result<(), failure::Error> {
    env_logger::init();

    // Load the data
    let data = include_str!("data/small.txt");
    let dataset = parse_table(data)?;
    println!(
        "This dataset has {} features (not including the class attribute), with {} instances.\n",
        dataset.n_features(),
        dataset.n_rows()
    );

    let params = SearchParams::new(Direction::Forward);
    println!("Params {:?}", params);

    let start_time = Instant::now();
    let selection = select(&dataset, &params)?;
    let elapsed = start_time.elapsed();

    write_report(&mut io::stdout(), &selection, Some(elapsed))?;
    Ok(())
}
