use clap::{Parser, ValueEnum};
use failure::{bail, Error, ResultExt};
use rselect::report::write_report;
use rselect::{load_table, select, Direction, SearchParams};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Forward,
    Backward,
}

impl From<Algorithm> for Direction {
    fn from(algorithm: Algorithm) -> Direction {
        match algorithm {
            Algorithm::Forward => Direction::Forward,
            Algorithm::Backward => Direction::Backward,
        }
    }
}

/// Greedy feature selection with a leave-one-out nearest neighbor classifier.
///
/// The data file has one instance per line: the class label then the features.
/// Missing arguments are asked on the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Data file, whitespace or comma separated
    file: Option<PathBuf>,

    /// Search algorithm
    #[arg(short, long, value_enum)]
    direction: Option<Algorithm>,

    /// Evaluate the candidates of a round on a single thread
    #[arg(long)]
    sequential: bool,
}

fn prompt(stdin: &mut impl BufRead, message: &str) -> Result<String, Error> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        bail!("no answer on the standard input");
    }
    Ok(line.trim().to_string())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let file = match args.file {
        Some(file) => file,
        None => {
            println!("Welcome to the feature selection algorithm.");
            PathBuf::from(prompt(&mut stdin, "Type in the name of the file to test: ")?)
        }
    };
    let direction = match args.direction {
        Some(algorithm) => Direction::from(algorithm),
        None => {
            let answer = prompt(
                &mut stdin,
                "Type the number of the algorithm you want to run.\n\n    1) Forward Selection\n    2) Backward Elimination\n\n",
            )?;
            match answer.as_str() {
                "1" => Direction::Forward,
                "2" => Direction::Backward,
                other => bail!("unknown algorithm {:?}, expected 1 or 2", other),
            }
        }
    };

    let dataset = load_table(&file)?;
    println!(
        "This dataset has {} features (not including the class attribute), with {} instances.",
        dataset.n_features(),
        dataset.n_rows()
    );
    println!();

    let params = SearchParams {
        direction,
        parallel: !args.sequential,
    };
    let start_time = Instant::now();
    let selection = select(&dataset, &params)
        .with_context(|_| format!("search failed on {}", file.display()))?;
    let elapsed = start_time.elapsed();

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &selection, Some(elapsed))?;
    Ok(())
}
