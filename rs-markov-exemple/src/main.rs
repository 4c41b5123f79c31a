use std::env;

use log::info;
use rs_markov_core::model::generation_input::{GenerationInput, StartSeed};
use rs_markov_core::model::generator::Generator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Verbosity through RUST_LOG, ex. RUST_LOG=debug
    env_logger::init();

    // Usage: rs-markov-exemple <text-file> [order] [seed] [length]
    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map(String::as_str).unwrap_or("./data/corpus.txt");
    let order: usize = args.get(2).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(2);
    let seed: u64 = args.get(3).map(|s| s.parse::<u64>()).transpose()?.unwrap_or(42);
    let length: usize = args.get(4).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(50);

    // Build the model from the whole file
    let mut app = Generator::from_file(order, seed, path)?;
    info!("Model of order {} with {} contexts", order, app.model().len());

    // Start from a random context, jump to another one on dead ends
    let mut input = GenerationInput::new(length, StartSeed::Random)?;
    input.max_restarts = 5;

    let words = app.generate(&input)?;
    println!("{}", words.join(" "));

    // Frequencies of the first generated context
    let context = words[..order.min(words.len())].join(" ");
    println!("'{}' was followed {} times", context, app.model().get_frequency(context.as_str()));

    // A context with the wrong number of words is rejected with -1
    println!("Frequency of an empty context: {}", app.model().get_frequency(""));

    // A custom start must have exactly `order` words
    input.start_seed = StartSeed::Custom("lorem ipsum dolor".to_owned());
    match app.generate(&input) {
        Ok(words) => println!("{}", words.join(" ")),
        Err(e) => println!("Custom start rejected: {e}"),
    }

    Ok(())
}
