use markov_gen_core::io::normalize_folder;
use markov_gen_core::model::MarkovChain;

/// Source texts to learn from, with the number of times each is ingested.
/// Ingesting a source several times weights it more heavily.
const SOURCES: [(&str, usize); 2] = [
    ("lovecraft_collected_stories.txt", 1),
    ("thus_spake_zarathustra.txt", 3),
];

/// Number of tokens to generate.
const LENGTH: usize = 5000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Order 3: the next word depends on the three previous ones
    let mut chain = MarkovChain::new(3)?;

    // Source texts live in the "source-text" directory
    let folder = normalize_folder("./source-text");
    for (file, repeat) in SOURCES {
        for _ in 0..repeat {
            // A missing or non UTF-8 source aborts the run
            chain.ingest_file(folder.join(file))?;
        }
    }

    let stats = chain.stats();
    log::info!(
        "Learned {} contexts from {} observations",
        stats.contexts,
        stats.observations
    );

    // Each dead end in the chain starts a new paragraph
    println!("{}", chain.output(LENGTH)?);
    println!();

    Ok(())
}
