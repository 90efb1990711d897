use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use figgerit::events::channel;
use figgerit::model::GeneratorEvent;
use figgerit::{
    get_figgerits_by_volume, FiggeritError, FiggeritGenerator, GenerationOutcome,
    GenerationRequest, GeneratorSettings, MemoryStore, Riddle, Saying,
};

/// Builds figgerit puzzles from a pool of riddles and sayings.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// JSON file holding the riddle/saying pool and published figgerits.
    #[arg(short = 'p', long, default_value = "pool.json")]
    pool: PathBuf,

    /// JSON file with generator settings.
    #[arg(short = 's', long, default_value = "figgerit-settings.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate figgerits for a volume and save them to the pool.
    Generate {
        #[arg(short = 'v', long)]
        volume: u32,

        /// Defaults to the settings file.
        #[arg(short = 'n', long)]
        count: Option<usize>,

        #[arg(long)]
        sample_size: Option<usize>,

        #[arg(short = 'c', long)]
        category: Option<String>,

        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the figgerits of a volume.
    Show {
        #[arg(short = 'v', long)]
        volume: u32,
    },
    /// Add a riddle to the pool.
    AddRiddle {
        #[arg(long)]
        clue: String,
        #[arg(long)]
        word: String,
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
    /// Add a saying to the pool.
    AddSaying {
        #[arg(long)]
        text: String,
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
}

fn init_logging() {
    env_logger::init();
}

fn run(opts: Opts) -> Result<(), FiggeritError> {
    let settings = GeneratorSettings::load(&opts.settings);

    match opts.command {
        Command::Generate {
            volume,
            count,
            sample_size,
            category,
            seed,
        } => {
            let seed = seed.or(settings.seed).unwrap_or_else(rand::random::<u64>);
            info!("Sampling seed {}", seed);
            let mut store = MemoryStore::load(&opts.pool, seed)?;

            let mut request = GenerationRequest::new(
                count.unwrap_or(settings.count),
                sample_size.unwrap_or(settings.sample_size),
                volume,
            );
            if let Some(category) = category {
                request = request.with_category(category);
            }

            let (emitter, observer) = channel::<GeneratorEvent>();
            observer.subscribe(|event: &GeneratorEvent| {
                if let GeneratorEvent::FiggeritCommitted {
                    attempt, produced, ..
                } = event
                {
                    eprintln!("figgerit {} found on attempt {}", produced, attempt);
                }
            });
            let generator = FiggeritGenerator::new(&settings).with_events(emitter);

            let result = generator.create_figgerits(&mut store, &request);
            // committed figgerits and tags are kept even when the run fails part way
            store.save(&opts.pool)?;

            match result {
                Ok(report) => {
                    for figgerit in report.figgerits.iter() {
                        println!("{}", figgerit);
                    }
                    if let GenerationOutcome::Partial { message } = &report.outcome {
                        eprintln!("{}", message);
                    }
                    Ok(())
                }
                Err(e) => {
                    if let FiggeritError::MidRunInsufficientRiddles { committed, .. } = &e {
                        for figgerit in committed {
                            println!("{}", figgerit);
                        }
                    }
                    Err(e)
                }
            }
        }
        Command::Show { volume } => {
            let store = MemoryStore::load(&opts.pool, 0)?;
            for figgerit in get_figgerits_by_volume(&store, volume)? {
                println!("{}", figgerit);
            }
            Ok(())
        }
        Command::AddRiddle {
            clue,
            word,
            category,
        } => {
            let mut store = MemoryStore::load(&opts.pool, 0)?;
            store.add_riddle(Riddle::new(&clue, &word, category.as_deref())?);
            store.save(&opts.pool)?;
            Ok(())
        }
        Command::AddSaying { text, category } => {
            let mut store = MemoryStore::load(&opts.pool, 0)?;
            store.add_saying(Saying::new(&text, category.as_deref())?);
            store.save(&opts.pool)?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let opts = Opts::parse();

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
