use clap::{Args as ClapArgs, Parser, Subcommand};
use lucky_letters::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Finds lucky letter draws: random six-letter sets that spell many five and six letter words.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a file that contains a list of words, with one word on each line. May be given
    /// more than once; the lists are merged in order.
    #[arg(short = 'f', long = "words-file", required = true)]
    words_files: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for lucky draws and print them as JSON.
    Lucky {
        /// How many qualifying draws to look for.
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        count: i64,

        #[command(flatten)]
        search: SearchArgs,

        /// Seed for the letter sampler, for reproducible draws.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the words that can be spelled from the given six letters.
    Check {
        letters: String,

        /// At most this many words are printed.
        #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
        max_words: usize,
    },
    /// Run many independent searches in parallel and summarize how they went.
    Stats {
        /// How many searches to run.
        #[arg(short, long, default_value_t = 100)]
        runs: u32,

        /// How many qualifying draws each search looks for.
        #[arg(short, long, default_value_t = 1)]
        count: i64,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// A draw qualifies iff it spells at least this many words.
    #[arg(long, default_value_t = DEFAULT_MIN_QUALIFYING_MATCHES)]
    min_matches: usize,

    /// Give up after this many draws.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Keep at most this many words per draw.
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Stop searching after this many milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

impl SearchArgs {
    fn to_config(&self) -> SearchConfig {
        let config = SearchConfig::default()
            .with_min_qualifying_matches(self.min_matches)
            .with_max_attempts(self.max_attempts)
            .with_max_words(self.max_words);
        match self.time_limit_ms {
            Some(millis) => config.with_time_limit(Duration::from_millis(millis)),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), LuckyLettersError> {
    let start_time = Instant::now();
    let word_bank = args
        .words_files
        .iter()
        .fold(WordBankBuilder::new(), |builder, path| builder.add_file(path))
        .build()?;
    eprintln!("There are {} possible words.", word_bank.len());

    match args.command {
        Command::Lucky {
            count,
            search,
            seed,
        } => run_lucky(count, &search.to_config(), seed, &word_bank)?,
        Command::Check { letters, max_words } => run_check(&letters, max_words, &word_bank)?,
        Command::Stats {
            runs,
            count,
            search,
        } => run_stats(runs, count, &search.to_config(), &word_bank)?,
    }

    eprintln!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_lucky(
    count: i64,
    config: &SearchConfig,
    seed: Option<u64>,
    word_bank: &WordBank,
) -> Result<(), LuckyLettersError> {
    let results = match seed {
        Some(seed) => search_draws(
            count,
            word_bank,
            &mut WeightedLetterSampler::new(StdRng::seed_from_u64(seed)),
            config,
        )?,
        None => search_draws(
            count,
            word_bank,
            &mut WeightedLetterSampler::from_thread_rng(),
            config,
        )?,
    };
    if results.len() < count as usize {
        eprintln!(
            "Only found {} of {} draws after {} attempts ({:?}).",
            results.len(),
            count,
            results.attempts(),
            results.stop()
        );
    }
    let json = serde_json::to_string_pretty(&results)
        .map_err(|err| LuckyLettersError::Io(err.into()))?;
    println!("{}", json);
    Ok(())
}

fn run_check(
    letters: &str,
    max_words: usize,
    word_bank: &WordBank,
) -> Result<(), LuckyLettersError> {
    let draw: LetterDraw = letters.parse()?;
    let words = filter_words(&draw, word_bank, max_words);
    println!("{} spells {} words:", draw, words.len());
    for word in words.iter() {
        println!("\t{}", word);
    }
    Ok(())
}

fn run_stats(
    runs: u32,
    count: i64,
    config: &SearchConfig,
    word_bank: &WordBank,
) -> Result<(), LuckyLettersError> {
    let all_results = (0..runs)
        .into_par_iter()
        .map(|_| {
            search_draws(
                count,
                word_bank,
                &mut WeightedLetterSampler::from_thread_rng(),
                config,
            )
        })
        .collect::<Result<Vec<SearchResults>, LuckyLettersError>>()?;
    if all_results.is_empty() {
        println!("No searches were run.");
        return Ok(());
    }

    let num_runs = all_results.len() as f64;
    let satisfied = all_results
        .iter()
        .filter(|results| results.stop() == SearchStop::Satisfied)
        .count();
    let average_found =
        all_results.iter().map(|results| results.len()).sum::<usize>() as f64 / num_runs;
    let average_attempts = all_results
        .iter()
        .map(|results| results.attempts() as f64)
        .sum::<f64>()
        / num_runs;
    let std_dev: f64 = (all_results
        .iter()
        .map(|results| (results.attempts() as f64 - average_attempts).powi(2))
        .sum::<f64>()
        / num_runs)
        .sqrt();
    let duplicates: u32 = all_results
        .iter()
        .map(|results| results.duplicate_draws())
        .sum();

    println!("|Runs|Satisfied|Avg draws found|Duplicate draws|");
    println!("|----|---------|---------------|---------------|");
    println!(
        "|{}|{}|{:.2}|{}|",
        all_results.len(),
        satisfied,
        average_found,
        duplicates
    );
    println!(
        "\n**Average number of attempts:** {:.2} +/- {:.2}",
        average_attempts, std_dev
    );
    Ok(())
}
