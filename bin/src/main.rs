use clap::{Parser, Subcommand};
use log::{debug, error};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;
use wordle_engine::*;

const NUM_SUGGESTIONS: usize = 5;
const MAX_SOLVER_GUESSES: u32 = 128;

/// A five-letter word guessing game, with an assistant that suggests the next guess.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the list of possible answers, with one word on each line.
    #[clap(short = 'a', long, default_value = "data/WordList.txt")]
    answers_file: String,

    /// Path to the list of additional accepted guesses, with one word on each line.
    #[clap(short = 'f', long, default_value = "data/AcceptedWordList")]
    accepted_file: String,

    /// What to run. Shows a menu when omitted.
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in the terminal against a random answer.
    Play,
    /// Print letter statistics and the best starting words.
    Analyze,
    /// Enter the feedback from a game played elsewhere and get suggestions.
    Solve,
    /// Let the solver play a single game with the given answer.
    Single { word: String },
    /// Let the solver play every answer and report how many guesses it needed.
    Benchmark,
    /// Launch the graphical interface.
    Gui,
}

fn main() -> Result<ExitCode, WordleError> {
    env_logger::init();
    let args = Args::parse();

    let dictionary = match load_dictionary(&args) {
        Ok(dictionary) => dictionary,
        Err(err) => {
            error!(
                "could not load word lists {:?} and {:?}: {}",
                args.answers_file, args.accepted_file, err
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let command = match args.command {
        Some(command) => command,
        None => return run_menu(&dictionary),
    };

    let start_time = Instant::now();
    let exit_code = match command {
        Command::Play => {
            play_terminal_game(&dictionary)?;
            ExitCode::SUCCESS
        }
        Command::Analyze => {
            print!("{}", compute_stats(&dictionary));
            ExitCode::SUCCESS
        }
        Command::Solve => {
            run_solver(&dictionary)?;
            ExitCode::SUCCESS
        }
        Command::Single { word } => play_single_game(&word, &dictionary)?,
        Command::Benchmark => {
            run_benchmark(&dictionary);
            ExitCode::SUCCESS
        }
        Command::Gui => return Ok(launch_gui()),
    };
    debug!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(exit_code)
}

fn load_dictionary(args: &Args) -> Result<Dictionary, WordleError> {
    let answers = io::BufReader::new(File::open(&args.answers_file)?);
    let accepted = io::BufReader::new(File::open(&args.accepted_file)?);
    Dictionary::from_readers(answers, accepted)
}

/// Reads one line from stdin, or `None` at the end of input.
fn read_line() -> io::Result<Option<String>> {
    io::stdout().flush()?;
    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

fn run_menu(dictionary: &Dictionary) -> Result<ExitCode, WordleError> {
    loop {
        println!("\n1) play terminal\n2) analyze\n3) launch GUI\n4) exit");
        print!("> ");
        let choice = match read_line()? {
            Some(choice) => choice,
            None => return Ok(ExitCode::SUCCESS),
        };
        match choice.as_str() {
            "1" => play_terminal_game(dictionary)?,
            "2" => print!("{}", compute_stats(dictionary)),
            "3" => return Ok(launch_gui()),
            "4" => return Ok(ExitCode::SUCCESS),
            other => println!("Unknown option {:?}. Enter a number from 1 to 4.", other),
        }
    }
}

fn launch_gui() -> ExitCode {
    println!("GUI not available. This build has no graphical interface.");
    ExitCode::from(1)
}

fn play_terminal_game(dictionary: &Dictionary) -> io::Result<()> {
    let mut game = Game::new_random(dictionary, &mut rand::thread_rng());
    println!(
        "Guess the five-letter word in {} tries. Enter '?' for a hint.",
        MAX_GUESSES
    );

    while game.status() == GameStatus::Playing {
        print!("Guess {}/{}: ", game.history().len() + 1, MAX_GUESSES);
        let input = match read_line()? {
            Some(input) => input,
            None => return Ok(()),
        };
        if input == "?" {
            print_suggestions(&game.top_guesses(NUM_SUGGESTIONS));
            continue;
        }
        match game.guess(&input) {
            Ok(result) => {
                println!("  {}  {}", result.guess, result.feedback);
                println!("  {}", render_keyboard(&game));
            }
            Err(err) => println!("{}", err),
        }
    }

    match game.status() {
        GameStatus::Won => println!("You got it in {} guesses!", game.history().len()),
        _ => println!("Out of guesses. The word was {}.", game.answer()),
    }
    Ok(())
}

fn render_keyboard(game: &Game) -> String {
    ('A'..='Z')
        .map(|letter| match game.key_state(letter) {
            KeyState::Correct => format!("[{}]", letter),
            KeyState::Present => format!("({})", letter),
            KeyState::Absent => " - ".to_string(),
            KeyState::Unused => format!(" {} ", letter),
        })
        .collect()
}

fn print_suggestions(suggestions: &[ScoredWord]) {
    if suggestions.is_empty() {
        println!("No word matches the feedback so far.");
        return;
    }
    for (rank, ScoredWord { word, score }) in suggestions.iter().enumerate() {
        println!("  {}. {} ({})", rank + 1, word, score);
    }
}

fn run_solver(dictionary: &Dictionary) -> io::Result<()> {
    let mut solver = Solver::new(dictionary);
    println!(
        "Enter each guess followed by its feedback, e.g. \"crane XGXXY\", where:\n\n\
           * 'G' = this letter is in the word and in the right location\n\
           * 'Y' = this letter is in the word, but not in this location\n\
           * 'X' = this letter is not in the word.\n\n\
         Enter an empty line to stop."
    );
    print_suggestions(&solver.top_n_guesses(NUM_SUGGESTIONS));

    loop {
        print!("> ");
        let input = match read_line()? {
            Some(input) if !input.is_empty() => input,
            _ => return Ok(()),
        };
        let mut parts = input.split_whitespace();
        let result = match (parts.next(), parts.next(), parts.next()) {
            (Some(guess), Some(feedback), None) => {
                GuessResult::parse(guess, &feedback.to_uppercase())
            }
            _ => {
                println!("Expected a guess and its feedback separated by a space. Try again.");
                continue;
            }
        };
        match result {
            Ok(result) => {
                if result.feedback.is_win() {
                    println!("Solved in {} guesses.", solver.history().len() + 1);
                    return Ok(());
                }
                solver.update(result);
                println!("{} possible words remain.", solver.possible_words().len());
                print_suggestions(&solver.top_n_guesses(NUM_SUGGESTIONS));
            }
            Err(err) => println!("{}. Try again.", err),
        }
    }
}

fn play_single_game(word: &str, dictionary: &Dictionary) -> Result<ExitCode, WordleError> {
    let answer = Word::new(word)?;
    let result = play_game_with_solver(&answer, MAX_SOLVER_GUESSES, dictionary);
    match result {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::UnknownWord => {
            error!("{} is not in the word list", answer);
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_benchmark(dictionary: &Dictionary) {
    let mut num_guesses_per_game: Vec<u32> = Vec::new();
    for answer in dictionary.answers() {
        match play_game_with_solver(answer, MAX_SOLVER_GUESSES, dictionary) {
            GameResult::Success(guesses) => num_guesses_per_game.push(guesses.len() as u32),
            other => error!("failed to solve {}: {:?}", answer, other),
        }
    }
    println!("Solved {} words. Results:", num_guesses_per_game.len());
    if num_guesses_per_game.is_empty() {
        return;
    }

    let mut num_games_per_round: HashMap<u32, u32> = HashMap::new();
    for num_guesses in num_guesses_per_game.iter() {
        *(num_games_per_round.entry(*num_guesses).or_insert(0)) += 1;
    }

    println!("|Num guesses|Num games|");
    println!("|-----------|---------|");
    let mut rounds: Vec<(u32, u32)> = num_games_per_round.into_iter().collect();
    rounds.sort_unstable();
    for (num_guesses, num_games) in rounds.iter() {
        println!("|{}|{}|", num_guesses, num_games);
    }

    let average: f64 = num_guesses_per_game.iter().sum::<u32>() as f64
        / num_guesses_per_game.len() as f64;
    let std_dev: f64 = (num_guesses_per_game
        .iter()
        .map(|num_guesses| (*num_guesses as f64 - average).powi(2))
        .sum::<f64>()
        / num_guesses_per_game.len() as f64)
        .sqrt();
    let num_within_limit = num_guesses_per_game
        .iter()
        .filter(|num_guesses| **num_guesses as usize <= MAX_GUESSES)
        .count();

    println!(
        "\n**Average number of guesses:** {:.2} +/- {:.2}",
        average, std_dev
    );
    println!(
        "**Solved within {} guesses:** {}/{}",
        MAX_GUESSES,
        num_within_limit,
        num_guesses_per_game.len()
    );
}
