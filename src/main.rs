use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vidshelf::catalog::load_catalog;
use vidshelf::model::VideoCatalog;
use vidshelf::player::{BrowserSink, NullSink, PlaybackSink};
use vidshelf::{CommandDispatcher, PlayerConfig, Response, VideoPlayer};

#[derive(Parser, Debug)]
#[command(name = "vidshelf")]
#[command(about = "Interactive video catalog with playlists, search and undo", long_about = None)]
struct Args {
    /// Path to the video catalog (pipe-delimited text or .xml)
    #[arg(short = 'c', long, default_value = "videos.txt")]
    catalog: String,

    /// Don't open videos in the browser, only log them
    #[arg(long)]
    no_browser: bool,

    /// Seed for PLAY_RANDOM (makes sessions reproducible)
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let catalog_path = shellexpand::tilde(&args.catalog);
    let config = PlayerConfig::new(PathBuf::from(catalog_path.as_ref()))
        .with_browser(!args.no_browser)
        .with_seed(args.seed);

    let catalog = load_catalog(&config.catalog_path)?;

    if config.launch_browser {
        run(&config, catalog, BrowserSink::new())
    } else {
        log::info!("Browser launch disabled");
        run(&config, catalog, NullSink::new())
    }
}

fn run<S: PlaybackSink>(config: &PlayerConfig, catalog: VideoCatalog, sink: S) -> Result<()> {
    let mut player = VideoPlayer::new(catalog, sink);
    if let Some(seed) = config.random_seed {
        player = player.with_seed(seed);
    }
    let mut dispatcher = CommandDispatcher::new(player);

    println!("Hello and welcome to Vidshelf, what would you like to do?");
    println!("Enter HELP for list of available commands or EXIT to terminate.");

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        prompt("vidshelf> ")?;
        let Some(line) = input.next() else { break };
        let line = line.context("Failed to read command")?;

        let response = dispatcher.execute(&line);
        print_response(&response);
        if response.exit {
            break;
        }

        if response.offers_selection {
            println!("Would you like to play any of the above? If yes, specify the number of the video.");
            println!("If your answer is not a valid number, we will assume it's a no.");
            prompt("> ")?;
            let Some(answer) = input.next() else { break };
            let answer = answer.context("Failed to read answer")?;
            print_response(&dispatcher.play_result(&answer));
        }

        if let Some(name) = &response.offers_create {
            println!("Do you want to create a new playlist with name: {}?", name);
            println!("Type \"yes\" to create, anything else to cancel.");
            prompt("> ")?;
            let Some(answer) = input.next() else { break };
            let answer = answer.context("Failed to read answer")?;
            print_response(&dispatcher.create_offered(name, &answer));
        }
    }

    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush().context("Failed to flush stdout")
}

fn print_response(response: &Response) {
    if !response.lines.is_empty() {
        println!("{}", response);
    }
}
