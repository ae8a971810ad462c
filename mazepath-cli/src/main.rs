use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use mazepath::Cell;
use mazepath_cli::{
    commands::{self, GenerateArgs, Output},
    error::AppError,
    logging,
    settings::Settings,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazepath")]
struct Args {
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More log output, can be repeated")]
    verbose: u8,
    #[clap(long, global = true, help = "Print characters instead of colors")]
    plain: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the shortest path through a maze file
    Solve {
        file: PathBuf,
        #[clap(short, long, help = "Cell separator, `1` cells are blocked")]
        delimiter: Option<char>,
        #[clap(long, value_parser = parse_cell, help = "Start cell as ROW,COL [default: 0,0]")]
        start: Option<Cell>,
        #[clap(long, value_parser = parse_cell, help = "End cell as ROW,COL [default: bottom right]")]
        end: Option<Cell>,
    },
    /// Generate a random square maze that is always solvable
    Generate {
        #[clap(long)]
        size: Option<usize>,
        #[clap(long)]
        seed: Option<u64>,
        #[clap(long, help = "Chance of every cell to be blocked")]
        chance: Option<f64>,
        #[clap(long, help = "Maze file whose blocked cells are kept")]
        template: Option<PathBuf>,
        #[clap(short, long)]
        delimiter: Option<char>,
        #[clap(long, help = "Also find and show the shortest path")]
        solve: bool,
        #[clap(short, long, help = "Write the maze to a file")]
        output: Option<PathBuf>,
    },
    /// Generate and solve many mazes, then show summary
    Stats {
        #[clap(long)]
        size: Option<usize>,
        #[clap(long, default_value_t = 100)]
        count: usize,
        #[clap(long)]
        seed: Option<u64>,
        #[clap(long)]
        chance: Option<f64>,
    },
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got `{}`", s))?;
    let row = row.trim().parse().map_err(|e| format!("invalid row: {}", e))?;
    let col = col.trim().parse().map_err(|e| format!("invalid column: {}", e))?;
    Ok(Cell(row, col))
}

fn run(args: Args) -> Result<bool, AppError> {
    let settings_path = Settings::default_path();

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(true);
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(true);
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&settings_path)?);
        return Ok(true);
    }

    let settings = Settings::load_or_default(&settings_path);
    let output = Output { plain: args.plain };
    let mut out = io::stdout().lock();

    match args.command {
        Some(Command::Solve {
            file,
            delimiter,
            start,
            end,
        }) => commands::solve_file(&file, delimiter, start, end, &settings, output, &mut out),
        Some(Command::Generate {
            size,
            seed,
            chance,
            template,
            delimiter,
            solve,
            output: output_file,
        }) => {
            let args = GenerateArgs {
                size,
                seed,
                chance,
                template: template.as_deref(),
                delimiter,
                solve,
                output_file: output_file.as_deref(),
            };
            commands::generate(args, &settings, output, &mut out).map(|_| true)
        }
        Some(Command::Stats {
            size,
            count,
            seed,
            chance,
        }) => commands::stats(size, count, seed, chance, &settings, &mut out)
            .map(|report| report.solved == report.mazes),
        None => {
            let args = GenerateArgs {
                solve: true,
                ..Default::default()
            };
            commands::generate(args, &settings, output, &mut out).map(|_| true)
        }
    }
}

fn main() -> Result<ExitCode, AppError> {
    let args = Args::parse();

    better_panic::install();
    logging::init(args.verbose)?;

    Ok(if run(args)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
