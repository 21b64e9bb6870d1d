use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use log::{error, info};
use rand::{rngs::SmallRng, SeedableRng};
use std::{fs, path::PathBuf, process::ExitCode, time::Duration};

use slider_search::{Board, PuzzleError, SearchError, Solution, Solver, State, Strategy};

/// Board the original entry point shipped with.
const DEFAULT_BOARD: &str = "3,4,0; 1,7,6; 5,2,8";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    /// A* on depth plus Manhattan distance (shortest solution)
    Astar,
    /// Unbounded depth-first search
    Dfs,
    /// Depth-limited depth-first search, bounded by --limit
    Dls,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve N×N sliding-tile puzzles", long_about = None)]
struct Args {
    /// Search strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,

    /// Depth bound for the depth-limited search
    #[arg(short, long, default_value_t = 5000)]
    limit: usize,

    /// Board as rows separated by ';', e.g. "3,4,0; 1,7,6; 5,2,8"
    #[arg(short, long, conflicts_with_all = ["file", "random"])]
    board: Option<String>,

    /// File holding the board, one row per line
    #[arg(short, long, conflicts_with = "random")]
    file: Option<PathBuf>,

    /// Generate a random solvable board of this size
    #[arg(short, long)]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Give up after expanding this many states
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Give up after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Search even when the parity check says the board is unsolvable
    #[arg(long, default_value_t = false)]
    force: bool,

    /// Only print the summary, not every board on the way
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Args {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Astar => Strategy::AStar,
            StrategyArg::Dfs => Strategy::DepthFirst,
            StrategyArg::Dls => Strategy::DepthLimited { limit: self.limit },
        }
    }

    fn initial_board(&self) -> Result<Board, String> {
        if let Some(text) = &self.board {
            return text.parse().map_err(|e: PuzzleError| e.to_string());
        }
        if let Some(path) = &self.file {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            return content.parse().map_err(|e: PuzzleError| e.to_string());
        }
        if let Some(size) = self.random {
            let mut rng = match self.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            return Board::shuffled(size, &mut rng).map_err(|e| e.to_string());
        }
        DEFAULT_BOARD.parse().map_err(|e: PuzzleError| e.to_string())
    }

    fn solver(&self) -> Result<Solver, String> {
        let mut solver = Solver::new(self.strategy()).require_solvable(!self.force);
        if let Some(max) = self.max_expansions {
            solver = solver.with_max_expansions(max);
        }
        if let Some(seconds) = self.time_limit {
            let limit = Duration::try_from_secs_f64(seconds)
                .map_err(|e| format!("Invalid time limit {seconds}: {e}"))?;
            solver = solver.with_time_limit(limit);
        }
        Ok(solver)
    }
}

/// Renders a board with the blank dimmed and the tile that just moved
/// highlighted.
fn render(state: &State) -> String {
    let board = state.board();
    let width = (board.tiles().len() - 1).to_string().len();
    let (blank_row, blank_col) = board.blank();
    let moved = state.last_move().map(|mv| {
        let (dr, dc) = mv.as_offset();
        (
            (blank_row as isize - dr) as usize,
            (blank_col as isize - dc) as usize,
        )
    });

    let mut out = String::new();
    for (r, row) in board.rows().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let cell = format!("{:>width$}", value, width = width);
            let styled = if value == 0 {
                cell.dark_grey().to_string()
            } else if moved == Some((r, c)) {
                cell.yellow().bold().to_string()
            } else {
                cell
            };
            out.push_str(&styled);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn print_solution(solution: &Solution, quiet: bool) {
    if !quiet {
        for (step, state) in solution.states().iter().enumerate() {
            let header = match state.last_move() {
                Some(mv) => format!("Step {step}: {mv}"),
                None => "Initial board".to_string(),
            };
            println!("{}\n{}", header.bold(), render(state));
        }
    }

    let stats = solution.stats();
    println!("Solved in {} moves.", solution.move_count());
    println!(
        "Expanded {} states, generated {}, peak open list {}.",
        stats.expanded, stats.generated, stats.peak_frontier
    );
    println!("Time taken {:.3} seconds.", stats.elapsed.as_secs_f64());
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let board = match args.initial_board() {
        Ok(board) => board,
        Err(e) => {
            error!("Cannot load board: {}", e);
            return ExitCode::from(2);
        }
    };
    let solver = match args.solver() {
        Ok(solver) => solver,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let limits = solver.limits();
    info!(
        "Solving with {} (expansion cap: {}, time limit: {})",
        solver.strategy(),
        limits
            .max_expansions
            .map_or_else(|| "none".to_string(), |n| n.to_string()),
        limits
            .time_limit
            .map_or_else(|| "none".to_string(), |d| format!("{:.3}s", d.as_secs_f64()))
    );
    println!("Initial board:\n{}", board);

    match solver.solve(board) {
        Ok(solution) => {
            print_solution(&solution, args.quiet);
            ExitCode::SUCCESS
        }
        Err(SearchError::Unsolvable) => {
            error!("This board cannot be solved; pass --force to search anyway");
            ExitCode::FAILURE
        }
        Err(e) => {
            if let Some(stats) = e.stats() {
                println!(
                    "No solution: {}. Time taken {:.3} seconds.",
                    e,
                    stats.elapsed.as_secs_f64()
                );
            }
            ExitCode::FAILURE
        }
    }
}
