use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use connect_four_stats::config::AppConfig;
use connect_four_stats::game::{classify, Board, BoardInput, Cell, GameResult};
use connect_four_stats::search::{
    evaluate_move_statistics, evaluate_move_statistics_parallel, explore, CacheScope,
    MoveStatistics, ParallelDispatcher, SearchMode,
};

/// Deepest move tree `--tree` will build; the tree is kept whole in memory.
const MAX_TREE_DEPTH: usize = 8;

/// Count how every line of play ends for each legal move of a position.
#[derive(Parser)]
#[command(
    name = "connect-four-stats",
    about = "Exhaustive outcome statistics for Connect Four positions"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// JSON board file ({"rows": R, "columns": [[1, -1, 0, null, ...], ...]})
    #[arg(long, conflicts_with = "moves")]
    board: Option<PathBuf>,

    /// Comma-separated columns played from the empty board, Red first
    #[arg(long, value_delimiter = ',')]
    moves: Option<Vec<usize>>,

    /// Override search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Take immediate wins instead of counting every sibling
    #[arg(long)]
    smart: bool,

    /// Search each first move on a worker pool
    #[arg(long)]
    parallel: bool,

    /// Override worker thread count (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Share one memo cache between workers
    #[arg(long)]
    shared_cache: bool,

    /// Print statistics as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also write the full move tree as JSON to this file (depth <= 8)
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        app_config.search.depth = depth;
    }
    if cli.smart {
        app_config.search.mode = SearchMode::Smart;
    }
    if cli.parallel {
        app_config.search.parallel = true;
    }
    if let Some(threads) = cli.threads {
        app_config.search.threads = threads;
    }
    if cli.shared_cache {
        app_config.search.cache = CacheScope::Shared;
    }

    let board = match (&cli.board, &cli.moves) {
        (Some(path), _) => load_board(path)?,
        (None, Some(moves)) => replay(app_config.board.empty_board(), moves)?,
        (None, None) => app_config.board.empty_board(),
    };

    let search = &app_config.search;
    let cells = board.rows().saturating_mul(board.cols());
    if search.depth > cells {
        bail!("depth {} exceeds the {cells} cells of the board", search.depth);
    }
    if cli.tree.is_some() {
        check_tree_depth(&board, search.depth)?;
    }

    let mover = board.mover();
    let result = classify(&board);
    if result.is_terminal() {
        eprintln!("Warning: position is already decided ({}), no moves to search", result.name());
    }

    let spinner = create_spinner(&format!(
        "Searching {} plies ({}) for {mover}...",
        search.depth,
        search.mode.name()
    ))?;
    let stats = if search.parallel {
        let dispatcher = ParallelDispatcher::new(search.threads, search.cache)
            .context("building worker pool")?;
        evaluate_move_statistics_parallel(&board, mover, search.depth, search.mode, &dispatcher)?
    } else {
        evaluate_move_statistics(&board, mover, search.depth, search.mode)?
    };
    spinner.finish_and_clear();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_board(&board);
        print_statistics(&stats);
    }

    if let Some(path) = &cli.tree {
        let tree = explore(&board, mover, search.depth, search.mode)?;
        let file =
            File::create(path).with_context(|| format!("creating tree file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &tree)
            .with_context(|| format!("writing tree file {}", path.display()))?;
        eprintln!("Wrote {} tree nodes to {}", tree.node_count(), path.display());
    }

    Ok(())
}

/// Reject tree exports that would not fit in memory. The depth that counts
/// is the one the search actually uses, at most the number of empty cells.
fn check_tree_depth(board: &Board, depth: usize) -> Result<()> {
    let effective = depth.min(board.empty_cells());
    if effective > MAX_TREE_DEPTH {
        bail!(
            "--tree needs depth <= {MAX_TREE_DEPTH} (got {effective}); the whole tree is kept in memory"
        );
    }
    if effective > MAX_TREE_DEPTH - 2 {
        eprintln!("Warning: move tree at depth {effective} may have millions of nodes");
    }
    Ok(())
}

fn load_board(path: &Path) -> Result<Board> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading board file {}", path.display()))?;
    let input: BoardInput = serde_json::from_str(&content)
        .with_context(|| format!("parsing board file {}", path.display()))?;
    input
        .into_board()
        .with_context(|| format!("invalid board in {}", path.display()))
}

fn replay(mut board: Board, moves: &[usize]) -> Result<Board> {
    for (ply, &column) in moves.iter().enumerate() {
        if classify(&board).is_terminal() {
            bail!("move {} (column {column}) played after the game ended", ply + 1);
        }
        let mover = board.mover();
        board
            .apply(column, mover)
            .with_context(|| format!("move {} (column {column})", ply + 1))?;
    }
    Ok(board)
}

fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn print_board(board: &Board) {
    for row in (0..board.rows()).rev() {
        let line: String = (0..board.cols())
            .map(|col| {
                if !board.is_playable(row, col) {
                    return '#';
                }
                match board.get(row, col) {
                    Some(Cell::Red) => 'R',
                    Some(Cell::Yellow) => 'Y',
                    _ => '.',
                }
            })
            .collect();
        println!("  {line}");
    }
    let labels: String = (0..board.cols()).map(column_label).collect();
    println!("  {labels}\n");
}

fn column_label(col: usize) -> char {
    std::char::from_digit((col % 36) as u32, 36).unwrap_or('?')
}

fn print_statistics(stats: &MoveStatistics) {
    println!(
        "{} to move, depth {}, {} search",
        stats.mover,
        stats.depth,
        stats.mode.name()
    );
    println!(
        "{:>6} {:>9} {:>11} {:>8} {:>10} {:>12}",
        "column", "red_win", "yellow_win", "tie", "undecided", "leaves"
    );
    for (column, column_stats) in &stats.columns {
        let pct = &column_stats.percentages;
        println!(
            "{:>6} {:>8.2}% {:>10.2}% {:>7.2}% {:>9.2}% {:>12}",
            column,
            pct.get(GameResult::RedWin),
            pct.get(GameResult::YellowWin),
            pct.get(GameResult::Tie),
            pct.get(GameResult::Undecided),
            column_stats.distribution.total()
        );
    }

    if let Some(best) = stats.best_column() {
        println!("\nBest column for {}: {best}", stats.mover);
    }
    println!(
        "Nodes: {} | Cache hits: {} | Leaves: {}",
        stats.search.nodes, stats.search.cache_hits, stats.search.leaves
    );
}
