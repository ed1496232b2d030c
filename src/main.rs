use std::path::{Path, PathBuf};

use clap::Parser;
use panel_packer::Solver;
use panel_packer::cases::{self, CaseOutcome};
use panel_packer::render;
use panel_packer::types::{PanelSpec, Region, Solution};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "panel_packer",
    about = "Counts how many rectangular panels fit on a roof, or runs the JSON test cases"
)]
struct Cli {
    /// Panel width (a)
    #[arg(allow_negative_numbers = true)]
    panel_w: Option<i64>,

    /// Panel height (b)
    #[arg(allow_negative_numbers = true)]
    panel_h: Option<i64>,

    /// Roof width, or triangle base with --triangle
    #[arg(allow_negative_numbers = true)]
    roof_w: Option<i64>,

    /// Roof height, or triangle height with --triangle
    #[arg(allow_negative_numbers = true)]
    roof_h: Option<i64>,

    /// Run the test cases instead of a single roof
    #[arg(long)]
    test: bool,

    /// Test case file
    #[arg(long, default_value = "test_cases.json")]
    cases: PathBuf,

    /// Treat the roof as an isosceles triangle (base ROOF_W, height ROOF_H)
    #[arg(long, conflicts_with = "overlap")]
    triangle: bool,

    /// Two ROOF_W x ROOF_H rectangles, the second shifted by (DX, DY)
    #[arg(
        long,
        num_args = 2,
        value_names = ["DX", "DY"],
        allow_negative_numbers = true
    )]
    overlap: Option<Vec<i64>>,

    /// Print the panel layout when it is known
    #[arg(long)]
    layout: bool,

    /// Log solver decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let dims = match (cli.panel_w, cli.panel_h, cli.roof_w, cli.roof_h) {
        (Some(a), Some(b), Some(x), Some(y)) if !cli.test => (a, b, x, y),
        _ => {
            let all_passed = run_tests(&cli.cases);
            if !all_passed {
                std::process::exit(1);
            }
            return;
        }
    };

    let (a, b, x, y) = dims;
    let region = match (&cli.overlap, cli.triangle) {
        (Some(shift), _) => Region::Overlap {
            width: x,
            height: y,
            dx: shift[0],
            dy: shift[1],
        },
        (None, true) => Region::Triangle { base: x, height: y },
        (None, false) => Region::Rectangle {
            width: x,
            height: y,
        },
    };

    let panel = PanelSpec::new(a, b);
    let solution = Solver::new(panel, region).solve();
    report(panel, region, &solution, cli.layout);
}

fn run_tests(path: &Path) -> bool {
    let cases = cases::load_cases(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Running {} test case{}:", cases.len(), if cases.len() == 1 { "" } else { "s" });
    println!();

    let outcomes = cases::run_cases(&cases);
    for (i, outcome) in outcomes.iter().enumerate() {
        print_outcome(i + 1, outcome);
    }

    let passed = outcomes.iter().filter(|o| o.passed()).count();
    println!("Summary: {}/{} passed", passed, outcomes.len());
    passed == outcomes.len()
}

fn print_outcome(number: usize, outcome: &CaseOutcome) {
    let case = outcome.case;
    println!("Test {}:", number);
    println!(
        "  Panel: {}x{}, Roof: {}x{}",
        case.panel_w, case.panel_h, case.roof_w, case.roof_h
    );
    println!("  Expected: {}, Got: {}", case.expected, outcome.got);
    println!(
        "  Status: {}",
        if outcome.passed() { "PASSED" } else { "FAILED" }
    );
    println!();
}

fn report(panel: PanelSpec, region: Region, solution: &Solution, show_layout: bool) {
    println!("Panel: {}, Roof: {}", panel, region);
    println!("  Fits: {} ({})", solution.count, solution.method);

    if let Some(coverage) = solution.coverage_percent() {
        println!("  Coverage: {:.1}%", coverage);
    }

    if show_layout {
        match &solution.layout {
            Some(layout) => {
                println!("  Layout (1 cell = {} units):", solution.cell_size);
                print!("{}", render::render_layout(&layout.grid, &layout.placements));
            }
            None => println!("  No layout available for {}", solution.method),
        }
    }
}
