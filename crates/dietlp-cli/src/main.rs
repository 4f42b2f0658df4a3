use clap::{Parser, ValueEnum};
use dietlp_model::{Catalog, DietReport, UnitCostReport, Variant, build, standard_constraints};
use dietlp_solver::SimplexSolver;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "dietlp")]
#[command(about = "Least-cost diet from five foods under daily nutrient bounds", long_about = None)]
struct Cli {
    /// Which problem to solve
    #[arg(long, value_enum, default_value_t = Which::All)]
    variant: Which,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Which {
    Base,
    Revised,
    All,
}

impl Which {
    fn variants(self) -> &'static [Variant] {
        match self {
            Which::Base => &[Variant::Base],
            Which::Revised => &[Variant::Revised],
            Which::All => &Variant::ALL,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = Catalog::standard();
    let unit_costs = match catalog.unit_costs() {
        Ok(costs) => costs,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let unit_cost_report = UnitCostReport::new(&catalog, &unit_costs);

    let constraints = standard_constraints();
    let solver = SimplexSolver::new();
    let mut reports: Vec<DietReport> = Vec::new();
    let mut failed = false;

    // Each model is independent: a failure in one still lets the next run.
    for &variant in cli.variant.variants() {
        match build(variant, &catalog, &unit_costs, &constraints) {
            Ok(model) => {
                let solved = model.solve(&solver);
                failed |= !solved.is_optimal();
                reports.push(solved.report());
            }
            Err(e) => {
                eprintln!("{}: {}", variant.title(), e);
                failed = true;
            }
        }
    }

    match cli.format {
        Format::Text => {
            print!("{}", unit_cost_report);
            for report in &reports {
                println!();
                print!("{}", report);
            }
        }
        Format::Json => {
            let output = serde_json::json!({
                "unit_costs": unit_cost_report,
                "models": reports,
            });
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing report: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_is_the_fixed_run() {
        let cli = Cli::try_parse_from(["dietlp"]).unwrap();
        assert!(cli.variant == Which::All);
        assert!(cli.format == Format::Text);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.variant.variants(), &[Variant::Base, Variant::Revised]);
    }

    #[test]
    fn test_flags_narrow_the_run() {
        let cli = Cli::try_parse_from(["dietlp", "--variant", "revised", "--format", "json", "-vv"]).unwrap();
        assert_eq!(cli.variant.variants(), &[Variant::Revised]);
        assert!(cli.format == Format::Json);
        assert_eq!(cli.verbose, 2);
        assert!(Cli::try_parse_from(["dietlp", "--variant", "other"]).is_err());
    }
}
