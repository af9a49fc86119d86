use crate::support::{money, parse_decimal_or_exit, parse_size_or_exit, print_json};
use cablecheck_kernel::{Catalogue, CostEstimator, FamilyId};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct Args {
    pub family: String,
    pub size: String,
    pub length: String,
    pub budget: String,
    pub json: bool,
}

pub fn run(catalogue: &Catalogue, args: Args) {
    let family = FamilyId::new(args.family.trim());
    if catalogue.family(&family).is_none() {
        eprintln!("error: unknown family id: {family} (see `cablecheck tables`)");
        std::process::exit(1);
    }
    let size = parse_size_or_exit(&args.size);
    let length = parse_decimal_or_exit(&args.length, "length");
    let budget = parse_decimal_or_exit(&args.budget, "budget");

    let estimator = CostEstimator::new(catalogue);
    let baseline = estimator.installed_cost(&family, size, length);
    let alternatives = estimator.cheaper_alternatives(&family, size, length, budget);

    if args.json {
        print_json(&json!({
            "family": family,
            "size": size,
            "length_m": length,
            "budget": budget,
            "baseline_cost": baseline,
            "alternatives": alternatives,
        }));
        return;
    }

    println!("cablecheck alternatives {family} {size} over {length}m");
    match baseline {
        Some(cost) => println!("  Baseline: {}", money(cost)),
        None => {
            println!("  {family} has no {size} size.");
            return;
        }
    }
    if alternatives.is_empty() {
        println!("  No cheaper alternative within {}.", money(budget));
    }
    for alternative in &alternatives {
        println!(
            "  - {} ({}): {}, saves {}",
            alternative.family,
            alternative.name,
            money(alternative.installed_cost),
            money(alternative.savings)
        );
    }
}
