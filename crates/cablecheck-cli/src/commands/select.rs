use crate::support::{money, print_json, read_json_arg_or_exit};
use cablecheck_kernel::{Catalogue, CircuitRequirement, ExclusionReason, SuitabilityEvaluator};

pub fn run(catalogue: &Catalogue, requirement: String, explain: bool, json_output: bool) {
    let requirement: CircuitRequirement = read_json_arg_or_exit(&requirement, "requirement");
    let report = SuitabilityEvaluator::new(catalogue).explain(&requirement);

    if json_output {
        if explain {
            print_json(&report);
        } else {
            print_json(&report.candidates);
        }
        return;
    }

    println!(
        "cablecheck select: {} building, {}, {}A device, {}m run",
        requirement.building,
        requirement.installation_method,
        requirement.protective_device_rating,
        requirement.run_length_m
    );
    if report.no_compliant_cable() {
        println!("  No compliant cable found for these constraints.");
    } else {
        println!("  Candidates: {}", report.candidates.len());
        for candidate in &report.candidates {
            println!(
                "  - {} {}: {}A ({}), installed {}, practical max {}m",
                candidate.family,
                candidate.size,
                candidate.rated_amps,
                candidate.table_id,
                money(candidate.installed_cost),
                candidate.max_practical_length_m
            );
        }
    }

    if explain {
        println!("  Excluded: {}", report.exclusions.len());
        for exclusion in &report.exclusions {
            let reason = match &exclusion.reason {
                ExclusionReason::FailedChecks { checks } => {
                    let names: Vec<&str> = checks.iter().map(|c| c.as_str()).collect();
                    format!("failed {}", names.join(", "))
                }
                ExclusionReason::NoAdequateSize { max_amps } => {
                    format!("no size rated for the device (max {max_amps}A)")
                }
            };
            println!("  - {}: {reason}", exclusion.family);
        }
    }
}
