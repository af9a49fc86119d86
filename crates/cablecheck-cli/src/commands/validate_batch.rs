use crate::support::{print_json, read_json_arg_or_exit};
use cablecheck_kernel::{Catalogue, ComplianceClaim, ComplianceValidator};

pub fn run(catalogue: &Catalogue, input: String, json_output: bool) {
    let claims: Vec<ComplianceClaim> = read_json_arg_or_exit(&input, "claims");
    let report = ComplianceValidator::new(catalogue).validate_batch(&claims);

    if json_output {
        print_json(&report);
    } else {
        println!("cablecheck validate-batch");
        println!("  Catalogue: {} ({})", report.catalogue_version, report.catalogue_digest);
        println!("  Claims: {}", report.verdicts.len());
        println!(
            "  Valid: {}  Invalid: {}  Unverifiable: {}",
            report.valid, report.invalid, report.unverifiable
        );
        for (index, verdict) in report.verdicts.iter().enumerate() {
            let authority = match (&verdict.authoritative_amps, &verdict.table_id) {
                (Some(amps), Some(table)) => format!(" [{amps}A, {table}]"),
                _ => String::new(),
            };
            println!(
                "  {index}: \"{}\" {} -> {}{authority}",
                verdict.claim.family,
                verdict.claim.size,
                verdict.finding.as_str()
            );
        }
        println!("  Result: {}", report.result);
    }

    if !report.is_accepted() {
        std::process::exit(1);
    }
}
