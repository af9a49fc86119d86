use crate::support::{parse_amps_or_exit, parse_size_or_exit, print_json};
use cablecheck_kernel::{
    Catalogue, ComplianceClaim, ComplianceValidator, ComplianceVerdict, Verdict,
};

#[derive(Debug, Clone)]
pub struct Args {
    pub family: String,
    pub size: String,
    pub claimed: Option<String>,
    pub device_rating: Option<u32>,
    pub json: bool,
}

pub fn run(catalogue: &Catalogue, args: Args) {
    let size = parse_size_or_exit(&args.size);
    let claim = match (args.claimed.as_deref(), args.device_rating) {
        (Some(claimed), _) => {
            ComplianceClaim::capacity(args.family, size, parse_amps_or_exit(claimed))
        }
        (None, Some(rating)) => ComplianceClaim::minimum_size(args.family, size, rating),
        (None, None) => {
            eprintln!("error: one of --claimed or --device-rating is required");
            std::process::exit(1);
        }
    };

    let verdict = ComplianceValidator::new(catalogue).validate(&claim);

    if args.json {
        print_json(&verdict);
    } else {
        print_verdict(&verdict);
    }
}

pub fn print_verdict(verdict: &ComplianceVerdict) {
    let label = match verdict.verdict {
        Verdict::Valid => "VALID",
        Verdict::Invalid => "INVALID",
        Verdict::Unverifiable => "UNVERIFIABLE",
    };
    println!(
        "cablecheck validate: \"{}\" {}",
        verdict.claim.family, verdict.claim.size
    );
    println!("  Verdict: {label} ({})", verdict.finding.as_str());
    match &verdict.resolved_family {
        Some(family) => println!("  Family: {family}"),
        None if !verdict.ambiguous_families.is_empty() => {
            let ids: Vec<&str> = verdict
                .ambiguous_families
                .iter()
                .map(|id| id.as_str())
                .collect();
            println!("  Family: ambiguous ({})", ids.join(", "));
        }
        None => println!("  Family: unknown"),
    }
    if let Some(table) = &verdict.table_id {
        println!("  Table: {table}");
    }
    if let Some(size) = verdict.authoritative_size {
        println!("  Authoritative minimum size: {size}");
    }
    if let Some(amps) = verdict.authoritative_amps {
        println!("  Authoritative capacity: {amps}A");
    }
    if let Some(deviation) = verdict.deviation_amps {
        println!(
            "  Deviation: {deviation}A (tolerance ±{}A)",
            verdict.tolerance_amps
        );
    }
    if verdict.verdict == Verdict::Unverifiable {
        println!("  Cannot confirm this claim; proceed with caution.");
    }
    println!("  Audit id: {}", verdict.audit_id);
}
