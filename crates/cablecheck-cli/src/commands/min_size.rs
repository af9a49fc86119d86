use crate::support::print_json;
use cablecheck_kernel::{Catalogue, ComplianceValidator, FamilyMatch};
use serde_json::json;

pub fn run(catalogue: &Catalogue, family: String, rating: u32, json_output: bool) {
    let resolution = catalogue.tables().resolve_family(&family);
    let found = ComplianceValidator::new(catalogue).minimum_size_for_rating(&family, rating);
    let table_id = resolution
        .resolved()
        .and_then(|id| catalogue.tables().table_id_for(id));

    let resolution_label = match &resolution {
        FamilyMatch::Resolved(_) => "resolved",
        FamilyMatch::Unknown => "unknown",
        FamilyMatch::Ambiguous(_) => "ambiguous",
    };

    if json_output {
        print_json(&json!({
            "family_text": family,
            "resolution": resolution_label,
            "family": resolution.resolved(),
            "rating": rating,
            "found": found.is_some(),
            "size": found.map(|(size, _)| size),
            "amps": found.map(|(_, amps)| amps),
            "table_id": table_id,
        }));
    } else {
        println!("cablecheck min-size \"{family}\" --rating {rating}");
        match (&resolution, found) {
            (FamilyMatch::Resolved(id), Some((size, amps))) => {
                println!("  Family: {id}");
                println!("  Minimum size: {size} ({amps}A)");
                if let Some(table) = table_id {
                    println!("  Table: {table}");
                }
            }
            (FamilyMatch::Resolved(id), None) => {
                println!("  Family: {id}");
                println!("  No standard size is rated for {rating}A.");
            }
            (FamilyMatch::Ambiguous(ids), _) => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                println!("  Family text is ambiguous: {}", ids.join(", "));
            }
            (FamilyMatch::Unknown, _) => println!("  Family text matches no known family."),
        }
    }

    if found.is_none() {
        std::process::exit(1);
    }
}
