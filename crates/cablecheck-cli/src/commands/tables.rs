use crate::support::print_json;
use cablecheck_kernel::Catalogue;
use serde_json::json;

pub fn run(catalogue: &Catalogue, json_output: bool) {
    let families: Vec<_> = catalogue
        .families()
        .iter()
        .map(|family| {
            let table = catalogue.tables().table_for(&family.id);
            let sizes = catalogue.tables().sizes_of(&family.id);
            json!({
                "id": family.id,
                "name": family.name,
                "fire_class": family.fire_class,
                "installation_methods": family.installation_methods,
                "uv_resistant": family.uv_resistant,
                "direct_burial": family.direct_burial,
                "table_id": table.map(|t| &t.id),
                "reference_method": table.map(|t| t.method),
                "smallest_size": sizes.first(),
                "largest_size": sizes.last(),
                "max_amps": table.map(|t| t.max_amps()),
            })
        })
        .collect();

    if json_output {
        print_json(&json!({
            "version": catalogue.version(),
            "digest": catalogue.digest(),
            "family_count": families.len(),
            "families": families,
        }));
    } else {
        println!("cablecheck tables");
        println!("  Version: {}", catalogue.version());
        println!("  Digest: {}", catalogue.digest());
        println!("  Families: {}", catalogue.families().len());
        for family in catalogue.families() {
            let sizes = catalogue.tables().sizes_of(&family.id);
            let Some(table) = catalogue.tables().table_for(&family.id) else {
                continue;
            };
            let range = match (sizes.first(), sizes.last()) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => "-".to_string(),
            };
            println!(
                "  - {} ({}): {} under {}, {}, up to {}A",
                family.id,
                family.name,
                table.id,
                table.method,
                range,
                table.max_amps()
            );
        }
    }
}
