//! One-shot stoichiometry conversion
//! Usage: cargo run --bin stoich_convert -- '<parsed atoms JSON>' [amount] [unit]
//!
//! Example: stoich_convert '[{"symbol":"H","count":2},{"symbol":"O","count":1}]' 2 mol

use stoich::elements::{self, ElementTable};
use stoich::stoichiometry::{calculate, ParsedAtom, Quantity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let atoms_json = match args.get(1) {
        Some(json) => json,
        None => {
            eprintln!("Usage: stoich_convert '<parsed atoms JSON>' [amount] [unit]");
            std::process::exit(2);
        }
    };

    let atoms: Vec<ParsedAtom> = serde_json::from_str(atoms_json)?;
    let amount = args.get(2).map(|s| s.parse::<f64>()).transpose()?;
    let quantity = Quantity {
        amount,
        unit: args.get(3).cloned(),
    };

    let elements_path = elements::elements_path_from_env();
    let table = ElementTable::load_or_embedded(elements_path.as_deref())?;

    let report = match calculate(&atoms, &quantity, &table) {
        Some(report) => report,
        None => {
            println!("No atoms given");
            return Ok(());
        }
    };

    for element in &report.elements {
        println!("{}", element.text);
    }
    println!("\nMolar mass: {}", report.molar_mass_expression);
    println!("  {}", report.molar_mass_result);

    if report.conversion.is_none() && quantity.amount.is_some() {
        println!("\nNo conversion available for {:?} {}", quantity.unit, args[2]);
    }

    for step in &report.derivations {
        println!("\n{}", step.label);
        if let Some(note) = &step.note {
            println!("  {}", note);
        }
        println!("  {}", step.rule);
        println!("  {}", step.expression);
    }

    Ok(())
}
