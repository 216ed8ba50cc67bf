use asset360_schemas::catalog::{Oem, UnitProcedure};
use indexmap::IndexMap;

pub fn generate_oems(manufacturers: &[String]) -> Vec<Oem> {
    manufacturers
        .iter()
        .enumerate()
        .map(|(i, name)| Oem {
            id: format!("MFR{}", i + 1),
            manufacturer_name: name.clone(),
        })
        .collect()
}

/// Expands the procedure-type → tasks catalog into unit procedures, binding each task to the
/// asset type that performs it.
pub fn generate_unit_procedures(
    procedure_types: &IndexMap<String, Vec<String>>,
    procedure_asset_types: &IndexMap<String, String>,
) -> Vec<UnitProcedure> {
    let mut procedures = Vec::new();
    for (procedure_type, tasks) in procedure_types {
        for (i, task) in tasks.iter().enumerate() {
            procedures.push(UnitProcedure {
                id: unit_procedure_id(procedure_type, i + 1, task),
                name: format!("{}-{}-{}", procedure_type, i + 1, task.replace(' ', "_")),
                procedure_type: procedure_type.clone(),
                task: task.clone(),
                asset_type: procedure_asset_types.get(task).cloned(),
            });
        }
    }
    procedures
}

/// `PR1-2-MIB` for the second task "Mixing Blend" of "Production-stage1".
///
/// Trailing digits of the procedure type are kept so that "Production-stage1" and
/// "Production-stage2" never produce the same id.
pub fn unit_procedure_id(procedure_type: &str, index: usize, task: &str) -> String {
    let mut type_code: String = procedure_type.chars().take(2).collect::<String>().to_uppercase();
    let digits: String = procedure_type
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    type_code.push_str(&digits);

    let mut words = task.split_whitespace();
    let first = words.next().unwrap_or("");
    let mut task_code: String = first.chars().take(2).collect();
    let tail = match words.next() {
        Some(second) => second.chars().next(),
        None => task.chars().next(),
    };
    task_code.extend(tail);

    format!("{}-{}-{}", type_code, index, task_code.to_uppercase())
}
