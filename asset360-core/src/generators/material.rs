use crate::{context::GenerationContext, error::Asset360Error};
use asset360_schemas::{
    commercial::Product,
    material::{Material, MaterialStatus, MaterialSupplierLink, PlantMaterial, RecipeLine, Supplier},
    topology::Facility,
};
use chrono::{Duration, NaiveDate};
use rand::{seq::SliceRandom, Rng};

const MATERIALS_PER_PRODUCT: usize = 3;
const SUPPLIERS_PER_MATERIAL: usize = 2;
/// Most materials a single supplier may serve.
pub const SUPPLIER_CAPACITY: usize = 3;
const SHELF_LIFE_DAYS: [i64; 3] = [365, 365 * 2, 365 * 3];

/// Earliest material batch date. Batch dates are drawn from here up to the reference date.
pub fn first_batch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

/// # Errors
///
/// Returns `ConfigError` when the storage-location catalog is empty.
pub fn generate_materials(
    ctx: &mut GenerationContext,
    num_products: usize,
    storage_locations: &[String],
) -> Result<Vec<Material>, Asset360Error> {
    let today = ctx.today();
    let start = first_batch_date();
    let span_days = (ctx.now().date() - start).num_days().max(1);

    (0..num_products * MATERIALS_PER_PRODUCT)
        .map(|i| {
            let qty = ctx.rng.gen_range(10..100) * 10;
            let location = storage_locations
                .choose(&mut ctx.rng)
                .ok_or_else(|| Asset360Error::ConfigError("No storage location available for materials".to_string()))?
                .clone();
            let batch_date = start + Duration::days(ctx.rng.gen_range(0..span_days));
            let shelf_life = *SHELF_LIFE_DAYS.choose(&mut ctx.rng).unwrap_or(&SHELF_LIFE_DAYS[0]);
            let expiry_date = batch_date + Duration::days(shelf_life);

            Ok(Material {
                id: format!("M{}", i + 1),
                name: format!("Material{}", i + 1),
                qty,
                storage: format!("STORAGE-{}", location.chars().take(2).collect::<String>()),
                location,
                batch_date,
                expiry_date,
                status: material_status(expiry_date, today),
            })
        })
        .collect()
}

pub fn material_status(expiry_date: NaiveDate, today: NaiveDate) -> MaterialStatus {
    if expiry_date > today {
        MaterialStatus::Passed
    } else {
        MaterialStatus::Failed
    }
}

/// Deals shuffled materials out to facilities round-robin, one placement per material.
pub fn generate_plant_materials(
    ctx: &mut GenerationContext,
    facilities: &[Facility],
    materials: &[Material],
) -> Vec<PlantMaterial> {
    if facilities.is_empty() {
        return Vec::new();
    }
    let mut shuffled: Vec<&Material> = materials.iter().collect();
    shuffled.shuffle(&mut ctx.rng);

    shuffled
        .into_iter()
        .enumerate()
        .map(|(i, material)| {
            let facility = &facilities[i % facilities.len()];
            PlantMaterial {
                id: format!("PM{}", i + 1),
                name: format!("PM-{}-{}", material.id, facility.id),
                facility_id: facility.id.clone(),
                material_id: material.id.clone(),
                qty: material.qty,
                status: material.status,
                batch_date: material.batch_date,
                expiry_date: material.expiry_date,
            }
        })
        .collect()
}

/// Three or four distinct materials per product recipe.
///
/// # Errors
///
/// Returns `ConfigError` when there are fewer than three materials to choose from.
pub fn generate_recipes(
    ctx: &mut GenerationContext,
    products: &[Product],
    materials: &[Material],
) -> Result<Vec<RecipeLine>, Asset360Error> {
    if materials.len() < 3 {
        return Err(Asset360Error::ConfigError(format!(
            "Recipes need at least 3 materials, found {}",
            materials.len()
        )));
    }

    let mut lines = Vec::new();
    for (i, product) in products.iter().enumerate() {
        let count = ctx.rng.gen_range(3..=4).min(materials.len());
        let picked: Vec<&Material> = materials.choose_multiple(&mut ctx.rng, count).collect();
        for material in picked {
            lines.push(RecipeLine {
                id: product.recipe_id.clone(),
                name: format!("Recipe{}", i + 1),
                material_id: material.id.clone(),
                qty: ctx.rng.gen_range(2..10) * 10,
            });
        }
    }
    Ok(lines)
}

pub fn generate_suppliers(num_products: usize) -> Vec<Supplier> {
    (1..=num_products * MATERIALS_PER_PRODUCT * SUPPLIERS_PER_MATERIAL)
        .map(|i| Supplier {
            id: format!("SUP{}", i),
            name: format!("Supplier{}", i),
            address: format!("Address{}", i),
            email: format!("supplier{}@example.com", i),
            phone: format!("123-456-{}", i + 999),
        })
        .collect()
}

/// Assigns every material to one supplier chosen at random among those with spare capacity.
///
/// # Errors
///
/// Returns `InsufficientCapacity` before assigning anything if the suppliers cannot absorb
/// every material.
pub fn assign_materials_to_suppliers(
    ctx: &mut GenerationContext,
    materials: &[Material],
    suppliers: &[Supplier],
) -> Result<Vec<MaterialSupplierLink>, Asset360Error> {
    let capacity = suppliers.len() * SUPPLIER_CAPACITY;
    if materials.len() > capacity {
        return Err(Asset360Error::InsufficientCapacity {
            materials: materials.len(),
            suppliers: suppliers.len(),
            capacity,
        });
    }

    let mut load = vec![0usize; suppliers.len()];
    let mut links = Vec::with_capacity(materials.len());
    for material in materials {
        let open: Vec<usize> = (0..suppliers.len())
            .filter(|&s| load[s] < SUPPLIER_CAPACITY)
            .collect();
        let Some(&slot) = open.choose(&mut ctx.rng) else {
            return Err(Asset360Error::InsufficientCapacity {
                materials: materials.len(),
                suppliers: suppliers.len(),
                capacity,
            });
        };
        load[slot] += 1;
        links.push(MaterialSupplierLink {
            material_id: material.id.clone(),
            supplier_id: suppliers[slot].id.clone(),
        });
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::ctx;
    use asset360_schemas::topology::FacilityType;
    use std::collections::{HashMap, HashSet};

    fn locations() -> Vec<String> {
        vec!["Indiana".into(), "Ohio".into(), "Texas".into()]
    }

    fn facility(id: &str) -> Facility {
        Facility {
            id: id.into(),
            name: id.into(),
            facility_type: FacilityType::WarehousingAndDistribution,
            site_id: "S1".into(),
            region_id: "R1".into(),
        }
    }

    fn product(n: usize) -> Product {
        Product {
            id: format!("P100{}", n),
            name: format!("ProductX{}", n),
            site_id: "S1".into(),
            batch_size_limit: 50,
            family_id: "PF-1".into(),
            recipe_id: format!("PMR-{}", n),
        }
    }

    #[test]
    fn test_materials_dates_and_status() {
        let mut ctx = ctx(3);
        let materials = generate_materials(&mut ctx, 20, &locations()).unwrap();
        assert_eq!(materials.len(), 60);

        let today = ctx.today();
        for material in &materials {
            assert!(material.batch_date >= first_batch_date());
            assert!(material.batch_date < today);
            let shelf = (material.expiry_date - material.batch_date).num_days();
            assert!(SHELF_LIFE_DAYS.contains(&shelf));
            assert_eq!(
                material.status == MaterialStatus::Failed,
                material.expiry_date <= today
            );
            assert_eq!(material.storage, format!("STORAGE-{}", &material.location[..2]));
            assert!((100..1000).contains(&material.qty));
        }
    }

    #[test]
    fn test_expiry_on_reference_day_fails() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(material_status(today, today), MaterialStatus::Failed);
        assert_eq!(
            material_status(today + Duration::days(1), today),
            MaterialStatus::Passed
        );
    }

    #[test]
    fn test_plant_materials_round_robin() {
        let mut ctx = ctx(6);
        let materials = generate_materials(&mut ctx, 3, &locations()).unwrap();
        let facilities = vec![facility("F-1-S1"), facility("F-2-S1")];
        let placements = generate_plant_materials(&mut ctx, &facilities, &materials);

        assert_eq!(placements.len(), materials.len());
        let distinct: HashSet<&str> = placements.iter().map(|p| p.material_id.as_str()).collect();
        assert_eq!(distinct.len(), materials.len());
        assert_eq!(placements[0].facility_id, "F-1-S1");
        assert_eq!(placements[1].facility_id, "F-2-S1");
        assert_eq!(placements[2].facility_id, "F-1-S1");
    }

    #[test]
    fn test_recipes_use_distinct_materials() {
        let mut ctx = ctx(12);
        let materials = generate_materials(&mut ctx, 4, &locations()).unwrap();
        let products: Vec<Product> = (1..=4).map(product).collect();
        let lines = generate_recipes(&mut ctx, &products, &materials).unwrap();

        let mut by_recipe: HashMap<&str, Vec<&str>> = HashMap::new();
        for line in &lines {
            by_recipe.entry(line.id.as_str()).or_default().push(line.material_id.as_str());
            assert!((20..=90).contains(&line.qty));
        }
        assert_eq!(by_recipe.len(), 4);
        for picked in by_recipe.values() {
            assert!(picked.len() == 3 || picked.len() == 4);
            let distinct: HashSet<&&str> = picked.iter().collect();
            assert_eq!(distinct.len(), picked.len());
        }
    }

    #[test]
    fn test_supplier_capacity_respected() {
        let mut ctx = ctx(19);
        let materials = generate_materials(&mut ctx, 5, &locations()).unwrap();
        let suppliers = generate_suppliers(5);
        assert_eq!(suppliers.len(), 30);
        assert_eq!(suppliers[0].phone, "123-456-1000");

        let links = assign_materials_to_suppliers(&mut ctx, &materials, &suppliers).unwrap();
        assert_eq!(links.len(), materials.len());
        let mut load: HashMap<&str, usize> = HashMap::new();
        for link in &links {
            *load.entry(link.supplier_id.as_str()).or_insert(0) += 1;
        }
        assert!(load.values().all(|&n| n <= SUPPLIER_CAPACITY));
    }

    #[test]
    fn test_supplier_capacity_is_filled_exactly() {
        let mut ctx = ctx(19);
        let materials = generate_materials(&mut ctx, 2, &locations()).unwrap();
        let suppliers: Vec<Supplier> = generate_suppliers(1).into_iter().take(2).collect();
        let links = assign_materials_to_suppliers(&mut ctx, &materials, &suppliers).unwrap();
        assert_eq!(links.len(), 6);
    }

    #[test]
    fn test_supplier_capacity_violation_is_typed() {
        let mut ctx = ctx(19);
        let materials = generate_materials(&mut ctx, 3, &locations()).unwrap();
        let suppliers: Vec<Supplier> = generate_suppliers(1).into_iter().take(2).collect();
        let err = assign_materials_to_suppliers(&mut ctx, &materials, &suppliers).unwrap_err();
        assert!(matches!(
            err,
            Asset360Error::InsufficientCapacity {
                materials: 9,
                suppliers: 2,
                capacity: 6
            }
        ));
    }
}
