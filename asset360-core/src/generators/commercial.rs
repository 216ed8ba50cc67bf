use crate::{context::GenerationContext, error::Asset360Error};
use asset360_schemas::{
    commercial::{Batch, OrderStatus, ProcessOrder, Product},
    topology::{Facility, FacilityType, Site},
    UNKNOWN_FACILITY, UNKNOWN_WAREHOUSE,
};
use chrono::Duration;
use rand::{seq::SliceRandom, Rng};
use std::collections::HashMap;
use tracing::warn;

const PRODUCTS_PER_FAMILY: usize = 2;
const PROCESS_ORDERS_PER_PRODUCT: usize = 2;

const ORDER_STATUS_WEIGHTS: [(OrderStatus, u32); 5] = [
    (OrderStatus::Planned, 8),
    (OrderStatus::InProgress, 25),
    (OrderStatus::Completed, 60),
    (OrderStatus::Failed, 5),
    (OrderStatus::OnHold, 2),
];

/// Products take catalog names first and synthesized `ProductX{n}` names afterwards.
///
/// # Errors
///
/// Returns `ConfigError` when there is no site to make the products at.
pub fn generate_products(
    ctx: &mut GenerationContext,
    product_names: &[String],
    num_products: usize,
    sites: &[Site],
) -> Result<Vec<Product>, Asset360Error> {
    (0..num_products)
        .map(|i| {
            let site = sites
                .choose(&mut ctx.rng)
                .ok_or_else(|| Asset360Error::ConfigError("No site available for products".to_string()))?;
            Ok(Product {
                id: format!("P100{}", i + 1),
                name: product_names
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("ProductX{}", i + 1)),
                site_id: site.id.clone(),
                batch_size_limit: ctx.rng.gen_range(4..10) * 10,
                family_id: format!("PF-{}", i / PRODUCTS_PER_FAMILY + 1),
                recipe_id: format!("PMR-{}", i + 1),
            })
        })
        .collect()
}

fn weighted_status(ctx: &mut GenerationContext) -> OrderStatus {
    let total: u32 = ORDER_STATUS_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut pick = ctx.rng.gen_range(0..total);
    for (status, weight) in ORDER_STATUS_WEIGHTS {
        if pick < weight {
            return status;
        }
        pick -= weight;
    }
    OrderStatus::Completed
}

/// Two orders per product, each for a random product. Start dates step back one day per
/// order from the reference time.
pub fn generate_process_orders(
    ctx: &mut GenerationContext,
    products: &[Product],
    num_boms: usize,
) -> Result<Vec<ProcessOrder>, Asset360Error> {
    let now = ctx.now();
    (0..products.len() * PROCESS_ORDERS_PER_PRODUCT)
        .map(|i| {
            let product = products
                .choose(&mut ctx.rng)
                .ok_or_else(|| Asset360Error::ConfigError("No product available for process orders".to_string()))?;
            let qty = ctx.rng.gen_range(50..100) * 10;
            let bom = ctx.rng.gen_range(1..=num_boms.max(1));
            let status = weighted_status(ctx);
            let start_date = now - Duration::days(i as i64);
            let end_date = start_date + Duration::days(ctx.rng.gen_range(1..=2));

            Ok(ProcessOrder {
                id: format!("PO{}", i + 1),
                name: format!("PO{}", i + 1),
                product_id: product.id.clone(),
                qty,
                bom_id: format!("BOM00{}", bom),
                status,
                start_date,
                end_date,
            })
        })
        .collect()
}

/// Splits `qty` into batches no larger than `limit`, the last one taking the remainder.
pub fn split_quantity(qty: u32, limit: u32) -> Vec<u32> {
    if limit == 0 || limit >= qty {
        return vec![qty];
    }
    let count = qty.div_ceil(limit);
    let mut remaining = qty;
    (0..count)
        .map(|_| {
            let batch = limit.min(remaining);
            remaining -= batch;
            batch
        })
        .collect()
}

fn manufacturing_facility(facilities: &[Facility], site_id: &str) -> String {
    facilities
        .iter()
        .find(|f| f.site_id == site_id && f.facility_type.is_manufacturing())
        .map(|f| f.id.clone())
        .unwrap_or_else(|| {
            warn!(site = site_id, "No manufacturing facility at site");
            UNKNOWN_FACILITY.to_string()
        })
}

fn warehouse_facility(ctx: &mut GenerationContext, facilities: &[Facility], site_id: &str) -> String {
    let is_warehouse = |f: &&Facility| f.facility_type == FacilityType::WarehousingAndDistribution;
    if let Some(local) = facilities.iter().filter(is_warehouse).find(|f| f.site_id == site_id) {
        return local.id.clone();
    }
    let anywhere: Vec<&Facility> = facilities.iter().filter(is_warehouse).collect();
    match anywhere.choose(&mut ctx.rng) {
        Some(facility) => facility.id.clone(),
        None => {
            warn!(site = site_id, "No warehousing facility anywhere");
            UNKNOWN_WAREHOUSE.to_string()
        }
    }
}

/// Splits every process order into batches and places them at the product site's
/// manufacturing and warehousing facilities.
///
/// # Errors
///
/// Returns `ProductNotFound` if an order references a product that was not generated.
pub fn generate_batches(
    ctx: &mut GenerationContext,
    orders: &[ProcessOrder],
    products: &[Product],
    facilities: &[Facility],
) -> Result<Vec<Batch>, Asset360Error> {
    let products_by_id: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut batches = Vec::new();

    for (index, order) in orders.iter().enumerate() {
        let product = products_by_id
            .get(order.product_id.as_str())
            .ok_or_else(|| Asset360Error::ProductNotFound(order.product_id.clone()))?;

        let facility_id = manufacturing_facility(facilities, &product.site_id);
        let warehouse_facility_id = warehouse_facility(ctx, facilities, &product.site_id);

        for (i, qty) in split_quantity(order.qty, product.batch_size_limit)
            .into_iter()
            .enumerate()
        {
            let id = format!("B{}-{}-{}", order.id, index + 1, i + 1);
            batches.push(Batch {
                name: format!("Batch-{}-{}-{}", id, product.id, qty),
                id,
                po_id: order.id.clone(),
                product_id: product.id.clone(),
                site_id: product.site_id.clone(),
                facility_id: facility_id.clone(),
                warehouse_facility_id: warehouse_facility_id.clone(),
                qty,
                status: order.status,
                start_date: order.start_date,
                end_date: order.end_date,
            });
        }
    }

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::ctx;

    fn site(id: &str) -> Site {
        Site {
            id: id.into(),
            name: format!("Plant {}", id),
            region: "Europe".into(),
            country: "Ireland".into(),
            country_code: "IE".into(),
        }
    }

    fn facility(id: &str, site_id: &str, facility_type: FacilityType) -> Facility {
        Facility {
            id: id.into(),
            name: id.into(),
            facility_type,
            site_id: site_id.into(),
            region_id: "R1".into(),
        }
    }

    #[test]
    fn test_split_quantity() {
        assert_eq!(split_quantity(500, 90), vec![90, 90, 90, 90, 90, 50]);
        assert_eq!(split_quantity(540, 90), vec![90; 6]);
        assert_eq!(split_quantity(500, 500), vec![500]);
        assert_eq!(split_quantity(500, 900), vec![500]);
    }

    #[test]
    fn test_products_names_families_and_limits() {
        let mut ctx = ctx(13);
        let names = vec!["Trulicity".to_string(), "Mounjaro".to_string()];
        let products = generate_products(&mut ctx, &names, 5, &[site("S1"), site("S2")]).unwrap();

        assert_eq!(products.len(), 5);
        assert_eq!(products[1].name, "Mounjaro");
        assert_eq!(products[2].name, "ProductX3");
        assert_eq!(products[0].id, "P1001");
        assert_eq!(products[1].family_id, "PF-1");
        assert_eq!(products[2].family_id, "PF-2");
        assert_eq!(products[4].recipe_id, "PMR-5");
        for product in &products {
            assert!((40..=90).contains(&product.batch_size_limit));
            assert_eq!(product.batch_size_limit % 10, 0);
        }
    }

    #[test]
    fn test_process_orders_dates_and_quantities() {
        let mut ctx = ctx(17);
        let products = generate_products(&mut ctx, &[], 3, &[site("S1")]).unwrap();
        let orders = generate_process_orders(&mut ctx, &products, 10).unwrap();

        assert_eq!(orders.len(), 6);
        for (i, order) in orders.iter().enumerate() {
            assert!((500..1000).contains(&order.qty));
            assert_eq!(order.qty % 10, 0);
            assert_eq!(order.start_date, ctx.now() - Duration::days(i as i64));
            let span = (order.end_date - order.start_date).num_days();
            assert!(span == 1 || span == 2);
            assert!(order.bom_id.starts_with("BOM00"));
        }
    }

    #[test]
    fn test_batches_sum_to_order_and_resolve_facilities() {
        let mut ctx = ctx(23);
        let sites = vec![site("S1"), site("S2")];
        let facilities = vec![
            facility("F-1-S1", "S1", FacilityType::BatchManufacturing),
            facility("F-2-S1", "S1", FacilityType::WarehousingAndDistribution),
            facility("F-1-S2", "S2", FacilityType::ResearchAndDevelopment),
        ];
        let products = generate_products(&mut ctx, &[], 2, &sites).unwrap();
        let orders = generate_process_orders(&mut ctx, &products, 10).unwrap();
        let batches = generate_batches(&mut ctx, &orders, &products, &facilities).unwrap();

        for order in &orders {
            let own: Vec<&Batch> = batches.iter().filter(|b| b.po_id == order.id).collect();
            assert_eq!(own.iter().map(|b| b.qty).sum::<u32>(), order.qty);
            let product = products.iter().find(|p| p.id == order.product_id).unwrap();
            assert_eq!(own.len() as u32, order.qty.div_ceil(product.batch_size_limit));
            for batch in own {
                assert!(batch.qty <= product.batch_size_limit);
                assert_eq!(batch.status, order.status);
                assert_eq!(batch.warehouse_facility_id, "F-2-S1");
                if batch.site_id == "S1" {
                    assert_eq!(batch.facility_id, "F-1-S1");
                } else {
                    assert_eq!(batch.facility_id, UNKNOWN_FACILITY);
                }
            }
        }
    }

    #[test]
    fn test_warehouse_sentinel_when_none_exists() {
        let mut ctx = ctx(1);
        let facilities = vec![facility("F-1-S1", "S1", FacilityType::ContinuousManufacturing)];
        assert_eq!(warehouse_facility(&mut ctx, &facilities, "S1"), UNKNOWN_WAREHOUSE);
    }

    #[test]
    fn test_status_weights_favor_completed() {
        let mut ctx = ctx(31);
        let completed = (0..1000)
            .filter(|_| weighted_status(&mut ctx) == OrderStatus::Completed)
            .count();
        assert!((520..=680).contains(&completed));
    }
}
