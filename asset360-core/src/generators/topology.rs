use crate::context::GenerationContext;
use asset360_schemas::{
    config::LocationRecord,
    topology::{Facility, FacilityType, Line, Region, Site},
    UNKNOWN_REGION_ID,
};
use indexmap::{IndexMap, IndexSet};
use rand::seq::SliceRandom;
use tracing::debug;

const LINE_CAPACITIES: [u32; 6] = [50, 60, 70, 80, 90, 100];
const FLOORS_PER_LINE_TYPE: u32 = 1;
pub const GENERAL_LINE: &str = "General Line";

/// Distinct regions in order of first appearance in the location catalog.
pub fn generate_regions(locations: &[LocationRecord]) -> Vec<Region> {
    let names: IndexSet<&str> = locations.iter().map(|l| l.region.as_str()).collect();
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Region {
            id: format!("R{}", i + 1),
            name: name.to_string(),
        })
        .collect()
}

/// Distinct plants; each takes the region and country of its first catalog entry.
pub fn generate_sites(
    locations: &[LocationRecord],
    country_codes: &IndexMap<String, String>,
) -> Vec<Site> {
    let mut plants: IndexMap<&str, &LocationRecord> = IndexMap::new();
    for location in locations {
        plants.entry(location.plant_name.as_str()).or_insert(location);
    }

    plants
        .into_iter()
        .enumerate()
        .map(|(i, (plant, location))| Site {
            id: format!("S{}", i + 1),
            name: plant.to_string(),
            region: location.region.clone(),
            country: location.country.clone(),
            country_code: country_codes
                .get(&location.country)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect()
}

/// Gives every site one manufacturing facility (continuous or batch) plus one or two
/// auxiliary facilities.
pub fn generate_facilities(
    ctx: &mut GenerationContext,
    sites: &[Site],
    regions: &[Region],
) -> Vec<Facility> {
    let mut facilities = Vec::new();

    for site in sites {
        let manufacturing = *FacilityType::MANUFACTURING
            .choose(&mut ctx.rng)
            .unwrap_or(&FacilityType::BatchManufacturing);
        let extra = *[1usize, 2].choose(&mut ctx.rng).unwrap_or(&1);
        let auxiliary: Vec<FacilityType> = FacilityType::AUXILIARY
            .choose_multiple(&mut ctx.rng, extra)
            .copied()
            .collect();

        let region_id = regions
            .iter()
            .find(|r| r.name == site.region)
            .map(|r| r.id.clone())
            .unwrap_or_else(|| UNKNOWN_REGION_ID.to_string());

        for (count, facility_type) in std::iter::once(manufacturing).chain(auxiliary).enumerate() {
            facilities.push(Facility {
                id: format!("F-{}-{}", count + 1, site.id),
                name: format!("{} {}", site.name, facility_type.label()),
                facility_type,
                site_id: site.id.clone(),
                region_id: region_id.clone(),
            });
        }
        debug!(site = %site.id, "Facilities assigned");
    }

    facilities
}

/// Creates the lines of every facility from the facility-type → line-types catalog.
pub fn generate_lines(
    ctx: &mut GenerationContext,
    facilities: &[Facility],
    line_types_by_facility: &IndexMap<FacilityType, Vec<String>>,
) -> Vec<Line> {
    let general = vec![GENERAL_LINE.to_string()];
    let mut lines = Vec::new();

    for facility in facilities {
        let line_types = line_types_by_facility
            .get(&facility.facility_type)
            .unwrap_or(&general);

        for line_type in line_types {
            for floor in 1..=FLOORS_PER_LINE_TYPE {
                let id = format!("L{}", lines.len() + 1);
                lines.push(Line {
                    name: format!("{}-{}-{}", facility.id, line_type, id),
                    id,
                    facility_id: facility.id.clone(),
                    line_type: line_type.clone(),
                    capacity: *LINE_CAPACITIES.choose(&mut ctx.rng).unwrap_or(&50),
                    floor,
                });
            }
        }
    }

    lines
}
