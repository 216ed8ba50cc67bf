use crate::{
    analysis::DatasetSummary,
    error::Asset360Error,
    pipeline::{stage::Stage, state::Dataset},
};
use chrono::NaiveDateTime;
use csv::Writer;
use serde::{
    de::{self, value, DeserializeOwned, Visitor},
    Serialize,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    pub table: String,
    pub file: String,
    pub rows: usize,
}

/// Run metadata written beside the tables.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub seed: Option<u64>,
    pub reference_time: NaiveDateTime,
    pub num_products: usize,
    pub tables: Vec<TableEntry>,
    pub summary: DatasetSummary,
}

/// Writes generated tables as one CSV file each, overwriting previous runs.
pub struct DatasetWriter {
    output_dir: PathBuf,
}

impl DatasetWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, Asset360Error> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)
            .map_err(|e| Asset360Error::FileIO(output_dir.display().to_string(), e))?;
        Ok(Self { output_dir })
    }

    /// Writes `rows` under their serde column names. An empty table still gets its header.
    pub fn write_table<T>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf, Asset360Error>
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.output_dir.join(file_name);
        let display = path.display().to_string();
        let mut writer = Writer::from_path(&path).map_err(|e| Asset360Error::CsvError(display.clone(), e))?;
        if rows.is_empty() {
            writer
                .write_record(column_names::<T>())
                .map_err(|e| Asset360Error::CsvError(display.clone(), e))?;
        }
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| Asset360Error::CsvError(display.clone(), e))?;
        }
        writer
            .flush()
            .map_err(|e| Asset360Error::FileIO(display, e))?;
        Ok(path)
    }

    pub fn write_stage(&self, stage: Stage, dataset: &Dataset) -> Result<PathBuf, Asset360Error> {
        let file = stage.file_name();
        match stage {
            Stage::Region => self.write_table(file, &dataset.regions),
            Stage::Site => self.write_table(file, &dataset.sites),
            Stage::Facility => self.write_table(file, &dataset.facilities),
            Stage::Line => self.write_table(file, &dataset.lines),
            Stage::Oem => self.write_table(file, &dataset.oems),
            Stage::UnitProcedure => self.write_table(file, &dataset.unit_procedures),
            Stage::Asset => self.write_table(file, &dataset.assets),
            Stage::AssetInfo => self.write_table(file, &dataset.asset_info),
            Stage::Operation => self.write_table(file, &dataset.operations),
            Stage::Oee => self.write_table(file, &dataset.oee),
            Stage::MachineAttributes => self.write_table(file, &dataset.machine_attributes),
            Stage::Maintenance => self.write_table(file, &dataset.maintenance),
            Stage::Calibration => self.write_table(file, &dataset.calibration),
            Stage::Compliance => self.write_table(file, &dataset.compliance),
            Stage::Product => self.write_table(file, &dataset.products),
            Stage::ProcessOrder => self.write_table(file, &dataset.process_orders),
            Stage::Batch => self.write_table(file, &dataset.batches),
            Stage::Material => self.write_table(file, &dataset.materials),
            Stage::PlantMaterial => self.write_table(file, &dataset.plant_materials),
            Stage::Recipe => self.write_table(file, &dataset.recipes),
            Stage::Supplier => self.write_table(file, &dataset.suppliers),
            Stage::MaterialSupplier => self.write_table(file, &dataset.material_suppliers),
            Stage::WorkOrder => self.write_table(file, &dataset.work_orders),
            Stage::Lims => self.write_table(file, &dataset.lims),
        }
    }

    /// Writes the table of every given stage. A failed table does not stop the others; all
    /// failures are reported together afterwards.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailed` naming every table that could not be written.
    pub fn write_dataset(&self, dataset: &Dataset, stages: &[Stage]) -> Result<Vec<TableEntry>, Asset360Error> {
        let mut entries = Vec::with_capacity(stages.len());
        let mut failed = Vec::new();

        for stage in stages {
            match self.write_stage(*stage, dataset) {
                Ok(path) => {
                    info!(table = stage.name(), path = %path.display(), "Table written");
                    entries.push(TableEntry {
                        table: stage.name().to_string(),
                        file: stage.file_name().to_string(),
                        rows: dataset.row_count(*stage),
                    });
                }
                Err(e) => {
                    error!(table = stage.name(), error = %e, "Failed to write table");
                    failed.push(stage.name().to_string());
                }
            }
        }

        if failed.is_empty() {
            Ok(entries)
        } else {
            Err(Asset360Error::PersistenceFailed(failed))
        }
    }

    pub fn write_manifest(&self, manifest: &Manifest) -> Result<PathBuf, Asset360Error> {
        let path = self.output_dir.join("manifest.json");
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&path, json).map_err(|e| Asset360Error::FileIO(path.display().to_string(), e))?;
        Ok(path)
    }
}

/// Column names of a record type, read from its derived `Deserialize` impl.
fn column_names<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut fields: &'static [&'static str] = &[];
    // Deserialization always fails after the field list is captured.
    let _ = T::deserialize(FieldNames(&mut fields));
    fields
}

struct FieldNames<'a>(&'a mut &'static [&'static str]);

impl<'de, 'a> de::Deserializer<'de> for FieldNames<'a> {
    type Error = value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.0 = fields;
        Err(de::Error::custom("field names captured"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string bytes byte_buf
        option unit unit_struct newtype_struct seq tuple tuple_struct map enum identifier
        ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asset360_schemas::{execution::Lims, material::MaterialSupplierLink, topology::Region};

    #[test]
    fn test_write_table_uses_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path().join("data")).unwrap();
        let regions = vec![
            Region { id: "R1".into(), name: "Europe".into() },
            Region { id: "R2".into(), name: "Asia".into() },
        ];
        let path = writer.write_table("region.csv", &regions).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "id,Name\nR1,Europe\nR2,Asia\n");
    }

    #[test]
    fn test_write_dataset_lists_every_stage() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path()).unwrap();
        let mut dataset = Dataset::default();
        dataset.regions.push(Region { id: "R1".into(), name: "Europe".into() });

        let entries = writer.write_dataset(&dataset, &Stage::ALL).unwrap();
        assert_eq!(entries.len(), Stage::ALL.len());
        assert_eq!(entries[0].rows, 1);
        assert!(dir.path().join("material_supplier_rel.csv").exists());

        let lims = fs::read_to_string(dir.path().join(Stage::Lims.file_name())).unwrap();
        assert!(lims.starts_with("id,Name,Test,Result"));
    }

    #[test]
    fn test_empty_table_keeps_its_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path()).unwrap();

        let path = writer.write_table::<Lims>("lims.csv", &[]).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "id,Name,Test,Result,AssetID,WOID,Status,FacilityID,SiteID\n"
        );

        let path = writer.write_table::<MaterialSupplierLink>("rel.csv", &[]).unwrap();
        let header = fs::read_to_string(path).unwrap();
        assert_eq!(header.lines().count(), 1);
        assert!(!header.trim_end().is_empty());
    }
}
