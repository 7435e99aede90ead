use crate::domain::mcdata::{MinecraftData, VersionBundle};
use crate::domain::ports::Storage;
use crate::utils::error::{MinebaseError, Result};
use serde_json::{Map, Value};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }
}

/// Renders the datasets of one loaded version.
pub struct Exporter {
    label: String,
    datasets: Map<String, Value>,
}

impl Exporter {
    pub fn new(data: &MinecraftData) -> Result<Self> {
        let label = format!(
            "{}-{}",
            data.edition(),
            data.version_data().minecraft_version
        );
        let datasets = match serde_json::to_value(data)? {
            Value::Object(map) => map,
            _ => return Err(MinebaseError::processing("Version data is not an object")),
        };
        Ok(Self { label, datasets })
    }

    /// `<edition>-<minecraftVersion>`, used to name output files.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Dataset names present in this version.
    pub fn datasets(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    /// Datasets that render as tables.
    pub fn list_datasets(&self) -> impl Iterator<Item = &str> {
        self.datasets
            .iter()
            .filter(|(_, value)| is_record_list(value))
            .map(|(name, _)| name.as_str())
    }

    /// Record count of a list dataset, or key count of a map dataset.
    pub fn record_count(&self, dataset: &str) -> Option<usize> {
        match self.datasets.get(dataset)? {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    fn dataset(&self, dataset: &str) -> Result<&Value> {
        self.datasets.get(dataset).ok_or_else(|| {
            MinebaseError::processing(format!(
                "Dataset {:?} is not available for {}",
                dataset, self.label
            ))
        })
    }

    pub fn render(&self, dataset: &str, format: ExportFormat) -> Result<Vec<u8>> {
        let value = self.dataset(dataset)?;
        match format.delimiter() {
            None => Ok(serde_json::to_vec_pretty(value)?),
            Some(delimiter) => {
                if !is_record_list(value) {
                    return Err(MinebaseError::processing(format!(
                        "Dataset {:?} is not a list of records; export it as json",
                        dataset
                    )));
                }
                render_table(value, delimiter)
            }
        }
    }

    /// Writes `<label>/<dataset>.<ext>` and returns that path.
    pub async fn write<S: Storage>(
        &self,
        storage: &S,
        dataset: &str,
        format: ExportFormat,
    ) -> Result<String> {
        let contents = self.render(dataset, format)?;
        let path = format!("{}/{}.{}", self.label, dataset, format.extension());
        storage.write_file(&path, &contents).await?;
        tracing::info!("Exported {} ({} bytes)", path, contents.len());
        Ok(path)
    }

    /// Writes `<label>.zip` holding every list dataset as CSV plus `version.json`.
    pub async fn export_bundle<S: Storage>(&self, storage: &S) -> Result<String> {
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            let mut count = 0;
            for dataset in self.list_datasets() {
                let table = self.render(dataset, ExportFormat::Csv)?;
                zip.start_file::<_, ()>(format!("{}.csv", dataset), FileOptions::default())?;
                zip.write_all(&table)?;
                count += 1;
            }

            zip.start_file::<_, ()>("version.json", FileOptions::default())?;
            zip.write_all(&self.render("version", ExportFormat::Json)?)?;

            tracing::debug!("Bundled {} datasets", count);
            zip.finish()?.into_inner()
        };

        let path = format!("{}.zip", self.label);
        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        storage.write_file(&path, &zip_data).await?;
        Ok(path)
    }
}

fn is_record_list(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().all(Value::is_object),
        _ => false,
    }
}

fn render_table(value: &Value, delimiter: u8) -> Result<Vec<u8>> {
    let records: Vec<&Map<String, Value>> = value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default();

    let mut columns: Vec<&str> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in &records {
        writer.write_record(columns.iter().map(|column| cell(record.get(*column))))?;
    }

    writer
        .into_inner()
        .map_err(|e| MinebaseError::processing(format!("Unable to flush table: {}", e)))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(nested) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exporter() -> Exporter {
        Exporter {
            label: "pc-1.20.4".to_string(),
            datasets: json!({
                "version": {"version": 765, "minecraftVersion": "1.20.4", "majorVersion": "1.20"},
                "blocks": [
                    {"drops": [1], "id": 1, "name": "stone"},
                    {"hardness": null, "id": 2, "name": "grass_block", "transparent": false}
                ],
                "language": {"block.minecraft.stone": "Stone"}
            })
            .as_object()
            .cloned()
            .unwrap(),
        }
    }

    #[test]
    fn test_columns_are_union_in_first_seen_order() {
        let csv = String::from_utf8(exporter().render("blocks", ExportFormat::Csv).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("drops,id,name,hardness,transparent"));
        assert_eq!(lines.next(), Some("[1],1,stone,,"));
        assert_eq!(lines.next(), Some(",2,grass_block,,false"));
    }

    #[test]
    fn test_tsv_delimiter() {
        let tsv = String::from_utf8(exporter().render("blocks", ExportFormat::Tsv).unwrap()).unwrap();
        assert!(tsv.starts_with("drops\tid\tname"));
    }

    #[test]
    fn test_map_dataset_is_json_only() {
        let exporter = exporter();
        assert!(exporter.render("language", ExportFormat::Csv).is_err());
        let json: Value =
            serde_json::from_slice(&exporter.render("language", ExportFormat::Json).unwrap()).unwrap();
        assert_eq!(json["block.minecraft.stone"], "Stone");
        assert_eq!(exporter.record_count("language"), Some(1));
    }

    #[test]
    fn test_unknown_dataset() {
        assert!(matches!(
            exporter().render("recipes", ExportFormat::Json),
            Err(MinebaseError::ProcessingError { .. })
        ));
    }

    #[test]
    fn test_list_datasets() {
        assert_eq!(exporter().list_datasets().collect::<Vec<_>>(), vec!["blocks"]);
    }
}
