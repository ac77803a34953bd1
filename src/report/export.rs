//! CSV export of the consolidated result table

use super::table::ResultTable;
use csv::Writer;
use std::io::Write;
use std::path::Path;

/// File name used when no municipality name is available
pub const DEFAULT_EXPORT_FILE_NAME: &str = "proyeccion_municipios.csv";

/// Write the table as UTF-8 CSV with header `Municipio,Método,Año,Población proyectada`
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(["Municipio", "Método", "Año", "Población proyectada"])?;

    for row in table.rows() {
        csv_writer.write_record([
            row.entity_name.as_str(),
            row.method.label(),
            row.year.to_string().as_str(),
            row.population.to_string().as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Encode the table as CSV bytes
pub fn to_csv_bytes(table: &ResultTable) -> Result<Vec<u8>, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// Write the table to a file
pub fn write_csv_file<P: AsRef<Path>>(table: &ResultTable, path: P) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)?;
    log::info!("exported {} rows", table.len());
    Ok(())
}

/// Lowercase, spaces replaced by underscores
pub fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Export file name derived from municipality names
pub fn export_file_name<S: AsRef<str>>(names: &[S]) -> String {
    let slugs: Vec<String> = names
        .iter()
        .map(|name| slugify(name.as_ref()))
        .filter(|slug| !slug.is_empty())
        .collect();

    if slugs.is_empty() {
        DEFAULT_EXPORT_FILE_NAME.to_string()
    } else {
        format!("{}.csv", slugs.join("_"))
    }
}
