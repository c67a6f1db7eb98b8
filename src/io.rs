use crate::ical;
use crate::model::Schedule;
use anyhow::Context;
use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Écrit `data` dans `path` de manière atomique (fichier temporaire +
/// rename dans le même répertoire).
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Export iCalendar (UID frais, DTSTAMP = maintenant).
pub fn export_ics<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let text = ical::to_ics(schedule);
    write_atomic(path.as_ref(), text.as_bytes())
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(schedule)?;
    write_atomic(path.as_ref(), &json)
}

/// Export CSV: header `title,kind,person,start,end`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    w.write_record(["title", "kind", "person", "start", "end"])?;
    for e in schedule {
        let person = e.person().map(|p| p.as_str()).unwrap_or("");
        let start = e.start().format("%Y-%m-%dT%H:%M").to_string();
        let end = e.end().format("%Y-%m-%dT%H:%M").to_string();
        w.write_record([
            e.title(),
            e.kind().as_str(),
            person,
            start.as_str(),
            end.as_str(),
        ])?;
    }
    let data = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv buffer: {}", e.error()))?;
    write_atomic(path.as_ref(), &data)
}
