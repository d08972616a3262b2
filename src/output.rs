use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Write `value` as pretty-printed JSON. Non-ASCII text is written as-is.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    ensure_parent(path)?;
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), AppError> {
    ensure_parent(path)?;
    fs::write(path, contents)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), AppError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snapshot;

    #[test]
    fn writes_pretty_unescaped_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");

        let mut snapshot = Snapshot::new();
        snapshot.push("Crème Brûlée", vec!["ok"]);
        write_json(&path, &snapshot).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"Crème Brûlée\": [\n    \"ok\"\n  ]\n}\n");
    }

    #[test]
    fn writes_text_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/out.md");
        write_text(&path, "# Title\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "# Title\n");
    }
}
