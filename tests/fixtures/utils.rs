// Shared helpers for building fixed-width catalog files
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// One fixed-width catalog line with the fields at their byte offsets
pub fn fixed_width_line(code: &str, name: &str, strength: &str, form: &str) -> String {
    format!(
        "{:<11}{:<9}{:<38} {:<16}{:<4}",
        "0000000001", code, name, strength, form
    )
}

/// A catalog file holding one line per `(code, name, strength, form)`
pub fn write_catalog(records: &[(&str, &str, &str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create catalog file");
    for (code, name, strength, form) in records {
        writeln!(file, "{}", fixed_width_line(code, name, strength, form))
            .expect("write catalog line");
    }
    file.flush().expect("flush catalog file");
    file
}

/// Replace the contents of an existing catalog file
pub fn overwrite(path: &Path, content: &str) {
    std::fs::write(path, content).expect("overwrite catalog file");
}

/// The small catalog most tests search against
pub fn sample_records() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    vec![
        ("700001", "ASPIRIN 300MG TABLET", "300MG", "TAB"),
        ("700002", "PARACETAMOL 500MG", "500MG", "TAB"),
        ("700003", "PARACETAMOL SYRUP", "120MG/5ML", "SYR"),
        ("700004", "IBUPROFEN 200MG", "200MG", "TAB"),
    ]
}
