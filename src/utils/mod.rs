use std::path::Path;

/// Reduce a configured output name to a bare file name.
///
/// Path separators and characters that are invalid on common filesystems
/// become `_`, and leading/trailing dots and spaces are dropped.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == ' ')
        .to_string()
}

/// Content type for an uploaded part, guessed from the file extension.
pub fn mime_for(filename: &str) -> &'static str {
    let is_pdf = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

/// `file_name` for `n == 0`, otherwise `stem (n).ext`, the way browsers
/// number repeated downloads.
pub fn numbered_file_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    match name.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Student_Marks.xlsx"), "Student_Marks.xlsx");
        assert_eq!(sanitize_filename("../out/marks.xlsx"), "_out_marks.xlsx");
        assert_eq!(sanitize_filename(" marks?.xlsx "), "marks_.xlsx");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("report.pdf"), "application/pdf");
        assert_eq!(mime_for("REPORT.PDF"), "application/pdf");
        assert_eq!(mime_for("notes.txt"), "application/octet-stream");
        assert_eq!(mime_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_numbered_file_name() {
        assert_eq!(numbered_file_name("Student_Marks.xlsx", 0), "Student_Marks.xlsx");
        assert_eq!(numbered_file_name("Student_Marks.xlsx", 2), "Student_Marks (2).xlsx");
        assert_eq!(numbered_file_name("marks", 1), "marks (1)");
    }
}
