//! Table formatting for CLI output.

use matchlog_core::FileDescriptor;

/// Truncate to `max_len` characters, ending in "..." when cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Human-readable size, `--` when unknown.
pub fn format_size(size: Option<u64>) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match size {
        None => "--".to_string(),
        Some(b) if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        Some(b) if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        Some(b) => format!("{b} B"),
    }
}

/// One table row per descriptor.
pub fn descriptor_rows(files: &[FileDescriptor]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            format!(
                "{:<15} {:<22} {:>10}  {:<38} {}",
                f.endpoint.as_path_segment(),
                f.file_type().as_str(),
                format_size(f.size_bytes),
                truncate_string(f.session_id.as_deref().unwrap_or("--"), 38),
                f.name
            )
        })
        .collect()
}

pub fn print_descriptor_table(files: &[FileDescriptor]) {
    println!(
        "{:<15} {:<22} {:>10}  {:<38} Name",
        "Endpoint", "Type", "Size", "Session"
    );
    print_separator(110);
    for row in descriptor_rows(files) {
        println!("{row}");
    }
}
