//! Display helpers shared by the model types

/// Turn a catalog identifier like `muhammad-ayyub` into `Muhammad Ayyub`.
pub fn format_title(name: &str) -> String {
    if name.is_empty() {
        tracing::debug!("format_title called with an empty name");
        return String::new();
    }

    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Display title for a track file: the filename minus its extension.
pub fn track_title(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
