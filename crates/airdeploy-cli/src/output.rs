use serde::Serialize;

const UNSET: &str = "(unset)";

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `key  value` lines with the values aligned in one column.
pub fn print_settings(settings: &[(String, String)]) {
    print!("{}", render_settings(settings));
}

fn render_settings(settings: &[(String, String)]) -> String {
    let width = settings.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    settings
        .iter()
        .map(|(key, value)| {
            let value = if value.trim().is_empty() { UNSET } else { value };
            format!("{key:<width$}  {value}\n")
        })
        .collect()
}
