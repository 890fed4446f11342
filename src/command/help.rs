use super::parser::COMMANDS;

/// Command reference printed by HELP
pub fn help_lines() -> Vec<String> {
    let mut lines = vec![
        "Available commands:".to_string(),
        "Note: playlist names are not case-sensitive; videos are addressed by ID.".to_string(),
    ];
    let width = COMMANDS
        .iter()
        .map(|spec| spec.usage().len())
        .max()
        .unwrap_or(0);
    for spec in COMMANDS {
        lines.push(format!(
            "    {:<width$} - {}",
            spec.usage(),
            spec.summary,
            width = width
        ));
    }
    lines
}
