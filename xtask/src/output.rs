//! Terminal output helpers shared by the xtask commands.

pub use anstream::println as aprintln;

mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[38;2;247;118;142m";
    pub const GREEN: &str = "\x1b[38;2;158;206;106m";
    pub const YELLOW: &str = "\x1b[38;2;224;175;104m";
    pub const BLUE: &str = "\x1b[38;2;122;162;247m";
    pub const CYAN: &str = "\x1b[38;2;125;207;255m";
}

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{}", colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::CYAN, text)
}

/// Colors a plan line by its leading marker: `+` create, `-` delete, `~` update.
pub fn plan_line(line: &str) -> String {
    match line.chars().next() {
        Some('+') => p_g(line),
        Some('-') => p_r(line),
        Some('~') => p_y(line),
        _ => line.to_string(),
    }
}

/// Prints a titled plan, one colored line per entry.
pub fn print_plan(title: &str, lines: &[String]) {
    aprintln!("{}", p_c(title));
    for line in lines {
        aprintln!("  {}", plan_line(line));
    }
    aprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_line_colors_by_marker() {
        assert_eq!(plan_line("+ Create table: X"), p_g("+ Create table: X"));
        assert_eq!(plan_line("- Delete table: X"), p_r("- Delete table: X"));
        assert_eq!(plan_line("~ Update function: f"), p_y("~ Update function: f"));
    }

    #[test]
    fn test_plan_line_leaves_other_lines_plain() {
        assert_eq!(plan_line("  Partition key: id (S)"), "  Partition key: id (S)");
        assert_eq!(plan_line(""), "");
    }

    #[test]
    fn test_paint_wraps_with_reset() {
        let painted = p_b("Target:");
        assert!(painted.starts_with(colors::BLUE));
        assert!(painted.ends_with(colors::RESET));
        assert!(painted.contains("Target:"));
    }
}
