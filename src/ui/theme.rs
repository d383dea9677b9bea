//! cliclack theme

use cliclack::ThemeState;
use console::Style;

/// Ostriv's theme: yellow bars, green on success
#[derive(Debug, Clone, Default)]
pub struct OstrivTheme;

impl cliclack::Theme for OstrivTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().yellow(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().yellow().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().yellow(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

pub fn init_theme() {
    cliclack::set_theme(OstrivTheme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliclack::Theme;

    #[test]
    fn error_state_is_red() {
        let theme = OstrivTheme;
        let error = theme.bar_color(&ThemeState::Error(String::new()));
        assert_eq!(
            error.apply_to("x").to_string(),
            Style::new().red().apply_to("x").to_string()
        );
    }
}
