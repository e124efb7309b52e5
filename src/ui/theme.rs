use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub subtitle: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub day_header: Color,
    pub table_border: Color,
    pub column_header: Color,
    pub online_marker: Color,
    pub new_badge: Color,
    pub link: Color,
    pub empty_day: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            subtitle: Color::White,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Red,
            day_header: Color::Yellow,
            table_border: Color::Gray,
            column_header: Color::Cyan,
            online_marker: Color::Green,
            new_badge: Color::LightRed,
            link: Color::LightBlue,
            empty_day: Color::DarkGray,
            status_bar: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            subtitle: Color::Rgb(235, 219, 178),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(251, 73, 52),
            day_header: Color::Rgb(254, 128, 25),
            table_border: Color::Rgb(146, 131, 116),
            column_header: Color::Rgb(131, 165, 152),
            online_marker: Color::Rgb(184, 187, 38),
            new_badge: Color::Rgb(211, 134, 155),
            link: Color::Rgb(131, 165, 152),
            empty_day: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    /// Unknown names fall back to the default theme.
    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
