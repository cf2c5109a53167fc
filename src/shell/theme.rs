use ratatui::style::Color;

/// One resolved color palette. The shell picks dark or light from the
/// session state on every frame, so a settings toggle takes effect
/// immediately.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub desktop_bg: Color,
    pub desktop_fg: Color,
    pub bar_bg: Color,
    pub bar_fg: Color,
    pub window_bg: Color,
    pub window_fg: Color,
    pub titlebar_focused: Color,
    pub titlebar_blurred: Color,
    pub accent: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn current(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn dark() -> Self {
        Self {
            desktop_bg: Color::Rgb(24, 28, 44),
            desktop_fg: Color::Rgb(200, 205, 220),
            bar_bg: Color::Rgb(38, 42, 60),
            bar_fg: Color::Rgb(225, 228, 240),
            window_bg: Color::Rgb(30, 32, 40),
            window_fg: Color::Rgb(220, 222, 230),
            titlebar_focused: Color::Rgb(70, 76, 105),
            titlebar_blurred: Color::Rgb(45, 48, 62),
            accent: Color::Rgb(110, 170, 250),
            muted: Color::Rgb(130, 135, 150),
            success: Color::Rgb(120, 200, 120),
            warning: Color::Rgb(235, 190, 90),
            error: Color::Rgb(235, 105, 100),
        }
    }

    pub fn light() -> Self {
        Self {
            desktop_bg: Color::Rgb(185, 200, 225),
            desktop_fg: Color::Rgb(40, 45, 60),
            bar_bg: Color::Rgb(235, 238, 245),
            bar_fg: Color::Rgb(40, 45, 60),
            window_bg: Color::Rgb(248, 248, 250),
            window_fg: Color::Rgb(35, 38, 48),
            titlebar_focused: Color::Rgb(200, 208, 228),
            titlebar_blurred: Color::Rgb(228, 230, 238),
            accent: Color::Rgb(30, 100, 210),
            muted: Color::Rgb(120, 126, 140),
            success: Color::Rgb(30, 140, 60),
            warning: Color::Rgb(180, 130, 20),
            error: Color::Rgb(200, 55, 50),
        }
    }
}
