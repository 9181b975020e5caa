//! Colors for the light and dark themes.
//!
//! Every component receives a `Palette` as a prop instead of branching on
//! the theme itself.

use ratatui::style::Color;

use crate::core::state::Theme;

// Tailwind-ish grays and blues
const WHITE: Color = Color::Rgb(255, 255, 255);
const GRAY_50: Color = Color::Rgb(249, 250, 251);
const GRAY_100: Color = Color::Rgb(243, 244, 246);
const GRAY_200: Color = Color::Rgb(229, 231, 235);
const GRAY_400: Color = Color::Rgb(156, 163, 175);
const GRAY_500: Color = Color::Rgb(107, 114, 128);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_800: Color = Color::Rgb(31, 41, 55);
const GRAY_900: Color = Color::Rgb(17, 24, 39);
const BLUE_500: Color = Color::Rgb(59, 130, 246);
const BLUE_400: Color = Color::Rgb(96, 165, 250);
const GREEN_600: Color = Color::Rgb(22, 163, 74);
const GREEN_400: Color = Color::Rgb(74, 222, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background
    pub background: Color,
    /// Header, composer and card surfaces
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    /// Subtitles, hints, timestamps
    pub muted: Color,
    pub user_bubble: Color,
    pub user_text: Color,
    pub assistant_bubble: Color,
    pub assistant_text: Color,
    pub assistant_border: Color,
    /// Links and the enabled send control
    pub accent: Color,
    pub accent_text: Color,
    pub disabled: Color,
    pub disabled_text: Color,
    /// "Copied!" marker
    pub success: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: GRAY_50,
                surface: WHITE,
                border: GRAY_200,
                text: GRAY_900,
                muted: GRAY_500,
                user_bubble: BLUE_500,
                user_text: WHITE,
                assistant_bubble: WHITE,
                assistant_text: GRAY_800,
                assistant_border: GRAY_100,
                accent: BLUE_500,
                accent_text: WHITE,
                disabled: GRAY_200,
                disabled_text: GRAY_400,
                success: GREEN_600,
            },
            Theme::Dark => Self {
                background: GRAY_900,
                surface: GRAY_800,
                border: GRAY_700,
                text: GRAY_100,
                muted: GRAY_400,
                user_bubble: BLUE_500,
                user_text: WHITE,
                assistant_bubble: GRAY_800,
                assistant_text: GRAY_100,
                assistant_border: GRAY_600,
                accent: BLUE_400,
                accent_text: GRAY_900,
                disabled: GRAY_700,
                disabled_text: GRAY_500,
                success: GREEN_400,
            },
        }
    }
}
