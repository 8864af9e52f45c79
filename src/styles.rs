//! The seven built-in style variants.
//!
//! Each variant turns the palette into a complete stylesheet. Colors are
//! derived from the palette rather than copied, so two variants never share a
//! stylesheet even with identical inputs.
use crate::palette::{Palette, Rgb};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleVariant {
    Minimal,
    Editorial,
    BoldBlocks,
    SoftCards,
    Midnight,
    Brutalist,
    Gradient,
}

impl StyleVariant {
    /// Variants in draft order; draft `n` uses `ALL[n - 1]`.
    pub const ALL: [StyleVariant; 7] = [
        StyleVariant::Minimal,
        StyleVariant::Editorial,
        StyleVariant::BoldBlocks,
        StyleVariant::SoftCards,
        StyleVariant::Midnight,
        StyleVariant::Brutalist,
        StyleVariant::Gradient,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            StyleVariant::Minimal => "minimal",
            StyleVariant::Editorial => "editorial",
            StyleVariant::BoldBlocks => "bold-blocks",
            StyleVariant::SoftCards => "soft-cards",
            StyleVariant::Midnight => "midnight",
            StyleVariant::Brutalist => "brutalist",
            StyleVariant::Gradient => "gradient",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StyleVariant::Minimal => "Minimal",
            StyleVariant::Editorial => "Editorial",
            StyleVariant::BoldBlocks => "Bold Blocks",
            StyleVariant::SoftCards => "Soft Cards",
            StyleVariant::Midnight => "Midnight",
            StyleVariant::Brutalist => "Brutalist",
            StyleVariant::Gradient => "Gradient",
        }
    }

    /// Changelog description for drafts built from this variant.
    pub fn description(&self) -> &'static str {
        match self {
            StyleVariant::Minimal => {
                "Clean sans-serif layout with generous whitespace. The palette background \
                 carries the page and the primary color is kept for headings and links, \
                 with the accent reserved for hover states."
            }
            StyleVariant::Editorial => {
                "Magazine-style serif typography on a narrow reading column. Headings use \
                 a darkened primary, rules and blockquotes pick up the secondary color, and \
                 the accent underlines links."
            }
            StyleVariant::BoldBlocks => {
                "High-contrast color blocks. Headers and footers sit on solid primary \
                 panels, sections alternate between background and a secondary tint, and \
                 buttons use the accent at full strength."
            }
            StyleVariant::SoftCards => {
                "Rounded cards with soft shadows floating on a lightened background. \
                 Secondary tints fill card surfaces and the accent marks focus rings and \
                 call-to-action buttons."
            }
            StyleVariant::Midnight => {
                "Dark theme built by inverting the palette roles: a deeply darkened primary \
                 becomes the canvas, the background color becomes body text, and the \
                 accent glows on links and highlights."
            }
            StyleVariant::Brutalist => {
                "Monospace type, thick borders, and hard offset shadows. Flat primary and \
                 accent fills with no rounding give a raw, utilitarian feel."
            }
            StyleVariant::Gradient => {
                "Hero gradient sweeping from primary to secondary behind the header, glassy \
                 translucent sections over the background, and accent-tinted buttons with \
                 a gradient hover."
            }
        }
    }

    /// Full stylesheet body for this variant, starting with the `:root` block.
    pub fn stylesheet(&self, palette: &Palette) -> String {
        let mut css = String::new();
        let _ = writeln!(css, ":root {{");
        css.push_str(&palette.css_variables());
        let _ = writeln!(css, "}}");
        css.push_str(&match self {
            StyleVariant::Minimal => minimal(palette),
            StyleVariant::Editorial => editorial(palette),
            StyleVariant::BoldBlocks => bold_blocks(palette),
            StyleVariant::SoftCards => soft_cards(palette),
            StyleVariant::Midnight => midnight(palette),
            StyleVariant::Brutalist => brutalist(palette),
            StyleVariant::Gradient => gradient(palette),
        });
        css
    }
}

fn minimal(p: &Palette) -> String {
    let text = p.background.readable_text();
    format!(
        "body {{ margin: 0 auto; max-width: 960px; padding: 3rem 1.5rem; \
         font-family: \"Inter\", \"Helvetica Neue\", Arial, sans-serif; line-height: 1.7; \
         background: {bg}; color: {text}; }}\n\
         h1, h2, h3 {{ color: {primary}; font-weight: 600; letter-spacing: -0.01em; }}\n\
         a {{ color: {primary}; text-decoration: none; border-bottom: 1px solid {secondary}; }}\n\
         a:hover {{ color: {accent}; border-bottom-color: {accent}; }}\n\
         section {{ margin: 4rem 0; }}\n\
         button, .button {{ background: transparent; color: {primary}; border: 1px solid {primary}; \
         padding: 0.6rem 1.4rem; border-radius: 2px; }}\n",
        bg = p.background,
        text = text,
        primary = p.primary,
        secondary = p.secondary.lighten(0.4),
        accent = p.accent,
    )
}

fn editorial(p: &Palette) -> String {
    let paper = p.background.mix(Rgb::WHITE, 0.3);
    format!(
        "body {{ margin: 0 auto; max-width: 68ch; padding: 4rem 1.25rem; \
         font-family: \"Georgia\", \"Times New Roman\", serif; font-size: 1.125rem; line-height: 1.8; \
         background: {paper}; color: {ink}; }}\n\
         h1 {{ font-size: 3rem; line-height: 1.1; color: {heading}; border-bottom: 3px double {rule}; \
         padding-bottom: 0.5rem; }}\n\
         h2, h3 {{ color: {heading}; font-style: italic; }}\n\
         hr {{ border: 0; border-top: 1px solid {rule}; }}\n\
         blockquote {{ border-left: 4px solid {rule}; margin-left: 0; padding-left: 1.25rem; color: {quote}; }}\n\
         a {{ color: {heading}; text-decoration-color: {accent}; text-decoration-thickness: 2px; }}\n\
         p:first-of-type::first-letter {{ float: left; font-size: 3.5rem; line-height: 1; \
         padding-right: 0.4rem; color: {accent}; }}\n",
        paper = paper,
        ink = paper.readable_text(),
        heading = p.primary.darken(0.25),
        rule = p.secondary,
        quote = p.secondary.darken(0.3),
        accent = p.accent,
    )
}

fn bold_blocks(p: &Palette) -> String {
    let band = p.secondary.mix(p.background, 0.75);
    format!(
        "body {{ margin: 0; font-family: \"Montserrat\", \"Segoe UI\", sans-serif; \
         background: {bg}; color: {text}; }}\n\
         header, footer {{ background: {primary}; color: {on_primary}; padding: 3rem 2rem; }}\n\
         header h1 {{ font-size: 3.5rem; text-transform: uppercase; margin: 0; }}\n\
         section {{ padding: 3rem 2rem; }}\n\
         section:nth-of-type(even) {{ background: {band}; color: {on_band}; }}\n\
         a {{ color: {primary}; font-weight: 700; }}\n\
         header a, footer a {{ color: {accent}; }}\n\
         button, .button {{ background: {accent}; color: {on_accent}; border: 0; \
         padding: 0.9rem 2rem; font-weight: 800; text-transform: uppercase; }}\n",
        bg = p.background,
        text = p.background.readable_text(),
        primary = p.primary,
        on_primary = p.primary.readable_text(),
        band = band,
        on_band = band.readable_text(),
        accent = p.accent,
        on_accent = p.accent.readable_text(),
    )
}

fn soft_cards(p: &Palette) -> String {
    let canvas = p.background.lighten(0.5);
    let card = p.secondary.mix(Rgb::WHITE, 0.88);
    format!(
        "body {{ margin: 0; padding: 2rem; font-family: \"Nunito\", \"Trebuchet MS\", sans-serif; \
         background: {canvas}; color: {text}; }}\n\
         header, section, article, footer {{ background: {card}; border-radius: 18px; \
         padding: 2rem; margin: 0 auto 1.5rem; max-width: 880px; \
         box-shadow: 0 10px 30px {shadow}33; }}\n\
         h1, h2, h3 {{ color: {primary}; }}\n\
         a {{ color: {secondary}; }}\n\
         a:focus, button:focus {{ outline: 3px solid {accent}; outline-offset: 2px; }}\n\
         button, .button {{ background: {accent}; color: {on_accent}; border: 0; \
         border-radius: 999px; padding: 0.75rem 1.75rem; box-shadow: 0 4px 12px {accent}55; }}\n",
        canvas = canvas,
        text = canvas.readable_text(),
        card = card,
        shadow = p.primary,
        primary = p.primary,
        secondary = p.secondary.darken(0.1),
        accent = p.accent,
        on_accent = p.accent.readable_text(),
    )
}

fn midnight(p: &Palette) -> String {
    let canvas = p.primary.darken(0.7);
    let surface = p.primary.darken(0.5);
    let text = if canvas.contrast_ratio(p.background) >= 4.5 {
        p.background
    } else {
        canvas.readable_text()
    };
    format!(
        "body {{ margin: 0; padding: 2.5rem; font-family: \"IBM Plex Sans\", system-ui, sans-serif; \
         background: {canvas}; color: {text}; }}\n\
         header, section, footer {{ background: {surface}; border: 1px solid {border}; \
         border-radius: 8px; padding: 1.75rem; margin-bottom: 1.5rem; }}\n\
         h1, h2, h3 {{ color: {heading}; }}\n\
         a {{ color: {accent}; text-shadow: 0 0 8px {accent}66; }}\n\
         mark, .highlight {{ background: {accent}; color: {on_accent}; }}\n\
         button, .button {{ background: transparent; color: {accent}; border: 1px solid {accent}; \
         padding: 0.7rem 1.5rem; border-radius: 6px; }}\n",
        canvas = canvas,
        text = text,
        surface = surface,
        border = p.secondary.darken(0.3),
        heading = p.secondary.lighten(0.45),
        accent = p.accent,
        on_accent = p.accent.readable_text(),
    )
}

fn brutalist(p: &Palette) -> String {
    format!(
        "body {{ margin: 0; padding: 2rem; font-family: \"JetBrains Mono\", \"Courier New\", monospace; \
         background: {bg}; color: {ink}; }}\n\
         header, section, footer {{ border: 4px solid {ink}; padding: 1.5rem; margin-bottom: 2rem; \
         box-shadow: 8px 8px 0 {primary}; background: {bg}; }}\n\
         h1 {{ font-size: 4rem; text-transform: uppercase; margin: 0; background: {accent}; \
         color: {on_accent}; display: inline-block; padding: 0 0.5rem; }}\n\
         h2, h3 {{ text-decoration: underline; text-decoration-thickness: 4px; \
         text-decoration-color: {secondary}; }}\n\
         a {{ color: {ink}; background: {accent}; padding: 0 0.2rem; }}\n\
         button, .button {{ background: {primary}; color: {on_primary}; border: 4px solid {ink}; \
         border-radius: 0; padding: 0.8rem 1.6rem; box-shadow: 4px 4px 0 {ink}; }}\n",
        bg = p.background,
        ink = Rgb::BLACK,
        primary = p.primary,
        on_primary = p.primary.readable_text(),
        secondary = p.secondary,
        accent = p.accent,
        on_accent = p.accent.readable_text(),
    )
}

fn gradient(p: &Palette) -> String {
    let start = p.primary;
    let end = p.secondary;
    format!(
        "body {{ margin: 0; font-family: \"Poppins\", \"Helvetica Neue\", sans-serif; \
         background: {bg}; color: {text}; }}\n\
         header {{ background: linear-gradient(135deg, {start} 0%, {end} 100%); color: {on_start}; \
         padding: 5rem 2rem; text-align: center; }}\n\
         header h1 {{ font-size: 3.25rem; margin: 0 0 1rem; }}\n\
         section {{ max-width: 900px; margin: -2rem auto 2rem; padding: 2rem; border-radius: 14px; \
         background: {glass}cc; backdrop-filter: blur(8px); position: relative; }}\n\
         a {{ color: {link}; }}\n\
         button, .button {{ background: {accent}; color: {on_accent}; border: 0; border-radius: 10px; \
         padding: 0.8rem 1.8rem; }}\n\
         button:hover, .button:hover {{ background: linear-gradient(90deg, {accent}, {accent_soft}); }}\n",
        bg = p.background,
        text = p.background.readable_text(),
        start = start,
        end = end,
        on_start = start.mix(end, 0.5).readable_text(),
        glass = p.background.lighten(0.6),
        link = p.secondary.darken(0.2),
        accent = p.accent,
        accent_soft = p.accent.lighten(0.35),
        on_accent = p.accent.readable_text(),
    )
}
