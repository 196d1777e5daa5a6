//! Small battery glyphs for the notification area, one per icon category.
//!
//! Pixels are `0xAARRGGBB`, row-major from the top, which is the in-memory
//! layout of a 32bpp BGRA bitmap.

use crate::IconCategory;

pub const SIZE: usize = 16;

const TRANSPARENT: u32 = 0x0000_0000;
const OUTLINE: u32 = argb(255, 204, 204, 204);
const DIM_OUTLINE: u32 = argb(255, 110, 110, 110);
const RED: u32 = argb(255, 242, 27, 63);
const YELLOW: u32 = argb(255, 255, 198, 10);
const GREEN: u32 = argb(255, 43, 192, 22);
const BLUE: u32 = argb(255, 0, 153, 255);

// Battery body (inclusive bounds), terminal nub on the right.
const BODY_LEFT: usize = 1;
const BODY_RIGHT: usize = 12;
const BODY_TOP: usize = 4;
const BODY_BOTTOM: usize = 11;
const TERMINAL_LEFT: usize = 13;
const TERMINAL_RIGHT: usize = 14;
const TERMINAL_TOP: usize = 6;
const TERMINAL_BOTTOM: usize = 9;

const FILL_COLUMNS: usize = BODY_RIGHT - BODY_LEFT - 1;

const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

struct Style {
    outline: u32,
    fill: u32,
    /// Fraction of `FILL_COLUMNS` that is filled.
    level: f32,
    mark: Mark,
}

enum Mark {
    None,
    Dot,
    Slash(u32),
}

fn style(icon: IconCategory) -> Style {
    let plain = |outline, fill, level| Style {
        outline,
        fill,
        level,
        mark: Mark::None,
    };

    match icon {
        IconCategory::Full => plain(OUTLINE, GREEN, 1.0),
        IconCategory::Used => plain(OUTLINE, YELLOW, 0.6),
        IconCategory::Low => plain(OUTLINE, RED, 0.25),
        IconCategory::Empty => plain(RED, RED, 0.0),
        IconCategory::Charging => plain(OUTLINE, BLUE, 1.0),
        IconCategory::Unknown => Style {
            mark: Mark::Dot,
            ..plain(OUTLINE, OUTLINE, 0.0)
        },
        IconCategory::Disconnected => Style {
            mark: Mark::Slash(DIM_OUTLINE),
            ..plain(DIM_OUTLINE, DIM_OUTLINE, 0.0)
        },
        IconCategory::NoGamepadBattery => Style {
            mark: Mark::Slash(RED),
            ..plain(OUTLINE, OUTLINE, 0.0)
        },
    }
}

/// Renders the glyph for `icon` as `SIZE * SIZE` pixels.
pub fn render(icon: IconCategory) -> Vec<u32> {
    let style = style(icon);
    let mut pixels = vec![TRANSPARENT; SIZE * SIZE];
    let mut put = |x: usize, y: usize, color: u32| pixels[y * SIZE + x] = color;

    for y in BODY_TOP..=BODY_BOTTOM {
        for x in BODY_LEFT..=BODY_RIGHT {
            let on_edge = x == BODY_LEFT || x == BODY_RIGHT || y == BODY_TOP || y == BODY_BOTTOM;
            if on_edge {
                put(x, y, style.outline);
            }
        }
    }
    for y in TERMINAL_TOP..=TERMINAL_BOTTOM {
        for x in TERMINAL_LEFT..=TERMINAL_RIGHT {
            put(x, y, style.outline);
        }
    }

    let filled = (FILL_COLUMNS as f32 * style.level).round() as usize;
    for y in BODY_TOP + 1..BODY_BOTTOM {
        for x in BODY_LEFT + 1..BODY_LEFT + 1 + filled {
            put(x, y, style.fill);
        }
    }

    match style.mark {
        Mark::None => {}
        Mark::Dot => {
            for (x, y) in [(6, 7), (7, 7), (6, 8), (7, 8)] {
                put(x, y, style.outline);
            }
        }
        Mark::Slash(color) => {
            for x in 1..SIZE - 1 {
                put(x, SIZE - 1 - x, color);
            }
        }
    }

    pixels
}
