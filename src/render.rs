//! Terminal renderer: half-block pixel buffer plus a tiny 3x5 bitmap font.
//!
//! Pure downstream consumer of [`Snapshot`]; nothing here feeds back into
//! the simulation. Logical field coordinates are scaled to whatever pixel
//! grid the terminal currently offers (one cell = two vertical pixels).

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::bird::Bird;
use crate::session::{Mode, Snapshot};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_BODY: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
const GOLD: Rgb = Rgb(245, 200, 66);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![SKY_TOP; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, SKY_TOP);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn dim(&mut self) {
        for c in &mut self.px {
            *c = Rgb(c.0 / 2, c.1 / 2, c.2 / 2);
        }
    }

    /// Flush to the terminal, two pixels per cell via the upper half block.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(
                            out,
                            style::SetBackgroundColor(CColor::Rgb {
                                r: top.0,
                                g: top.1,
                                b: top.2
                            })
                        )?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(
                            out,
                            style::SetForegroundColor(CColor::Rgb {
                                r: top.0,
                                g: top.1,
                                b: top.2
                            })
                        )?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(
                            out,
                            style::SetBackgroundColor(CColor::Rgb {
                                r: bot.0,
                                g: bot.1,
                                b: bot.2
                            })
                        )?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── 3x5 bitmap font ─────────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,1,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,0,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 0,1,1, 0,0,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,0,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[ch as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[ch as usize - 'a' as usize]),
        _ => None,
    }
}

fn draw_glyph(buf: &mut PixelBuf, x: i32, y: i32, g: &[u8; 15], fg: Rgb, shadow: bool) {
    for row in 0..5 {
        for col in 0..3 {
            if g[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                if shadow {
                    buf.set(px + 1, py + 1, SHADOW);
                }
                buf.set(px, py, fg);
            }
        }
    }
}

/// Draw `text` centered on `cx` (3px glyphs, 1px spacing, drop shadow).
fn draw_text(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    let total_w = text.chars().count() as i32 * 4 - 1;
    let start_x = cx - total_w / 2;
    for (i, ch) in text.chars().enumerate() {
        if let Some(g) = glyph(ch) {
            draw_glyph(buf, start_x + i as i32 * 4, y, g, fg, true);
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    draw_text(buf, cx, y, &n.to_string(), fg);
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Shell-side presentation state the simulation does not know about.
pub struct Hud {
    /// Free-running frame counter for idle animation (menu bob, wings
    /// while paused). Not the simulation tick.
    pub frame: u64,
    pub sound_enabled: bool,
}

/// Render one frame of the current snapshot into the pixel buffer.
pub fn draw(snap: &Snapshot<'_>, hud: &Hud, buf: &mut PixelBuf) {
    let view = View::new(snap, buf);

    view.sky(buf);
    view.hills(snap, buf);
    view.pipes(snap, buf);
    view.ground(snap, buf);
    view.bird(snap, hud, buf);

    match snap.mode {
        Mode::Menu => menu_screen(&view, buf),
        Mode::Playing => draw_number(buf, view.pw / 2, 4, snap.score, WHITE),
        Mode::Paused => {
            draw_number(buf, view.pw / 2, 4, snap.score, WHITE);
            buf.dim();
            draw_text(buf, view.pw / 2, view.ph / 2 - 3, "PAUSED", WHITE);
            draw_text(buf, view.pw / 2, view.ph / 2 + 5, "P RESUME", GOLD);
        }
        Mode::GameOver => game_over_screen(&view, snap, buf),
        Mode::Settings => settings_screen(&view, hud, buf),
        Mode::Leaderboard => leaderboard_screen(&view, snap, buf),
        Mode::Credits => credits_screen(&view, buf),
    }
}

/// Cached scaling from logical field units to the pixel grid.
struct View {
    pw: i32,
    ph: i32,
    kx: f64,
    ky: f64,
    ground_y: i32,
}

impl View {
    fn new(snap: &Snapshot<'_>, buf: &PixelBuf) -> Self {
        let cfg = snap.config;
        let kx = buf.w as f64 / cfg.field_w;
        let ky = buf.h as f64 / cfg.field_h;
        Self {
            pw: buf.w as i32,
            ph: buf.h as i32,
            kx,
            ky,
            ground_y: (cfg.sky_h() * ky) as i32,
        }
    }

    fn x(&self, v: f64) -> i32 {
        (v * self.kx) as i32
    }

    fn y(&self, v: f64) -> i32 {
        (v * self.ky) as i32
    }

    fn sky(&self, buf: &mut PixelBuf) {
        for y in 0..self.ground_y.max(1) {
            let t = (y * 256 / self.ground_y.max(1)) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in 0..self.pw {
                buf.set(x, y, c);
            }
        }
    }

    fn hills(&self, snap: &Snapshot<'_>, buf: &mut PixelBuf) {
        let scroll = snap.tick as f64 * snap.config.pipe_speed * self.kx;
        for x in 0..self.pw {
            let fx = (x as f64 + scroll * 0.3) * 0.05;
            let h = (fx.sin() * 4.0 + (fx * 2.1).sin() * 2.0).abs() + 2.0;
            for y in (self.ground_y - h as i32)..self.ground_y {
                buf.set(x, y, HILL_NEAR);
            }
        }
    }

    fn pipes(&self, snap: &Snapshot<'_>, buf: &mut PixelBuf) {
        let cfg = snap.config;
        let pw = self.x(cfg.pipe_w).max(2);
        let cap_h = 2;
        let cap_extra = 1;

        for pipe in snap.pipes {
            let px = self.x(pipe.x);
            let gap_top = self.y(pipe.gap_top);
            let gap_bot = self.y(pipe.gap_top + cfg.gap_h);

            for x in 0..pw {
                let c = pipe_shade(x, pw);
                for y in 0..(gap_top - cap_h) {
                    buf.set(px + x, y, c);
                }
                for y in (gap_bot + cap_h)..self.ground_y {
                    buf.set(px + x, y, c);
                }
            }
            // Caps overhang the body by a pixel on each side.
            for x in -cap_extra..(pw + cap_extra) {
                let c = pipe_shade(x + cap_extra, pw + cap_extra * 2);
                for y in (gap_top - cap_h)..gap_top {
                    buf.set(px + x, y, c);
                }
                for y in gap_bot..(gap_bot + cap_h) {
                    buf.set(px + x, y, c);
                }
                buf.set(px + x, gap_top - 1, CAP_DARK);
                buf.set(px + x, gap_bot, CAP_DARK);
            }
        }
    }

    fn ground(&self, snap: &Snapshot<'_>, buf: &mut PixelBuf) {
        let scroll = snap.tick as f64 * snap.config.pipe_speed * self.kx;
        for x in 0..self.pw {
            let alt = ((x as f64 + scroll) as i32 / 3) % 2 == 0;
            buf.set(x, self.ground_y, if alt { GRASS } else { GRASS_LIGHT });
            buf.set(x, self.ground_y + 1, GRASS);
        }
        for y in (self.ground_y + 2)..self.ph {
            for x in 0..self.pw {
                let stripe = ((x as f64 + scroll * 0.8) as i32 + (y - self.ground_y) * 2) % 12 < 6;
                buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
            }
        }
    }

    fn bird(&self, snap: &Snapshot<'_>, hud: &Hud, buf: &mut PixelBuf) {
        let b = snap.bird;
        let cx = self.x(b.x + b.width / 2.0);
        // On the menu the run has not started; bob the bird in place.
        let cy = if snap.mode == Mode::Menu {
            self.y(b.y + b.height / 2.0) + ((hud.frame as f64 * 0.08).sin() * 2.0) as i32
        } else {
            self.y(b.y + b.height / 2.0)
        };
        let bw = self.x(b.width / 2.0).max(2);
        let bh = self.y(b.height / 2.0).max(1);
        let tilt = (b.tilt(snap.config) * 2.0) as i32;

        buf.fill_rect(cx - bw, cy - bh, bw * 2 + 1, bh * 2, BIRD_BODY);
        buf.fill_rect(cx - bw + 1, cy - bh, bw * 2 - 2, 1, BIRD_HI);

        let anim = if snap.mode == Mode::Playing {
            Bird::sprite_frame(snap.tick)
        } else {
            Bird::sprite_frame(hud.frame)
        };
        let wing_y = cy + [-1, 0, 1][anim] + tilt;
        buf.fill_rect(cx - bw + 1, wing_y, bw, 1.max(bh / 2), BIRD_WING);

        let ex = cx + bw - 2;
        let ey = cy - bh + 1;
        buf.fill_rect(ex, ey, 2, 2, BIRD_EYE);
        buf.set(ex + 1, ey + 1, BIRD_PUPIL);

        buf.fill_rect(cx + bw, cy + tilt, 2, 1.max(bh / 2), BIRD_BEAK);
        buf.fill_rect(cx - bw - 1, cy + tilt, 1, 2, BIRD_WING);
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Screens ─────────────────────────────────────────────────────────────────

fn menu_screen(view: &View, buf: &mut PixelBuf) {
    let cx = view.pw / 2;
    let cy = view.ph / 4;
    draw_text(buf, cx, cy, "FLAPPY", GOLD);
    draw_text(buf, cx, cy + 10, "SPACE PLAY", WHITE);
    draw_text(buf, cx, cy + 17, "L LEADERBOARD", WHITE);
    draw_text(buf, cx, cy + 24, "S SETTINGS", WHITE);
    draw_text(buf, cx, cy + 31, "C CREDITS", WHITE);
    draw_text(buf, cx, cy + 38, "Q QUIT", WHITE);
}

fn game_over_screen(view: &View, snap: &Snapshot<'_>, buf: &mut PixelBuf) {
    buf.dim();
    let cx = view.pw / 2;
    let cy = view.ph / 2;
    let panel_w = 60.min(view.pw - 4);
    let panel_h = 30;
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;
    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
    buf.fill_rect(px, py, panel_w, panel_h, DIRT);

    draw_text(buf, cx, py + 3, "GAME OVER", WHITE);
    draw_text(buf, cx, py + 10, "SCORE", WHITE);
    draw_number(buf, cx, py + 16, snap.score, WHITE);
    draw_text(buf, cx, py + 23, "BEST", GOLD);
    draw_number(buf, cx, py + 29, snap.best, GOLD);
    draw_text(buf, cx, py + panel_h + 4, "SPACE RETRY  M MENU", WHITE);
}

fn settings_screen(view: &View, hud: &Hud, buf: &mut PixelBuf) {
    buf.dim();
    let cx = view.pw / 2;
    let cy = view.ph / 4;
    draw_text(buf, cx, cy, "SETTINGS", GOLD);
    let sound = if hud.sound_enabled {
        "SOUND ON"
    } else {
        "SOUND OFF"
    };
    draw_text(buf, cx, cy + 12, sound, WHITE);
    draw_text(buf, cx, cy + 22, "T TOGGLE", WHITE);
    draw_text(buf, cx, cy + 29, "ESC BACK", WHITE);
}

fn leaderboard_screen(view: &View, snap: &Snapshot<'_>, buf: &mut PixelBuf) {
    buf.dim();
    let cx = view.pw / 2;
    let cy = view.ph / 5;
    draw_text(buf, cx, cy, "TOP SCORES", GOLD);
    if snap.scoreboard.entries().is_empty() {
        draw_text(buf, cx, cy + 12, "NO RUNS YET", WHITE);
    }
    for (i, entry) in snap.scoreboard.entries().iter().enumerate() {
        let line = format!("{} {} {}", i + 1, entry.name, entry.score);
        draw_text(buf, cx, cy + 12 + i as i32 * 7, &line, WHITE);
    }
    draw_text(buf, cx, view.ph - 10, "ESC BACK", WHITE);
}

fn credits_screen(view: &View, buf: &mut PixelBuf) {
    buf.dim();
    let cx = view.pw / 2;
    let cy = view.ph / 4;
    draw_text(buf, cx, cy, "CREDITS", GOLD);
    draw_text(buf, cx, cy + 12, "A TERMINAL BIRD", WHITE);
    draw_text(buf, cx, cy + 19, "FLAPS IN PEACE", WHITE);
    draw_text(buf, cx, cy + 29, "ESC BACK", WHITE);
}
