/// Logical drawing surface presented on the terminal.
///
/// World geometry is rasterized into a supersampled RGB pixel buffer through
/// a viewport transform, then each terminal cell shows two vertically stacked
/// samples of that buffer via `▀` (foreground = top half, background = bottom
/// half).  Shape inputs are world units; invalid geometry silently draws
/// nothing meaningful.

use std::f64::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Colors, Print, SetColors},
    QueueableCommand,
};

use crate::palette::Rgb;

/// Text overlays render as plain terminal characters in this color.
const TEXT_FILL: Rgb = Rgb::from_hex(0xf6f6f6);

struct TextOverlay {
    col: i32,
    row: i32,
    text: String,
}

pub struct Canvas {
    /// Presented size in terminal cells.
    width: u16,
    height: u16,
    /// Backing-store samples per cell, the terminal's device-pixel ratio.
    scale: f64,
    /// Backing store: `ceil(width*scale) × ceil(height*scale)` samples.
    px_w: usize,
    px_h: usize,
    pixels: Vec<Rgb>,
    background: Rgb,
    // World → pixel transform: px = x*sx + tx, py = y*sy + ty.
    sx: f64,
    sy: f64,
    tx: f64,
    ty: f64,
    texts: Vec<TextOverlay>,
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            width: 0,
            height: 0,
            scale: 1.0,
            px_w: 0,
            px_h: 0,
            pixels: Vec::new(),
            background: Rgb::new(0, 0, 0),
            sx: 1.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
            texts: Vec::new(),
        }
    }

    // ── Sizing & viewport ─────────────────────────────────────────────────────

    /// Resize the backing store to `ceil(width*scale) × ceil(height*scale)`
    /// samples while the presented size stays `width × height` cells.
    /// A call with unchanged arguments is a no-op.  Returns the cell aspect
    /// ratio `width / height`.
    pub fn resize(&mut self, width: u16, height: u16, scale: f64) -> f64 {
        if self.width != width || self.height != height || self.scale != scale {
            self.width = width;
            self.height = height;
            self.scale = scale;
            self.px_w = (f64::from(width) * scale).ceil() as usize;
            self.px_h = (f64::from(height) * scale).ceil() as usize;
            self.pixels = vec![self.background; self.px_w * self.px_h];
        }
        f64::from(width) / f64::from(height)
    }

    /// Map the logical rectangle `[x, x+w] × [y, y+h]` onto the full backing
    /// store, independent x/y scale factors.  Degenerate rectangles are
    /// ignored.
    pub fn set_viewport(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if w == 0.0 || h == 0.0 {
            return;
        }
        self.sx = self.px_w as f64 / w;
        self.sy = self.px_h as f64 / h;
        self.tx = -x * self.sx;
        self.ty = -y * self.sy;
    }

    /// Fill the whole buffer and drop pending text overlays.
    pub fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.pixels.fill(color);
        self.texts.clear();
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx + self.tx, y * self.sy + self.ty)
    }

    pub fn to_world(&self, px: f64, py: f64) -> (f64, f64) {
        ((px - self.tx) / self.sx, (py - self.ty) / self.sy)
    }

    /// Backing-store dimensions in samples.
    pub fn px_size(&self) -> (usize, usize) {
        (self.px_w, self.px_h)
    }

    /// Read one backing-store sample (test hook).
    pub fn pixel(&self, px: usize, py: usize) -> Option<Rgb> {
        if px < self.px_w && py < self.px_h {
            Some(self.pixels[py * self.px_w + px])
        } else {
            None
        }
    }

    // ── Shape primitives ──────────────────────────────────────────────────────

    /// Disc at `(x, y)`.  The stroke is a `border`-wide band centered on the
    /// rim; fill paints over its inner half, as a stroke-then-fill surface
    /// would show it.
    pub fn circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        border: f64,
    ) {
        if radius <= 0.0 {
            return;
        }
        let reach = radius + if stroke.is_some() { border * 0.5 } else { 0.0 };
        self.scan(x - reach, y - reach, x + reach, y + reach, |wx, wy| {
            let dx = wx - x;
            let dy = wy - y;
            let d = (dx * dx + dy * dy).sqrt();
            if fill.is_some() && d <= radius {
                fill
            } else if stroke.is_some() && (d - radius).abs() <= border * 0.5 {
                stroke
            } else {
                None
            }
        });
    }

    /// Rectangle with its center at `(x, y)`, rotated by `angle`.
    pub fn box_at(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        angle: f64,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        border: f64,
    ) {
        let hw = w * 0.5;
        let hh = h * 0.5;
        let pad = if stroke.is_some() { border * 0.5 } else { 0.0 };
        let (sin, cos) = angle.sin_cos();
        // Tight bounds for the axis-aligned case; the grid draws hundreds of
        // long thin unrotated boxes per frame.
        let (rx, ry) = if angle == 0.0 {
            (hw + pad, hh + pad)
        } else {
            let d = (hw * hw + hh * hh).sqrt() + pad;
            (d, d)
        };
        self.scan(x - rx, y - ry, x + rx, y + ry, |wx, wy| {
            let dx = wx - x;
            let dy = wy - y;
            // Rotate the sample into the box's frame.
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            let edge = (u.abs() - hw).max(v.abs() - hh);
            if fill.is_some() && edge <= 0.0 {
                fill
            } else if stroke.is_some() && edge.abs() <= border * 0.5 {
                stroke
            } else {
                None
            }
        });
    }

    /// Rectangle with its top-left corner at `(x, y)`, rotated by `angle`
    /// about that corner.
    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        angle: f64,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        border: f64,
    ) {
        let pad = if stroke.is_some() { border * 0.5 } else { 0.0 };
        let reach = (w * w + h * h).sqrt() + pad;
        let (sin, cos) = angle.sin_cos();
        self.scan(x - reach, y - reach, x + reach, y + reach, |wx, wy| {
            let dx = wx - x;
            let dy = wy - y;
            let u = dx * cos + dy * sin;
            let v = -dx * sin + dy * cos;
            let edge = (-u).max(u - w).max((-v).max(v - h));
            if fill.is_some() && edge <= 0.0 {
                fill
            } else if stroke.is_some() && edge.abs() <= border * 0.5 {
                stroke
            } else {
                None
            }
        });
    }

    /// Regular polygon of `sides` vertices on a circle of `size` around
    /// `(x, y)`, first vertex on the +x axis.
    pub fn polygon(
        &mut self,
        sides: u32,
        size: f64,
        x: f64,
        y: f64,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        border: f64,
    ) {
        if sides < 3 || size <= 0.0 {
            return;
        }
        let verts: Vec<(f64, f64)> = (0..sides)
            .map(|i| {
                let a = f64::from(i) * TAU / f64::from(sides);
                (x + size * a.cos(), y + size * a.sin())
            })
            .collect();
        let pad = if stroke.is_some() { border * 0.5 } else { 0.0 };
        let reach = size + pad;
        self.scan(x - reach, y - reach, x + reach, y + reach, |wx, wy| {
            let inside = fill.is_some() && point_in_polygon(wx, wy, &verts);
            if inside {
                fill
            } else if stroke.is_some() && edge_distance(wx, wy, &verts) <= border * 0.5 {
                stroke
            } else {
                None
            }
        });
    }

    /// Centered text overlay at `(x, y)` world units.  Drawn at cell
    /// resolution on present, above the pixel layer.
    pub fn text(&mut self, x: f64, y: f64, size: f64, text: &str) {
        if size <= 0.0 || text.is_empty() {
            return;
        }
        let (px, py) = self.to_pixel(x, y);
        let col = (px / self.scale).round() as i32 - text.chars().count() as i32 / 2;
        let row = (py / self.scale).round() as i32;
        self.texts.push(TextOverlay { col, row, text: text.to_string() });
    }

    // ── Presentation ──────────────────────────────────────────────────────────

    /// Write the whole surface to the terminal: every cell is repainted each
    /// frame, so no clear is needed (and none is issued — clearing first
    /// would flicker).
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.height {
            out.queue(cursor::MoveTo(0, row))?;
            let mut last: Option<(Rgb, Rgb)> = None;
            for col in 0..self.width {
                let cell = (self.cell_half(col, row, false), self.cell_half(col, row, true));
                if last != Some(cell) {
                    out.queue(SetColors(Colors::new(cell.0.into(), cell.1.into())))?;
                    last = Some(cell);
                }
                out.queue(Print('▀'))?;
            }
        }

        for t in &self.texts {
            if t.row < 0 || t.row >= i32::from(self.height) || t.col >= i32::from(self.width) {
                continue;
            }
            // Clip characters hanging off the left edge.
            let skip = (-t.col).max(0) as usize;
            let col = t.col.max(0) as u16;
            let visible: String = t
                .text
                .chars()
                .skip(skip)
                .take(usize::from(self.width.saturating_sub(col)))
                .collect();
            if visible.is_empty() {
                continue;
            }
            out.queue(cursor::MoveTo(col, t.row as u16))?;
            out.queue(style::SetForegroundColor(TEXT_FILL.into()))?;
            out.queue(Print(visible))?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Rasterize over the pixel rows covered by a world-space bounding box,
    /// sampling `shade` at each pixel center.
    fn scan(
        &mut self,
        wx0: f64,
        wy0: f64,
        wx1: f64,
        wy1: f64,
        shade: impl Fn(f64, f64) -> Option<Rgb>,
    ) {
        if self.px_w == 0 || self.px_h == 0 {
            return;
        }
        let (ax, ay) = self.to_pixel(wx0, wy0);
        let (bx, by) = self.to_pixel(wx1, wy1);
        let x0 = ax.min(bx).floor().max(0.0) as usize;
        let y0 = ay.min(by).floor().max(0.0) as usize;
        let x1 = (ax.max(bx).ceil() as usize).min(self.px_w);
        let y1 = (ay.max(by).ceil() as usize).min(self.px_h);
        for py in y0..y1 {
            for px in x0..x1 {
                let (wx, wy) = self.to_world(px as f64 + 0.5, py as f64 + 0.5);
                if let Some(color) = shade(wx, wy) {
                    self.pixels[py * self.px_w + px] = color;
                }
            }
        }
    }

    /// Average the samples in the top or bottom half of one cell.
    fn cell_half(&self, col: u16, row: u16, bottom: bool) -> Rgb {
        let x0 = (f64::from(col) * self.scale).floor() as usize;
        let x1 = ((f64::from(col) + 1.0) * self.scale).floor().max(x0 as f64 + 1.0) as usize;
        let top = (f64::from(row) * self.scale).floor() as usize;
        let mid = ((f64::from(row) + 0.5) * self.scale).floor() as usize;
        let bot = ((f64::from(row) + 1.0) * self.scale).floor().max(top as f64 + 1.0) as usize;
        // At scale 1 a cell holds a single sample row; both halves share it.
        let (y0, y1) = if mid <= top || mid >= bot {
            (top, bot)
        } else if bottom {
            (mid, bot)
        } else {
            (top, mid)
        };

        let (x1, y1) = (x1.min(self.px_w), y1.min(self.px_h));
        let (x0, y0) = (x0.min(x1), y0.min(y1));
        let mut sum = (0u32, 0u32, 0u32);
        let mut count = 0u32;
        for py in y0..y1 {
            for px in x0..x1 {
                let c = self.pixels[py * self.px_w + px];
                sum.0 += u32::from(c.r);
                sum.1 += u32::from(c.g);
                sum.2 += u32::from(c.b);
                count += 1;
            }
        }
        if count == 0 {
            return self.background;
        }
        Rgb::new(
            (sum.0 / count) as u8,
            (sum.1 / count) as u8,
            (sum.2 / count) as u8,
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

/// Even-odd ray cast.
fn point_in_polygon(x: f64, y: f64, verts: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = verts.len() - 1;
    for i in 0..verts.len() {
        let (xi, yi) = verts[i];
        let (xj, yj) = verts[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from a point to the nearest polygon edge.
fn edge_distance(x: f64, y: f64, verts: &[(f64, f64)]) -> f64 {
    let mut best = f64::INFINITY;
    let mut j = verts.len() - 1;
    for i in 0..verts.len() {
        let (x0, y0) = verts[j];
        let (x1, y1) = verts[i];
        let ex = x1 - x0;
        let ey = y1 - y0;
        let len2 = ex * ex + ey * ey;
        let t = if len2 == 0.0 {
            0.0
        } else {
            (((x - x0) * ex + (y - y0) * ey) / len2).clamp(0.0, 1.0)
        };
        let dx = x - (x0 + t * ex);
        let dy = y - (y0 + t * ey);
        best = best.min((dx * dx + dy * dy).sqrt());
        j = i;
    }
    best
}
