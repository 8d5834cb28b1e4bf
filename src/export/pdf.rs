// src/export/pdf.rs

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

// A4 portrait, in points
const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;

const FONT_SIZE: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 14.0;

const CATALOG_ID: Ref = Ref::new(1);
const PAGES_ID: Ref = Ref::new(2);
const FONT_ID: Ref = Ref::new(3);
const FONT: Name<'static> = Name(b"F1");

/// Dashboard report document: a metrics + daily table section and an
/// optional bar chart page.
pub struct PdfManager {
    pdf: Pdf,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();
        pdf.type1_font(FONT_ID).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            page_refs: Vec::new(),
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Open a page with its title and page number drawn. Returns the content
    /// stream id with the content.
    fn new_page(&mut self, title: &str) -> (Ref, Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(PAGES_ID)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(FONT, FONT_ID);

        let mut content = Content::new();
        draw_text(&mut content, MARGIN, PAGE_H - MARGIN + 15.0, TITLE_FONT_SIZE, title);
        draw_text(
            &mut content,
            PAGE_W - MARGIN - 60.0,
            MARGIN - 35.0,
            FONT_SIZE,
            &format!("Page {}", self.page_refs.len()),
        );

        (content_id, content)
    }

    fn finish_page(&mut self, content_id: Ref, content: Content) {
        self.pdf.stream(content_id, &content.finish());
    }

    /// Multi-page table. `summary` lines are printed once, between the
    /// title and the table of the first page.
    pub fn write_table(
        &mut self,
        title: &str,
        summary: &[String],
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        let col_widths = col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut first = true;

        loop {
            let (content_id, mut content) = self.new_page(title);
            let mut y = PAGE_H - MARGIN - 30.0;

            if first {
                for line in summary {
                    draw_text(&mut content, MARGIN, y + 5.0, FONT_SIZE, line);
                    y -= ROW_H * 0.8;
                }
                y -= ROW_H * 0.5;
            }

            fill_band(&mut content, y, table_w, (0.85, 0.87, 0.90));
            draw_row(&mut content, y, &col_widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - ROW_H < MARGIN {
                    break;
                }
                if i % 2 == 0 {
                    fill_band(&mut content, y, table_w, (0.96, 0.96, 0.96));
                }
                draw_row(&mut content, y, &col_widths, row, FONT_SIZE);
                y -= ROW_H;
                consumed += 1;
            }

            self.finish_page(content_id, content);
            remaining = &remaining[consumed..];
            first = false;

            if remaining.is_empty() {
                break;
            }
        }
    }

    /// One page with a horizontal bar per day, scaled to the largest value.
    pub fn write_bar_chart(&mut self, title: &str, bars: &[(u32, f64)]) {
        let (content_id, mut content) = self.new_page(title);

        let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let label_w = 30.0;
        let value_w = 60.0;
        let track_w = PAGE_W - 2.0 * MARGIN - label_w - value_w;

        let usable = PAGE_H - 2.0 * MARGIN - 40.0;
        let bar_h = (usable / bars.len().max(1) as f32).min(ROW_H);
        let mut y = PAGE_H - MARGIN - 30.0;

        for (day, value) in bars {
            let w = if max > 0.0 {
                (value / max) as f32 * track_w
            } else {
                0.0
            };

            draw_text(&mut content, MARGIN, y + 3.0, FONT_SIZE, &format!("{day:>2}"));

            content.save_state();
            content.set_fill_rgb(0.18, 0.46, 0.71);
            content.rect(MARGIN + label_w, y + 2.0, w.max(0.0), bar_h - 4.0);
            content.fill_nonzero();
            content.restore_state();

            draw_text(
                &mut content,
                MARGIN + label_w + track_w + 6.0,
                y + 3.0,
                FONT_SIZE,
                &format!("{value:.1}"),
            );

            y -= bar_h;
        }

        self.finish_page(content_id, content);
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(CATALOG_ID).pages(PAGES_ID);
        self.pdf
            .pages(PAGES_ID)
            .count(self.page_refs.len() as i32)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
    content.begin_text();
    content.set_font(FONT, size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(text.as_bytes()));
    content.end_text();
}

/// Filled background behind one table row.
fn fill_band(content: &mut Content, y: f32, width: f32, (r, g, b): (f32, f32, f32)) {
    content.save_state();
    content.set_fill_rgb(r, g, b);
    content.rect(MARGIN, y, width, ROW_H);
    content.fill_nonzero();
    content.restore_state();
}

fn draw_row(content: &mut Content, y: f32, col_widths: &[f32], row: &[String], font_size: f32) {
    let mut x = MARGIN;

    for (text, w) in row.iter().zip(col_widths) {
        draw_text(content, x + 4.0, y + 5.0, font_size, text);

        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, *w, ROW_H);
        content.stroke();
        content.restore_state();

        x += w;
    }
}

/// Column widths from header and content, scaled down to fit the page.
fn col_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
    let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (cell.len() as f32 * 6.2).max(*w);
        }
    }

    let total: f32 = widths.iter().sum();
    let max = PAGE_W - 2.0 * MARGIN;
    if total > max {
        let scale = max / total;
        for w in &mut widths {
            *w *= scale;
        }
    }

    widths
}
