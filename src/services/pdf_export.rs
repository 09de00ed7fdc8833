//! Single-page PDF job reports.
//!
//! Writes a minimal PDF 1.4 document by hand: one US-Letter page using the
//! standard Helvetica fonts, so no font embedding is needed. Text outside
//! Latin-1 is replaced with `?`.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{JobRecord, format_minutes};

/// US Letter in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

const TITLE: &str = "Field Tools - Job Report";
const TITLE_SIZE: f32 = 16.0;
const TITLE_ADVANCE: f32 = 24.0;
const BODY_SIZE: f32 = 11.0;
const BODY_ADVANCE: f32 = 18.0;

/// `Label: value` lines printed under the title.
pub fn report_lines(job: &JobRecord) -> Vec<String> {
    vec![
        format!("Job ID: {}", job.id),
        format!("Tech: {}", job.tech_name),
        format!("Address: {}", job.address),
        format!("Issue: {}", job.issue),
        format!("Resolution: {}", job.resolution),
        format!("Signal: {}", job.signal),
        format!("Start Time: {}", job.start_time),
        format!("End Time: {}", job.end_time),
        format!("Duration (min): {}", format_minutes(job.duration_minutes)),
    ]
}

/// Suggested file name for a job's report.
pub fn default_file_name(job: &JobRecord) -> String {
    let id: String = job
        .id
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let id = if id.is_empty() { "report".to_string() } else { id };
    format!("job_{}_report.pdf", id)
}

/// Render the report for one job as PDF bytes.
pub fn render_job_pdf(job: &JobRecord) -> Vec<u8> {
    let content = page_content(job);

    let objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT
        )
        .into_bytes(),
        font_object("Helvetica"),
        font_object("Helvetica-Bold"),
        stream_object(&content),
    ];

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );

    out
}

/// Write the report for one job to `path`.
pub fn export_job_to_pdf(job: &JobRecord, path: &Path) -> AppResult<()> {
    let bytes = render_job_pdf(job);
    let mut file = std::fs::File::create(path)
        .map_err(|e| AppError::Export(format!("Cannot create {}: {}", path.display(), e)))?;
    file.write_all(&bytes)
        .map_err(|e| AppError::Export(format!("Cannot write {}: {}", path.display(), e)))?;

    info!("PDF report saved to {}", path.display());
    Ok(())
}

fn font_object(base_font: &str) -> Vec<u8> {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base_font
    )
    .into_bytes()
}

fn stream_object(content: &[u8]) -> Vec<u8> {
    let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(b"\nendstream");
    body
}

/// Text drawing operators for the page.
fn page_content(job: &JobRecord) -> Vec<u8> {
    let mut ops: Vec<u8> = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    draw_text(&mut ops, "F2", TITLE_SIZE, y, TITLE);
    y -= TITLE_ADVANCE;

    for line in report_lines(job) {
        draw_text(&mut ops, "F1", BODY_SIZE, y, &line);
        y -= BODY_ADVANCE;
    }

    ops
}

fn draw_text(ops: &mut Vec<u8>, font: &str, size: f32, y: f32, text: &str) {
    ops.extend_from_slice(format!("BT /{} {} Tf {} {} Td (", font, size, MARGIN, y).as_bytes());
    ops.extend_from_slice(&escape_pdf_text(text));
    ops.extend_from_slice(b") Tj ET\n");
}

/// Escape a string for a PDF literal, mapping it to single-byte Latin-1.
fn escape_pdf_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\n' | '\r' | '\t' => out.push(b' '),
            c if (c as u32) < 0x20 => {}
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}
