use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba};
use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use serde::Deserialize;
use thiserror::Error;

use crate::models::customization::Customization;
use crate::utils::color::{is_svg_safe_color, parse_color};

/// Edge length of the rendered symbol and of the PNG canvas
pub const TARGET_SIZE: u32 = 256;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("content is too long to fit in a QR code")]
    DataTooLong,
    #[error("QR code generation error: {0}")]
    Encode(QrError),
    #[error("unsupported color: {0}")]
    UnsupportedColor(String),
    #[error("PNG encoding error: {0}")]
    Png(#[from] image::ImageError),
}

impl From<QrError> for RenderError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::DataTooLong => RenderError::DataTooLong,
            other => RenderError::Encode(other),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "qrcode.svg",
            ExportFormat::Png => "qrcode.png",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }
}

/// A rendered file ready to be sent as a download
#[derive(Debug)]
pub struct Export {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

fn encode(payload: &str) -> Result<QrCode, RenderError> {
    Ok(QrCode::with_error_correction_level(
        payload.as_bytes(),
        EcLevel::H,
    )?)
}

/// Render the payload as SVG markup using the customization colors.
/// Colors outside the safe grammar are rejected, they end up unescaped in attributes.
pub fn render_svg(payload: &str, customization: &Customization) -> Result<String, RenderError> {
    for value in [&customization.primary_color, &customization.background_color] {
        if !is_svg_safe_color(value) {
            return Err(RenderError::UnsupportedColor(value.to_string()));
        }
    }
    let code = encode(payload)?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(TARGET_SIZE, TARGET_SIZE)
        .dark_color(svg::Color(&customization.primary_color))
        .light_color(svg::Color(&customization.background_color))
        .quiet_zone(true)
        .build())
}

/// Rasterize the payload onto a fixed 256x256 canvas and encode it as PNG.
pub fn render_png(payload: &str, customization: &Customization) -> Result<Vec<u8>, RenderError> {
    let dark = color(&customization.primary_color)?;
    let light = color(&customization.background_color)?;
    let code = encode(payload)?;

    let image = code
        .render::<Rgba<u8>>()
        .dark_color(dark)
        .light_color(light)
        .quiet_zone(true)
        .min_dimensions(TARGET_SIZE, TARGET_SIZE)
        .build();
    // Modules are whole pixels, so the symbol rarely lands on 256 exactly
    let canvas = imageops::resize(&image, TARGET_SIZE, TARGET_SIZE, FilterType::Nearest);

    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Produce the requested download, or `None` when there is nothing to export.
pub fn export(
    payload: &str,
    customization: &Customization,
    format: ExportFormat,
) -> Result<Option<Export>, RenderError> {
    if payload.is_empty() {
        return Ok(None);
    }

    let bytes = match format {
        ExportFormat::Svg => render_svg(payload, customization)?.into_bytes(),
        ExportFormat::Png => render_png(payload, customization)?,
    };

    Ok(Some(Export { format, bytes }))
}

fn color(value: &str) -> Result<Rgba<u8>, RenderError> {
    parse_color(value).ok_or_else(|| RenderError::UnsupportedColor(value.to_string()))
}
