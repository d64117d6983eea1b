//! Geometry for fitting a vector root into the zoomed box.

use crate::dom::Size;

#[cfg(test)]
#[path = "fit_test.rs"]
mod fit_test;

/// A parsed `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse `"min-x min-y width height"`, separated by whitespace and/or commas.
    ///
    /// Returns `None` unless there are exactly four finite numbers and the
    /// width and height are positive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .collect();
        let [min_x, min_y, width, height] = parts.as_slice() else {
            return None;
        };
        let view_box = Self {
            min_x: number(min_x)?,
            min_y: number(min_y)?,
            width: number(width)?,
            height: number(height)?,
        };
        (!view_box.size().is_empty()).then_some(view_box)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

fn number(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Uniform scale that fits `intrinsic` inside `available` without upscaling.
///
/// `min(available.w / intrinsic.w, available.h / intrinsic.h, 1.0)`, floored at 0.
#[must_use]
pub fn fit_scale(intrinsic: Size, available: Size) -> f64 {
    if intrinsic.is_empty() {
        return 1.0;
    }
    let scale = (available.width / intrinsic.width)
        .min(available.height / intrinsic.height)
        .min(1.0);
    scale.max(0.0)
}

/// Rendered size of `intrinsic` after [`fit_scale`].
#[must_use]
pub fn fitted_size(intrinsic: Size, available: Size) -> Size {
    let scale = fit_scale(intrinsic, available);
    Size::new(intrinsic.width * scale, intrinsic.height * scale)
}

/// Content box of the zoomed diagram: a fraction of the viewport, less padding.
#[must_use]
pub fn available_box(viewport: Size, fraction: f64, padding: f64) -> Size {
    Size::new(
        (viewport.width * fraction - 2.0 * padding).max(0.0),
        (viewport.height * fraction - 2.0 * padding).max(0.0),
    )
}
