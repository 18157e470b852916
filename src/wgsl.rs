//! WGSL `array<vec2f, N>` literals for pasting kernels into shaders.

use crate::point::Point2D;
use std::io::{self, Write};

pub fn write_array<W: Write>(out: &mut W, name: &str, points: &[Point2D]) -> io::Result<()> {
    out.write_all(to_string(name, points).as_bytes())
}

pub fn to_string(name: &str, points: &[Point2D]) -> String {
    let mut text = format!("const {} = array<vec2f, {}>(\n", name, points.len());
    for p in points {
        text.push_str(&format!("    vec2f({}, {}),\n", coordinate(p.x), coordinate(p.y)));
    }
    text.push_str(");\n");
    text
}

/// Four decimals, with a space standing in for the sign of non-negative values.
fn coordinate(value: f64) -> String {
    if value.is_sign_negative() {
        format!("{:.4}", value)
    } else {
        format!(" {:.4}", value)
    }
}
