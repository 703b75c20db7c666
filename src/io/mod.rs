//! Reading and writing meshes and outlines.
//!
//! Data interop lives behind the `io` feature.
use crate::*;
use byteorder::*;
use std::io::{Cursor, Read, Write};

pub mod mesh;
pub mod polygon2;

fn to_dxf_point([x, y]: Point2) -> ::dxf::Point {
    ::dxf::Point { x, y, z: 0.0 }
}

fn from_dxf_point(p: &::dxf::Point) -> Point2 {
    [p.x, p.y]
}

fn load_drawing(dxf: &[u8]) -> Result<::dxf::Drawing> {
    ::dxf::Drawing::load(&mut Cursor::new(dxf)).map_err(|e| Error::Parse(format!("dxf: {}", e)))
}

fn save_drawing(mut drawing: ::dxf::Drawing) -> Result<Vec<u8>> {
    drawing.normalize();
    let mut buf = Vec::new();
    drawing
        .save(&mut buf)
        .map_err(|e| Error::Parse(format!("dxf: {}", e)))?;
    Ok(buf)
}
