use super::*;

/// Read every `LWPOLYLINE` and `POLYLINE` in the DXF as a polygon.
///
/// Z values are dropped. Polylines with less than three distinct points are skipped.
pub fn from_dxf(dxf: &[u8]) -> Result<Vec<Polygon2>> {
    let dxf = load_drawing(dxf)?;

    // closed polylines sometimes repeat the first point
    fn map_points(mut ps: Vec<Point2>) -> Option<Polygon2> {
        if ps.len() > 1 && same_point(ps[0], ps[ps.len() - 1]) {
            ps.pop();
        }
        Polygon2::new(ps).ok()
    }

    Ok(dxf
        .entities()
        .into_iter()
        .filter_map(|e| match &e.specific {
            ::dxf::entities::EntityType::LwPolyline(p) => {
                map_points(p.vertices.iter().map(|v| [v.x, v.y]).collect())
            }
            ::dxf::entities::EntityType::Polyline(p) => {
                map_points(p.vertices().map(|v| from_dxf_point(&v.location)).collect())
            }
            _ => None,
        })
        .collect())
}

/// Read the first polyline in the DXF as the outline of a domain.
pub fn outline_from_dxf(dxf: &[u8]) -> Result<Polygon2> {
    from_dxf(dxf)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::Parse("DXF does not contain any polyline entities".into()))
}

/// Write the polygon as a closed `LWPOLYLINE`.
pub fn to_dxf(polygon: &Polygon2) -> Result<Vec<u8>> {
    let mut d = ::dxf::Drawing::new();

    let mut polyline = ::dxf::entities::LwPolyline::default();
    polyline.vertices = polygon
        .iter()
        .map(|[x, y]| ::dxf::LwPolylineVertex {
            x,
            y,
            ..Default::default()
        })
        .collect();
    polyline.set_is_closed(true);

    d.add_entity(::dxf::entities::Entity::new(
        ::dxf::entities::EntityType::LwPolyline(polyline),
    ));

    save_drawing(d)
}
