use super::*;
use std::path::Path;

const MAGIC: &[u8; 4] = b"FMSH";
const VERSION: u32 = 1;

// meshes serialize as follows:
// **big endian encoding**
// 4 bytes -- b"FMSH"
// 4 bytes u32 -- format version
// 4 bytes u32 -- point count
// 4 bytes u32 -- face count
// 4 bytes u32 -- boundary edge count
// (8 bytes f64: x, 8 bytes f64: y)
// --> repeats for points
// (4 bytes u32: a, 4 bytes u32: b, 4 bytes u32: c)
// --> repeats for faces
// (4 bytes u32: from, 4 bytes u32: to)
// --> repeats for boundary edges
// **Note that indices are 0-based**
/// Serialize a mesh into the binary container.
///
/// Points, faces and boundary are written as is, so [`from_bytes`] gives back an equal mesh.
pub fn to_bytes(mesh: &Mesh) -> Vec<u8> {
    fn ser(mesh: &Mesh) -> Result<Vec<u8>> {
        let (points, faces, boundary) = mesh.get_info();
        let mut wtr = Vec::with_capacity(20 + points.len() * 16 + faces.len() * 12);

        wtr.write_all(MAGIC)?;
        wtr.write_u32::<BE>(VERSION)?;
        wtr.write_u32::<BE>(points.len() as u32)?;
        wtr.write_u32::<BE>(faces.len() as u32)?;
        wtr.write_u32::<BE>(boundary.len() as u32)?;

        for &[x, y] in points {
            wtr.write_f64::<BE>(x)?;
            wtr.write_f64::<BE>(y)?;
        }

        for &(a, b, c) in faces {
            wtr.write_u32::<BE>(a)?;
            wtr.write_u32::<BE>(b)?;
            wtr.write_u32::<BE>(c)?;
        }

        for &Edge(a, b) in boundary {
            wtr.write_u32::<BE>(a)?;
            wtr.write_u32::<BE>(b)?;
        }

        Ok(wtr)
    }

    ser(mesh).expect("serialization should not fail since writing to a memory buffer")
}

/// Deserialize a mesh from the binary container.
///
/// The mesh is validated as if built with [`Mesh::new`].
pub fn from_bytes(bytes: &[u8]) -> Result<Mesh> {
    let mut rdr = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    rdr.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(Error::Parse("expecting a FMSH header".into()));
    }

    let version = rdr.read_u32::<BE>()?;
    if version != VERSION {
        return Err(Error::Parse(format!("unsupported version {}", version)));
    }

    let pcount = rdr.read_u32::<BE>()? as usize;
    let fcount = rdr.read_u32::<BE>()? as usize;
    let bcount = rdr.read_u32::<BE>()? as usize;

    let expected = pcount * 16 + fcount * 12 + bcount * 8;
    let remaining = bytes.len() - rdr.position() as usize;
    if remaining != expected {
        return Err(Error::Parse(format!(
            "expecting {} bytes of mesh data, found {}",
            expected, remaining
        )));
    }

    let mut points = Vec::with_capacity(pcount);
    for _ in 0..pcount {
        let x = rdr.read_f64::<BE>()?;
        let y = rdr.read_f64::<BE>()?;
        points.push([x, y]);
    }

    let mut faces = Vec::with_capacity(fcount);
    for _ in 0..fcount {
        let a = rdr.read_u32::<BE>()?;
        let b = rdr.read_u32::<BE>()?;
        let c = rdr.read_u32::<BE>()?;
        faces.push((a, b, c));
    }

    let mut boundary = Vec::with_capacity(bcount);
    for _ in 0..bcount {
        let a = rdr.read_u32::<BE>()?;
        let b = rdr.read_u32::<BE>()?;
        boundary.push(Edge(a, b));
    }

    log::debug!(
        "read mesh with {} points, {} faces, {} boundary edges",
        pcount,
        fcount,
        bcount
    );

    Mesh::new(points, faces, boundary)
}

/// Write the binary container to a file.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    std::fs::write(path, to_bytes(mesh))?;
    Ok(())
}

/// Read the binary container from a file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    from_bytes(&std::fs::read(path)?)
}

/// Write the mesh in Wavefront OBJ format.
///
/// Each point is a vertex `v x y 0`, each face is `f i j k` with **1-based** indices. The
/// boundary is not written.
pub fn to_obj(mesh: &Mesh) -> String {
    use std::fmt::Write;

    let mut s = String::new();
    for [x, y] in mesh.points() {
        writeln!(&mut s, "v {} {} 0", x, y).ok();
    }
    for (a, b, c) in mesh.faces() {
        writeln!(&mut s, "f {} {} {}", a + 1, b + 1, c + 1).ok();
    }
    s
}

pub fn save_to_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    std::fs::write(path, to_obj(mesh))?;
    Ok(())
}

/// Read a mesh from Wavefront OBJ text.
///
/// Only `v` and triangular `f` statements are used; the z coordinate and any texture or normal
/// indices are dropped. Other statements are skipped. The boundary is recovered from the faces.
pub fn from_obj(obj: &str) -> Result<Mesh> {
    use nom::{
        bytes::complete::{tag, take_till},
        character::complete::{char, space0, u32 as uint},
        combinator::{all_consuming, map, opt, verify},
        number::complete::double,
        sequence::{preceded, terminated, tuple},
        IResult, Parser,
    };

    fn ws<'a, G, O>(g: G) -> impl FnMut(&'a str) -> IResult<&'a str, O, ()>
    where
        G: Parser<&'a str, O, ()>,
    {
        preceded(space0, g)
    }

    fn vertex(i: &str) -> IResult<&str, Point2, ()> {
        map(
            preceded(tag("v"), tuple((ws(double), ws(double), opt(ws(double))))),
            |(x, y, _)| [x, y],
        )(i)
    }

    // `i`, `i/t`, `i//n` or `i/t/n`, 1-based
    fn index(i: &str) -> IResult<&str, u32, ()> {
        map(
            terminated(
                ws(verify(uint, |x: &u32| *x > 0)),
                opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
            ),
            |x| x - 1,
        )(i)
    }

    fn face(i: &str) -> IResult<&str, Face, ()> {
        preceded(tag("f"), tuple((index, index, index)))(i)
    }

    fn line<'a, O>(
        p: impl Parser<&'a str, O, ()>,
        s: &'a str,
        n: usize,
    ) -> Result<O> {
        all_consuming(terminated(p, space0))(s)
            .map(|(_, o)| o)
            .map_err(|_| Error::Parse(format!("obj line {}: '{}'", n + 1, s)))
    }

    let mut points = Vec::new();
    let mut faces = Vec::new();

    for (n, s) in obj.lines().enumerate() {
        let s = s.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        match s.split_whitespace().next() {
            Some("v") => points.push(line(vertex, s, n)?),
            Some("f") => faces.push(line(face, s, n)?),
            _ => log::debug!("skipping obj line {}", n + 1),
        }
    }

    Mesh::from_faces(points, faces)
}

/// Write the mesh as DXF `3DFACE` entities.
///
/// The fourth corner of each face repeats the first.
pub fn to_dxf(mesh: &Mesh) -> Result<Vec<u8>> {
    fn to_face_3d([a, b, c]: Tri) -> ::dxf::entities::Face3D {
        ::dxf::entities::Face3D {
            first_corner: to_dxf_point(a),
            second_corner: to_dxf_point(b),
            third_corner: to_dxf_point(c),
            fourth_corner: to_dxf_point(a),
            ..Default::default()
        }
    }

    let mut d = ::dxf::Drawing::new();

    let entities = mesh
        .tris()
        .map(to_face_3d)
        .map(::dxf::entities::EntityType::Face3D)
        .map(::dxf::entities::Entity::new);

    for entity in entities {
        d.add_entity(entity);
    }

    save_drawing(d)
}
