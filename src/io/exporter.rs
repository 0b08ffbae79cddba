// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Result and visualization exporters

use crate::error::{ProbeError, Result};
use crate::geometry::{Point, Triangle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write one `x y z` line per point
pub fn write_points<W: Write>(writer: &mut W, points: &[Point]) -> std::io::Result<()> {
    for point in points {
        writeln!(writer, "{}", point)?;
    }
    Ok(())
}

/// Write inside points, outside points and the mesh as one OBJ file.
///
/// Points become bare vertices in the `InsidePoints` and `OutsidePoints`
/// groups. The `Triangles` group repeats each triangle's three vertices and
/// a face whose 1-based indices skip past every point vertex.
pub fn write_visualization<W: Write>(
    writer: &mut W,
    inside: &[Point],
    outside: &[Point],
    triangles: &[Triangle],
) -> std::io::Result<()> {
    writeln!(writer, "o InsidePoints")?;
    for point in inside {
        writeln!(writer, "v {}", point)?;
    }

    writeln!(writer, "o OutsidePoints")?;
    for point in outside {
        writeln!(writer, "v {}", point)?;
    }

    writeln!(writer, "o Triangles")?;
    let mut offset = inside.len() + outside.len();
    for triangle in triangles {
        writeln!(writer, "v {}", triangle.v1)?;
        writeln!(writer, "v {}", triangle.v2)?;
        writeln!(writer, "v {}", triangle.v3)?;
        writeln!(writer, "f {} {} {}", offset + 1, offset + 2, offset + 3)?;
        offset += 3;
    }

    Ok(())
}

/// Save points to a text file
pub fn save_points(path: impl AsRef<Path>, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    write_to(path, |writer| write_points(writer, points))?;
    log::info!("Saved {} points to {}", points.len(), path.display());
    Ok(())
}

/// Save the classification visualization OBJ
pub fn save_visualization(
    path: impl AsRef<Path>,
    inside: &[Point],
    outside: &[Point],
    triangles: &[Triangle],
) -> Result<()> {
    let path = path.as_ref();
    write_to(path, |writer| {
        write_visualization(writer, inside, outside, triangles)
    })?;
    log::info!("Saved visualization to {}", path.display());
    Ok(())
}

fn write_to<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| ProbeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    body(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| ProbeError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_points() -> std::io::Result<()> {
        let mut out = Vec::new();
        write_points(
            &mut out,
            &[Point::new(1.0, 2.5, -3.0), Point::new(0.1, 0.0, 1e-3)],
        )?;
        assert_eq!(String::from_utf8_lossy(&out), "1 2.5 -3\n0.1 0 0.001\n");
        Ok(())
    }

    #[test]
    fn test_visualization_face_offsets() -> std::io::Result<()> {
        let inside = [Point::new(0.0, 0.0, 0.0)];
        let outside = [Point::new(5.0, 0.0, 0.0), Point::new(6.0, 0.0, 0.0)];
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );

        let mut out = Vec::new();
        write_visualization(&mut out, &inside, &outside, &[tri, tri])?;
        let text = String::from_utf8_lossy(&out);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "o InsidePoints");
        assert_eq!(lines[1], "v 0 0 0");
        assert_eq!(lines[2], "o OutsidePoints");
        assert_eq!(lines[5], "o Triangles");
        assert_eq!(lines[9], "f 4 5 6");
        assert_eq!(lines[13], "f 7 8 9");
        assert_eq!(lines.len(), 14);
        Ok(())
    }
}
