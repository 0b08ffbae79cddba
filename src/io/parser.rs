// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Text parsers for point files and the OBJ subset
//!
//! Point files hold one `x y z` triple per line. OBJ input is read for `v`
//! (three floats) and `f` (three 1-based vertex indices) records only; every
//! other record is ignored. Bad lines are skipped and reported as
//! [`Diagnostic`]s instead of failing the whole load. Lines are decoded
//! lossily, so bytes that are not UTF-8 only spoil the tokens they sit in.

use crate::geometry::{Point, Triangle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;

/// What was wrong with a skipped input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Point-file line without three parsable floats
    MalformedPoint,
    /// `v` record without three parsable floats
    MalformedVertex,
    /// `f` record with fewer than three indices, a non-integer index, or a
    /// reference to a malformed vertex
    MalformedFace,
    /// `f` record index outside `1..=vertex_count`
    IndexOutOfRange,
}

/// A skipped line, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Parsed items plus the diagnostics for every line that was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> LoadReport<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Parse a whitespace-delimited point file
pub fn parse_points<R: BufRead>(reader: R) -> std::io::Result<LoadReport<Point>> {
    let mut report = LoadReport::default();

    for (index, line) in raw_lines(reader).enumerate() {
        let line = line?;
        let line_no = index + 1;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let mut tokens = content.split_whitespace();
        match parse_triple(&mut tokens) {
            Some(point) => report.items.push(point),
            None => report.diagnostics.push(Diagnostic::new(
                line_no,
                DiagnosticKind::MalformedPoint,
                format!("expected three coordinates, found {:?}", content),
            )),
        }
    }

    Ok(report)
}

/// Parse the `v`/`f` subset of Wavefront OBJ into a triangle soup
pub fn parse_obj<R: BufRead>(reader: R) -> std::io::Result<LoadReport<Triangle>> {
    let mut report = LoadReport::default();
    // Malformed vertices keep their slot so later indices stay aligned
    let mut vertices: Vec<Option<Point>> = Vec::new();

    for (index, line) in raw_lines(reader).enumerate() {
        let line = line?;
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let vertex = parse_triple(&mut tokens);
                if vertex.is_none() {
                    report.diagnostics.push(Diagnostic::new(
                        line_no,
                        DiagnosticKind::MalformedVertex,
                        format!("vertex {} has fewer than three coordinates", vertices.len() + 1),
                    ));
                }
                vertices.push(vertex);
            }
            Some("f") => match parse_face(tokens, &vertices) {
                Ok(triangle) => report.items.push(triangle),
                Err((kind, message)) => report
                    .diagnostics
                    .push(Diagnostic::new(line_no, kind, message)),
            },
            _ => {}
        }
    }

    Ok(report)
}

/// Lines split on `\n` with a trailing `\r` dropped, decoded lossily
fn raw_lines<R: BufRead>(reader: R) -> RawLines<R> {
    RawLines {
        reader,
        buf: Vec::new(),
    }
}

struct RawLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for RawLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn parse_triple<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<Point> {
    let x = tokens.next()?.parse::<f32>().ok()?;
    let y = tokens.next()?.parse::<f32>().ok()?;
    let z = tokens.next()?.parse::<f32>().ok()?;
    Some(Point::new(x, y, z))
}

fn parse_face<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    vertices: &[Option<Point>],
) -> Result<Triangle, (DiagnosticKind, String)> {
    let mut corners = [Point::default(); 3];

    for corner in &mut corners {
        let token = tokens.next().ok_or_else(|| {
            (
                DiagnosticKind::MalformedFace,
                "face has fewer than three vertex indices".to_string(),
            )
        })?;

        // `v/vt/vn` references use the leading vertex index
        let raw = token.split('/').next().unwrap_or(token);
        let index: i64 = raw.parse().map_err(|_| {
            (
                DiagnosticKind::MalformedFace,
                format!("invalid vertex index {:?}", token),
            )
        })?;

        if index < 1 || index as usize > vertices.len() {
            return Err((
                DiagnosticKind::IndexOutOfRange,
                format!(
                    "vertex index {} out of range (1..={})",
                    index,
                    vertices.len()
                ),
            ));
        }

        *corner = vertices[index as usize - 1].ok_or_else(|| {
            (
                DiagnosticKind::MalformedFace,
                format!("face references malformed vertex {}", index),
            )
        })?;
    }

    Ok(Triangle::new(corners[0], corners[1], corners[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() -> std::io::Result<()> {
        let text = "0 0 0\n1.5 -2 3e-1\n\n# comment\n  4 5 6  \n";
        let report = parse_points(text.as_bytes())?;

        assert!(report.is_clean());
        assert_eq!(
            report.items,
            vec![
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.5, -2.0, 0.3),
                Point::new(4.0, 5.0, 6.0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_point_lines_are_reported() -> std::io::Result<()> {
        let text = "1 2 3\n1 2\nx y z\n7 8 9 10\n";
        let report = parse_points(text.as_bytes())?;

        assert_eq!(report.len(), 2);
        assert_eq!(report.items[1], Point::new(7.0, 8.0, 9.0));
        assert_eq!(report.count(DiagnosticKind::MalformedPoint), 2);
        assert_eq!(report.diagnostics[0].line, 2);
        assert_eq!(report.diagnostics[1].line, 3);
        Ok(())
    }

    #[test]
    fn test_parse_obj_triangles() -> std::io::Result<()> {
        let text = "\
# tetrahedron
o tet
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
vn 0 0 1
f 1 3 2
f 1 2 4
f 1/1/1 4/2/1 3/3/1
f 2 3 4
";
        let report = parse_obj(text.as_bytes())?;

        assert!(report.is_clean());
        assert_eq!(report.len(), 4);
        assert_eq!(report.items[0].v2, Point::new(0.0, 1.0, 0.0));
        assert_eq!(report.items[2].v2, Point::new(0.0, 0.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_out_of_range_faces_are_skipped() -> std::io::Result<()> {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\nf 0 1 2\nf -1 2 3\nf 1 2 3\n";
        let report = parse_obj(text.as_bytes())?;

        assert_eq!(report.len(), 1);
        assert_eq!(report.count(DiagnosticKind::IndexOutOfRange), 3);
        assert_eq!(report.diagnostics[0].line, 4);
        Ok(())
    }

    #[test]
    fn test_face_before_its_vertices_is_out_of_range() -> std::io::Result<()> {
        let text = "v 0 0 0\nf 1 2 3\nv 1 0 0\nv 0 1 0\n";
        let report = parse_obj(text.as_bytes())?;

        assert!(report.is_empty());
        assert_eq!(report.count(DiagnosticKind::IndexOutOfRange), 1);
        Ok(())
    }

    #[test]
    fn test_malformed_vertex_keeps_index_alignment() -> std::io::Result<()> {
        let text = "v 0 0 0\nv 1 oops 0\nv 1 0 0\nv 0 1 0\nf 1 3 4\nf 1 2 3\nf 1 2\n";
        let report = parse_obj(text.as_bytes())?;

        assert_eq!(report.len(), 1);
        assert_eq!(report.items[0].v2, Point::new(1.0, 0.0, 0.0));
        assert_eq!(report.count(DiagnosticKind::MalformedVertex), 1);
        assert_eq!(report.count(DiagnosticKind::MalformedFace), 2);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_point_line_is_skipped() -> std::io::Result<()> {
        let report = parse_points(&b"1 2 3\n\xff\xfe garbage\n4 5 6\r\n"[..])?;

        assert_eq!(
            report.items,
            vec![Point::new(1.0, 2.0, 3.0), Point::new(4.0, 5.0, 6.0)]
        );
        assert_eq!(report.count(DiagnosticKind::MalformedPoint), 1);
        assert_eq!(report.diagnostics[0].line, 2);
        Ok(())
    }

    #[test]
    fn test_latin1_obj_comment_is_ignored() -> std::io::Result<()> {
        let report = parse_obj(&b"# caf\xe9 mesh\nv 0 0 0\nv 1 0 0\nv 0 \xe91 0\nv 0 1 0\nf 1 2 4\nf 1 2 3\n"[..])?;

        assert_eq!(report.len(), 1);
        assert_eq!(report.items[0].v3, Point::new(0.0, 1.0, 0.0));
        assert_eq!(report.count(DiagnosticKind::MalformedVertex), 1);
        assert_eq!(report.count(DiagnosticKind::MalformedFace), 1);
        Ok(())
    }

    #[test]
    fn test_quad_uses_first_three_indices() -> std::io::Result<()> {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let report = parse_obj(text.as_bytes())?;

        assert_eq!(report.len(), 1);
        assert_eq!(report.items[0].v3, Point::new(1.0, 1.0, 0.0));
        Ok(())
    }
}
