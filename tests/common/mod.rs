//! Fixed-width source lines in the built-in NASR layout.

#![allow(dead_code)]

use std::path::Path;

pub fn fixed_width(fields: &[(usize, &str)]) -> String {
    let width = fields.iter().map(|(p, t)| p + t.len()).max().unwrap_or(0);
    let mut line = vec![b' '; width];
    for (p, t) in fields {
        line[*p..p + t.len()].copy_from_slice(t.as_bytes());
    }
    String::from_utf8(line).unwrap()
}

pub fn nav1(id: &str, ty: &str, name: &str, lat: &str, lon: &str) -> String {
    fixed_width(&[(0, "NAV1"), (4, id), (8, ty), (42, name), (371, lat), (396, lon)])
}

pub fn fix1(id: &str, state: &str, lat: &str, lon: &str) -> String {
    fixed_width(&[(0, "FIX1"), (4, id), (34, state), (66, lat), (80, lon)])
}

pub fn apt(id: &str, icao: &str, name: &str, lat: &str, lon: &str) -> String {
    fixed_width(&[
        (0, "APT"),
        (14, "AIRPORT"),
        (27, id),
        (133, name),
        (523, lat),
        (550, lon),
        (1210, icao),
    ])
}

/// Writes the three files, CRLF terminated like the published ones.
pub fn write_sources(dir: &Path, nav: &[String], fix: &[String], apt: &[String]) {
    for (name, lines) in &[("NAV.txt", nav), ("FIX.txt", fix), ("APT.txt", apt)] {
        let mut body = lines.join("\r\n");
        body.push_str("\r\n");
        std::fs::write(dir.join(name), body).unwrap();
    }
}
