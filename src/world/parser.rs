use crate::direction::Direction;
use crate::error::{InvasionError, Result};
use crate::world::world::World;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Why a `<direction>=<city>` token was dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No `=` in the token
    MissingSeparator,
    /// Nothing after the `=`
    EmptyCityName,
    /// Text before the `=` is not north, south, east or west
    UnknownDirection,
    /// The city already has a road in that direction
    DuplicateDirection,
}

/// A token the parser ignored
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedToken {
    /// 1-based line number
    pub line: usize,
    pub token: String,
    pub reason: SkipReason,
}

/// What happened while reading a map
#[derive(Clone, Debug, Default)]
pub struct ParseReport {
    pub lines: usize,
    pub skipped: Vec<SkippedToken>,
}

impl ParseReport {
    fn skip(&mut self, line: usize, token: &str, reason: SkipReason) {
        debug!(line, token, ?reason, "skipping map token");
        self.skipped.push(SkippedToken {
            line,
            token: token.to_string(),
            reason,
        });
    }
}

/// Parse a world from a file path
pub fn parse_world_file(path: impl AsRef<Path>) -> Result<(World, ParseReport)> {
    let path = path.as_ref();
    if fs::metadata(path)?.is_dir() {
        return Err(InvasionError::MapIsDirectory(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::with_capacity(64 * 1024, file);

    let mut world = World::new();
    let report = read_world_map(reader, &mut world)?;
    Ok((world, report))
}

/// Parse a world directly from an in-memory string
pub fn parse_world_from_str(src: &str) -> Result<(World, ParseReport)> {
    let mut world = World::new();
    let report = read_world_map(src.as_bytes(), &mut world)?;
    Ok((world, report))
}

/// Read map lines from `reader` into `world`.
///
/// Each line is `<city> [<direction>=<city>]*`. Malformed tokens and
/// directions the city already has towards another city are dropped and
/// listed in the report; a read error aborts the whole map. City names are
/// opaque bytes: invalid UTF-8 is decoded lossily instead of failing.
pub fn read_world_map<R: BufRead>(mut reader: R, world: &mut World) -> Result<ParseReport> {
    let mut report = ParseReport::default();
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        report.lines += 1;
        let line = String::from_utf8_lossy(&buf);
        parse_line(world, &line, report.lines, &mut report)?;
    }

    debug!(
        lines = report.lines,
        cities = world.city_count(),
        skipped = report.skipped.len(),
        "world map loaded"
    );
    Ok(report)
}

fn parse_line(
    world: &mut World,
    line: &str,
    line_no: usize,
    report: &mut ParseReport,
) -> Result<()> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(());
    };
    let origin = world.create_city(name);

    for kv in parts {
        let (direction, target) = match split_token(kv) {
            Ok(pair) => pair,
            Err(reason) => {
                report.skip(line_no, kv, reason);
                continue;
            }
        };

        // Restating an existing road is fine; pointing it elsewhere is not
        if let Some(existing) = world.city(origin).and_then(|city| city.neighbor(direction)) {
            if world.city_name(existing) != Some(target) {
                report.skip(line_no, kv, SkipReason::DuplicateDirection);
            }
            continue;
        }

        let target = world.create_city(target);
        world.add_connection(origin, target, direction)?;
    }
    Ok(())
}

/// Split `<direction>=<city>` on the first `=`
fn split_token(kv: &str) -> std::result::Result<(Direction, &str), SkipReason> {
    let (dir_s, dst_s) = kv.split_once('=').ok_or(SkipReason::MissingSeparator)?;
    if dst_s.is_empty() {
        return Err(SkipReason::EmptyCityName);
    }
    let direction = dir_s
        .parse::<Direction>()
        .map_err(|_| SkipReason::UnknownDirection)?;
    Ok((direction, dst_s))
}
