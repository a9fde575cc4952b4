//! SVG path data parsing and arc-length sampling.
//!
//! Only the commands the flight path needs are understood: move, line
//! (including horizontal/vertical), cubic Bézier and close, each in absolute
//! and relative form. Parsed commands are flattened once into an arc-length
//! table so a progress value maps to a point at that fraction of the drawn
//! length, which is how stroke dash offsets measure the path too.

use crate::constants::ARC_SAMPLES_PER_SEGMENT;
use glam::DVec2;
use smallvec::SmallVec;

const DEGENERATE_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("path data is empty")]
    Empty,
    #[error("path data must start with a move-to, found {0:?}")]
    MissingMoveTo(char),
    #[error("unknown path command {command:?} at byte {offset}")]
    UnknownCommand { command: char, offset: usize },
    #[error("malformed number {text:?} at byte {offset}")]
    BadNumber { text: String, offset: usize },
    #[error("command {command:?} at byte {offset} is missing arguments")]
    MissingArguments { command: char, offset: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    CubicTo {
        control1: DVec2,
        control2: DVec2,
        end: DVec2,
    },
    Close,
}

/// Cubic Bézier segment in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    pub fn new(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Straight segment expressed as a cubic with controls at the thirds.
    pub fn line(from: DVec2, to: DVec2) -> Self {
        let d = (to - from) / 3.0;
        Self::new(from, from + d, to - d, to)
    }

    pub fn point(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        self.p0 * (mt * mt * mt)
            + self.p1 * (3.0 * mt * mt * t)
            + self.p2 * (3.0 * mt * t * t)
            + self.p3 * (t * t * t)
    }

    pub fn derivative(&self, t: f64) -> DVec2 {
        let mt = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * mt * mt)
            + (self.p2 - self.p1) * (6.0 * mt * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Unit direction of travel at `t`.
    ///
    /// Where the derivative vanishes (a control point coincides with an end
    /// point) the direction toward the nearest distinct control point is used.
    pub fn tangent(&self, t: f64) -> DVec2 {
        let d = self.derivative(t);
        if d.length_squared() > DEGENERATE_EPS {
            return d.normalize();
        }
        let fallback = if t < 0.5 {
            self.p2 - self.p0
        } else {
            self.p3 - self.p1
        };
        if fallback.length_squared() > DEGENERATE_EPS {
            return fallback.normalize();
        }
        (self.p3 - self.p0).normalize_or_zero()
    }

    fn is_point(&self) -> bool {
        [self.p1, self.p2, self.p3]
            .iter()
            .all(|p| p.distance_squared(self.p0) <= DEGENERATE_EPS)
    }
}

/// Point on a path plus the heading there, in degrees (y down, clockwise positive).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub point: DVec2,
    pub angle_deg: f64,
}

impl Pose {
    fn on(segment: &CubicBezier, t: f64) -> Self {
        let dir = segment.tangent(t);
        let angle_deg = if dir == DVec2::ZERO {
            0.0
        } else {
            dir.y.atan2(dir.x).to_degrees()
        };
        Self {
            point: segment.point(t),
            angle_deg,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ArcSample {
    length: f64,
    segment: usize,
    t: f64,
}

/// A parsed path with its arc-length table; immutable after construction.
#[derive(Clone, Debug)]
pub struct MotionPath {
    segments: Vec<CubicBezier>,
    samples: Vec<ArcSample>,
    start: DVec2,
}

impl MotionPath {
    pub fn parse(data: &str) -> Result<Self, PathError> {
        Ok(Self::from_commands(&parse_path_data(data)?))
    }

    /// Build from commands; zero-length segments are dropped.
    pub fn from_commands(commands: &[PathCommand]) -> Self {
        let mut segments = Vec::new();
        let mut cursor = DVec2::ZERO;
        let mut subpath_start = DVec2::ZERO;
        let mut start = None;
        for cmd in commands {
            let segment = match *cmd {
                PathCommand::MoveTo(p) => {
                    cursor = p;
                    subpath_start = p;
                    start.get_or_insert(p);
                    continue;
                }
                PathCommand::LineTo(p) => CubicBezier::line(cursor, p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => CubicBezier::new(cursor, control1, control2, end),
                PathCommand::Close => CubicBezier::line(cursor, subpath_start),
            };
            cursor = segment.p3;
            if !segment.is_point() {
                segments.push(segment);
            }
        }
        let samples = build_arc_table(&segments);
        Self {
            segments,
            samples,
            start: start.unwrap_or(DVec2::ZERO),
        }
    }

    pub fn segments(&self) -> &[CubicBezier] {
        &self.segments
    }

    /// Total drawn length (polyline approximation of each cubic).
    pub fn length(&self) -> f64 {
        self.samples.last().map(|s| s.length).unwrap_or(0.0)
    }

    pub fn start_pose(&self) -> Pose {
        match self.segments.first() {
            Some(seg) => Pose::on(seg, 0.0),
            None => Pose {
                point: self.start,
                angle_deg: 0.0,
            },
        }
    }

    pub fn end_pose(&self) -> Pose {
        match self.segments.last() {
            Some(seg) => Pose::on(seg, 1.0),
            None => self.start_pose(),
        }
    }

    /// Pose at `progress` (clamped to \[0, 1\]) of the total length.
    pub fn pose_at(&self, progress: f64) -> Pose {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        if progress <= 0.0 {
            return self.start_pose();
        }
        if progress >= 1.0 || self.segments.is_empty() {
            return self.end_pose();
        }
        let (segment, t) = self.locate(progress * self.length());
        Pose::on(&self.segments[segment], t)
    }

    /// Map a distance along the path to `(segment index, curve parameter)`.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let idx = self
            .samples
            .partition_point(|s| s.length < distance)
            .clamp(1, self.samples.len() - 1);
        let cur = self.samples[idx];
        let prev = self.samples[idx - 1];
        let t0 = if prev.segment == cur.segment { prev.t } else { 0.0 };
        let span = cur.length - prev.length;
        let frac = if span > 0.0 {
            ((distance - prev.length) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        (cur.segment, t0 + (cur.t - t0) * frac)
    }
}

fn build_arc_table(segments: &[CubicBezier]) -> Vec<ArcSample> {
    let mut samples = Vec::with_capacity(segments.len() * ARC_SAMPLES_PER_SEGMENT + 1);
    samples.push(ArcSample {
        length: 0.0,
        segment: 0,
        t: 0.0,
    });
    let mut total = 0.0;
    for (i, seg) in segments.iter().enumerate() {
        let mut prev = seg.p0;
        for k in 1..=ARC_SAMPLES_PER_SEGMENT {
            let t = k as f64 / ARC_SAMPLES_PER_SEGMENT as f64;
            let p = seg.point(t);
            total += p.distance(prev);
            prev = p;
            samples.push(ArcSample {
                length: total,
                segment: i,
                t,
            });
        }
    }
    samples
}

/// Parse SVG path data into absolute commands.
pub fn parse_path_data(data: &str) -> Result<SmallVec<[PathCommand; 32]>, PathError> {
    let mut lexer = Lexer::new(data);
    let mut out = SmallVec::new();
    let mut cursor = DVec2::ZERO;
    let mut subpath_start = DVec2::ZERO;

    lexer.skip_separators();
    if lexer.at_end() {
        return Err(PathError::Empty);
    }
    let (mut command, mut offset) = match lexer.command() {
        Some((c, at)) if c.eq_ignore_ascii_case(&'m') => (c, at),
        Some((c, _)) => return Err(PathError::MissingMoveTo(c)),
        None => return Err(PathError::MissingMoveTo(lexer.peek_char().unwrap_or(' '))),
    };

    loop {
        let relative = command.is_ascii_lowercase();
        let base = if relative { cursor } else { DVec2::ZERO };
        match command.to_ascii_lowercase() {
            'm' => {
                let p = base + lexer.pair(command, offset)?;
                out.push(PathCommand::MoveTo(p));
                cursor = p;
                subpath_start = p;
                // extra coordinate pairs after a move-to are implicit line-tos
                command = if relative { 'l' } else { 'L' };
            }
            'l' => {
                let p = base + lexer.pair(command, offset)?;
                out.push(PathCommand::LineTo(p));
                cursor = p;
            }
            'h' => {
                let x = lexer.number(command, offset)?;
                let p = DVec2::new(if relative { cursor.x + x } else { x }, cursor.y);
                out.push(PathCommand::LineTo(p));
                cursor = p;
            }
            'v' => {
                let y = lexer.number(command, offset)?;
                let p = DVec2::new(cursor.x, if relative { cursor.y + y } else { y });
                out.push(PathCommand::LineTo(p));
                cursor = p;
            }
            'c' => {
                let control1 = base + lexer.pair(command, offset)?;
                let control2 = base + lexer.pair(command, offset)?;
                let end = base + lexer.pair(command, offset)?;
                out.push(PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                });
                cursor = end;
            }
            'z' => {
                out.push(PathCommand::Close);
                cursor = subpath_start;
            }
            _ => {
                return Err(PathError::UnknownCommand { command, offset });
            }
        }

        lexer.skip_separators();
        if lexer.at_end() {
            break;
        }
        match lexer.command() {
            Some((c, at)) => {
                command = c;
                offset = at;
            }
            // bare numbers repeat the previous command; a close takes none
            None if command.eq_ignore_ascii_case(&'z') => {
                let at = lexer.pos;
                return Err(PathError::BadNumber {
                    text: lexer.rest().chars().take(8).collect(),
                    offset: at,
                });
            }
            None => {}
        }
    }
    Ok(out)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_separators(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        self.pos += rest.len() - trimmed.len();
    }

    /// Consume a command letter if one is next.
    fn command(&mut self) -> Option<(char, usize)> {
        self.skip_separators();
        let c = self.peek_char()?;
        if c.is_ascii_alphabetic() {
            let at = self.pos;
            self.pos += c.len_utf8();
            Some((c, at))
        } else {
            None
        }
    }

    fn number(&mut self, command: char, offset: usize) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = start;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let mut seen_dot = false;
        while end < bytes.len() {
            match bytes[end] {
                b'0'..=b'9' => end += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    end += 1;
                }
                b'e' | b'E' => {
                    end += 1;
                    if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
                        end += 1;
                    }
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                    break;
                }
                _ => break,
            }
        }
        let text = &self.src[start..end];
        if text.is_empty() {
            return match self.peek_char() {
                None => Err(PathError::MissingArguments { command, offset }),
                Some(c) if c.is_ascii_alphabetic() => {
                    Err(PathError::MissingArguments { command, offset })
                }
                Some(_) => Err(PathError::BadNumber {
                    text: self.rest().chars().take(8).collect(),
                    offset: start,
                }),
            };
        }
        let value = text.parse::<f64>().map_err(|_| PathError::BadNumber {
            text: text.to_string(),
            offset: start,
        })?;
        self.pos = end;
        Ok(value)
    }

    fn pair(&mut self, command: char, offset: usize) -> Result<DVec2, PathError> {
        let x = self.number(command, offset)?;
        let y = self.number(command, offset)?;
        Ok(DVec2::new(x, y))
    }
}
