use std::f64::consts::PI;
use std::fmt::Write as _;

use crate::region::MultiPolygon;

/// Conic equal-area projection between two standard parallels, with a
/// spherical pre-rotation and a center pinned to the translate point.
/// The center is given in rotated coordinates, so it composes with the
/// raw conic rather than with the rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    rotate: Rotation,
    scale: f64,
    translate: (f64, f64),
    center_offset: (f64, f64),
}

impl ConicEqualArea {
    /// `center` is in rotated coordinates (applied to the raw conic,
    /// after the rotation), `rotate` is `[lambda, phi, gamma]` degrees,
    /// `parallels` the two standard parallels.
    pub fn new(
        center: [f64; 2],
        rotate: [f64; 3],
        parallels: [f64; 2],
        scale: f64,
        translate: (f64, f64),
    ) -> Self {
        let sy0 = parallels[0].to_radians().sin();
        let sy1 = parallels[1].to_radians().sin();
        let n = (sy0 + sy1) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            rotate: Rotation::new(rotate),
            scale,
            translate,
            center_offset: (0.0, 0.0),
        };
        projection.center_offset =
            projection.raw(center[0].to_radians(), center[1].to_radians());
        projection
    }

    /// The dashboard's Mexico view, sized to the SVG frame.
    pub fn mexico(width: f64, height: f64) -> Self {
        Self::new(
            [7.27, 21.58],
            [108.27, -2.97, 0.0],
            [20.41, 59.94],
            1200.0,
            (width / 2.0, height / 2.0),
        )
    }

    /// Project a lon/lat degree pair to screen pixels, y down.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (lambda, phi) = self.rotate.apply(lon.to_radians(), lat.to_radians());
        let (x, y) = self.raw(lambda, phi);
        (
            self.translate.0 + self.scale * (x - self.center_offset.0),
            self.translate.1 - self.scale * (y - self.center_offset.1),
        )
    }

    /// Raw Albers projection, math orientation (y up), unit sphere.
    fn raw(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let a = self.n * lambda;
        (r * a.sin(), self.r0 - r * a.cos())
    }
}

/// Spherical rotation by `[delta_lambda, delta_phi, delta_gamma]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rotation {
    delta_lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
    cos_gamma: f64,
    sin_gamma: f64,
}

impl Rotation {
    fn new(rotate: [f64; 3]) -> Self {
        let [dl, dp, dg] = rotate.map(f64::to_radians);
        Self {
            delta_lambda: dl,
            cos_phi: dp.cos(),
            sin_phi: dp.sin(),
            cos_gamma: dg.cos(),
            sin_gamma: dg.sin(),
        }
    }

    fn apply(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_longitude(lambda + self.delta_lambda);
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_phi + x * self.sin_phi;
        (
            (y * self.cos_gamma - k * self.sin_gamma)
                .atan2(x * self.cos_phi - z * self.sin_phi),
            (k * self.cos_gamma + y * self.sin_gamma)
                .clamp(-1.0, 1.0)
                .asin(),
        )
    }
}

fn wrap_longitude(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - 2.0 * PI
    } else if lambda < -PI {
        lambda + 2.0 * PI
    } else {
        lambda
    }
}

/// Sampling interval along graticule lines, degrees.
const GRATICULE_SAMPLE_STEP: f64 = 2.5;

/// Lon/lat polylines for a reference grid at `step` degree intervals
/// inside `[[min_lon, min_lat], [max_lon, max_lat]]`.
pub fn graticule(extent: [[f64; 2]; 2], step: f64) -> Vec<Vec<[f64; 2]>> {
    let [[min_lon, min_lat], [max_lon, max_lat]] = extent;
    let mut lines = Vec::new();

    let mut lon = (min_lon / step).ceil() * step;
    while lon <= max_lon + 1e-9 {
        let mut line = Vec::new();
        let mut lat = min_lat;
        while lat <= max_lat + 1e-9 {
            line.push([lon, lat]);
            lat += GRATICULE_SAMPLE_STEP;
        }
        lines.push(line);
        lon += step;
    }

    let mut lat = (min_lat / step).ceil() * step;
    while lat <= max_lat + 1e-9 {
        let mut line = Vec::new();
        let mut lon = min_lon;
        while lon <= max_lon + 1e-9 {
            line.push([lon, lat]);
            lon += GRATICULE_SAMPLE_STEP;
        }
        lines.push(line);
        lat += step;
    }

    lines
}

/// SVG path data for projected polygon rings, one closed subpath per ring.
pub fn polygon_path(polygons: &MultiPolygon, projection: &ConicEqualArea) -> String {
    let mut d = String::new();
    for polygon in polygons {
        for ring in polygon {
            for (i, point) in ring.iter().enumerate() {
                let (x, y) = projection.project(point[0], point[1]);
                let command = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{command}{x:.2},{y:.2}");
            }
            d.push('Z');
        }
    }
    d
}

/// SVG path data for one projected polyline, left open.
pub fn line_path(points: &[[f64; 2]], projection: &ConicEqualArea) -> String {
    let mut d = String::new();
    for (i, point) in points.iter().enumerate() {
        let (x, y) = projection.project(point[0], point[1]);
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{command}{x:.2},{y:.2}");
    }
    d
}
