/*
 *  trig.rs
 *
 *  Shards - analog watch face
 *	(c) 2020-26 Stuart Hunter
 *
 *	Dial geometry: angle/radius to screen points, hand quads, graduations
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
#![allow(clippy::excessive_precision)]
//! Pure-Rust f32 sine/cosine (no libm) plus the handful of dial helpers the
//! face needs. Angles handed to the dial helpers are whole degrees measured
//! clockwise from 12 o'clock, the way a watch reads.

use embedded_graphics::prelude::Point;

pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Half-width of each hand, in degrees either side of its base angle.
pub const SECOND_HAND_MARGIN_DEG: i32 = 2;
pub const MINUTE_HAND_MARGIN_DEG: i32 = 3;
pub const HOUR_HAND_MARGIN_DEG: i32 = 4;

/// A hand starts at its radius and runs out to this multiple of it.
pub const HAND_REACH: i32 = 3;

/// Graduation marks sit every 30 degrees around the dial.
pub const GRADUATION_STEP_DEG: i32 = 30;
pub const GRADUATION_COUNT: usize = 12;

/// Compute sin(x) for f32 without libm.
pub fn sinf(x: f32) -> f32 {
    // Reduce to r in [-pi/4, pi/4] and quadrant q in {0,1,2,3}
    let (r, q) = reduce_pi_over_2(x);
    let s = sin_poly(r);
    let c = cos_poly(r);

    match q & 3 {
        0 =>  s,
        1 =>  c,
        2 => -s,
        _ => -c,
    }
}

/// Compute cos(x) for f32 without libm.
pub fn cosf(x: f32) -> f32 {
    let (r, q) = reduce_pi_over_2(x);
    let s = sin_poly(r);
    let c = cos_poly(r);

    match q & 3 {
        0 =>  c,
        1 => -s,
        2 => -c,
        _ =>  s,
    }
}

/// Hour hand angle, 12-hour dial.
pub fn hour_angle(hours: u32) -> i32 {
    ((hours % 12) * 30) as i32
}

pub fn minute_angle(minutes: u32) -> i32 {
    (minutes * 6) as i32
}

pub fn second_angle(seconds: u32) -> i32 {
    (seconds * 6) as i32
}

/// Battery arc sweep in whole degrees, clamped to [0, 360).
pub fn battery_sweep_deg(percent: u8) -> i32 {
    (percent as i32 * 36 / 10).clamp(0, 359)
}

/// Offset from the dial center for `angle_deg` at `radius`.
/// Screen y grows downward, so 0 degrees points straight up.
pub fn polar_offset(angle_deg: i32, radius: i32) -> Point {
    let a = angle_deg as f32 * DEG_TO_RAD;
    let r = radius as f32;
    Point::new((sinf(a) * r).round() as i32, (-cosf(a) * r).round() as i32)
}

pub fn point_on_circle(center: Point, angle_deg: i32, radius: i32) -> Point {
    center + polar_offset(angle_deg, radius)
}

/// The four corners of a hand ("shard"): two rays at `angle -/+ margin`,
/// each running from `radius` out to `HAND_REACH * radius`.
///
/// Corners are returned in winding order so the quad can be split into
/// two triangles along the 0-2 diagonal.
pub fn hand_quad(center: Point, radius: i32, angle_deg: i32, margin_deg: i32) -> [Point; 4] {
    let lead = polar_offset(angle_deg - margin_deg, radius);
    let trail = polar_offset(angle_deg + margin_deg, radius);
    [
        center + lead,
        center + lead * HAND_REACH,
        center + trail * HAND_REACH,
        center + trail,
    ]
}

/// Endpoints of the radial graduation tick at `angle_deg`.
pub fn graduation_mark(center: Point, angle_deg: i32, inner: i32, outer: i32) -> (Point, Point) {
    (
        point_on_circle(center, angle_deg, inner),
        point_on_circle(center, angle_deg, outer),
    )
}

/// Angles of all twelve graduation marks, starting at 12 o'clock.
pub fn graduation_angles() -> impl Iterator<Item = i32> {
    (0..GRADUATION_COUNT as i32).map(|i| i * GRADUATION_STEP_DEG)
}

// ---------- Internals ----------

#[inline(always)]
fn reduce_pi_over_2(x: f32) -> (f32, i32) {
    // Cody–Waite style split of pi/2, fine for the small angles a dial uses
    const INV_PIO2: f32 = 0.63661977236758134308_f32; // 2/pi
    const PIO2_1:  f32 = 1.57079625129699707031_f32;
    const PIO2_2:  f32 = 7.54978941586159635335e-08_f32;

    let n = (x * INV_PIO2).round();
    let r = (x - n * PIO2_1) - n * PIO2_2;

    (r, n as i32)
}

#[inline(always)]
fn sin_poly(r: f32) -> f32 {
    // Cephes single-precision minimax for |r| <= pi/4
    const S1: f32 = -1.6666667163e-1;
    const S2: f32 =  8.3333337680e-3;
    const S3: f32 = -1.9841270114e-4;
    const S4: f32 =  2.7557314297e-6;
    const S5: f32 = -2.5050759689e-8;
    const S6: f32 =  1.5896910177e-10;

    let z = r * r;
    let p = (((((S6 * z + S5) * z + S4) * z + S3) * z + S2) * z + S1) * z;
    r + r * p
}

#[inline(always)]
fn cos_poly(r: f32) -> f32 {
    const C1: f32 =  4.1666667908e-2;
    const C2: f32 = -1.3888889225e-3;
    const C3: f32 =  2.4801587642e-5;
    const C4: f32 = -2.7557314297e-7;
    const C5: f32 =  2.0875723372e-9;
    const C6: f32 = -1.1359647598e-11;

    let z = r * r;
    let p = (((((C6 * z + C5) * z + C4) * z + C3) * z + C2) * z + C1) * z;
    1.0 + p
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity() {
        let xs = [-3.0_f32, -1.0, -0.5, 0.0, 0.5, 1.0, 3.0, 6.0];
        for &x in &xs {
            let (s, c) = (sinf(x), cosf(x));
            assert!(((s*s + c*c) - 1.0).abs() < 2e-6);
        }
        assert!((sinf(0.0)).abs() < 1e-7);
        assert!((cosf(0.0) - 1.0).abs() < 1e-7);
        assert!((sinf(core::f32::consts::FRAC_PI_2) - 1.0).abs() < 2e-6);
        assert!((cosf(core::f32::consts::PI) + 1.0).abs() < 2e-6);
    }

    #[test]
    fn hand_angles() {
        assert_eq!(hour_angle(3), 90);
        assert_eq!(hour_angle(15), 90);
        assert_eq!(hour_angle(12), 0);
        assert_eq!(minute_angle(45), 270);
        assert_eq!(second_angle(30), 180);
    }

    #[test]
    fn compass_points() {
        let c = Point::new(50, 50);
        assert_eq!(point_on_circle(c, 0, 10), Point::new(50, 40));
        assert_eq!(point_on_circle(c, 90, 10), Point::new(60, 50));
        assert_eq!(point_on_circle(c, 180, 10), Point::new(50, 60));
        assert_eq!(point_on_circle(c, 270, 10), Point::new(40, 50));
    }

    #[test]
    fn battery_sweep_is_clamped() {
        assert_eq!(battery_sweep_deg(0), 0);
        assert_eq!(battery_sweep_deg(50), 180);
        assert_eq!(battery_sweep_deg(100), 359);
        assert_eq!(battery_sweep_deg(250), 359);
    }

    #[test]
    fn hand_quad_straddles_angle() {
        let c = Point::new(72, 84);
        let q = hand_quad(c, 20, 90, MINUTE_HAND_MARGIN_DEG);
        // pointing at 3 o'clock: every corner lies right of center
        assert!(q.iter().all(|p| p.x > c.x));
        // lead ray above the axis, trail ray below
        assert!(q[0].y < c.y && q[3].y > c.y);
        // outer corners sit HAND_REACH times further out
        assert_eq!(q[1].x - c.x, (q[0].x - c.x) * HAND_REACH);
    }

    #[test]
    fn twelve_graduations() {
        let angles: Vec<i32> = graduation_angles().collect();
        assert_eq!(angles.len(), GRADUATION_COUNT);
        assert_eq!(angles[0], 0);
        assert_eq!(angles[11], 330);
    }
}
