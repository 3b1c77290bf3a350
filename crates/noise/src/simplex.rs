//! 3D simplex noise on a fixed lattice.
//!
//! The permutation table is Ken Perlin's reference table, so the field is the
//! same on every run and every platform. There is no seed.

use crate::NoiseField;

/// Skew factor into simplex space: (sqrt(4) - 1) / 3.
const F3: f64 = 1.0 / 3.0;
/// Unskew factor back to input space: (1 - 1/sqrt(4)) / 3.
const G3: f64 = 1.0 / 6.0;
/// Squared radius of each corner's kernel. 0.5 keeps the kernel inside the
/// simplices that share the corner, so the sum stays C1 continuous.
const RADIUS_SQ: f64 = 0.5;
/// Brings the peak of the corner sum (about 0.0130) just under 1.0.
const SCALE: f64 = 76.0;

static PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Edge midpoints of a cube.
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// The seed-free simplex field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simplex;

impl NoiseField for Simplex {
    #[inline]
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        noise3(x, y, z)
    }
}

/// Cell coordinate wrapped onto the 256-entry table.
#[inline]
fn lattice(v: f64) -> i32 {
    (v as i64 & 255) as i32
}

#[inline]
fn perm(i: i32) -> i32 {
    PERM[(i & 255) as usize] as i32
}

/// Gradient index for a lattice corner.
#[inline]
fn gradient_index(i: i32, j: i32, k: i32) -> usize {
    (perm(i + perm(j + perm(k))) % 12) as usize
}

#[inline]
fn corner(gi: usize, x: f64, y: f64, z: f64) -> f64 {
    let t = RADIUS_SQ - x * x - y * y - z * z;
    if t > 0.0 {
        let t2 = t * t;
        let g = &GRAD3[gi];
        t2 * t2 * (g[0] * x + g[1] * y + g[2] * z)
    } else {
        0.0
    }
}

/// Sample the simplex field at `(x, y, z)`.
///
/// Output lies in roughly [-0.99, 0.99] and is exactly 0 on lattice vertices.
pub fn noise3(x: f64, y: f64, z: f64) -> f64 {
    // Skew the input to find the containing cube cell.
    let s = (x + y + z) * F3;
    let i = (x + s).floor();
    let j = (y + s).floor();
    let k = (z + s).floor();

    let t = (i + j + k) * G3;
    let x0 = x - (i - t);
    let y0 = y - (j - t);
    let z0 = z - (k - t);

    // Rank the offsets to pick one of the six simplices in the cell.
    let ((i1, j1, k1), (i2, j2, k2)) = if x0 >= y0 {
        if y0 >= z0 {
            ((1, 0, 0), (1, 1, 0))
        } else if x0 >= z0 {
            ((1, 0, 0), (1, 0, 1))
        } else {
            ((0, 0, 1), (1, 0, 1))
        }
    } else if y0 < z0 {
        ((0, 0, 1), (0, 1, 1))
    } else if x0 < z0 {
        ((0, 1, 0), (0, 1, 1))
    } else {
        ((0, 1, 0), (1, 1, 0))
    };

    let x1 = x0 - i1 as f64 + G3;
    let y1 = y0 - j1 as f64 + G3;
    let z1 = z0 - k1 as f64 + G3;
    let x2 = x0 - i2 as f64 + 2.0 * G3;
    let y2 = y0 - j2 as f64 + 2.0 * G3;
    let z2 = z0 - k2 as f64 + 2.0 * G3;
    let x3 = x0 - 1.0 + 3.0 * G3;
    let y3 = y0 - 1.0 + 3.0 * G3;
    let z3 = z0 - 1.0 + 3.0 * G3;

    let (i, j, k) = (lattice(i), lattice(j), lattice(k));
    let n0 = corner(gradient_index(i, j, k), x0, y0, z0);
    let n1 = corner(gradient_index(i + i1, j + j1, k + k1), x1, y1, z1);
    let n2 = corner(gradient_index(i + i2, j + j2, k + k2), x2, y2, z2);
    let n3 = corner(gradient_index(i + 1, j + 1, k + 1), x3, y3, z3);

    (n0 + n1 + n2 + n3) * SCALE
}
