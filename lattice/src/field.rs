//! Scalar arithmetic modulo [`Q`](crate::Q).
//!
//! Values are plain `u32` kept canonical in `[0, Q)`; intermediate products
//! are carried in `u64`.

use crate::Q;

#[inline]
pub(crate) const fn reduce(x: u64) -> u32 {
    (x % Q as u64) as u32
}

#[inline]
pub(crate) const fn add(a: u32, b: u32) -> u32 {
    let s = a + b;
    if s >= Q {
        s - Q
    } else {
        s
    }
}

#[inline]
pub(crate) const fn sub(a: u32, b: u32) -> u32 {
    if a < b {
        a + Q - b
    } else {
        a - b
    }
}

#[inline]
pub(crate) const fn neg(a: u32) -> u32 {
    if a == 0 {
        0
    } else {
        Q - a
    }
}

#[inline]
pub(crate) const fn mul(a: u32, b: u32) -> u32 {
    reduce(a as u64 * b as u64)
}

/// Distance of `c` from zero in the symmetric range `(-Q/2, Q/2]`.
#[inline]
pub const fn centered_abs(c: u32) -> u32 {
    if c > (Q - 1) / 2 {
        Q - c
    } else {
        c
    }
}

/// Multiplicative inverse modulo `Q` via Fermat's little theorem.
///
/// Zero has no inverse and is returned unchanged.
pub fn inverse(a: u32) -> u32 {
    if a % Q == 0 {
        return 0;
    }

    let mut result = 1u32;
    let mut base = a % Q;
    let mut exp = Q - 2;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul(result, base);
        }
        base = mul(base, base);
        exp >>= 1;
    }
    result
}
