/// Interpolate a single channel at position `t` (0.0-1.0)
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp8(a: u8, b: u8, t: f32) -> u8 {
    let t = t.clamp(0.0, 1.0);
    let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    libm::roundf(value).clamp(0.0, 255.0) as u8
}

/// Floor modulo: the result always lies in `0..modulus`, also for negative `value`.
///
/// The `%` operator truncates toward zero and would yield negative indices
/// for a negative dividend. Returns 0 for an empty modulus.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub const fn floor_mod(value: i64, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    value.rem_euclid(modulus as i64) as usize
}
